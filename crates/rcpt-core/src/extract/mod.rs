//! Remote extraction boundary.
//!
//! The model call is an external collaborator: it accepts an image and a
//! schema description and returns a best-effort structured record, possibly
//! failing or leaving optional fields unpopulated. Everything behind the
//! [`ReceiptExtractor`] seam is replaceable, and tests use a mock.

mod gemini;
pub mod schema;

pub use gemini::GeminiExtractor;

use std::path::Path;

use crate::error::{ExtractionError, RcptError, Result};
use crate::models::receipt::Receipt;

/// An in-memory image ready to be sent to the extraction model.
#[derive(Debug, Clone)]
pub struct ImageInput {
    bytes: Vec<u8>,
    mime_type: &'static str,
}

impl ImageInput {
    /// Build from raw bytes, detecting the format from content.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&bytes)?;
        let mime_type = match format {
            image::ImageFormat::Png => "image/png",
            image::ImageFormat::Jpeg => "image/jpeg",
            image::ImageFormat::WebP => "image/webp",
            other => return Err(RcptError::UnsupportedImage(format!("{other:?}"))),
        };
        Ok(Self { bytes, mime_type })
    }

    /// Read and detect an image file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    /// Raw image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Detected MIME type, e.g. `image/jpeg`.
    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }
}

/// Abstraction over the remote extraction collaborator.
pub trait ReceiptExtractor {
    /// Extract a structured receipt record from an image.
    ///
    /// `Ok(None)` means the model answered but produced no usable record;
    /// callers route that into the evaluator's no-data path.
    fn process(
        &self,
        image: &ImageInput,
    ) -> impl Future<Output = std::result::Result<Option<Receipt>, ExtractionError>>;
}

/// Returns a pre-set record — used to test the pipeline seam without a
/// network dependency.
pub struct MockExtractor {
    pub record: Option<Receipt>,
}

impl MockExtractor {
    pub fn new(record: Option<Receipt>) -> Self {
        Self { record }
    }
}

impl ReceiptExtractor for MockExtractor {
    async fn process(
        &self,
        _image: &ImageInput,
    ) -> std::result::Result<Option<Receipt>, ExtractionError> {
        Ok(self.record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    const JPEG_MAGIC: &[u8] = &[0xff, 0xd8, 0xff, 0xe0];

    #[test]
    fn detects_mime_type_from_content() {
        let png = ImageInput::from_bytes(PNG_MAGIC.to_vec()).unwrap();
        assert_eq!(png.mime_type(), "image/png");

        let jpeg = ImageInput::from_bytes(JPEG_MAGIC.to_vec()).unwrap();
        assert_eq!(jpeg.mime_type(), "image/jpeg");
        assert_eq!(jpeg.bytes(), JPEG_MAGIC);
    }

    #[test]
    fn rejects_formats_the_api_does_not_take() {
        let bmp = b"BM\x00\x00\x00\x00".to_vec();
        assert!(matches!(
            ImageInput::from_bytes(bmp),
            Err(RcptError::UnsupportedImage(_))
        ));
    }

    #[test]
    fn rejects_non_image_bytes() {
        assert!(matches!(
            ImageInput::from_bytes(b"not an image".to_vec()),
            Err(RcptError::Image(_))
        ));
    }

    #[tokio::test]
    async fn mock_extractor_returns_the_preset_record() {
        let image = ImageInput::from_bytes(PNG_MAGIC.to_vec()).unwrap();

        let record = Receipt {
            merchant_name: "Acme Store".to_string(),
            ..Receipt::default()
        };
        let extractor = MockExtractor::new(Some(record.clone()));
        assert_eq!(extractor.process(&image).await.unwrap(), Some(record));

        let empty = MockExtractor::new(None);
        assert_eq!(empty.process(&image).await.unwrap(), None);
    }
}
