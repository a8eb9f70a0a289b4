//! Gemini structured-output client for receipt extraction.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::models::config::RcptConfig;
use crate::models::receipt::Receipt;

use super::schema::response_schema;
use super::{ImageInput, ReceiptExtractor};

/// Client for the `generateContent` endpoint with a JSON response schema.
///
/// One request per image, no retries; the caller decides how to surface
/// failures.
pub struct GeminiExtractor {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
    prompt: String,
    default_currency: String,
}

impl GeminiExtractor {
    /// Build a client from configuration and an API key.
    pub fn new(
        config: &RcptConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, ExtractionError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ExtractionError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: config.api.model.clone(),
            endpoint: config.api.endpoint.clone(),
            prompt: config.extraction.prompt.clone(),
            default_currency: config.extraction.default_currency.clone(),
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

/// Minimal view of a `generateContent` response.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// First candidate text in the response, if any.
fn candidate_text(body: GenerateContentResponse) -> Option<String> {
    body.candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .find_map(|p| p.text)
}

impl ReceiptExtractor for GeminiExtractor {
    async fn process(
        &self,
        image: &ImageInput,
    ) -> Result<Option<Receipt>, ExtractionError> {
        let payload = json!({
            "contents": [{
                "parts": [
                    { "text": self.prompt },
                    { "inline_data": {
                        "mime_type": image.mime_type(),
                        "data": BASE64.encode(image.bytes()),
                    }},
                ]
            }],
            "generationConfig": {
                "response_mime_type": "application/json",
                "response_schema": response_schema(),
            },
        });

        debug!(model = %self.model, "sending extraction request");

        let response = self
            .client
            .post(self.request_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Api { status: status.as_u16(), message });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::MalformedResponse(e.to_string()))?;

        let Some(text) = candidate_text(body) else {
            warn!("model response carried no candidate text");
            return Ok(None);
        };

        let mut receipt: Receipt = serde_json::from_str(&text)
            .map_err(|e| ExtractionError::MalformedResponse(e.to_string()))?;

        // The record is still ours here; normalize before handing it out.
        if receipt.currency.is_empty() {
            receipt.currency = self.default_currency.clone();
        }

        debug!(
            merchant = %receipt.merchant_name,
            items = receipt.items.len(),
            "extraction complete"
        );

        Ok(Some(receipt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn request_url_joins_endpoint_and_model() {
        let mut config = RcptConfig::default();
        config.api.endpoint = "https://generativelanguage.googleapis.com/v1beta/".to_string();
        config.api.model = "gemini-2.5-flash".to_string();

        let extractor = GeminiExtractor::new(&config, "test-key").unwrap();
        assert_eq!(
            extractor.request_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let config = RcptConfig::default();
        assert!(matches!(
            GeminiExtractor::new(&config, ""),
            Err(ExtractionError::MissingApiKey)
        ));
    }

    #[test]
    fn candidate_text_takes_the_first_text_part() {
        let body: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "{\"merchant_name\": \"Acme\"}" }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(
            candidate_text(body),
            Some("{\"merchant_name\": \"Acme\"}".to_string())
        );
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let body: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(candidate_text(body), None);
    }
}
