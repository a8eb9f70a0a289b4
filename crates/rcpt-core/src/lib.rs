//! Core library for receipt data extraction.
//!
//! This crate provides:
//! - The receipt data model shared by extraction, validation, and rendering
//! - A structured-output client for a vision-capable extraction model
//! - Rule-based consistency checks producing a PASS/FAIL verdict
//! - Fixed-width text rendering for terminal display

pub mod error;
pub mod eval;
pub mod extract;
pub mod models;
pub mod money;
pub mod render;

pub use error::{ExtractionError, RcptError, Result};
pub use eval::{Report, RuleCheck, Verdict, validate};
pub use extract::{GeminiExtractor, ImageInput, MockExtractor, ReceiptExtractor};
pub use models::config::RcptConfig;
pub use models::receipt::{Receipt, ReceiptItem};
pub use render::render;
