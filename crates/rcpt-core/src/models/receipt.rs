//! Receipt data model produced by the extraction collaborator.
//!
//! A [`Receipt`] is created once by an extractor and read-only afterwards;
//! the evaluator and renderer borrow it and never mutate. The serde form is
//! the interchange format between the core and any shell or storage layer:
//! snake_case keys, items as a nested JSON array.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel for string fields the model could not find.
pub const UNKNOWN: &str = "Unknown";

/// A single purchased line item, in receipt appearance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    /// Full description of the item.
    pub name: String,

    /// Quantity; assumed 1 when the receipt does not show one.
    #[serde(default = "default_quantity")]
    pub quantity: Decimal,

    /// Price per unit; absent when not visible on the receipt.
    #[serde(default)]
    pub unit_price: Option<Decimal>,

    /// Total line item price.
    #[serde(default)]
    pub total_price: Decimal,
}

fn default_quantity() -> Decimal {
    Decimal::ONE
}

/// A structured receipt extraction result.
///
/// Missing numeric fields on the wire deserialize to zero so downstream
/// checks degrade to failing instead of erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Name of the store/merchant; `"Unknown"` when not found.
    pub merchant_name: String,

    /// Full merchant address.
    #[serde(default)]
    pub merchant_address: Option<String>,

    /// Receipt number / invoice ID.
    #[serde(default)]
    pub invoice_id: Option<String>,

    /// Transaction date in `YYYY-MM-DD` form. Not validated by the core.
    #[serde(default)]
    pub date: String,

    /// Total before tax.
    #[serde(default)]
    pub subtotal: Option<Decimal>,

    /// Tax amount.
    #[serde(default)]
    pub tax_amount: Option<Decimal>,

    /// The final grand total paid.
    #[serde(default)]
    pub total_amount: Decimal,

    /// Currency code (e.g. "VND", "USD").
    #[serde(default = "default_currency")]
    pub currency: String,

    /// All purchased items, in appearance order.
    #[serde(default)]
    pub items: Vec<ReceiptItem>,

    /// Inferred spending category (e.g. Food, Taxi, Grocery).
    #[serde(default)]
    pub category: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Receipt {
    /// Sum of all line item totals.
    pub fn items_sum(&self) -> Decimal {
        self.items.iter().map(|i| i.total_price).sum()
    }
}

impl Default for Receipt {
    fn default() -> Self {
        Self {
            merchant_name: UNKNOWN.to_string(),
            merchant_address: None,
            invoice_id: None,
            date: String::new(),
            subtotal: None,
            tax_amount: None,
            total_amount: Decimal::ZERO,
            currency: default_currency(),
            items: Vec::new(),
            category: String::new(),
        }
    }
}
