//! Response schema for structured receipt extraction.
//!
//! A plain data-shape contract: field names, types, optionality, and the
//! hint strings that steer the extraction model. Types use the uppercase
//! OpenAPI-subset names the `generateContent` endpoint expects.

use serde_json::{Value, json};

/// JSON schema describing [`Receipt`](crate::models::receipt::Receipt).
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "merchant_name": {
                "type": "STRING",
                "description": "Name of the store/merchant. Return 'Unknown' if not found."
            },
            "merchant_address": {
                "type": "STRING",
                "nullable": true,
                "description": "Full address. Return 'Unknown' if not found."
            },
            "invoice_id": {
                "type": "STRING",
                "nullable": true,
                "description": "Receipt number / Invoice ID."
            },
            "date": {
                "type": "STRING",
                "description": "Transaction date in YYYY-MM-DD format."
            },
            "subtotal": {
                "type": "NUMBER",
                "nullable": true,
                "description": "Total before tax."
            },
            "tax_amount": {
                "type": "NUMBER",
                "nullable": true,
                "description": "Tax amount. Return 0 if not found."
            },
            "total_amount": {
                "type": "NUMBER",
                "description": "The final grand total paid."
            },
            "currency": {
                "type": "STRING",
                "description": "Currency code (e.g., VND, USD)."
            },
            "items": {
                "type": "ARRAY",
                "description": "List of all purchased items.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {
                            "type": "STRING",
                            "description": "Full description of the item."
                        },
                        "quantity": {
                            "type": "NUMBER",
                            "description": "Quantity. If not visible, assume 1."
                        },
                        "unit_price": {
                            "type": "NUMBER",
                            "nullable": true,
                            "description": "Price per unit. Return 0 if not visible."
                        },
                        "total_price": {
                            "type": "NUMBER",
                            "description": "Total line item price."
                        }
                    },
                    "required": ["name", "quantity", "total_price"]
                }
            },
            "category": {
                "type": "STRING",
                "description": "Infer the category (e.g., Food, Taxi, Grocery)."
            }
        },
        "required": [
            "merchant_name",
            "date",
            "total_amount",
            "currency",
            "items",
            "category"
        ]
    })
}
