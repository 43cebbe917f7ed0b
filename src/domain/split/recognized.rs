//! Recognized-receipt contract.
//!
//! The OCR pipeline is an external collaborator; its output arrives as this
//! structured payload and is folded into a receipt through the same engine
//! operations manual entry uses. Nothing downstream can tell the two apart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::or_zero;
use crate::domain::split::Receipt;

/// One recognized line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedItem {
    pub name: String,
    /// `None` when the recognizer saw the item but not its price.
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Structured result from the external image recognition service.
///
/// The recognizer's own `subtotal`/`total` are hints only; the engine
/// recomputes both from the items it accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedReceipt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    pub items: Vec<RecognizedItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
    pub confidence: f64,
}

impl RecognizedReceipt {
    /// Folds this result into a receipt via `add_item` and
    /// `update_tax_and_tip`.
    ///
    /// Items with blank names are skipped (the caller-side validation the
    /// engine relies on for manual entry, applied here at the boundary).
    /// Missing tax/tip recognize as zero.
    pub fn fold_into(self, receipt: Receipt) -> Receipt {
        let mut receipt = self
            .items
            .into_iter()
            .filter(|item| !item.name.trim().is_empty())
            .fold(receipt, |r, item| r.add_item(item.name, item.price));
        if self.tax.is_some() || self.tip.is_some() {
            receipt = receipt.update_tax_and_tip(or_zero(self.tax), or_zero(self.tip));
        }
        receipt
    }

    /// Starts a fresh receipt named after the recognized business.
    pub fn into_receipt(self) -> Receipt {
        let name = self
            .business_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Receipt".to_string());
        self.fold_into(Receipt::new(name))
    }
}
