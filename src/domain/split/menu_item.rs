//! Menu item value object.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{or_zero, ItemId, PersonId, Timestamp};

/// One line on a receipt.
///
/// `original_price` is `None` while the price is still pending (manual or
/// OCR input). `final_price` is derived by the receipt's redistribution and
/// is never negative; unpriced items always carry a zero final price.
///
/// A menu item belongs to exactly one receipt and is never shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    id: ItemId,
    name: String,
    original_price: Option<Decimal>,
    final_price: Decimal,
    assigned_to: Vec<PersonId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl MenuItem {
    /// Creates an item with a fresh id and no assignees.
    ///
    /// The final price starts equal to the original price (or zero); the
    /// owning receipt's redistribution overwrites it immediately.
    pub fn new(name: impl Into<String>, original_price: Option<Decimal>) -> Self {
        let now = Timestamp::now();
        Self {
            id: ItemId::new(),
            name: name.into(),
            final_price: or_zero(original_price),
            original_price,
            assigned_to: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the item id.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Returns the item name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw price as entered, if any.
    pub fn original_price(&self) -> Option<Decimal> {
        self.original_price
    }

    /// Returns the price including this item's tax/tip share.
    pub fn final_price(&self) -> Decimal {
        self.final_price
    }

    /// Returns the ids of the people sharing this item.
    pub fn assigned_to(&self) -> &[PersonId] {
        &self.assigned_to
    }

    /// Returns when the item was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the item was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Replaces the assignment set verbatim, dropping duplicates.
    ///
    /// No existence check against the person registry happens here; the
    /// session snapshot enforces that invariant when people are removed.
    pub(crate) fn set_assignment(&mut self, person_ids: Vec<PersonId>) {
        let mut deduped: Vec<PersonId> = Vec::with_capacity(person_ids.len());
        for id in person_ids {
            if !deduped.contains(&id) {
                deduped.push(id);
            }
        }
        self.assigned_to = deduped;
        self.updated_at = Timestamp::now();
    }

    /// Removes one person from the assignment set, if present.
    pub(crate) fn unassign(&mut self, person_id: &PersonId) {
        if self.assigned_to.contains(person_id) {
            self.assigned_to.retain(|id| id != person_id);
            self.updated_at = Timestamp::now();
        }
    }

    /// Overwrites the derived final price.
    pub(crate) fn set_final_price(&mut self, final_price: Decimal) {
        self.final_price = final_price;
    }
}
