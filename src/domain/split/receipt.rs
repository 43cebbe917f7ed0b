//! Receipt value object and the allocation arithmetic.
//!
//! A receipt is an immutable-shaped value: every operation consumes the
//! receipt and returns a rebuilt one with all derived fields recomputed.
//! There is no in-place mutation across operation boundaries, which keeps
//! the arithmetic trivially testable and free of aliasing bugs.
//!
//! # Redistribution
//!
//! Tax and tip are spread across priced items proportionally to each item's
//! share of the subtotal:
//!
//! ```text
//! ratio       = original_price / subtotal
//! final_price = round2(original_price + tax * ratio + tip * ratio)
//! ```
//!
//! When the subtotal is zero there is no base to ratio against, so every
//! priced item keeps `final_price == original_price` and the tax/tip simply
//! show up in `total`. Unpriced items always get a zero final price and are
//! excluded from the ratio base.
//!
//! Per-item rounding means the sum of final prices can drift from the total
//! by up to one cent per item. There is deliberately no last-cent
//! reconciliation step; callers treating the books as penny-exact should
//! compare against the `0.01 * item_count` tolerance instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{or_zero, round2, ItemId, PersonId, ReceiptId, Timestamp};
use crate::domain::split::MenuItem;

/// One itemized receipt.
///
/// # Invariants
///
/// - `subtotal == Σ original_price` (missing prices count as zero)
/// - `total == subtotal + tax + tip`
/// - every item's `final_price` is consistent with the redistribution above
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    id: ReceiptId,
    name: String,
    items: Vec<MenuItem>,
    subtotal: Decimal,
    tax: Decimal,
    tip: Decimal,
    total: Decimal,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Receipt {
    /// Creates an empty receipt with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: ReceiptId::new(),
            name: name.into(),
            items: Vec::new(),
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            tip: Decimal::ZERO,
            total: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the receipt id.
    pub fn id(&self) -> &ReceiptId {
        &self.id
    }

    /// Returns the receipt name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the items in display order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Returns the sum of entered prices.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Returns the user-supplied tax.
    pub fn tax(&self) -> Decimal {
        self.tax
    }

    /// Returns the user-supplied tip.
    pub fn tip(&self) -> Decimal {
        self.tip
    }

    /// Returns `subtotal + tax + tip`.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Returns when the receipt was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the receipt was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Looks up an item by id.
    pub fn item(&self, item_id: &ItemId) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.id() == item_id)
    }

    /// Appends an item and recomputes all derived fields.
    ///
    /// A `None` price means "pending"; the item contributes nothing to the
    /// subtotal until a price arrives. Empty names and negative prices are
    /// the caller's job to reject before getting here.
    pub fn add_item(mut self, name: impl Into<String>, price: Option<Decimal>) -> Self {
        self.items.push(MenuItem::new(name, price));
        self.touch();
        self.recompute()
    }

    /// Removes an item by id and recomputes all derived fields.
    ///
    /// Removing an unknown id returns the receipt unchanged.
    pub fn remove_item(mut self, item_id: &ItemId) -> Self {
        let before = self.items.len();
        self.items.retain(|i| i.id() != item_id);
        if self.items.len() == before {
            return self;
        }
        self.touch();
        self.recompute()
    }

    /// Sets tax and tip, then redistributes them across items.
    ///
    /// Calling twice with identical arguments yields identical monetary
    /// fields both times.
    pub fn update_tax_and_tip(mut self, tax: Decimal, tip: Decimal) -> Self {
        self.tax = tax;
        self.tip = tip;
        self.touch();
        self.recompute()
    }

    /// Replaces one item's assignment set verbatim.
    ///
    /// Not additive: the previous set is discarded. Assignments do not
    /// affect any monetary field, so no redistribution happens here.
    pub fn update_item_assignment(mut self, item_id: &ItemId, person_ids: Vec<PersonId>) -> Self {
        if let Some(item) = self.items.iter_mut().find(|i| i.id() == item_id) {
            item.set_assignment(person_ids);
            self.touch();
        }
        self
    }

    /// Strips a person from every item's assignment set.
    pub(crate) fn unassign_person(mut self, person_id: &PersonId) -> Self {
        for item in &mut self.items {
            item.unassign(person_id);
        }
        self
    }

    /// Recomputes subtotal, total, and every item's final price.
    fn recompute(mut self) -> Self {
        self.subtotal = self
            .items
            .iter()
            .map(|i| or_zero(i.original_price()))
            .sum();
        self.total = self.subtotal + self.tax + self.tip;

        let extras = self.tax + self.tip;
        for item in &mut self.items {
            let final_price = match item.original_price() {
                None => Decimal::ZERO,
                Some(price) if self.subtotal.is_zero() => price,
                Some(price) => {
                    let ratio = price / self.subtotal;
                    round2(price + extras * ratio)
                }
            };
            item.set_final_price(final_price);
        }
        self
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_receipt() -> Receipt {
        Receipt::new("Dinner")
            .add_item("Pasta", Some(dec!(10.00)))
            .add_item("Steak", Some(dec!(20.00)))
            .update_tax_and_tip(dec!(3.00), dec!(6.00))
    }

    #[test]
    fn subtotal_tracks_entered_prices() {
        let receipt = sample_receipt();
        assert_eq!(receipt.subtotal(), dec!(30.00));
        assert_eq!(receipt.total(), dec!(39.00));
    }

    #[test]
    fn redistribution_spreads_tax_and_tip_proportionally() {
        let receipt = sample_receipt();
        assert_eq!(receipt.items()[0].final_price(), dec!(13.00));
        assert_eq!(receipt.items()[1].final_price(), dec!(26.00));
    }

    #[test]
    fn unpriced_items_are_excluded_from_the_ratio_base() {
        let receipt = sample_receipt().add_item("Pending", None);
        assert_eq!(receipt.subtotal(), dec!(30.00));
        assert_eq!(receipt.items()[2].final_price(), Decimal::ZERO);
        // Priced items are untouched by the unpriced addition.
        assert_eq!(receipt.items()[0].final_price(), dec!(13.00));
    }

    #[test]
    fn zero_subtotal_forces_final_prices_to_original() {
        let receipt = Receipt::new("Freebies")
            .add_item("Water", Some(dec!(0.00)))
            .add_item("Pending", None)
            .update_tax_and_tip(dec!(2.00), dec!(1.00));
        assert_eq!(receipt.subtotal(), Decimal::ZERO);
        assert_eq!(receipt.total(), dec!(3.00));
        assert_eq!(receipt.items()[0].final_price(), dec!(0.00));
        assert_eq!(receipt.items()[1].final_price(), Decimal::ZERO);
    }

    #[test]
    fn remove_item_recomputes_and_redistributes() {
        let receipt = sample_receipt();
        let steak_id = receipt.items()[1].id().clone();
        let receipt = receipt.remove_item(&steak_id);
        assert_eq!(receipt.items().len(), 1);
        assert_eq!(receipt.subtotal(), dec!(10.00));
        assert_eq!(receipt.total(), dec!(19.00));
        // Lone item absorbs the whole tax and tip.
        assert_eq!(receipt.items()[0].final_price(), dec!(19.00));
    }

    #[test]
    fn remove_unknown_item_is_a_no_op() {
        let receipt = sample_receipt();
        let before = receipt.clone();
        let after = receipt.remove_item(&ItemId::from("nope"));
        assert_eq!(before, after);
    }

    #[test]
    fn update_tax_and_tip_is_idempotent_on_monetary_fields() {
        let once = sample_receipt();
        let twice = once.clone().update_tax_and_tip(dec!(3.00), dec!(6.00));
        assert_eq!(once.subtotal(), twice.subtotal());
        assert_eq!(once.total(), twice.total());
        for (a, b) in once.items().iter().zip(twice.items()) {
            assert_eq!(a.final_price(), b.final_price());
        }
    }

    #[test]
    fn assignment_replacement_does_not_touch_prices() {
        let receipt = sample_receipt();
        let item_id = receipt.items()[0].id().clone();
        let receipt =
            receipt.update_item_assignment(&item_id, vec![PersonId::from("a"), PersonId::from("b")]);
        assert_eq!(receipt.items()[0].assigned_to().len(), 2);
        assert_eq!(receipt.items()[0].final_price(), dec!(13.00));
    }

    #[test]
    fn assignment_on_unknown_item_is_a_no_op() {
        let receipt = sample_receipt();
        let receipt = receipt.update_item_assignment(&ItemId::from("nope"), vec![PersonId::from("a")]);
        assert!(receipt.items().iter().all(|i| i.assigned_to().is_empty()));
    }

    #[test]
    fn final_price_sum_stays_within_tolerance_of_total() {
        // Three-way odd split: 10/3 style ratios force per-item rounding.
        let receipt = Receipt::new("Odd")
            .add_item("A", Some(dec!(3.33)))
            .add_item("B", Some(dec!(3.33)))
            .add_item("C", Some(dec!(3.34)))
            .update_tax_and_tip(dec!(1.00), dec!(2.00));
        let sum: Decimal = receipt.items().iter().map(|i| i.final_price()).sum();
        let tolerance = dec!(0.01) * Decimal::from(receipt.items().len());
        assert!((sum - receipt.total()).abs() <= tolerance);
    }

    #[test]
    fn serde_round_trip_preserves_receipt() {
        let receipt = sample_receipt();
        let json = serde_json::to_string(&receipt).unwrap();
        let back: Receipt = serde_json::from_str(&json).unwrap();
        assert_eq!(receipt, back);
    }

    #[test]
    fn serde_uses_camel_case_wire_names() {
        let json = serde_json::to_value(sample_receipt()).unwrap();
        assert!(json.get("subtotal").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
