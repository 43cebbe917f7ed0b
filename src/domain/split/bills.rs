//! Per-person bill derivation.
//!
//! Personal bills and the session-wide summary are pure views recomputed on
//! demand. They are never persisted; `created_at` on the summary marks
//! computation time only.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{or_zero, round2, ItemId, PersonId, Timestamp};
use crate::domain::split::{Person, Receipt};

/// One shared item on a person's bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLine {
    pub item_id: ItemId,
    pub item_name: String,
    /// Number of people splitting the item.
    pub share: u32,
    pub original_share: Decimal,
    pub final_share: Decimal,
}

/// Everything one person owes, across one or more receipts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalBill {
    pub person_id: PersonId,
    pub person_name: String,
    pub items: Vec<BillLine>,
    pub original_total: Decimal,
    pub final_total: Decimal,
}

impl PersonalBill {
    fn empty(person: &Person) -> Self {
        Self {
            person_id: person.id().clone(),
            person_name: person.name().to_string(),
            items: Vec::new(),
            original_total: Decimal::ZERO,
            final_total: Decimal::ZERO,
        }
    }

    fn push(&mut self, line: BillLine) {
        self.original_total += line.original_share;
        self.final_total += line.final_share;
        self.items.push(line);
    }
}

/// Aggregate over all receipts and all people in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub tip: Decimal,
    pub total: Decimal,
    pub personal_bills: Vec<PersonalBill>,
    /// When this summary was computed, not when anything was persisted.
    pub created_at: Timestamp,
}

/// Derives each person's bill for a single receipt.
///
/// An item split N ways contributes `round2(price / N)` to each assignee.
/// Items with an empty assignment set contribute to nobody; the workflow is
/// expected to prevent that before the summary step, but it is not an error
/// here. People with no items get an empty bill with zero totals.
pub fn personal_bills(receipt: &Receipt, people: &[Person]) -> Vec<PersonalBill> {
    people
        .iter()
        .map(|person| {
            let mut bill = PersonalBill::empty(person);
            for item in receipt.items() {
                let assignees = item.assigned_to();
                if !assignees.contains(person.id()) {
                    continue;
                }
                let share = assignees.len() as u32;
                let divisor = Decimal::from(share);
                bill.push(BillLine {
                    item_id: item.id().clone(),
                    item_name: item.name().to_string(),
                    share,
                    original_share: round2(or_zero(item.original_price()) / divisor),
                    final_share: round2(item.final_price() / divisor),
                });
            }
            bill
        })
        .collect()
}

/// Merges per-receipt personal bills by person and sums receipt aggregates.
pub fn bill_summary(receipts: &[Receipt], people: &[Person]) -> BillSummary {
    let mut merged: Vec<PersonalBill> = people.iter().map(PersonalBill::empty).collect();

    for receipt in receipts {
        for (slot, bill) in merged.iter_mut().zip(personal_bills(receipt, people)) {
            for line in bill.items {
                slot.push(line);
            }
        }
    }

    BillSummary {
        subtotal: receipts.iter().map(Receipt::subtotal).sum(),
        tax: receipts.iter().map(Receipt::tax).sum(),
        tip: receipts.iter().map(Receipt::tip).sum(),
        total: receipts.iter().map(Receipt::total).sum(),
        personal_bills: merged,
        created_at: Timestamp::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn people() -> Vec<Person> {
        vec![Person::new("Ada", "#f00"), Person::new("Bo", "#0f0")]
    }

    fn assigned_receipt(people: &[Person]) -> Receipt {
        let receipt = Receipt::new("Dinner")
            .add_item("Pasta", Some(dec!(10.00)))
            .add_item("Steak", Some(dec!(20.00)))
            .update_tax_and_tip(dec!(3.00), dec!(6.00));
        let pasta = receipt.items()[0].id().clone();
        let steak = receipt.items()[1].id().clone();
        receipt
            .update_item_assignment(&pasta, vec![people[0].id().clone(), people[1].id().clone()])
            .update_item_assignment(&steak, vec![people[1].id().clone()])
    }

    #[test]
    fn two_way_split_halves_the_final_price() {
        let people = people();
        let receipt = assigned_receipt(&people);
        let bills = personal_bills(&receipt, &people);

        // Pasta: final 13.00 split two ways.
        assert_eq!(bills[0].items.len(), 1);
        assert_eq!(bills[0].items[0].share, 2);
        assert_eq!(bills[0].items[0].final_share, dec!(6.50));
        assert_eq!(bills[0].items[0].original_share, dec!(5.00));
        assert_eq!(bills[0].final_total, dec!(6.50));
    }

    #[test]
    fn sole_assignee_owes_the_whole_item() {
        let people = people();
        let receipt = assigned_receipt(&people);
        let bills = personal_bills(&receipt, &people);

        // Bo: half the pasta plus all of the steak (26.00).
        assert_eq!(bills[1].items.len(), 2);
        assert_eq!(bills[1].final_total, dec!(32.50));
        assert_eq!(bills[1].original_total, dec!(25.00));
    }

    #[test]
    fn unassigned_items_contribute_to_nobody() {
        let people = people();
        let receipt = Receipt::new("Dinner")
            .add_item("Orphan", Some(dec!(9.99)))
            .update_tax_and_tip(dec!(1.00), Decimal::ZERO);
        let bills = personal_bills(&receipt, &people);
        assert!(bills.iter().all(|b| b.items.is_empty()));
        assert!(bills.iter().all(|b| b.final_total.is_zero()));
    }

    #[test]
    fn summary_merges_bills_across_receipts_by_person() {
        let people = people();
        let lunch = assigned_receipt(&people);
        let dinner = assigned_receipt(&people);
        let summary = bill_summary(&[lunch, dinner], &people);

        assert_eq!(summary.subtotal, dec!(60.00));
        assert_eq!(summary.tax, dec!(6.00));
        assert_eq!(summary.tip, dec!(12.00));
        assert_eq!(summary.total, dec!(78.00));

        assert_eq!(summary.personal_bills.len(), 2);
        assert_eq!(summary.personal_bills[0].final_total, dec!(13.00));
        assert_eq!(summary.personal_bills[1].final_total, dec!(65.00));
        assert_eq!(summary.personal_bills[1].items.len(), 4);
    }

    #[test]
    fn summary_over_no_receipts_is_all_zeros() {
        let people = people();
        let summary = bill_summary(&[], &people);
        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.personal_bills.len(), 2);
        assert!(summary.personal_bills.iter().all(|b| b.items.is_empty()));
    }
}
