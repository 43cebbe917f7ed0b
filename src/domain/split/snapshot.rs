//! Session snapshot: the exact shape that gets persisted.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PersonId, ReceiptId};
use crate::domain::split::{bill_summary, BillSummary, Person, Receipt};

/// Workflow cursor.
///
/// Carried through persistence verbatim; the core performs no transition
/// validation. The surrounding UI derives valid transitions from the
/// receipt/people state, not the other way around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStep {
    #[default]
    Setup,
    Input,
    Assign,
    Summary,
}

/// Everything a session persists: people, receipts, and the workflow cursor.
///
/// Transient UI state (loading flags, error strings, recognition-in-progress
/// markers) is deliberately not representable here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub people: Vec<Person>,
    pub receipts: Vec<Receipt>,
    pub current_step: WorkflowStep,
}

impl SessionSnapshot {
    /// Adds a person to the session.
    pub fn add_person(mut self, person: Person) -> Self {
        self.people.push(person);
        self
    }

    /// Removes a person and strips their id from every item's assignment
    /// list in every receipt (cascading invariant).
    pub fn remove_person(mut self, person_id: &PersonId) -> Self {
        self.people.retain(|p| p.id() != person_id);
        self.receipts = self
            .receipts
            .into_iter()
            .map(|r| r.unassign_person(person_id))
            .collect();
        self
    }

    /// Appends a receipt.
    pub fn add_receipt(mut self, receipt: Receipt) -> Self {
        self.receipts.push(receipt);
        self
    }

    /// Replaces the receipt with a matching id; unknown ids are a no-op.
    pub fn replace_receipt(mut self, receipt: Receipt) -> Self {
        if let Some(slot) = self.receipts.iter_mut().find(|r| r.id() == receipt.id()) {
            *slot = receipt;
        }
        self
    }

    /// Removes a receipt by id.
    pub fn remove_receipt(mut self, receipt_id: &ReceiptId) -> Self {
        self.receipts.retain(|r| r.id() != receipt_id);
        self
    }

    /// Moves the workflow cursor.
    pub fn with_step(mut self, step: WorkflowStep) -> Self {
        self.current_step = step;
        self
    }

    /// Looks up a receipt by id.
    pub fn receipt(&self, receipt_id: &ReceiptId) -> Option<&Receipt> {
        self.receipts.iter().find(|r| r.id() == receipt_id)
    }

    /// Computes the aggregated summary over all receipts and people.
    pub fn summary(&self) -> BillSummary {
        bill_summary(&self.receipts, &self.people)
    }
}
