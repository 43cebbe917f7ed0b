//! Bill-splitting domain: people, receipts, and the allocation arithmetic.

mod bills;
mod menu_item;
mod person;
mod receipt;
mod recognized;
mod snapshot;

pub use bills::{bill_summary, personal_bills, BillLine, BillSummary, PersonalBill};
pub use menu_item::MenuItem;
pub use person::Person;
pub use receipt::Receipt;
pub use recognized::{RecognizedItem, RecognizedReceipt};
pub use snapshot::{SessionSnapshot, WorkflowStep};
