//! Foundation value objects shared across the domain.

mod ids;
mod money;
mod timestamp;

pub use ids::{IdParseError, ItemId, PersonId, ReceiptId, SessionId};
pub use money::{or_zero, round2};
pub use timestamp::Timestamp;
