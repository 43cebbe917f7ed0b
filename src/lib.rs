//! Billsplit - receipt splitting backend
//!
//! Splits itemized receipts across a group: tax and tip are distributed
//! proportionally over items, items are assigned to people, and each
//! person's owed amount is derived. Sessions persist server-side under a
//! TTL with debounced auto-save.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
