//! Application layer: orchestration between the domain and the ports.

mod coordinator;

pub use coordinator::{SessionCoordinator, DEFAULT_DEBOUNCE};
