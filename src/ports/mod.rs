//! Ports: contracts between the domain and the outside world.

mod session_store;

pub use session_store::{SessionStore, StoreError};
