//! Domain layer: pure value types and the allocation arithmetic. No I/O.

pub mod foundation;
pub mod session;
pub mod split;
