//! HTTP adapters.

pub mod session;
