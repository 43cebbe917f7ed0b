//! Adapters: infrastructure implementations of the ports.

pub mod http;
pub mod memory;
pub mod redis;
