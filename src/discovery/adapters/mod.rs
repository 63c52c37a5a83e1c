//! Adapter implementations for discovery ports.

pub mod memory;
