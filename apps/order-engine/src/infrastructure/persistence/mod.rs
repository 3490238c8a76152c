//! Persistence adapters.

pub mod in_memory;
