//! Infrastructure layer: driver and driven adapters.

pub mod http;
pub mod persistence;
