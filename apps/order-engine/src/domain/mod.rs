//! Domain layer: bounded contexts with no infrastructure dependencies.

pub mod access;
pub mod catalog;
pub mod notifications;
pub mod ordering;
pub mod production;
pub mod shared;
