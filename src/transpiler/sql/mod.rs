//! Dialect implementations.

pub mod generic;
pub mod spanner;
