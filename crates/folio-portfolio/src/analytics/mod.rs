//! Portfolio-level analytics.
//!
//! All functions are pure - they take valued lots and configuration as
//! input and return computed results. No caching, no I/O, no side effects.

mod risk;

pub use risk::*;
