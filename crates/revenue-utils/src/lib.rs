//! Shared utilities for revenue-rs
//!
//! Currently this is the tracing setup used by the binaries and by tests that
//! want log output.

pub mod logging;

pub use logging::{init_tracing, init_tracing_with, try_init_tracing};
