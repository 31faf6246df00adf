//! Shared utilities for the chorus workspace.

pub mod logging;

pub use logging::{init_tracing, init_tracing_with, try_init_tracing, LogFormat};
