//! Shared utilities for the portfolio agents workspace
//!
//! Logging setup and environment-driven application settings used by the
//! binaries and the domain crates.

pub mod config;
pub mod logging;

pub use config::{Config, LogFormat};
pub use logging::{init_from_config, init_tracing_with};
