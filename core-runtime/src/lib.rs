//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the workspace:
//! - Logging and tracing infrastructure
//! - Configuration management and session wiring
//!
//! Other crates stay free of global setup; hosts call [`logging::init_logging`]
//! once at startup and assemble everything else through [`config::CoreConfig`].

pub mod config;
pub mod error;
pub mod logging;

pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
