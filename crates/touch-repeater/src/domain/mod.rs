//! Domain layer: pure types for configuration and route parsing (no I/O).

pub mod config;
pub mod route;

pub use config::{ConfigError, FileConfig, RepeaterConfig};
pub use route::Route;
