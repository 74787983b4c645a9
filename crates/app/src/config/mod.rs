//! Runtime configuration shared by the CLI.

pub mod db;
pub mod logging;

pub use db::DatabaseConfig;
pub use logging::{LogFormat, LoggingConfig};
