//! Wiring for fhirdoc: configuration, logging and the application state
//! shared by the `fhirdoc` binary.

pub mod config;
pub mod observability;
pub mod state;

pub use config::AppConfig;
pub use observability::{apply_logging_level, init_tracing_with_level};
pub use state::{AppState, StartupError};
