//! Host bootstrap for bigcalc processes.
//!
//! - [`config`]: layered application configuration and typed module sections
//! - [`logging`]: `tracing` subscriber initialisation
//! - [`signals`]: Ctrl+C / SIGTERM handling
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod logging;
pub mod signals;

pub use config::{
    AppConfig, ConfigError, ConfigProvider, LogFormat, LoggingConfig, ServerConfig,
    module_config_or_default,
};
pub use logging::init_logging;
pub use signals::{shutdown_token, wait_for_shutdown};
