//! Calculator module definition
//!
//! Owns the module configuration and the domain service, and exposes them
//! to the host as a client handle and a set of REST routes.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use calc_bootstrap::{ConfigProvider, module_config_or_default};
use calculator_sdk::CalculatorClientV1;

use crate::api::rest::{ApiState, register_routes};
use crate::config::CalculatorConfig;
use crate::domain::Service;
use crate::local_client::CalculatorLocalClient;

/// Calculator module.
pub struct CalculatorModule {
    config: CalculatorConfig,
    service: Arc<Service>,
}

impl CalculatorModule {
    /// Key of this module under `modules:` in the application config.
    pub const NAME: &'static str = "calculator";

    /// Load and validate configuration, then build the domain service.
    ///
    /// # Errors
    /// Returns an error if the `modules.calculator.config` section is present
    /// but malformed, or fails validation.
    pub fn init(provider: &dyn ConfigProvider) -> Result<Self> {
        tracing::info!("Initializing calculator module");

        let config: CalculatorConfig = module_config_or_default(provider, Self::NAME)
            .context("failed to load calculator configuration")?;
        config.validate()?;

        tracing::debug!(
            title = %config.title,
            max_operand_len = config.max_operand_len,
            "calculator configuration loaded"
        );

        let service = Arc::new(Service::new(&config));

        tracing::info!("calculator module initialized");
        Ok(Self { config, service })
    }

    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// In-process client for other components of the host.
    #[must_use]
    pub fn client(&self) -> Arc<dyn CalculatorClientV1> {
        Arc::new(CalculatorLocalClient::new(Arc::clone(&self.service)))
    }

    #[must_use]
    pub fn register_rest(&self, router: Router) -> Router {
        tracing::info!("Registering calculator REST routes");

        let state = ApiState {
            client: self.client(),
            title: self.config.title.clone(),
        };
        register_routes(router, state)
    }
}
