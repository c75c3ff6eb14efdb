//! Layered application configuration.
//!
//! Sources are merged in order, later ones winning:
//! 1. compiled-in defaults
//! 2. YAML file (`--config`)
//! 3. environment variables prefixed with `APP__` (`__` separates nesting levels)
//! 4. CLI overrides applied by the binary
//!
//! Module sections live under `modules.<name>.config` and are decoded lazily by
//! the owning module through [`module_config_or_default`].
//!
//! Environment values are parsed before merging, so a numeric-looking value
//! such as `APP__MODULES__CALCULATOR__CONFIG__TITLE=2024` lands in the raw
//! section as a number. Module configs that hold free text accept scalars for
//! their string fields.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides, e.g. `APP__SERVER__BIND_ADDR`.
pub const ENV_PREFIX: &str = "APP__";

/// Configuration error for loading and typed section access
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config file does not exist: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("failed to parse configuration")]
    Parse(#[from] Box<figment::Error>),
    #[error("invalid config for module '{module}'")]
    InvalidConfig {
        module: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Provider of module-specific configuration (raw JSON sections only).
pub trait ConfigProvider: Send + Sync {
    /// Returns the raw section for the module, if any.
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value>;
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub body_limit_bytes: usize,
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_owned(),
            body_limit_bytes: 1024 * 1024,
            request_timeout_ms: 30_000,
        }
    }
}

impl ServerConfig {
    /// Replace the port of `bind_addr`, keeping the host part.
    pub fn set_port(&mut self, port: u16) {
        let host = self
            .bind_addr
            .rsplit_once(':')
            .map_or(self.bind_addr.as_str(), |(host, _)| host);
        self.bind_addr = format!("{host}:{port}");
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `calculator=debug,info`.
    pub level: String,
    pub format: LogFormat,
    /// Log file path. When unset, logs go to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
            file: None,
        }
    }
}

/// Effective application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub modules: BTreeMap<String, serde_json::Value>,
}

impl AppConfig {
    /// Load defaults, then the YAML file (if given), then `APP__*` env vars.
    ///
    /// # Errors
    /// Returns [`ConfigError::FileNotFound`] if `path` is given but is not a file,
    /// and [`ConfigError::Parse`] if any source fails to parse or merge.
    pub fn load_layered(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Self = figment.extract().map_err(Box::new)?;
        tracing::debug!(
            file = ?path,
            modules = config.modules.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Apply the port override from the command line.
    pub fn apply_cli_overrides(&mut self, port: Option<u16>) {
        if let Some(port) = port {
            self.server.set_port(port);
        }
    }

    /// Render as YAML for `--print-config` and `check`.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        serde_saphyr::to_string(self).context("failed to serialize configuration to YAML")
    }
}

impl ConfigProvider for AppConfig {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.modules.get(module_name)
    }
}

/// Lenient loader: missing module, non-object module or missing `config`
/// all yield `T::default()`.
///
/// # Errors
/// Returns [`ConfigError::InvalidConfig`] if the `config` section exists but
/// cannot be deserialized into `T`.
pub fn module_config_or_default<T: DeserializeOwned + Default>(
    provider: &dyn ConfigProvider,
    module_name: &str,
) -> Result<T, ConfigError> {
    let Some(section) = provider
        .get_module_config(module_name)
        .and_then(serde_json::Value::as_object)
        .and_then(|obj| obj.get("config"))
    else {
        return Ok(T::default());
    };

    serde_json::from_value(section.clone()).map_err(|source| ConfigError::InvalidConfig {
        module: module_name.to_owned(),
        source,
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use figment::Jail;
    use serde_json::json;
    use std::io::Write;

    #[derive(Debug, PartialEq, Deserialize, Default)]
    struct TestConfig {
        #[serde(default)]
        title: String,
        #[serde(default)]
        limit: usize,
    }

    fn write_yaml(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = AppConfig::load_layered(None).unwrap();
            assert_eq!(config.server, ServerConfig::default());
            assert_eq!(config.logging.level, "info");
            assert!(config.modules.is_empty());
            Ok(())
        });
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let file = write_yaml(
            r"
server:
  bind_addr: 0.0.0.0:9090
logging:
  level: debug
  format: json
modules:
  calculator:
    config:
      title: Big
      limit: 12
",
        );

        // env vars set by other tests must not leak into this one
        Jail::expect_with(|_jail| {
            let config = AppConfig::load_layered(Some(file.path())).unwrap();
            assert_eq!(config.server.bind_addr, "0.0.0.0:9090");
            assert_eq!(config.server.request_timeout_ms, 30_000);
            assert_eq!(config.logging.level, "debug");
            assert_eq!(config.logging.format, LogFormat::Json);

            let typed: TestConfig = module_config_or_default(&config, "calculator").unwrap();
            assert_eq!(
                typed,
                TestConfig {
                    title: "Big".to_owned(),
                    limit: 12
                }
            );
            Ok(())
        });
    }

    #[test]
    fn env_overrides_yaml_and_cli_port_overrides_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "bigcalc.yaml",
                r"
server:
  bind_addr: 127.0.0.1:8000
modules:
  calculator:
    config:
      title: From Yaml
      max_operand_len: 50
",
            )?;
            jail.set_env("APP__SERVER__BIND_ADDR", "0.0.0.0:9001");
            jail.set_env("APP__MODULES__CALCULATOR__CONFIG__MAX_OPERAND_LEN", "7");
            jail.set_env("APP__MODULES__CALCULATOR__CONFIG__TITLE", "2024");

            let mut config = AppConfig::load_layered(Some(Path::new("bigcalc.yaml"))).unwrap();
            assert_eq!(config.server.bind_addr, "0.0.0.0:9001");
            assert_eq!(config.server.request_timeout_ms, 30_000);

            let section = &config.modules["calculator"]["config"];
            assert_eq!(section["max_operand_len"], json!(7));
            // numeric-looking env values arrive as numbers in untyped sections
            assert_eq!(section["title"], json!(2024));

            config.apply_cli_overrides(Some(9100));
            assert_eq!(config.server.bind_addr, "0.0.0.0:9100");
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load_layered(Some(Path::new("/nonexistent/bigcalc.yaml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let file = write_yaml("server: [unclosed");
        let err = AppConfig::load_layered(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_server_field_is_rejected() {
        let file = write_yaml("server:\n  bind_adr: 1.2.3.4:1\n");
        assert!(AppConfig::load_layered(Some(file.path())).is_err());
    }

    #[test]
    fn module_config_falls_back_to_default() {
        let mut config = AppConfig::default();
        let missing: TestConfig = module_config_or_default(&config, "calculator").unwrap();
        assert_eq!(missing, TestConfig::default());

        config
            .modules
            .insert("calculator".to_owned(), json!("not an object"));
        let not_object: TestConfig = module_config_or_default(&config, "calculator").unwrap();
        assert_eq!(not_object, TestConfig::default());

        config
            .modules
            .insert("calculator".to_owned(), json!({ "other": 1 }));
        let no_section: TestConfig = module_config_or_default(&config, "calculator").unwrap();
        assert_eq!(no_section, TestConfig::default());
    }

    #[test]
    fn invalid_module_config_is_reported() {
        let mut config = AppConfig::default();
        config.modules.insert(
            "calculator".to_owned(),
            json!({ "config": { "limit": "many" } }),
        );
        let err = module_config_or_default::<TestConfig>(&config, "calculator").unwrap_err();
        assert_eq!(err.to_string(), "invalid config for module 'calculator'");
        let cause = std::error::Error::source(&err).unwrap().to_string();
        assert!(cause.contains("many"), "{cause}");
        match err {
            ConfigError::InvalidConfig { module, .. } => assert_eq!(module, "calculator"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn port_override_keeps_host() {
        let mut config = AppConfig::default();
        config.apply_cli_overrides(Some(9000));
        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");

        config.server.bind_addr = "[::1]:80".to_owned();
        config.apply_cli_overrides(Some(81));
        assert_eq!(config.server.bind_addr, "[::1]:81");

        config.apply_cli_overrides(None);
        assert_eq!(config.server.bind_addr, "[::1]:81");
    }

    #[test]
    fn yaml_dump_contains_sections() {
        let yaml = AppConfig::default().to_yaml().unwrap();
        assert!(yaml.contains("bind_addr"));
        assert!(yaml.contains("logging"));
    }
}
