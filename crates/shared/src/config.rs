//! Application configuration management.

use serde::Deserialize;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::AppError;

/// Azure Functions app setting names, honoured for existing deployments.
///
/// Each maps to a configuration key and the `IMOR__` variable that wins over it.
const LEGACY_SETTINGS: [(&str, &str, &str); 4] = [
    (
        "storage.connection_string",
        "imorblobstorage_STORAGE",
        "IMOR__STORAGE__CONNECTION_STRING",
    ),
    (
        "vision.subscription_key",
        "SubscriptionKey",
        "IMOR__VISION__SUBSCRIPTION_KEY",
    ),
    ("vision.endpoint", "VisionEndpoint", "IMOR__VISION__ENDPOINT"),
    ("sparql.endpoint", "SparqlEndpoint", "IMOR__SPARQL__ENDPOINT"),
];

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    /// Webhook server configuration.
    pub server: ServerConfig,
    /// Blob storage configuration.
    #[validate(nested)]
    pub storage: StorageSettings,
    /// Vision analysis API configuration.
    #[validate(nested)]
    pub vision: VisionConfig,
    /// SPARQL metadata store configuration.
    #[validate(nested)]
    pub sparql: SparqlConfig,
    /// Outbound HTTP client configuration.
    #[validate(nested)]
    pub http: HttpConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Blob storage configuration.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct StorageSettings {
    /// Azure storage connection string, or a `file://` root for local development.
    #[validate(length(min = 1))]
    pub connection_string: String,
}

/// Vision analysis API configuration.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct VisionConfig {
    /// Base URL of the vision endpoint, e.g. `https://westeurope.api.cognitive.microsoft.com/vision/v2.0`.
    #[validate(url)]
    pub endpoint: String,
    /// Value sent in the `Ocp-Apim-Subscription-Key` header.
    #[validate(length(min = 1))]
    pub subscription_key: String,
}

/// SPARQL metadata store configuration.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SparqlConfig {
    /// Base URL of the metadata store REST API.
    #[validate(url)]
    pub endpoint: String,
}

/// Outbound HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    #[validate(range(min = 1, max = 600))]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Loads configuration from config files and environment, then validates it.
    ///
    /// Sources, lowest precedence first: `config/default`, `config/{RUN_MODE}`,
    /// the legacy app-setting names, and `IMOR__*` variables.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if the sources cannot be read or a
    /// required value is missing or malformed.
    pub fn load() -> Result<Self, AppError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("IMOR").separator("__"));

        for (key, legacy, preferred) in LEGACY_SETTINGS {
            builder = builder
                .set_override_option(key, legacy_setting(legacy, preferred))
                .map_err(|e| AppError::Configuration(e.to_string()))?;
        }

        let config: Self = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| AppError::Configuration(e.to_string()))?;

        config.ensure_valid()?;
        Ok(config)
    }

    /// Validates required fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] naming every offending key.
    pub fn ensure_valid(&self) -> Result<(), AppError> {
        self.validate().map_err(|errors| {
            let mut fields = Vec::new();
            collect_fields("", &errors, &mut fields);
            fields.sort();
            AppError::Configuration(format!(
                "missing or invalid configuration: {}",
                fields.join(", ")
            ))
        })
    }
}

/// Reads a legacy app setting unless the `IMOR__` variable is set.
fn legacy_setting(legacy: &str, preferred: &str) -> Option<String> {
    if std::env::var(preferred).is_ok() {
        return None;
    }
    std::env::var(legacy).ok().filter(|v| !v.is_empty())
}

fn collect_fields(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = format!("{prefix}{field}");
        match kind {
            ValidationErrorsKind::Field(_) => out.push(path),
            ValidationErrorsKind::Struct(inner) => collect_fields(&format!("{path}."), inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_fields(&format!("{path}[{index}]."), inner, out);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
