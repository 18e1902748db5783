//! Configuration loading from environment.

use std::env;
use std::str::FromStr;

use customers_types::RoutineNames;
use customers_types::domain::routine::{DEFAULT_INSERT_FUNCTION, DEFAULT_INSERT_PROCEDURE};

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    /// Apply the bundled schema and routines on startup.
    pub migrate: bool,
    pub routines: RoutineNames,
    /// OTLP collector endpoint. Trace export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = parse_or(&var, "PORT", 3000)?;

        let database_url = var("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = parse_or(&var, "DATABASE_MAX_CONNECTIONS", 5)?;
        let migrate = parse_or(&var, "DATABASE_MIGRATE", true)?;

        let procedure = var("CUSTOMER_INSERT_PROCEDURE")
            .unwrap_or_else(|| DEFAULT_INSERT_PROCEDURE.to_string());
        let function = var("CUSTOMER_INSERT_FUNCTION")
            .unwrap_or_else(|| DEFAULT_INSERT_FUNCTION.to_string());
        let routines = RoutineNames::new(procedure, function)?;

        let otlp_endpoint = var("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.trim().is_empty());

        Ok(Self {
            port,
            database_url,
            max_connections,
            migrate,
            routines,
            otlp_endpoint,
        })
    }

    /// Database URL with any password masked, for logging.
    pub fn redacted_database_url(&self) -> String {
        let url = &self.database_url;
        let Some((scheme, rest)) = url.split_once("://") else {
            return url.clone();
        };
        let Some((credentials, host)) = rest.split_once('@') else {
            return url.clone();
        };
        match credentials.split_once(':') {
            Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
            None => url.clone(),
        }
    }
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {:?} ({})", key, raw, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "sqlite::memory:")]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.max_connections, 5);
        assert!(config.migrate);
        assert_eq!(config.routines, RoutineNames::default());
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_database_url_is_required() {
        assert!(load(&[("PORT", "8080")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/customers"),
            ("PORT", "8080"),
            ("DATABASE_MAX_CONNECTIONS", "20"),
            ("DATABASE_MIGRATE", "false"),
            ("CUSTOMER_INSERT_PROCEDURE", "crm.add_customer"),
            ("CUSTOMER_INSERT_FUNCTION", "crm.add_customer_fn"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://collector:4317"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.max_connections, 20);
        assert!(!config.migrate);
        assert_eq!(config.routines.procedure(), "crm.add_customer");
        assert_eq!(config.routines.function(), "crm.add_customer_fn");
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://collector:4317"));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = load(&[("DATABASE_URL", "sqlite::memory:"), ("PORT", "http")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unsafe_routine_name_is_rejected() {
        let result = load(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("CUSTOMER_INSERT_PROCEDURE", "x(); DROP TABLE customer; --"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_password_is_redacted() {
        let config = load(&[("DATABASE_URL", "postgres://app:s3cret@db:5432/customers")]).unwrap();

        assert_eq!(
            config.redacted_database_url(),
            "postgres://app:***@db:5432/customers"
        );
    }
}
