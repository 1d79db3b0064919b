use std::env;
use std::fmt;
use std::time::Duration;

/// Endpoint the automation service listens on when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/start";

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the intake tool.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub environment: AppEnvironment,
    pub backend: BackendConfig,
    pub telemetry: TelemetryConfig,
}

impl IntakeConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let endpoint =
            env::var("INTAKE_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        validate_endpoint(&endpoint)?;

        let request_timeout = match env::var("INTAKE_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        let log_level = env::var("INTAKE_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            environment,
            backend: BackendConfig {
                endpoint,
                request_timeout,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where and how the job-start request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub endpoint: String,
    /// `None` waits on the automation service indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: None,
        }
    }
}

impl BackendConfig {
    pub fn with_endpoint(mut self, endpoint: String) -> Result<Self, ConfigError> {
        validate_endpoint(&endpoint)?;
        self.endpoint = endpoint;
        Ok(self)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

pub fn validate_endpoint(raw: &str) -> Result<(), ConfigError> {
    let url = url::Url::parse(raw).map_err(|source| ConfigError::InvalidEndpoint {
        value: raw.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidEndpoint {
        value: String,
        source: url::ParseError,
    },
    UnsupportedScheme(String),
    InvalidTimeout(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidEndpoint { value, .. } => {
                write!(f, "INTAKE_ENDPOINT '{value}' is not a valid URL")
            }
            ConfigError::UnsupportedScheme(scheme) => {
                write!(f, "INTAKE_ENDPOINT must use http or https, found '{scheme}'")
            }
            ConfigError::InvalidTimeout(value) => write!(
                f,
                "INTAKE_REQUEST_TIMEOUT_SECS must be a positive number of seconds, found '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidEndpoint { source, .. } => Some(source),
            ConfigError::UnsupportedScheme(_) | ConfigError::InvalidTimeout(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("INTAKE_ENDPOINT");
        env::remove_var("INTAKE_REQUEST_TIMEOUT_SECS");
        env::remove_var("INTAKE_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = IntakeConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.backend.endpoint, "http://localhost:8000/api/start");
        assert_eq!(config.backend.request_timeout, None);
        assert_eq!(config.telemetry.log_level, "warn");
    }

    #[test]
    fn reads_timeout_and_endpoint_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("INTAKE_ENDPOINT", "https://agent.internal:9000/api/start");
        env::set_var("INTAKE_REQUEST_TIMEOUT_SECS", "30");
        env::set_var("APP_ENV", "ci");
        let config = IntakeConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.backend.endpoint, "https://agent.internal:9000/api/start");
        assert_eq!(config.backend.request_timeout, Some(Duration::from_secs(30)));
        reset_env();
    }

    #[test]
    fn rejects_zero_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("INTAKE_REQUEST_TIMEOUT_SECS", "0");
        let err = IntakeConfig::load().expect_err("zero timeout is rejected");
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
        reset_env();
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let err = BackendConfig::default()
            .with_endpoint("ftp://localhost/api/start".to_string())
            .expect_err("ftp is not accepted");
        assert!(matches!(err, ConfigError::UnsupportedScheme(ref scheme) if scheme == "ftp"));
    }
}
