//! Deployment environment and log output settings

use serde::{Deserialize, Serialize};

use super::env_or;

/// Where the gateway is deployed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    /// Codes may be echoed in API responses outside production only
    pub fn allows_code_echo(&self) -> bool {
        !self.is_production()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Read `ENVIRONMENT` (or `APP_ENV`); unknown values mean development
    pub fn from_env() -> Self {
        std::env::var("ENVIRONMENT")
            .or_else(|_| std::env::var("APP_ENV"))
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("Invalid environment: {}", other)),
        }
    }
}

/// Shape of the log lines written by the subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event, for log shippers
    Json,
    /// Multi-line, human oriented
    Pretty,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("Invalid log format: {}", other)),
        }
    }
}

/// Tracing subscriber settings
///
/// `RUST_LOG` still wins over `level` when set.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is absent
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    /// Verbose pretty output in development, JSON at `info` elsewhere
    pub fn for_environment(env: Environment) -> Self {
        if env == Environment::Development {
            Self {
                level: "debug,sqlx=warn".to_string(),
                format: LogFormat::Pretty,
            }
        } else {
            Self {
                level: "info".to_string(),
                format: LogFormat::Json,
            }
        }
    }

    /// Environment defaults overridden by `LOG_LEVEL` and `LOG_FORMAT`
    pub fn from_env(env: Environment) -> Self {
        let defaults = Self::for_environment(env);
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or(defaults.level),
            format: env_or("LOG_FORMAT", defaults.format),
        }
    }
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_aliases() {
        assert_eq!("DEV".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!(" prod ".parse::<Environment>().unwrap(), Environment::Production);
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn test_code_echo_never_in_production() {
        assert!(Environment::Development.allows_code_echo());
        assert!(Environment::Staging.allows_code_echo());
        assert!(!Environment::Production.allows_code_echo());
    }

    #[test]
    fn test_logging_defaults_follow_environment() {
        let dev = LoggingConfig::for_environment(Environment::Development);
        assert_eq!(dev.format, LogFormat::Pretty);
        assert!(dev.level.starts_with("debug"));

        let staging = LoggingConfig::for_environment(Environment::Staging);
        assert_eq!(staging.format, LogFormat::Json);
        assert_eq!(staging.level, "info");
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("Compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
