use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CityConfig {
    pub common: core_config::Config,
    pub elasticsearch: ElasticsearchConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct ElasticsearchConfig {
    pub host: String,
    pub port: u16,
    pub scheme: Scheme,
    pub user: String,
    pub password: Secret<String>,
    pub index: String,
    /// Certificate and hostname verification for `https`.
    pub verify_certs: bool,
    /// Transport-level retries per store call.
    pub max_retries: u32,
    pub request_timeout: Duration,
    pub startup: StartupConfig,
}

/// Bounds for the startup reachability probe.
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            _ => Err(format!("Invalid scheme: {}. Must be one of: http, https", s)),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Http => f.write_str("http"),
            Scheme::Https => f.write_str("https"),
        }
    }
}

impl ElasticsearchConfig {
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// Basic-auth pair, present only when both user and password are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let password = self.password.expose_secret();
        if self.user.is_empty() || password.is_empty() {
            None
        } else {
            Some((self.user.as_str(), password.as_str()))
        }
    }

    pub fn credentials_supplied(&self) -> bool {
        self.credentials().is_some()
    }

    /// TLS is in use and the operator opted out of verification.
    pub fn insecure_tls(&self) -> bool {
        self.scheme == Scheme::Https && !self.verify_certs
    }
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            host: "elasticsearch".to_string(),
            port: 9200,
            scheme: Scheme::Http,
            user: String::new(),
            password: Secret::new(String::new()),
            index: "cities".to_string(),
            verify_certs: true,
            max_retries: 5,
            request_timeout: Duration::from_secs(10),
            startup: StartupConfig::default(),
        }
    }
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            retry_delay: Duration::from_secs(4),
        }
    }
}

impl CityConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").unwrap_or_else(|| "dev".to_string()) == "prod";
        let vars = EnvVars { lookup, is_prod };
        let defaults = ElasticsearchConfig::default();
        let startup = StartupConfig::default();

        Ok(CityConfig {
            common,
            elasticsearch: ElasticsearchConfig {
                host: vars.get("ELASTICSEARCH_HOST", Some(&defaults.host))?,
                port: vars.parse("ELASTICSEARCH_PORT", defaults.port)?,
                scheme: vars.parse("ELASTICSEARCH_SCHEME", defaults.scheme)?,
                user: vars.get("ELASTICSEARCH_USER", Some(""))?,
                password: Secret::new(vars.get("ELASTICSEARCH_PASSWORD", Some(""))?),
                index: vars.get("ELASTICSEARCH_INDEX", Some(&defaults.index))?,
                verify_certs: vars.parse("ELASTICSEARCH_VERIFY_CERTS", defaults.verify_certs)?,
                max_retries: vars.parse("ELASTICSEARCH_MAX_RETRIES", defaults.max_retries)?,
                request_timeout: Duration::from_secs(vars.parse(
                    "ELASTICSEARCH_REQUEST_TIMEOUT_SECS",
                    defaults.request_timeout.as_secs(),
                )?),
                startup: StartupConfig {
                    max_attempts: vars
                        .parse("ELASTICSEARCH_STARTUP_ATTEMPTS", startup.max_attempts)?
                        .max(1),
                    retry_delay: Duration::from_secs(vars.parse(
                        "ELASTICSEARCH_STARTUP_DELAY_SECS",
                        startup.retry_delay.as_secs(),
                    )?),
                },
            },
            observability: ObservabilityConfig {
                log_level: vars.get("LOG_LEVEL", Some("info"))?.to_lowercase(),
                otlp_endpoint: (vars.lookup)("OTLP_ENDPOINT").filter(|v| !v.is_empty()),
            },
        })
    }
}

struct EnvVars<F> {
    lookup: F,
    is_prod: bool,
}

impl<F> EnvVars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str, default: Option<&str>) -> Result<String, AppError> {
        match (self.lookup)(key) {
            Some(val) => Ok(val),
            None => {
                if self.is_prod {
                    Err(AppError::ConfigError(anyhow::anyhow!(
                        "{} is required in production but not set",
                        key
                    )))
                } else if let Some(def) = default {
                    Ok(def.to_string())
                } else {
                    Err(AppError::ConfigError(anyhow::anyhow!(
                        "{} is required but not set",
                        key
                    )))
                }
            }
        }
    }

    fn parse<T>(&self, key: &str, default: T) -> Result<T, AppError>
    where
        T: FromStr + ToString,
        T::Err: fmt::Display,
    {
        let default = default.to_string();
        self.get(key, Some(&default))?
            .trim()
            .parse()
            .map_err(|e: T::Err| AppError::ConfigError(anyhow::anyhow!("Invalid {}: {}", key, e)))
    }
}
