//! Centralized configuration for Logseek.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

use crate::LogseekError;

/// Central configuration for all Logseek components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct LogseekConfig {
    pub service: ServiceConfig,
    pub session: SessionConfig,
    pub server: ServerConfig,
}

/// Remote search service connection settings.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Search endpoint URL, without the query parameter
    pub endpoint: String,
    /// Name of the query parameter carrying the encoded query text
    pub query_param: String,
    /// Per-request timeout; a timed out request is a transport failure
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/search".to_string(),
            query_param: "q".to_string(),
            request_timeout: Duration::from_secs(30),
            user_agent: "logseek/0.1.0",
        }
    }
}

impl ServiceConfig {
    /// Checks that the endpoint is an HTTP(S) URL and the parameter is named.
    ///
    /// # Errors
    /// - `LogseekError::Configuration` - Endpoint scheme or parameter name is invalid
    pub fn validate(&self) -> Result<(), LogseekError> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(LogseekError::Configuration {
                reason: format!(
                    "search endpoint must be an http(s) URL, got '{}'",
                    self.endpoint
                ),
            });
        }

        if self.query_param.trim().is_empty() {
            return Err(LogseekError::Configuration {
                reason: "query parameter name must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Search session controller settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How overlapping search resolutions are applied
    pub resolution_policy: ResolutionPolicy,
    /// Capacity of the session command channel
    pub command_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            resolution_policy: ResolutionPolicy::LastArrival,
            command_buffer: 64,
        }
    }
}

/// Policy for applying resolutions of overlapping searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ResolutionPolicy {
    /// Every resolution is applied in arrival order; the last one to arrive wins.
    #[default]
    LastArrival,
    /// Only the resolution of the most recent submission is applied.
    LatestSubmission,
}

impl std::fmt::Display for ResolutionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LastArrival => write!(f, "last-arrival"),
            Self::LatestSubmission => write!(f, "latest-submission"),
        }
    }
}

impl std::str::FromStr for ResolutionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "last-arrival" | "last" => Ok(Self::LastArrival),
            "latest-submission" | "latest" => Ok(Self::LatestSubmission),
            _ => Err(format!(
                "Invalid resolution policy: '{s}'. Valid options are: last-arrival, latest-submission"
            )),
        }
    }
}

/// Search service (server side) settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl LogseekConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Applies overrides from a variable lookup. Unparseable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = lookup("LOGSEEK_ENDPOINT") {
            self.service.endpoint = endpoint;
        }

        if let Some(param) = lookup("LOGSEEK_QUERY_PARAM") {
            self.service.query_param = param;
        }

        if let Some(timeout) = lookup("LOGSEEK_REQUEST_TIMEOUT")
            && let Ok(seconds) = timeout.parse::<u64>()
        {
            self.service.request_timeout = Duration::from_secs(seconds);
        }

        if let Some(policy) = lookup("LOGSEEK_RESOLUTION_POLICY")
            && let Ok(policy) = policy.parse()
        {
            self.session.resolution_policy = policy;
        }

        if let Some(port) = lookup("LOGSEEK_PORT")
            && let Ok(port) = port.parse::<u16>()
        {
            self.server.port = port;
        }
    }

    /// Creates a configuration optimized for testing.
    pub fn for_testing() -> Self {
        Self {
            service: ServiceConfig {
                request_timeout: Duration::from_secs(5),
                user_agent: "logseek-test",
                ..Default::default()
            },
            server: ServerConfig {
                port: 0,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config_values() {
        let config = LogseekConfig::default();

        assert_eq!(config.service.endpoint, "http://localhost:8080/search");
        assert_eq!(config.service.query_param, "q");
        assert_eq!(config.service.request_timeout, Duration::from_secs(30));
        assert_eq!(config.session.resolution_policy, ResolutionPolicy::LastArrival);
        assert_eq!(config.server.port, 8080);
        assert!(config.service.validate().is_ok());
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = LogseekConfig::default();
        config.apply_overrides(lookup_from(&[
            ("LOGSEEK_ENDPOINT", "https://search.example.com/api"),
            ("LOGSEEK_QUERY_PARAM", "query"),
            ("LOGSEEK_REQUEST_TIMEOUT", "3"),
            ("LOGSEEK_RESOLUTION_POLICY", "latest-submission"),
            ("LOGSEEK_PORT", "9090"),
        ]));

        assert_eq!(config.service.endpoint, "https://search.example.com/api");
        assert_eq!(config.service.query_param, "query");
        assert_eq!(config.service.request_timeout, Duration::from_secs(3));
        assert_eq!(
            config.session.resolution_policy,
            ResolutionPolicy::LatestSubmission
        );
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_invalid_overrides_ignored() {
        let mut config = LogseekConfig::default();
        config.apply_overrides(lookup_from(&[
            ("LOGSEEK_REQUEST_TIMEOUT", "soon"),
            ("LOGSEEK_RESOLUTION_POLICY", "first-wins"),
            ("LOGSEEK_PORT", "99999"),
        ]));

        assert_eq!(config.service.request_timeout, Duration::from_secs(30));
        assert_eq!(config.session.resolution_policy, ResolutionPolicy::LastArrival);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let config = ServiceConfig {
            endpoint: "localhost:8080/search".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LogseekError::Configuration { .. })
        ));

        let config = ServiceConfig {
            query_param: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolution_policy_parsing() {
        assert_eq!(
            "LAST_ARRIVAL".parse::<ResolutionPolicy>(),
            Ok(ResolutionPolicy::LastArrival)
        );
        assert_eq!(
            "latest".parse::<ResolutionPolicy>(),
            Ok(ResolutionPolicy::LatestSubmission)
        );
        assert!("random".parse::<ResolutionPolicy>().is_err());
        assert_eq!(ResolutionPolicy::LatestSubmission.to_string(), "latest-submission");
    }

    #[test]
    fn test_testing_config() {
        let config = LogseekConfig::for_testing();
        assert_eq!(config.service.request_timeout, Duration::from_secs(5));
        assert_eq!(config.server.port, 0);
    }
}
