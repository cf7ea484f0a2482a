use std::path::PathBuf;

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, thiserror::Error)]
#[error("{key} must be a valid {expected}, got {value:?}")]
pub struct ConfigError {
    /// Variable name.
    pub key: &'static str,
    /// What the variable should contain.
    pub expected: &'static str,
    /// The rejected value.
    pub value: String,
}

/// Proxy server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Bearer token attached to every upstream request, if set.
    pub bgg_api_token: Option<String>,
    /// Directory served for every non-API path (default: `.`).
    pub static_dir: PathBuf,
    /// Whole-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upstream BGG request timeout in seconds (default: `30`).
    pub upstream_timeout_secs: u64,
    /// Hosts the proxy may reach, parsed from comma-separated
    /// `BGG_ALLOWED_HOSTS`. Empty means unrestricted.
    pub allowed_hosts: Vec<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            bgg_api_token: None,
            static_dir: PathBuf::from("."),
            request_timeout_secs: 30,
            upstream_timeout_secs: 30,
            allowed_hosts: vec!["boardgamegeek.com".into()],
        }
    }
}

impl ProxyConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default             |
    /// |-------------------------|---------------------|
    /// | `HOST`                  | `0.0.0.0`           |
    /// | `PORT`                  | `3000`              |
    /// | `BGG_API_TOKEN`         | *(none)*            |
    /// | `STATIC_DIR`            | `.`                 |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                |
    /// | `UPSTREAM_TIMEOUT_SECS` | `30`                |
    /// | `BGG_ALLOWED_HOSTS`     | `boardgamegeek.com` |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric variable does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT", "u16")?.unwrap_or(defaults.port);

        let bgg_api_token = lookup("BGG_API_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let static_dir = lookup("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from);

        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", "u64")?
            .unwrap_or(defaults.request_timeout_secs);
        let upstream_timeout_secs = parse_var(&lookup, "UPSTREAM_TIMEOUT_SECS", "u64")?
            .unwrap_or(defaults.upstream_timeout_secs);

        let allowed_hosts = lookup("BGG_ALLOWED_HOSTS").map_or(defaults.allowed_hosts, |v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Ok(Self {
            host,
            port,
            bgg_api_token,
            static_dir,
            request_timeout_secs,
            upstream_timeout_secs,
            allowed_hosts,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, expected: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .map(|value| {
            value.trim().parse().map_err(|_| ConfigError {
                key,
                expected,
                value,
            })
        })
        .transpose()
}
