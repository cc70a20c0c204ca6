use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "Doctor Directory";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Practitioner feed fetched on startup.
pub const DEFAULT_SOURCE_URL: &str = "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

/// Loopback only; the front end runs on the same machine.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

pub const ENV_SOURCE_URL: &str = "DOCTOR_DIRECTORY_SOURCE_URL";
pub const ENV_BIND_ADDR: &str = "DOCTOR_DIRECTORY_BIND";
pub const ENV_INITIAL_QUERY: &str = "DOCTOR_DIRECTORY_QUERY";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "doctor_directory_lib=info,doctor_directory=info,tower_http=warn"
}

/// Runtime settings, resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source_url: String,
    pub bind_addr: SocketAddr,
    /// Page-state query string the directory starts from.
    pub initial_query: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {key}: {value} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let source_url = lookup(ENV_SOURCE_URL)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());
        url::Url::parse(&source_url).map_err(|e| ConfigError::Invalid {
            key: ENV_SOURCE_URL,
            value: source_url.clone(),
            reason: e.to_string(),
        })?;

        let bind_raw = lookup(ENV_BIND_ADDR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            key: ENV_BIND_ADDR,
            value: bind_raw.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            source_url,
            bind_addr,
            initial_query: lookup(ENV_INITIAL_QUERY).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_empty() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(settings.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert!(settings.initial_query.is_empty());
    }

    #[test]
    fn overrides_are_applied() {
        let settings = Settings::from_lookup(lookup_from(&[
            (ENV_SOURCE_URL, "http://localhost:9000/doctors.json"),
            (ENV_BIND_ADDR, "0.0.0.0:9999"),
            (ENV_INITIAL_QUERY, "sort=fees"),
        ]))
        .unwrap();
        assert_eq!(settings.source_url, "http://localhost:9000/doctors.json");
        assert_eq!(settings.bind_addr.port(), 9999);
        assert_eq!(settings.initial_query, "sort=fees");
    }

    #[test]
    fn invalid_bind_address_is_rejected() {
        let err = Settings::from_lookup(lookup_from(&[(ENV_BIND_ADDR, "localhost")])).unwrap_err();
        assert!(err.to_string().contains(ENV_BIND_ADDR));
    }

    #[test]
    fn invalid_source_url_is_rejected() {
        let err = Settings::from_lookup(lookup_from(&[(ENV_SOURCE_URL, "not a url")])).unwrap_err();
        assert!(err.to_string().contains(ENV_SOURCE_URL));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
