//! Client configuration.

use serde::{Deserialize, Serialize};

use ipfskit_core::constants::{
    DEFAULT_API_HOST, DEFAULT_API_PORT, DEFAULT_API_SCHEME, DEFAULT_TIMEOUT_SECONDS,
};
use ipfskit_core::error::{IpfsKitError, Result};
use ipfskit_http::HttpApiConfig;

/// Where and how to reach the node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpfsConfig {
    /// Node host name or address
    pub host: String,
    /// RPC API port
    pub port: u16,
    /// "http" or "https"
    pub scheme: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for IpfsConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_API_HOST.into(),
            port: DEFAULT_API_PORT,
            scheme: DEFAULT_API_SCHEME.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl IpfsConfig {
    /// Creates config for `host` on the default API port.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    /// Loads config from the environment (and a `.env` file, if present).
    ///
    /// Reads `IPFS_HOST`, `IPFS_PORT`, `IPFS_SCHEME` and
    /// `IPFS_TIMEOUT_SECONDS`. Missing or unparsable values keep their
    /// defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: lookup("IPFS_HOST")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.host),
            port: lookup("IPFS_PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            scheme: lookup("IPFS_SCHEME")
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.scheme),
            timeout_seconds: lookup("IPFS_TIMEOUT_SECONDS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.timeout_seconds),
        }
    }

    /// Overrides the API port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Overrides the scheme.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// API root URL, e.g. `http://localhost:5001` or `http://[::1]:5001`.
    pub fn base_url(&self) -> Result<String> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(IpfsKitError::ConfigError("IPFS host cannot be empty".into()));
        }
        if host.contains('/') {
            return Err(IpfsKitError::ConfigError(format!(
                "IPFS host '{}' must not contain a path or scheme",
                host
            )));
        }

        // IPv6 literals need brackets before the port is appended.
        if host.contains(':') && !host.starts_with('[') {
            return Ok(format!("{}://[{}]:{}", self.scheme, host, self.port));
        }

        Ok(format!("{}://{}:{}", self.scheme, host, self.port))
    }

    pub(crate) fn http_config(&self) -> Result<HttpApiConfig> {
        Ok(HttpApiConfig::new(self.base_url()?).with_timeout(self.timeout_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_points_at_local_node() {
        let config = IpfsConfig::default();
        assert_eq!(config.base_url().unwrap(), "http://localhost:5001");
    }

    #[test]
    fn test_new_uses_fixed_api_port() {
        let config = IpfsConfig::new("10.0.0.7");
        assert_eq!(config.port, 5001);
        assert_eq!(config.base_url().unwrap(), "http://10.0.0.7:5001");
    }

    #[test]
    fn test_builders() {
        let config = IpfsConfig::new("node.internal")
            .with_port(443)
            .with_scheme("https")
            .with_timeout(5);
        assert_eq!(config.base_url().unwrap(), "https://node.internal:443");
        assert_eq!(config.http_config().unwrap().timeout_seconds, 5);
    }

    #[test]
    fn test_base_url_brackets_ipv6_hosts() {
        assert_eq!(IpfsConfig::new("::1").base_url().unwrap(), "http://[::1]:5001");
        assert_eq!(IpfsConfig::new("[::1]").base_url().unwrap(), "http://[::1]:5001");
        assert_eq!(
            IpfsConfig::new("fd00::7").with_port(15001).base_url().unwrap(),
            "http://[fd00::7]:15001"
        );

        let http = IpfsConfig::new("::1").http_config().unwrap();
        assert!(ipfskit_http::HttpIpfsApi::with_config(http).is_ok());
    }

    #[test]
    fn test_base_url_rejects_bad_hosts() {
        assert!(IpfsConfig::new("").base_url().is_err());
        assert!(IpfsConfig::new("   ").base_url().is_err());
        assert!(IpfsConfig::new("http://localhost").base_url().is_err());
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("IPFS_HOST", "ipfs.local"),
            ("IPFS_PORT", "15001"),
            ("IPFS_SCHEME", "HTTPS"),
            ("IPFS_TIMEOUT_SECONDS", "oops"),
        ]
        .into_iter()
        .collect();

        let config = IpfsConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.host, "ipfs.local");
        assert_eq!(config.port, 15001);
        assert_eq!(config.scheme, "https");
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_from_lookup_empty_env() {
        let config = IpfsConfig::from_lookup(|_| None);
        assert_eq!(config, IpfsConfig::default());
    }
}
