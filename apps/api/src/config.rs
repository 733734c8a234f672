use anyhow::{anyhow, Context, Result};

use crate::catalog::validation::ReferencePolicy;

/// Application configuration loaded from environment variables.
/// Every variable has a default (see `Default`); invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path or `http(s)://` URL of the mapping document.
    pub mapping_source: String,
    pub reference_policy: ReferencePolicy,
    /// Title of the third column of every skills table.
    pub relevance_heading: String,
    pub page_title: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        Ok(Config {
            mapping_source: lookup("MAPPING_SOURCE").unwrap_or(defaults.mapping_source),
            reference_policy: match lookup("REFERENCE_POLICY") {
                Some(raw) => raw
                    .parse::<ReferencePolicy>()
                    .map_err(|e| anyhow!(e))
                    .context("REFERENCE_POLICY must be 'placeholder' or 'reject'")?,
                None => defaults.reference_policy,
            },
            relevance_heading: lookup("RELEVANCE_HEADING").unwrap_or(defaults.relevance_heading),
            page_title: lookup("PAGE_TITLE").unwrap_or(defaults.page_title),
            port: match lookup("PORT") {
                Some(raw) => raw
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mapping_source: "data/mapping.json".to_string(),
            reference_policy: ReferencePolicy::default(),
            relevance_heading: "OpenShift/K8s Relevance".to_string(),
            page_title: "Role Skills Mapping".to_string(),
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.mapping_source, "data/mapping.json");
        assert_eq!(config.reference_policy, ReferencePolicy::Placeholder);
        assert_eq!(config.relevance_heading, "OpenShift/K8s Relevance");
        assert_eq!(config.page_title, "Role Skills Mapping");
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_values_override_defaults() {
        let config = config_from(&[
            ("MAPPING_SOURCE", "https://example.org/mapping.json"),
            ("REFERENCE_POLICY", "reject"),
            ("RELEVANCE_HEADING", "Cloud Relevance"),
            ("PORT", "9090"),
        ])
        .unwrap();
        assert_eq!(config.mapping_source, "https://example.org/mapping.json");
        assert_eq!(config.reference_policy, ReferencePolicy::Reject);
        assert_eq!(config.relevance_heading, "Cloud Relevance");
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_invalid_reference_policy_fails() {
        let err = config_from(&[("REFERENCE_POLICY", "strict")]).unwrap_err();
        assert!(err.to_string().contains("REFERENCE_POLICY"));
    }

    #[test]
    fn test_invalid_port_fails() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
        assert!(config_from(&[("PORT", "70000")]).is_err());
    }
}
