//! Runtime configuration read from the environment.

use anyhow::{Context, Result};

use crate::features::DatePolicy;

pub const DEFAULT_SOURCE: &str = "./Open_Parking_and_Camera_Violations.csv";

pub const SOURCE_VAR: &str = "VIOLATIONS_SOURCE";
pub const DATE_POLICY_VAR: &str = "VIOLATIONS_DATE_POLICY";

/// Where to read the violations table from and how to treat bad issue dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Local path or `http(s)://` URL, optionally gzip-compressed.
    pub source: String,
    pub date_policy: DatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: DEFAULT_SOURCE.to_string(),
            date_policy: DatePolicy::default(),
        }
    }
}

impl Config {
    /// Reads `VIOLATIONS_SOURCE` and `VIOLATIONS_DATE_POLICY`, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(source) = lookup(SOURCE_VAR).filter(|s| !s.trim().is_empty()) {
            config.source = source;
        }

        if let Some(policy) = lookup(DATE_POLICY_VAR) {
            config.date_policy = policy
                .parse()
                .with_context(|| format!("invalid {DATE_POLICY_VAR}"))?;
        }

        Ok(config)
    }

    pub fn with_source(mut self, source: Option<String>) -> Self {
        if let Some(source) = source {
            self.source = source;
        }
        self
    }

    /// Forces [`DatePolicy::Skip`] when `skip` is set; otherwise keeps the current policy.
    pub fn with_skip_invalid_dates(mut self, skip: bool) -> Self {
        if skip {
            self.date_policy = DatePolicy::Skip;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.date_policy, DatePolicy::Abort);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup(&[
            (SOURCE_VAR, "https://example.org/violations.csv.gz"),
            (DATE_POLICY_VAR, "skip"),
        ]))
        .unwrap();

        assert_eq!(config.source, "https://example.org/violations.csv.gz");
        assert_eq!(config.date_policy, DatePolicy::Skip);
    }

    #[test]
    fn test_blank_source_uses_default() {
        let config = Config::from_lookup(lookup(&[(SOURCE_VAR, "  ")])).unwrap();
        assert_eq!(config.source, DEFAULT_SOURCE);
    }

    #[test]
    fn test_invalid_policy_is_error() {
        assert!(Config::from_lookup(lookup(&[(DATE_POLICY_VAR, "ignore")])).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default()
            .with_source(Some("local.csv".to_string()))
            .with_skip_invalid_dates(true);

        assert_eq!(config.source, "local.csv");
        assert_eq!(config.date_policy, DatePolicy::Skip);

        let unchanged = config.clone().with_source(None).with_skip_invalid_dates(false);
        assert_eq!(unchanged, config);
    }
}
