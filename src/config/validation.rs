//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs and value ranges (timeouts > 0, poll bounds ordered)
//! - Check that user chain entries are well formed and do not clash
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::fmt;

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn check_url(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    if let Err(e) = value.parse::<url::Url>() {
        errors.push(ValidationError::new(field, format!("invalid URL '{}': {}", value, e)));
    }
}

fn check_positive(field: &str, value: u64, errors: &mut Vec<ValidationError>) {
    if value == 0 {
        errors.push(ValidationError::new(field, "must be greater than zero"));
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let relay = &config.relay;
    check_url("relay.rpc_url", &relay.rpc_url, &mut errors);
    check_url("relay.status_url", &relay.status_url, &mut errors);
    check_positive("relay.request_timeout_secs", relay.request_timeout_secs, &mut errors);
    check_positive("relay.poll_interval_ms", relay.poll_interval_ms, &mut errors);
    check_positive("relay.task_timeout_secs", relay.task_timeout_secs, &mut errors);
    if relay.max_poll_interval_ms < relay.poll_interval_ms {
        errors.push(ValidationError::new(
            "relay.max_poll_interval_ms",
            "must not be smaller than relay.poll_interval_ms",
        ));
    }

    check_positive("rpc.timeout_secs", config.rpc.timeout_secs, &mut errors);
    check_positive("rpc.receipt_timeout_secs", config.rpc.receipt_timeout_secs, &mut errors);

    let mut keys = HashSet::new();
    let mut ids = HashSet::new();
    for (i, chain) in config.chains.iter().enumerate() {
        let prefix = format!("chains[{}]", i);
        if chain.key.trim().is_empty() {
            errors.push(ValidationError::new(format!("{}.key", prefix), "must not be empty"));
        } else if !keys.insert(chain.key.as_str()) {
            errors.push(ValidationError::new(
                format!("{}.key", prefix),
                format!("duplicate key '{}'", chain.key),
            ));
        }
        if chain.chain_id == 0 {
            errors.push(ValidationError::new(
                format!("{}.chain_id", prefix),
                "must be greater than zero",
            ));
        } else if !ids.insert(chain.chain_id) {
            errors.push(ValidationError::new(
                format!("{}.chain_id", prefix),
                format!("duplicate chain id {}", chain.chain_id),
            ));
        }
        check_url(&format!("{}.rpc_url", prefix), &chain.rpc_url, &mut errors);
        for (j, failover) in chain.failover_urls.iter().enumerate() {
            check_url(&format!("{}.failover_urls[{}]", prefix, j), failover, &mut errors);
        }
        check_url(&format!("{}.block_explorer", prefix), &chain.block_explorer, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::get_chain_config_by_name;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.relay.rpc_url = "not a url".to_string();
        config.relay.poll_interval_ms = 0;
        config.rpc.timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"relay.rpc_url"));
        assert!(fields.contains(&"relay.poll_interval_ms"));
        assert!(fields.contains(&"rpc.timeout_secs"));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_inverted_poll_bounds() {
        let mut config = AppConfig::default();
        config.relay.poll_interval_ms = 5000;
        config.relay.max_poll_interval_ms = 100;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "relay.max_poll_interval_ms");
    }

    #[test]
    fn test_duplicate_chain_entries() {
        let chain = get_chain_config_by_name("inkSepolia").unwrap().clone();
        let mut config = AppConfig::default();
        config.chains = vec![chain.clone(), chain];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("duplicate key 'inkSepolia'"));
        assert!(errors[1].to_string().contains("duplicate chain id 763373"));
    }

    #[test]
    fn test_bad_chain_urls() {
        let mut chain = get_chain_config_by_name("baseSepolia").unwrap().clone();
        chain.rpc_url = "sepolia.base.org".to_string();
        chain.failover_urls = vec!["::".to_string()];
        let mut config = AppConfig::default();
        config.chains = vec![chain];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "chains[0].rpc_url");
        assert_eq!(errors[1].field, "chains[0].failover_urls[0]");
    }
}
