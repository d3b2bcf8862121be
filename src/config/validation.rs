//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the upstream target (domain is a bare host, prefix is rooted)
//! - Validate value ranges (timeouts > 0, bind address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ShimConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ShimConfig;

/// A single semantic violation in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("upstream domain must not be empty")]
    EmptyUpstreamDomain,

    #[error("upstream domain must not include a scheme: {0}")]
    DomainHasScheme(String),

    #[error("upstream domain must not end with '/': {0}")]
    DomainTrailingSlash(String),

    #[error("upstream domain is not a valid host: {0}")]
    DomainNotAHost(String),

    #[error("path prefix must be empty or start with '/': {0}")]
    PrefixNotRooted(String),

    #[error("upstream scheme must be \"http\" or \"https\": {0}")]
    UnsupportedScheme(String),

    #[error("bind address is not a valid socket address: {0}")]
    InvalidBindAddress(String),

    #[error("{0} timeout must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Check every semantic constraint and report all violations.
pub fn validate_config(config: &ShimConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let upstream = &config.upstream;
    if upstream.domain.is_empty() {
        errors.push(ValidationError::EmptyUpstreamDomain);
    } else {
        if upstream.domain.contains("://") {
            errors.push(ValidationError::DomainHasScheme(upstream.domain.clone()));
        } else if upstream.domain.ends_with('/') {
            errors.push(ValidationError::DomainTrailingSlash(upstream.domain.clone()));
        } else if !is_bare_host(&upstream.domain) {
            errors.push(ValidationError::DomainNotAHost(upstream.domain.clone()));
        }
    }

    if !upstream.path_prefix.is_empty() && !upstream.path_prefix.starts_with('/') {
        errors.push(ValidationError::PrefixNotRooted(upstream.path_prefix.clone()));
    }

    match upstream.scheme.as_str() {
        "http" | "https" => {}
        other => errors.push(ValidationError::UnsupportedScheme(other.to_string())),
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A domain is acceptable when it parses as nothing but the authority of a
/// URL: host, optional port, no path, no query, no userinfo.
fn is_bare_host(domain: &str) -> bool {
    match Url::parse(&format!("http://{}", domain)) {
        Ok(url) => {
            url.host_str().is_some()
                && url.path() == "/"
                && url.query().is_none()
                && url.fragment().is_none()
                && url.username().is_empty()
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ShimConfig {
        let mut config = ShimConfig::default();
        config.upstream.domain = "tags.example.net".to_string();
        config.upstream.path_prefix = "/xyz".to_string();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_domain_with_port_passes() {
        let mut config = valid_config();
        config.upstream.domain = "127.0.0.1:8443".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_prefix_passes() {
        let mut config = valid_config();
        config.upstream.path_prefix = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_domain_rejected() {
        let mut config = valid_config();
        config.upstream.domain = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::EmptyUpstreamDomain]);
    }

    #[test]
    fn test_domain_with_scheme_rejected() {
        let mut config = valid_config();
        config.upstream.domain = "https://tags.example.net".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::DomainHasScheme(_)));
    }

    #[test]
    fn test_domain_with_path_rejected() {
        let mut config = valid_config();
        config.upstream.domain = "tags.example.net/extra".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::DomainNotAHost(_)));
    }

    #[test]
    fn test_unrooted_prefix_rejected() {
        let mut config = valid_config();
        config.upstream.path_prefix = "xyz".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::PrefixNotRooted(_)));
    }

    #[test]
    fn test_all_errors_reported() {
        let mut config = valid_config();
        config.upstream.domain = "tags.example.net/".to_string();
        config.upstream.scheme = "ftp".to_string();
        config.listener.bind_address = "not-an-address".to_string();
        config.timeouts.request_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
