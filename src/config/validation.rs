//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate route methods and status codes
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Pattern syntax is not checked; a malformed pattern simply never matches

use std::net::SocketAddr;

use axum::http::StatusCode;
use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::routing::MethodFilter;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("route {route}: invalid method {method:?}")]
    InvalidMethod { route: String, method: String },

    #[error("route {route}: pattern is empty")]
    EmptyPattern { route: String },

    #[error("route {route}: status {status} is not a valid HTTP status code")]
    InvalidStatus { route: String, status: u16 },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Check a parsed configuration, collecting every problem.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    for (index, route) in config.routes.iter().enumerate() {
        let label = format!("#{} ({})", index, route.label());

        if route.method.parse::<MethodFilter>().is_err() {
            errors.push(ValidationError::InvalidMethod {
                route: label.clone(),
                method: route.method.clone(),
            });
        }
        if route.pattern.is_empty() {
            errors.push(ValidationError::EmptyPattern {
                route: label.clone(),
            });
        }
        if StatusCode::from_u16(route.status).is_err() {
            errors.push(ValidationError::InvalidStatus {
                route: label,
                status: route.status,
            });
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
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
    use crate::config::RouteConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ServerConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.routes.push(RouteConfig::new("NOT A METHOD", ""));
        config.routes.push(RouteConfig::new("GET", "/ok").with_status(42));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::InvalidBindAddress("not-an-address".into())));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::EmptyPattern {
            route: "#0 (NOT A METHOD )".into()
        }));
        assert!(errors.contains(&ValidationError::InvalidStatus {
            route: "#1 (GET /ok)".into(),
            status: 42
        }));
    }

    #[test]
    fn test_any_method_is_accepted() {
        let mut config = ServerConfig::default();
        config.routes.push(RouteConfig::new("ANY", "/hook"));
        config.routes.push(RouteConfig::new("*", "/hook2"));
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ServerConfig::default();
        config.observability.metrics_address = "nope".into();
        assert_eq!(validate_config(&config), Ok(()));

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::InvalidMetricsAddress("nope".into())])
        );
    }

    #[test]
    fn test_log_level() {
        let mut config = ServerConfig::default();
        config.observability.log_level = "WARN".into();
        assert_eq!(validate_config(&config), Ok(()));

        config.observability.log_level = "loud".into();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::InvalidLogLevel("loud".into())])
        );
    }
}
