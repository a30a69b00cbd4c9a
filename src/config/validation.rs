//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid, pool non-empty)
//! - Require connection settings for the MySQL backend
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::{DatabaseBackend, ServiceConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a loaded configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::new("listener.port", "must be non-zero"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than zero"));
    }

    let timeouts = &config.timeouts;
    if timeouts.query_secs == 0 {
        errors.push(ValidationError::new("timeouts.query_secs", "must be greater than zero"));
    } else if timeouts.request_secs > 0 && timeouts.query_secs >= timeouts.request_secs {
        errors.push(ValidationError::new(
            "timeouts.query_secs",
            "must be less than timeouts.request_secs",
        ));
    }

    if config.http.max_body_bytes == 0 {
        errors.push(ValidationError::new("http.max_body_bytes", "must be greater than zero"));
    }

    let db = &config.database;
    if db.max_connections == 0 {
        errors.push(ValidationError::new("database.max_connections", "must be greater than zero"));
    }

    if db.backend == DatabaseBackend::MySql {
        if db.host.trim().is_empty() {
            errors.push(ValidationError::new("database.host", "is required (DB_HOST)"));
        }
        if db.user.trim().is_empty() {
            errors.push(ValidationError::new("database.user", "is required (DB_USER)"));
        }
        if db.name.trim().is_empty() {
            errors.push(ValidationError::new("database.name", "is required (DB_NAME)"));
        }
    }

    let obs = &config.observability;
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", obs.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
