//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the pattern-routed server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Route table, tried in order.
    pub routes: Vec<RouteConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// One entry of the route table.
///
/// ```toml
/// [[routes]]
/// method = "GET"
/// pattern = "/hello/:name"
/// body = "hello, {:name}!\n"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging.
    #[serde(default)]
    pub name: Option<String>,

    /// HTTP method, or "ANY" / "*" for every method.
    #[serde(default = "default_method")]
    pub method: String,

    /// Path pattern with `:name` placeholders.
    pub pattern: String,

    /// Response status code.
    #[serde(default = "default_status")]
    pub status: u16,

    /// Response body; `{:key}` is replaced by the request parameter `:key`.
    #[serde(default)]
    pub body: String,

    /// Response content type.
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

impl RouteConfig {
    /// Route with defaults for everything but method and pattern.
    pub fn new(method: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: None,
            method: method.into(),
            pattern: pattern.into(),
            status: default_status(),
            body: String::new(),
            content_type: default_content_type(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Name used in logs: the configured name, else "METHOD pattern".
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{} {}", self.method, self.pattern),
        }
    }
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_status() -> u16 {
    200
}

fn default_content_type() -> String {
    "text/plain; charset=utf-8".to_string()
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.routes.is_empty());
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_route_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [[routes]]
            pattern = "/hello/:name"
            body = "hello, {:name}!"

            [[routes]]
            name = "create"
            method = "POST"
            pattern = "/items/"
            status = 201
            content_type = "application/json"
            "#,
        )
        .unwrap();

        let hello = &config.routes[0];
        assert_eq!(hello.method, "GET");
        assert_eq!(hello.status, 200);
        assert_eq!(hello.content_type, "text/plain; charset=utf-8");
        assert_eq!(hello.label(), "GET /hello/:name");

        let create = &config.routes[1];
        assert_eq!(create.status, 201);
        assert_eq!(create.body, "");
        assert_eq!(create.label(), "create");
    }
}
