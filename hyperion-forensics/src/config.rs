//! Backend location, resolved once and passed into the client.

/// Base URL used when nothing is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Variable holding the backend URL for server-side callers.
pub const SERVER_URL_VAR: &str = "BACKEND_URL";

/// Variable holding the public backend URL for client-side callers.
pub const PUBLIC_URL_VAR: &str = "PUBLIC_BACKEND_URL";

/// Where the calling code runs, which decides the backend URL it should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionContext {
    /// Server-side, may reach the backend on an internal address.
    #[default]
    Server,
    /// Client-side, must use the public address.
    Client,
}

/// Backend URLs for both execution contexts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// URL used from [`ExecutionContext::Server`].
    pub server_url: String,
    /// URL used from [`ExecutionContext::Client`].
    pub public_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_BACKEND_URL.into(),
            public_url: DEFAULT_BACKEND_URL.into(),
        }
    }
}

impl BackendConfig {
    /// Read `BACKEND_URL` and `PUBLIC_BACKEND_URL` from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or blank values fall back to
    /// [`DEFAULT_BACKEND_URL`].
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let resolve = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
        };
        Self {
            server_url: resolve(SERVER_URL_VAR),
            public_url: resolve(PUBLIC_URL_VAR),
        }
    }

    /// The base URL for the given context.
    #[must_use]
    pub fn base_url(&self, context: ExecutionContext) -> &str {
        match context {
            ExecutionContext::Server => &self.server_url,
            ExecutionContext::Client => &self.public_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_localhost() {
        let config = BackendConfig::from_lookup(|_| None);
        assert_eq!(config, BackendConfig::default());
        assert_eq!(config.base_url(ExecutionContext::Server), DEFAULT_BACKEND_URL);
        assert_eq!(config.base_url(ExecutionContext::Client), DEFAULT_BACKEND_URL);
    }

    #[test]
    fn contexts_resolve_independently() {
        let config = BackendConfig::from_lookup(lookup(&[
            ("BACKEND_URL", "http://backend.internal:8000"),
            ("PUBLIC_BACKEND_URL", "https://api.hyperion.example"),
        ]));
        assert_eq!(
            config.base_url(ExecutionContext::Server),
            "http://backend.internal:8000"
        );
        assert_eq!(
            config.base_url(ExecutionContext::Client),
            "https://api.hyperion.example"
        );
    }

    #[test]
    fn blank_value_counts_as_unset() {
        let config = BackendConfig::from_lookup(lookup(&[("BACKEND_URL", "  ")]));
        assert_eq!(config.server_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn default_context_is_server() {
        assert_eq!(ExecutionContext::default(), ExecutionContext::Server);
    }
}
