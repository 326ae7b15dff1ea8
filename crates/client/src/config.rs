//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CAPHE_API_BASE_URL` - explicit API origin; absent falls back to the
//!   default remote host
//! - `CAPHE_APP_ORIGIN` - origin the dashboard itself is served from; used
//!   by the mixed-content rule and as the same-origin request target
//! - `CAPHE_LOGIN_PATH` - override for the staff login endpoint
//! - `CAPHE_PRODUCT_SEGMENTS` - comma-separated per-category product list
//!   paths; set to an empty value to use the unified products endpoint
//! - `CAPHE_HTTP_TIMEOUT_SECS` - request timeout (default: 15)
//! - `CAPHE_STATE_DIR` - directory for persisted client state
//!   (default: `$HOME/.caphe-admin`)
//!
//! Endpoint paths have drifted between backend iterations, so every path is
//! configuration with a default rather than a constant.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default remote host used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://caphe-admin-api.fly.dev";

/// Namespace prefix applied to every persisted client-state key.
pub const STORAGE_PREFIX: &str = "caphe-admin-";

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Endpoint paths for the café backend.
///
/// One backend iteration serves products segmented by category, another a
/// unified collection; `product_segments` empty means "use `products`".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Staff login (`POST {email, password}` returning a token).
    pub login: String,
    /// Customers collection.
    pub customers: String,
    /// Unified products collection (also the create/update target).
    pub products: String,
    /// Per-category product list paths (coffee/tea/freeze variant).
    pub product_segments: Vec<String>,
    /// Categories reference data.
    pub categories: String,
    /// Subscription plans collection.
    pub plans: String,
    /// Orders collection (read-only).
    pub orders: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "/api/staff/login".to_owned(),
            customers: "/api/customers".to_owned(),
            products: "/api/products".to_owned(),
            product_segments: vec![
                "/api/products/coffees".to_owned(),
                "/api/products/teas".to_owned(),
                "/api/products/freezes".to_owned(),
            ],
            categories: "/api/categories".to_owned(),
            plans: "/api/plans".to_owned(),
            orders: "/api/orders".to_owned(),
        }
    }
}

impl Endpoints {
    /// Apply environment overrides on top of the defaults.
    fn from_env() -> Self {
        let mut endpoints = Self::default();
        if let Some(login) = get_optional_env("CAPHE_LOGIN_PATH") {
            endpoints.login = login;
        }
        if let Some(segments) = get_optional_env("CAPHE_PRODUCT_SEGMENTS") {
            endpoints.product_segments = segments
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect();
        }
        endpoints
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Explicitly configured API origin, if any.
    pub base_url: Option<Url>,
    /// Origin the dashboard is served from, if known.
    pub app_origin: Option<Url>,
    /// Endpoint paths.
    pub endpoints: Endpoints,
    /// Request timeout.
    pub timeout: Duration,
    /// Directory holding persisted client state (session, preferences).
    pub state_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_optional_url("CAPHE_API_BASE_URL")?;
        let app_origin = parse_optional_url("CAPHE_APP_ORIGIN")?;

        let timeout_secs = get_optional_env("CAPHE_HTTP_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("CAPHE_HTTP_TIMEOUT_SECS".to_owned(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            base_url,
            app_origin,
            endpoints: Endpoints::from_env(),
            timeout: Duration::from_secs(timeout_secs),
            state_dir: default_state_dir(),
        })
    }

    /// Build a config pointing at an explicit API origin (tests, tooling).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` is not a valid URL.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("base_url".to_owned(), e.to_string())
        })?;
        Ok(Self {
            base_url: Some(parsed),
            app_origin: None,
            endpoints: Endpoints::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            state_dir: default_state_dir(),
        })
    }

    /// Replace the persisted-state directory.
    #[must_use]
    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = dir.into();
        self
    }

    /// Replace the endpoint table.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// The configured base, after applying the mixed-content rule.
    ///
    /// When the explicit base uses `http://` while the app origin is served
    /// over `https://`, browsers would block the requests outright, so the
    /// explicit base is discarded and the empty string (same-origin) is
    /// returned instead.
    #[must_use]
    pub fn effective_base_url(&self) -> String {
        match (&self.base_url, &self.app_origin) {
            (Some(base), Some(origin))
                if base.scheme() == "http" && origin.scheme() == "https" =>
            {
                String::new()
            }
            (Some(base), _) => trim_origin(base),
            (None, _) => String::new(),
        }
    }

    /// The absolute origin requests resolve against.
    ///
    /// An empty effective base means same-origin: requests go to the app
    /// origin, or to the default remote host when no origin is known.
    #[must_use]
    pub fn request_origin(&self) -> String {
        let effective = self.effective_base_url();
        if effective.is_empty() {
            self.app_origin
                .as_ref()
                .map_or_else(|| DEFAULT_BASE_URL.to_owned(), trim_origin)
        } else {
            effective
        }
    }

    /// Absolute URL for an endpoint path.
    #[must_use]
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{path}", self.request_origin())
    }
}

fn trim_origin(url: &Url) -> String {
    url.as_str().trim_end_matches('/').to_owned()
}

fn parse_optional_url(key: &str) -> Result<Option<Url>, ConfigError> {
    get_optional_env(key)
        .map(|raw| {
            Url::parse(raw.trim())
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
        })
        .transpose()
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Resolve the persisted-state directory:
/// `CAPHE_STATE_DIR`, else `$HOME/.caphe-admin`, else `./.caphe-admin`.
fn default_state_dir() -> PathBuf {
    if let Some(dir) = get_optional_env("CAPHE_STATE_DIR") {
        return PathBuf::from(dir);
    }
    get_optional_env("HOME").map_or_else(
        || PathBuf::from(".caphe-admin"),
        |home| PathBuf::from(home).join(".caphe-admin"),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(base: Option<&str>, origin: Option<&str>) -> ClientConfig {
        ClientConfig {
            base_url: base.map(|b| Url::parse(b).unwrap()),
            app_origin: origin.map(|o| Url::parse(o).unwrap()),
            endpoints: Endpoints::default(),
            timeout: Duration::from_secs(15),
            state_dir: PathBuf::from(".caphe-admin"),
        }
    }

    #[test]
    fn test_insecure_base_discarded_on_secure_origin() {
        let cfg = config(Some("http://api.example.com"), Some("https://admin.caphe.coffee"));
        assert_eq!(cfg.effective_base_url(), "");
        assert_eq!(cfg.request_origin(), "https://admin.caphe.coffee");
        assert_eq!(
            cfg.endpoint_url("/api/customers"),
            "https://admin.caphe.coffee/api/customers"
        );
    }

    #[test]
    fn test_insecure_base_kept_on_insecure_origin() {
        let cfg = config(Some("http://api.example.com"), Some("http://localhost:5173"));
        assert_eq!(cfg.effective_base_url(), "http://api.example.com");
    }

    #[test]
    fn test_secure_base_kept_on_secure_origin() {
        let cfg = config(Some("https://api.example.com"), Some("https://admin.caphe.coffee"));
        assert_eq!(cfg.effective_base_url(), "https://api.example.com");
    }

    #[test]
    fn test_absent_base_defaults_to_remote_host() {
        let cfg = config(None, None);
        assert_eq!(cfg.request_origin(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_endpoint_url_joins_path() {
        let cfg = config(Some("https://api.example.com"), None);
        assert_eq!(
            cfg.endpoint_url("/api/plans"),
            "https://api.example.com/api/plans"
        );
    }

    #[test]
    fn test_default_endpoints() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.login, "/api/staff/login");
        assert_eq!(endpoints.product_segments.len(), 3);
    }
}
