use std::time::Duration;

use reqwest::header::HeaderName;
use url::Url;

use crate::error::Error;

/// Production service root.
pub const DEFAULT_BASE_URL: &str = "https://tv-shows.infinum.academy/";

/// Headers that together make up a session on the production service.
pub const DEFAULT_AUTH_HEADERS: [&str; 5] = ["access-token", "client", "token-type", "expiry", "uid"];

/// TV Shows client configuration.
///
/// Everything has a working default; override with the `with_*` methods.
///
/// ```rust,ignore
/// use tvshows_client::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_base_url("http://localhost:3000".parse()?)
///     .with_timeout(std::time::Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ClientConfig {
    pub(crate) base_url: Url,
    pub(crate) auth_headers: Vec<HeaderName>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL.parse().expect("valid default URL"))
    }
}

impl ClientConfig {
    /// Create a config for the service at `base_url`, with default session headers.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: with_trailing_slash(base_url),
            auth_headers: DEFAULT_AUTH_HEADERS
                .into_iter()
                .map(HeaderName::from_static)
                .collect(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Create config from environment variables.
    ///
    /// # Optional env vars
    /// - `TVSHOWS_BASE_URL`: service root (default: production host)
    /// - `TVSHOWS_AUTH_HEADERS`: comma-separated session header names
    /// - `TVSHOWS_TIMEOUT_SECS`: per-request timeout in seconds
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::default();

        if let Ok(url_str) = std::env::var("TVSHOWS_BASE_URL") {
            let url: Url = url_str
                .parse()
                .map_err(|e| Error::Config(format!("TVSHOWS_BASE_URL: {e}")))?;
            config = config.with_base_url(url);
        }
        if let Ok(names) = std::env::var("TVSHOWS_AUTH_HEADERS") {
            config = config.with_auth_headers(parse_header_names(&names)?);
        }
        if let Ok(secs) = std::env::var("TVSHOWS_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("TVSHOWS_TIMEOUT_SECS: {e}")))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Override the service root.
    #[must_use]
    pub fn with_base_url(mut self, url: Url) -> Self {
        self.base_url = with_trailing_slash(url);
        self
    }

    /// Override which response headers form the session token.
    #[must_use]
    pub fn with_auth_headers(mut self, names: Vec<HeaderName>) -> Self {
        self.auth_headers = names;
        self
    }

    /// Per-request timeout. Unset means the transport default.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the `User-Agent` sent with every request.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Service root, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Response headers that form the session token.
    #[must_use]
    pub fn auth_headers(&self) -> &[HeaderName] {
        &self.auth_headers
    }

    /// Per-request timeout, if one is set.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Resolve an endpoint below the base URL, one path segment per item.
    ///
    /// Segments are percent-encoded, so opaque ids cannot escape their slot.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn parse_header_names(list: &str) -> Result<Vec<HeaderName>, Error> {
    let names = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            HeaderName::from_bytes(s.as_bytes())
                .map_err(|e| Error::Config(format!("TVSHOWS_AUTH_HEADERS: {s:?}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if names.is_empty() {
        return Err(Error::Config("TVSHOWS_AUTH_HEADERS is empty".into()));
    }
    Ok(names)
}
