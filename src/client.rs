use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::models::{
    NewReview, Review, ReviewEnvelope, ReviewsEnvelope, Show, ShowsEnvelope, UserEnvelope,
};
use crate::session::{AuthMode, AuthSession, Credentials, SessionToken};
use crate::types::ShowId;

/// Page selection for list endpoints, sent as `page` and `items` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    page: u32,
    items: u32,
}

impl Default for Pagination {
    /// First page of 100 items.
    fn default() -> Self {
        Self {
            page: 1,
            items: 100,
        }
    }
}

impl Pagination {
    /// Select page `page` with `items` entries per page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if either value is zero.
    pub fn new(page: u32, items: u32) -> Result<Self, Error> {
        if page == 0 || items == 0 {
            return Err(Error::Config(format!(
                "pagination must be positive, got page={page} items={items}"
            )));
        }
        Ok(Self { page, items })
    }

    /// 1-based page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Items per page.
    #[must_use]
    pub fn items(&self) -> u32 {
        self.items
    }
}

/// Client for the TV Shows service.
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client, building its HTTP client from the config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        Ok(Self {
            config,
            http: builder.build()?,
        })
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    ///
    /// Timeout and user agent from the config are not applied to it.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Exchange credentials for a user and a session token.
    ///
    /// Sends exactly one request. Login posts `{email, password}` to
    /// `users/sign_in`; registration posts the same plus `password_confirmation`
    /// to `users`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCredentials`] if the service answers with a non-success
    ///   status, or with JSON that is not a `{"user": ...}` document.
    /// - [`Error::MissingAuthHeaders`] if the answer is fine but lacks session headers.
    /// - [`Error::Http`] / [`Error::Decode`] on transport failure or a non-JSON body.
    pub async fn authenticate(
        &self,
        mode: AuthMode,
        credentials: &Credentials,
    ) -> Result<AuthSession, Error> {
        let url = self.config.endpoint(mode.path_segments())?;

        let response = self
            .http
            .post(url)
            .json(&credentials.request_body(mode))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(%mode, status = status.as_u16(), "Authentication rejected");
            return Err(Error::InvalidCredentials {
                mode,
                status: Some(status.as_u16()),
                detail,
            });
        }

        let headers = response.headers().clone();
        let body = response.bytes().await?;
        let payload: serde_json::Value = serde_json::from_slice(&body)?;
        let UserEnvelope { user } = serde_json::from_value(payload).map_err(|e| {
            tracing::warn!(%mode, error = %e, "Authentication response has unexpected shape");
            Error::InvalidCredentials {
                mode,
                status: Some(status.as_u16()),
                detail: e.to_string(),
            }
        })?;

        let token = SessionToken::from_headers(&headers, &self.config.auth_headers)
            .inspect_err(|e| tracing::error!(%mode, error = %e, "No usable session issued"))?;

        tracing::info!(%mode, user_id = %user.id, "Authentication successful");
        Ok(AuthSession { user, token })
    }

    /// Sign in to an existing account.
    ///
    /// # Errors
    ///
    /// See [`authenticate`](Self::authenticate).
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession, Error> {
        self.authenticate(AuthMode::Login, credentials).await
    }

    /// Create an account and sign in to it.
    ///
    /// # Errors
    ///
    /// See [`authenticate`](Self::authenticate).
    pub async fn register(&self, credentials: &Credentials) -> Result<AuthSession, Error> {
        self.authenticate(AuthMode::Register, credentials).await
    }

    /// Fetch one page of a show's reviews, in server order.
    ///
    /// An empty page is a success. A `401` is returned as-is; check
    /// [`Error::is_unauthorized`] and authenticate again if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] on a non-success status, or
    /// [`Error::Http`] on transport or decode failure.
    pub async fn fetch_reviews(
        &self,
        token: &SessionToken,
        show_id: &ShowId,
        pagination: Pagination,
    ) -> Result<Vec<Review>, Error> {
        let url = self
            .config
            .endpoint(&["shows", show_id.as_str(), "reviews"])?;

        let response = self
            .http
            .get(url)
            .headers(token.to_header_map())
            .query(&pagination)
            .send()
            .await?;

        let response = Self::ensure_success(response, "reviews request").await?;
        let ReviewsEnvelope { reviews } = response.json().await?;
        tracing::debug!(%show_id, count = reviews.len(), "Fetched reviews");
        Ok(reviews)
    }

    /// Fetch one page of the show listing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] on a non-success status, or
    /// [`Error::Http`] on transport or decode failure.
    pub async fn fetch_shows(
        &self,
        token: &SessionToken,
        pagination: Pagination,
    ) -> Result<Vec<Show>, Error> {
        let url = self.config.endpoint(&["shows"])?;

        let response = self
            .http
            .get(url)
            .headers(token.to_header_map())
            .query(&pagination)
            .send()
            .await?;

        let response = Self::ensure_success(response, "shows request").await?;
        let ShowsEnvelope { shows } = response.json().await?;
        tracing::debug!(count = shows.len(), "Fetched shows");
        Ok(shows)
    }

    /// Post a review and return it as stored by the service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] on a non-success status, or
    /// [`Error::Http`] on transport or decode failure.
    pub async fn create_review(
        &self,
        token: &SessionToken,
        review: &NewReview,
    ) -> Result<Review, Error> {
        let url = self.config.endpoint(&["reviews"])?;

        let response = self
            .http
            .post(url)
            .headers(token.to_header_map())
            .json(review)
            .send()
            .await?;

        let response = Self::ensure_success(response, "review creation").await?;
        let ReviewEnvelope { review } = response.json().await?;
        tracing::info!(review_id = %review.id, show_id = %review.show_id, "Review created");
        Ok(review)
    }

    /// Checks HTTP response status; returns the response on success or an error with details.
    async fn ensure_success(
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<reqwest::Response, Error> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(operation, status, "Request rejected");
        Err(Error::Api {
            operation,
            status,
            detail: body,
        })
    }
}
