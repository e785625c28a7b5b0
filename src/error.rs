use crate::session::AuthMode;

/// Coarse failure category, for callers that only need to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The service rejected the credentials, or answered with an unexpected body.
    InvalidCredentials,
    /// Authentication succeeded over HTTP but no usable session came back.
    MissingAuthHeaders,
    /// Transport failure, non-success status on a data request, or malformed payload.
    NetworkOrDecode,
    /// Client-side misconfiguration or invalid input.
    Config,
}

/// Errors returned by every fallible operation in this crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Login or registration was rejected.
    ///
    /// `mode` tells the two call sites apart so they can show their own copy.
    #[error("{mode} rejected{}: {detail}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    InvalidCredentials {
        mode: AuthMode,
        status: Option<u16>,
        detail: String,
    },

    /// The auth response did not carry every required session header.
    #[error("session headers missing from response: {}", .missing.join(", "))]
    MissingAuthHeaders { missing: Vec<String> },

    /// An authenticated request came back with a non-success status.
    #[error("{operation} failed with status {status}: {detail}")]
    Api {
        operation: &'static str,
        status: u16,
        detail: String,
    },

    /// Transport failure, or a response body that did not decode.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication response body that is not JSON.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Review rejected before sending.
    #[error("Invalid review: {0}")]
    InvalidReview(String),

    /// Missing or invalid configuration or input.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Failure category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCredentials { .. } => ErrorKind::InvalidCredentials,
            Self::MissingAuthHeaders { .. } => ErrorKind::MissingAuthHeaders,
            Self::Api { .. } | Self::Http(_) | Self::Decode(_) => ErrorKind::NetworkOrDecode,
            Self::InvalidReview(_) | Self::Config(_) => ErrorKind::Config,
        }
    }

    /// True when an authenticated request was refused with `401 Unauthorized`.
    ///
    /// No re-authentication happens automatically; callers use this to decide
    /// whether to run [`ApiClient::authenticate`](crate::ApiClient::authenticate) again.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }

    /// True when the caller must not consider the user signed in.
    #[must_use]
    pub fn blocks_sign_in(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidCredentials | ErrorKind::MissingAuthHeaders
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_cover_variants() {
        let missing = Error::MissingAuthHeaders {
            missing: vec!["uid".into()],
        };
        assert_eq!(missing.kind(), ErrorKind::MissingAuthHeaders);
        assert!(missing.blocks_sign_in());

        let api = Error::Api {
            operation: "reviews request",
            status: 500,
            detail: String::new(),
        };
        assert_eq!(api.kind(), ErrorKind::NetworkOrDecode);
        assert!(!api.blocks_sign_in());
        assert!(!api.is_unauthorized());

        assert_eq!(Error::Config("x".into()).kind(), ErrorKind::Config);
    }

    #[test]
    fn unauthorized_only_for_401() {
        let err = Error::Api {
            operation: "reviews request",
            status: 401,
            detail: "expired".into(),
        };
        assert!(err.is_unauthorized());

        let rejected = Error::InvalidCredentials {
            mode: AuthMode::Login,
            status: Some(401),
            detail: String::new(),
        };
        assert!(!rejected.is_unauthorized());
    }

    #[test]
    fn display_mentions_missing_headers() {
        let err = Error::MissingAuthHeaders {
            missing: vec!["access-token".into(), "client".into()],
        };
        assert_eq!(
            err.to_string(),
            "session headers missing from response: access-token, client"
        );
    }

    #[test]
    fn display_includes_status_when_known() {
        let err = Error::InvalidCredentials {
            mode: AuthMode::Register,
            status: Some(422),
            detail: "taken".into(),
        };
        assert_eq!(err.to_string(), "registration rejected (status 422): taken");

        let err = Error::InvalidCredentials {
            mode: AuthMode::Login,
            status: None,
            detail: "bad body".into(),
        };
        assert_eq!(err.to_string(), "login rejected: bad body");
    }
}
