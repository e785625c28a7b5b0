use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

use crate::error::Error;
use crate::models::User;

/// Which credential exchange to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMode {
    /// Sign in to an existing account.
    Login,
    /// Create an account and sign in.
    Register,
}

impl AuthMode {
    pub(crate) fn path_segments(self) -> &'static [&'static str] {
        match self {
            Self::Login => &["users", "sign_in"],
            Self::Register => &["users"],
        }
    }

    /// Short headline for a rejected attempt.
    #[must_use]
    pub fn failure_title(self) -> &'static str {
        match self {
            Self::Login => "Login failed.",
            Self::Register => "Registration failed.",
        }
    }

    /// User-facing explanation for a rejected attempt.
    #[must_use]
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Login => "Please check your email and/or password.",
            Self::Register => "Email invalid or already taken.",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Login => "login",
            Self::Register => "registration",
        })
    }
}

/// Email and password for a single authentication call.
///
/// Emptiness is not checked here; that belongs to whoever collects the input.
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Pair an email with its password.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn request_body(&self, mode: AuthMode) -> AuthRequestBody<'_> {
        AuthRequestBody {
            email: &self.email,
            password: &self.password,
            password_confirmation: match mode {
                AuthMode::Login => None,
                AuthMode::Register => Some(self.password.as_str()),
            },
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize)]
pub(crate) struct AuthRequestBody<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    password_confirmation: Option<&'a str>,
}

/// Server-issued session credentials.
///
/// Holds exactly the configured auth headers, captured from a successful
/// login or registration response. Values are kept byte-for-byte and sent
/// back unchanged on every authenticated request. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    entries: Vec<(HeaderName, HeaderValue)>,
}

impl SessionToken {
    /// Capture the `required` headers from an auth response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAuthHeaders`] naming every required header
    /// that `headers` does not contain.
    pub fn from_headers(headers: &HeaderMap, required: &[HeaderName]) -> Result<Self, Error> {
        let mut entries = Vec::with_capacity(required.len());
        let mut missing = Vec::new();

        for name in required {
            match headers.get(name) {
                Some(value) => entries.push((name.clone(), value.clone())),
                None => missing.push(name.as_str().to_owned()),
            }
        }

        if !missing.is_empty() {
            return Err(Error::MissingAuthHeaders { missing });
        }
        Ok(Self { entries })
    }

    /// Build a token from a plain name/value mapping, e.g. one restored by the caller.
    ///
    /// Header names are case-insensitive, so `Client` and `client` are the same
    /// header and may appear only once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a name or value is not a legal HTTP header
    /// or a name repeats, or [`Error::MissingAuthHeaders`] if a required header
    /// is absent.
    pub fn from_pairs<I, K, V>(pairs: I, required: &[HeaderName]) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            let name = name.as_ref();
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::Config(format!("invalid header name {name:?}: {e}")))?;
            let header_value = HeaderValue::from_str(value.as_ref())
                .map_err(|e| Error::Config(format!("invalid value for header {name:?}: {e}")))?;
            if headers.insert(header_name, header_value).is_some() {
                return Err(Error::Config(format!("duplicate header {name:?}")));
            }
        }
        Self::from_headers(&headers, required)
    }

    /// Raw value of one session header. Names are case-insensitive.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_str().eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Value of one session header, if it is visible ASCII.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.to_str().ok())
    }

    /// Session headers in configured order.
    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }

    /// Number of session headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True only when no auth headers are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries as request headers.
    #[must_use]
    pub fn to_header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            let mut value = value.clone();
            value.set_sensitive(true);
            map.insert(name.clone(), value);
        }
        map
    }
}

// Values are secrets; only the names are printed.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field(
                "headers",
                &self.entries.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Result of a successful login or registration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct AuthSession {
    /// The signed-in account.
    pub user: User,
    /// Headers to attach to every authenticated request.
    pub token: SessionToken,
}
