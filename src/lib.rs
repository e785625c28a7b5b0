#![doc = include_str!("../README.md")]

mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod session;
pub mod types;

// Re-exports for convenient access
pub use client::{ApiClient, Pagination};
pub use config::{ClientConfig, DEFAULT_AUTH_HEADERS, DEFAULT_BASE_URL};
pub use dispatch::spawn_with_handler;
pub use error::{Error, ErrorKind};
pub use models::{NewReview, Review, ReviewList, Show, User};
pub use session::{AuthMode, AuthSession, Credentials, SessionToken};
pub use types::{ReviewId, ShowId, UserId};
