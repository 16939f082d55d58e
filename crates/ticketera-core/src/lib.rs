//! ticketera-core - Core types and contracts for the Ticketera client.
//!
//! Everything here is transport-agnostic: the error taxonomy, credential
//! types, API configuration, request/response contracts, and the seams
//! (session storage, session-expired notification) that the HTTP gateway
//! is built around.

pub mod config;
pub mod credentials;
pub mod error;
pub mod tokens;
pub mod traits;
pub mod types;

pub use config::ApiConfig;
pub use credentials::Credentials;
pub use error::{Error, ErrorCode, HttpError};
pub use tokens::{AccessToken, RefreshToken, TokenPair};
pub use traits::{
    MemorySessionStore, NoopNotifier, SessionExpiredNotifier, SessionStore, SessionUpdate,
    StoredSession,
};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
