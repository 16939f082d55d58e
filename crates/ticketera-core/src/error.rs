//! Error types for the Ticketera client.
//!
//! Every failure surfaced by the gateway falls into one of four request
//! categories: [`Error::Timeout`], [`Error::Network`], [`Error::Http`] and
//! [`Error::Unknown`]. Storage and input validation failures get their own
//! variants so callers can tell local problems from remote ones.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Boxed error used to carry an arbitrary underlying cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Fallback user-facing message for anything without a specific one.
pub const GENERIC_USER_MESSAGE: &str = "Ocurrió un error inesperado. Intenta nuevamente.";

/// The unified error type for Ticketera client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request deadline elapsed before a response arrived.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Transport-level failure (DNS, connect, reset). No HTTP status exists.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// The server answered with a non-success status.
    #[error("{0}")]
    Http(#[from] HttpError),

    /// Anything that does not fit the other categories.
    #[error("unknown error: {0}")]
    Unknown(#[from] UnknownError),

    /// The session store could not be read or written.
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input rejected before any request was made.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Wrap an arbitrary cause as [`Error::Unknown`].
    pub fn unknown(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Unknown(UnknownError::new(message, Some(source.into())))
    }

    /// HTTP status code, if the failure came from a server response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(err) => Some(err.status),
            _ => None,
        }
    }

    /// Application error code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Timeout { .. } => ErrorCode::TimeoutError,
            Error::Network(_) => ErrorCode::NetworkError,
            Error::Http(err) => err.code.clone(),
            Error::InvalidInput(_) => ErrorCode::InvalidInput,
            Error::Unknown(_) | Error::Storage(_) => ErrorCode::UnknownError,
        }
    }

    /// Returns true if the server rejected the caller's credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Http(err) if err.is_auth_error())
    }

    /// Returns true for timeouts and transport failures.
    pub fn is_network_error(&self) -> bool {
        matches!(self, Error::Timeout { .. } | Error::Network(_))
    }

    /// Localized message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            Error::Http(err) => err.user_message(),
            other => other
                .code()
                .user_message()
                .unwrap_or(GENERIC_USER_MESSAGE)
                .to_string(),
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Could not establish a connection (DNS, refused, TLS).
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// The connection broke while sending or receiving.
    #[error("request failed: {message}")]
    Request { message: String },
}

/// An uncategorized failure carrying its original cause.
#[derive(Debug)]
pub struct UnknownError {
    /// Short description of what was being attempted.
    pub message: String,
    source: Option<BoxError>,
}

impl UnknownError {
    /// Create a new unknown error.
    pub fn new(message: impl Into<String>, source: Option<BoxError>) -> Self {
        Self {
            message: message.into(),
            source,
        }
    }
}

impl fmt::Display for UnknownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref source) = self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for UnknownError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Session storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Stored data could not be decoded.
    #[error("corrupt session data: {message}")]
    Corrupt { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A required identifier was empty or malformed.
    #[error("invalid {field}: {reason}")]
    Field { field: &'static str, reason: String },

    /// Generic invalid input.
    #[error("{message}")]
    Other { message: String },
}

/// A non-success response from the API.
///
/// Built from the `{ code, message, details? }` error envelope. When the
/// body is missing or unparsable the code falls back to
/// [`ErrorCode::UnknownError`] and the message to the status reason.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpError {
    /// HTTP status code.
    pub status: u16,
    /// Application-level error code.
    pub code: ErrorCode,
    /// Error message from the server.
    pub message: String,
    /// Optional structured details.
    pub details: Option<serde_json::Value>,
}

impl HttpError {
    /// Create a new HTTP error.
    pub fn new(
        status: u16,
        code: ErrorCode,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
            || matches!(
                self.code,
                ErrorCode::InvalidCredentials | ErrorCode::TokenExpired | ErrorCode::InvalidToken
            )
    }

    /// Check if this is a validation error.
    pub fn is_validation_error(&self) -> bool {
        self.status == 422 || matches!(self.code, ErrorCode::ValidationError | ErrorCode::InvalidInput)
    }

    /// Localized message derived from the error code.
    pub fn user_message(&self) -> String {
        if let Some(message) = self.code.user_message() {
            return message.to_string();
        }
        if self.message.is_empty() {
            GENERIC_USER_MESSAGE.to_string()
        } else {
            self.message.clone()
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} [{}]", self.status, self.code)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}

/// Application error codes shared with the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidCredentials,
    EmailAlreadyExists,
    TokenExpired,
    InvalidToken,
    ValidationError,
    InvalidInput,
    EventNotFound,
    TicketNotAvailable,
    ReservationExpired,
    InsufficientCapacity,
    UnauthorizedAction,
    PaymentFailed,
    RefundNotAllowed,
    TicketsGenerationFailed,
    OnboardingRequired,
    NetworkError,
    TimeoutError,
    UnknownError,
    /// A code this client does not know about, kept verbatim.
    Other(String),
}

impl ErrorCode {
    /// Returns the wire representation of this code.
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            ErrorCode::TokenExpired => "TOKEN_EXPIRED",
            ErrorCode::InvalidToken => "INVALID_TOKEN",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::EventNotFound => "EVENT_NOT_FOUND",
            ErrorCode::TicketNotAvailable => "TICKET_NOT_AVAILABLE",
            ErrorCode::ReservationExpired => "RESERVATION_EXPIRED",
            ErrorCode::InsufficientCapacity => "INSUFFICIENT_CAPACITY",
            ErrorCode::UnauthorizedAction => "UNAUTHORIZED_ACTION",
            ErrorCode::PaymentFailed => "PAYMENT_FAILED",
            ErrorCode::RefundNotAllowed => "REFUND_NOT_ALLOWED",
            ErrorCode::TicketsGenerationFailed => "TICKETS_GENERATION_FAILED",
            ErrorCode::OnboardingRequired => "ONBOARDING_REQUIRED",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::TimeoutError => "TIMEOUT_ERROR",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
            ErrorCode::Other(code) => code,
        }
    }

    /// Localized (es-CL) message for codes that have one.
    pub fn user_message(&self) -> Option<&'static str> {
        let message = match self {
            ErrorCode::InvalidCredentials => {
                "Credenciales inválidas. Verifica tu email y contraseña."
            }
            ErrorCode::EmailAlreadyExists => "Este email ya está registrado.",
            ErrorCode::TokenExpired | ErrorCode::InvalidToken => {
                "Tu sesión ha expirado. Por favor, inicia sesión nuevamente."
            }
            ErrorCode::EventNotFound => "El evento no existe o no está disponible.",
            ErrorCode::TicketNotAvailable => "Las entradas seleccionadas ya no están disponibles.",
            ErrorCode::ReservationExpired => {
                "Tu reserva ha expirado. Por favor, intenta nuevamente."
            }
            ErrorCode::InsufficientCapacity => "No hay suficientes entradas disponibles.",
            ErrorCode::PaymentFailed => "El pago no pudo ser procesado. Intenta nuevamente.",
            ErrorCode::TicketsGenerationFailed => {
                "Hubo un error al generar tus tickets. Se procesará un reembolso automático."
            }
            ErrorCode::OnboardingRequired => {
                "Debes completar el onboarding de staff antes de continuar."
            }
            ErrorCode::NetworkError => {
                "Error de conexión. Verifica tu internet e intenta nuevamente."
            }
            ErrorCode::TimeoutError => "La solicitud tardó demasiado. Intenta nuevamente.",
            _ => return None,
        };
        Some(message)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ErrorCode {
    fn from(s: &str) -> Self {
        match s {
            "INVALID_CREDENTIALS" => ErrorCode::InvalidCredentials,
            "EMAIL_ALREADY_EXISTS" => ErrorCode::EmailAlreadyExists,
            "TOKEN_EXPIRED" => ErrorCode::TokenExpired,
            "INVALID_TOKEN" => ErrorCode::InvalidToken,
            "VALIDATION_ERROR" => ErrorCode::ValidationError,
            "INVALID_INPUT" => ErrorCode::InvalidInput,
            "EVENT_NOT_FOUND" => ErrorCode::EventNotFound,
            "TICKET_NOT_AVAILABLE" => ErrorCode::TicketNotAvailable,
            "RESERVATION_EXPIRED" => ErrorCode::ReservationExpired,
            "INSUFFICIENT_CAPACITY" => ErrorCode::InsufficientCapacity,
            "UNAUTHORIZED_ACTION" => ErrorCode::UnauthorizedAction,
            "PAYMENT_FAILED" => ErrorCode::PaymentFailed,
            "REFUND_NOT_ALLOWED" => ErrorCode::RefundNotAllowed,
            "TICKETS_GENERATION_FAILED" => ErrorCode::TicketsGenerationFailed,
            "ONBOARDING_REQUIRED" => ErrorCode::OnboardingRequired,
            "NETWORK_ERROR" => ErrorCode::NetworkError,
            "TIMEOUT_ERROR" => ErrorCode::TimeoutError,
            "UNKNOWN_ERROR" => ErrorCode::UnknownError,
            other => ErrorCode::Other(other.to_string()),
        }
    }
}

impl FromStr for ErrorCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ErrorCode::from(s))
    }
}

impl Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ErrorCode::from(s.as_str()))
    }
}

/// Error response envelope sent by the API.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub code: Option<ErrorCode>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    /// Build an [`HttpError`], falling back to `reason` when the body has no message.
    pub fn into_http_error(self, status: u16, reason: Option<&str>) -> HttpError {
        let message = self
            .message
            .filter(|m| !m.is_empty())
            .or_else(|| reason.map(str::to_string))
            .unwrap_or_else(|| "Unknown error".to_string());
        HttpError::new(
            status,
            self.code.unwrap_or(ErrorCode::UnknownError),
            message,
            self.details,
        )
    }
}
