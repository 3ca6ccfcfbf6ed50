use axum::http::StatusCode;
use thiserror::Error;

/// Why a request was refused by the auth layer.
///
/// Each variant carries a stable machine code (`code()`), the HTTP status it
/// maps to, and the description returned to the client as `message`.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    MissingHeader,

    #[error("{0}")]
    InvalidHeader(&'static str),

    #[error("Unable to fetch signing keys.")]
    KeySet(#[source] KeySetError),

    #[error("Token signature is invalid.")]
    InvalidToken,

    #[error("Token expired.")]
    TokenExpired,

    #[error("Incorrect claims. Please, check the audience and issuer.")]
    InvalidClaims,

    #[error("Permissions not included in JWT.")]
    MissingPermissions,

    #[error("Permission not found.")]
    Unauthorized,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingHeader => "authorization_header_missing",
            Self::InvalidHeader(_) | Self::KeySet(_) => "invalid_header",
            Self::InvalidToken => "invalid_token",
            Self::TokenExpired => "token_expired",
            Self::InvalidClaims | Self::MissingPermissions => "invalid_claims",
            Self::Unauthorized => "unauthorized",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            // claim absent entirely
            Self::MissingPermissions => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Failures while fetching or parsing the signing key set.
#[derive(Debug, Error)]
pub enum KeySetError {
    #[error("key set request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("key set endpoint returned {0}")]
    Status(reqwest::StatusCode),

    #[error("key set document is not valid: {0}")]
    Parse(String),
}

impl From<KeySetError> for AuthError {
    fn from(e: KeySetError) -> Self {
        AuthError::KeySet(e)
    }
}
