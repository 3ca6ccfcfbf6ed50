pub mod access_jwt;
pub mod error;
pub mod jwks;
pub mod permissions;

pub use access_jwt::{AccessTokenClaims, AuthService};
pub use error::AuthError;
pub use jwks::{HttpKeySource, KeySource};
pub use permissions::check_permissions;
