//! Scope check against the token's `permissions` claim.
//!
//! Matching is exact, case-sensitive membership. `get:*` or `*` in a token
//! grant nothing beyond their literal string.
use crate::services::auth::access_jwt::AccessTokenClaims;
use crate::services::auth::error::AuthError;

pub fn check_permissions(claims: &AccessTokenClaims, required: &str) -> Result<(), AuthError> {
    let granted = claims
        .permissions
        .as_ref()
        .ok_or(AuthError::MissingPermissions)?;

    if granted.iter().any(|p| p == required) {
        Ok(())
    } else {
        Err(AuthError::Unauthorized)
    }
}
