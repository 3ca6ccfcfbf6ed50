/*
 * Responsibility
 * - Path の `{id}` を整数 ID として受ける
 * - 整数でなければ 404 (route に一致しない扱い)
 */
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::AppError;

#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;
        Ok(Self(id))
    }
}
