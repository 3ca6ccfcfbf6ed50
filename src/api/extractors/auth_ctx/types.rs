/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックや permission チェックは middleware/services 側の責務
 */
use chrono::{DateTime, Utc};

use crate::services::auth::AccessTokenClaims;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `subject` は IdP の `sub` (例: `auth0|...`)
/// - `expires_at` は token の `exp` (表現できなければ None)
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub subject: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthCtx {
    pub fn from_claims(claims: AccessTokenClaims) -> Self {
        Self {
            subject: claims.sub,
            expires_at: i64::try_from(claims.exp)
                .ok()
                .and_then(|exp| DateTime::from_timestamp(exp, 0)),
        }
    }
}
