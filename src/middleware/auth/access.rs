//! Bearer token 検証 + permission チェック → AuthCtx を extensions に入れる
//!
//! 流れ:
//! - `Authorization` が無ければ即 401 (検証は一切しない)
//! - `Bearer <token>` の 2 要素でなければ 401
//! - AuthService で署名/iss/aud/exp を検証
//! - `permissions` に要求 permission が含まれるかチェック (無ければ 400 / 含まれなければ 403)
//! - 成功時のみ AuthCtx を載せて handler を実行

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::{AuthError, AuthService, check_permissions};

#[derive(Clone)]
struct PermissionGuard {
    auth: Arc<AuthService>,
    permission: &'static str,
}

/// handler (MethodRouter) を permission 付きで包む。
///
/// 例：
/// ```ignore
/// .route("/movies", requires(get(list_movies), &auth, "get:movies"))
/// ```
pub fn requires<S>(
    route: MethodRouter<S>,
    auth: &Arc<AuthService>,
    permission: &'static str,
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    let guard = PermissionGuard {
        auth: auth.clone(),
        permission,
    };
    // route_layer なので、マッチしなかったリクエスト (404/405) には掛からない
    route.route_layer(middleware::from_fn_with_state(guard, permission_middleware))
}

async fn permission_middleware(
    State(guard): State<PermissionGuard>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = match authorize(&guard, req.headers()).await {
        Ok(ctx) => ctx,
        Err(err) => {
            tracing::warn!(
                code = err.code(),
                status = err.status().as_u16(),
                permission = guard.permission,
                error = %err,
                "request rejected by auth"
            );
            return Err(AppError::Auth(err));
        }
    };

    tracing::debug!(
        subject = %ctx.subject,
        permission = guard.permission,
        expires_at = ?ctx.expires_at,
        "request authorized"
    );

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

async fn authorize(guard: &PermissionGuard, headers: &HeaderMap) -> Result<AuthCtx, AuthError> {
    let token = bearer_token(headers)?;
    let claims = guard.auth.verify(token).await?;
    check_permissions(&claims, guard.permission)?;
    Ok(AuthCtx::from_claims(claims))
}

/// `Authorization: Bearer <token>` から token を取り出す。
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader("Authorization header must be bearer token."))?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), _, _) if !scheme.eq_ignore_ascii_case("bearer") => Err(
            AuthError::InvalidHeader("Authorization header must start with \"Bearer\"."),
        ),
        (Some(_), None, _) => Err(AuthError::InvalidHeader("Token not found.")),
        (Some(_), Some(token), None) => Ok(token),
        _ => Err(AuthError::InvalidHeader(
            "Authorization header must be bearer token.",
        )),
    }
}
