/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth::requires (permission 付き handler), cors, http (横断的な layer)
 */
pub mod auth;
pub mod cors;
pub mod http;
