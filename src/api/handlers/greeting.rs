/*
 * Responsibility
 * - GET / (認証なし)
 * - EXCITED=true なら歓迎メッセージ付き
 */
use axum::extract::State;

use crate::state::AppState;

pub async fn greeting(State(state): State<AppState>) -> &'static str {
    if state.excited {
        "Hello!!!!! Welcome to Casting Agency."
    } else {
        "Hello"
    }
}
