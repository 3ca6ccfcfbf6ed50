/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - store: Arc<dyn CastingStore>, auth: Arc<AuthService> など
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::CastingStore;
use crate::services::auth::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CastingStore>,
    pub auth: Arc<AuthService>,
    pub excited: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn CastingStore>, auth: Arc<AuthService>, excited: bool) -> Self {
        Self {
            store,
            auth,
            excited,
        }
    }
}
