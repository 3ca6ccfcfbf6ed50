pub mod actors;
pub mod movies;

use serde::Serialize;

/// `{"success": true, "delete": <id>}`
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub delete: i64,
}

impl DeletedResponse {
    pub fn new(id: i64) -> Self {
        Self {
            success: true,
            delete: id,
        }
    }
}
