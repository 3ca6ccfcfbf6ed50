pub mod auth_ctx;
pub mod record_id;

pub use auth_ctx::AuthCtx;
pub use record_id::RecordId;
