/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - 書き込み系の失敗は handler 側で 422 に落とす
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("constraint violated: {0}")]
    Constraint(String),
    #[error("db error")]
    Db(#[from] sqlx::Error),
}

impl RepoError {
    /// SQLSTATE class 22 (data exception) and 23 (integrity constraint)
    /// mean the row itself was rejected; everything else is a backend fault.
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e
            && let Some(code) = dbe.code()
            && (code.starts_with("22") || code.starts_with("23"))
        {
            return RepoError::Constraint(dbe.message().to_string());
        }
        RepoError::Db(e)
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
