//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Record not found, including a referenced row missing at insert time
    #[error("record not found")]
    NotFound,

    /// Unique constraint violated (value names the conflicting field)
    #[error("conflict on {0}")]
    Conflict(String),
}

impl DbError {
    /// Translate constraint violations on insert.
    ///
    /// Unique violations become [`DbError::Conflict`] and foreign-key
    /// violations (the referenced user or photo is gone) become
    /// [`DbError::NotFound`]. Other errors are kept as-is.
    pub(crate) fn from_insert(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = err {
            if db.is_unique_violation() {
                let field = match db.constraint() {
                    Some(c) if c.contains("email") => "email",
                    Some(c) if c.contains("username") => "username",
                    _ => "unique key",
                };
                tracing::debug!(constraint = ?db.constraint(), field, "Insert hit unique constraint");
                return Self::Conflict(field.to_string());
            }
            if db.is_foreign_key_violation() {
                tracing::debug!(constraint = ?db.constraint(), "Insert references a missing row");
                return Self::NotFound;
            }
        }
        Self::Sqlx(err)
    }
}

/// Result alias for repository operations
pub type DbResult<T> = Result<T, DbError>;
