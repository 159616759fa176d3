use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Only the item's founder can do that")]
    NotOwner,

    #[error("Item is already claimed")]
    AlreadyClaimed,

    #[error("Claim does not belong to this item")]
    ClaimNotFound,

    #[error("You have already applied for this item.")]
    DuplicateClaim,

    #[error("An account with this email already exists")]
    DuplicateEmail,

    /// Winner flags and the item's winning claim disagree after selection.
    /// The transaction is rolled back when this is raised.
    #[error("Winner selection for item {0} left inconsistent state and was rolled back")]
    InconsistentWinner(Uuid),

    #[error("DB lock poisoned: {0}")]
    LockPoisoned(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// True when `err` is a UNIQUE or PRIMARY KEY constraint violation.
    pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
        match err {
            rusqlite::Error::SqliteFailure(e, _) => {
                e.code == rusqlite::ErrorCode::ConstraintViolation
                    && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                        || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
            }
            _ => false,
        }
    }
}
