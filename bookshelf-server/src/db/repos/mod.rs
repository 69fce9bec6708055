//! Repository implementations for PostgreSQL access
//!
//! Each repository borrows the pool and owns the SQL for one collection.

pub mod authors;
pub mod books;

pub use authors::AuthorRepo;
pub use books::BookRepo;

use uuid::Uuid;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("invalid id '{0}'")]
    InvalidId(String),

    #[error("store not connected ({0})")]
    Unavailable(crate::db::ConnectionState),
}

impl DbError {
    /// True when the failure means the store could not be reached at all,
    /// as opposed to a query that reached it and failed.
    pub fn is_connection(&self) -> bool {
        match self {
            Self::Unavailable(_) => true,
            Self::Sqlx(e) => matches!(
                e,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            Self::InvalidId(_) => false,
        }
    }
}

/// Parse a raw id from a request path into a store identity.
pub fn parse_id(raw: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|_| DbError::InvalidId(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ConnectionState;

    #[test]
    fn parse_id_accepts_hyphenated_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        let err = parse_id("not-an-id").unwrap_err();
        assert!(matches!(err, DbError::InvalidId(ref raw) if raw == "not-an-id"));
        assert!(!err.is_connection());
    }

    #[test]
    fn pool_timeout_is_connection_failure() {
        assert!(DbError::Sqlx(sqlx::Error::PoolTimedOut).is_connection());
        assert!(DbError::Unavailable(ConnectionState::Disconnected).is_connection());
        assert!(!DbError::Sqlx(sqlx::Error::RowNotFound).is_connection());
    }
}
