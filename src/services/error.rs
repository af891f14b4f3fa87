use sea_orm::{DbErr, SqlErr};

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(DbErr),
}

pub type ListingResult<T> = Result<T, ListingError>;

impl ListingError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ListingError::NotFound { .. })
    }
}

impl From<DbErr> for ListingError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(msg))
            | Some(SqlErr::UniqueConstraintViolation(msg)) => {
                return ListingError::ConstraintViolation(msg);
            }
            _ => {}
        }

        match err {
            DbErr::Conn(e) => ListingError::Connection(e.to_string()),
            DbErr::ConnectionAcquire(e) => ListingError::Connection(e.to_string()),
            other => ListingError::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_db_errors_are_kept() {
        let err = ListingError::from(DbErr::Custom("boom".into()));

        assert!(matches!(err, ListingError::Database(DbErr::Custom(_))));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_message() {
        let err = ListingError::NotFound {
            entity: "Venue",
            id: 7,
        };

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Venue 7 not found");
    }
}
