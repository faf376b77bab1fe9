use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Database errors
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Connection pool error: {0}")]
    ConnectionPool(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Error executing statement: {0}")]
    Execution(String),

    #[error("Record not found: {0} with ID {1}")]
    NotFound(String, String),

    #[error("Conflict error: {0}")]
    Conflict(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Database error: {0}")]
    Other(String),
}

impl serde::Serialize for DbError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("DbError", 2)?;
        match self {
            DbError::Sqlx(err) => {
                state.serialize_field("type", "Sqlx")?;
                state.serialize_field("message", &err.to_string())?;
            }
            DbError::ConnectionPool(s) => {
                state.serialize_field("type", "ConnectionPool")?;
                state.serialize_field("message", s)?;
            }
            DbError::Query(s) => {
                state.serialize_field("type", "Query")?;
                state.serialize_field("message", s)?;
            }
            DbError::Execution(s) => {
                state.serialize_field("type", "Execution")?;
                state.serialize_field("message", s)?;
            }
            DbError::NotFound(s1, s2) => {
                state.serialize_field("type", "NotFound")?;
                state.serialize_field("message", &format!("Record not found: {} with ID {}", s1, s2))?;
            }
            DbError::Conflict(s) => {
                state.serialize_field("type", "Conflict")?;
                state.serialize_field("message", s)?;
            }
            DbError::Migration(s) => {
                state.serialize_field("type", "Migration")?;
                state.serialize_field("message", s)?;
            }
            DbError::Other(s) => {
                state.serialize_field("type", "Other")?;
                state.serialize_field("message", s)?;
            }
        }
        state.end()
    }
}

/// Manual Clone implementation for DbError
impl Clone for DbError {
    fn clone(&self) -> Self {
        match self {
            DbError::Sqlx(err) => DbError::Other(format!("SQLx error: {}", err)),
            DbError::ConnectionPool(s) => DbError::ConnectionPool(s.clone()),
            DbError::Query(s) => DbError::Query(s.clone()),
            DbError::Execution(s) => DbError::Execution(s.clone()),
            DbError::NotFound(s1, s2) => DbError::NotFound(s1.clone(), s2.clone()),
            DbError::Conflict(s) => DbError::Conflict(s.clone()),
            DbError::Migration(s) => DbError::Migration(s.clone()),
            DbError::Other(s) => DbError::Other(s.clone()),
        }
    }
}

/// Domain-level errors
#[derive(Debug, Error, Clone, Serialize)]
pub enum DomainError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Entity not found: {0} with ID {1}")]
    EntityNotFound(String, Uuid),

    #[error("Conflict with existing state: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// True when the error means a referenced record no longer exists.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::EntityNotFound(_, _)
                | DomainError::Database(DbError::NotFound(_, _))
        )
    }
}

/// Service-level errors (application specific)
#[derive(Debug, Error, Clone, Serialize)]
pub enum ServiceError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<DbError> for ServiceError {
    fn from(error: DbError) -> Self {
        ServiceError::Domain(DomainError::Database(error))
    }
}

impl From<ValidationError> for ServiceError {
    fn from(error: ValidationError) -> Self {
        ServiceError::Domain(DomainError::Validation(error))
    }
}

/// Validation errors
#[derive(Debug, Error, Clone, Serialize)]
pub enum ValidationError {
    #[error("Field '{field}' is required")]
    Required {
        field: String,
    },

    #[error("Field '{field}' must be at least {min} characters")]
    MinLength {
        field: String,
        min: usize,
    },

    #[error("Field '{field}' cannot exceed {max} characters")]
    MaxLength {
        field: String,
        max: usize,
    },

    #[error("Field '{field}' contains invalid format: {reason}")]
    Format {
        field: String,
        reason: String,
    },

    #[error("Field '{field}' contains an invalid value: {reason}")]
    InvalidValue {
        field: String,
        reason: String,
    },

    #[error("Validation error: {0}")]
    Custom(String),
}

impl ValidationError {
    pub fn required(field: &str) -> Self {
        Self::Required {
            field: field.to_string(),
        }
    }

    pub fn min_length(field: &str, min: usize) -> Self {
        Self::MinLength {
            field: field.to_string(),
            min,
        }
    }

    pub fn max_length(field: &str, max: usize) -> Self {
        Self::MaxLength {
            field: field.to_string(),
            max,
        }
    }

    pub fn format(field: &str, reason: &str) -> Self {
        Self::Format {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_value(field: &str, reason: &str) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn custom(message: &str) -> Self {
        Self::Custom(message.to_string())
    }
}
