use crate::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Find an entity by its identifier, failing with `EntityNotFound` when the
/// record does not exist.
#[async_trait]
pub trait FindById<T> {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<T>;
}

/// Parse a UUID column read back from storage.
pub(crate) fn parse_uuid(field: &str, value: &str) -> DomainResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| DomainError::Internal(format!("Invalid UUID in column '{}': {}", field, e)))
}

/// Parse an optional UUID column read back from storage.
pub(crate) fn parse_optional_uuid(field: &str, value: Option<&str>) -> DomainResult<Option<Uuid>> {
    value.map(|v| parse_uuid(field, v)).transpose()
}

/// Parse an RFC 3339 timestamp column read back from storage.
pub(crate) fn parse_datetime(field: &str, value: &str) -> DomainResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            DomainError::Internal(format!("Invalid timestamp in column '{}': {}", field, e))
        })
}

/// Parse an optional RFC 3339 timestamp column read back from storage.
pub(crate) fn parse_optional_datetime(
    field: &str,
    value: Option<&str>,
) -> DomainResult<Option<DateTime<Utc>>> {
    value.map(|v| parse_datetime(field, v)).transpose()
}
