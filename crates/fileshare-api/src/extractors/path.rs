//! Typed id parsing for query and path values.

use uuid::Uuid;

use fileshare_core::error::AppError;

/// Parses a required UUID, reporting failures against `field`.
pub fn parse_uuid(field: &str, value: Option<&str>) -> Result<Uuid, AppError> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(AppError::field(field, "This field is required."));
    }
    Uuid::parse_str(value).map_err(|_| AppError::field(field, "Enter a valid UUID."))
}
