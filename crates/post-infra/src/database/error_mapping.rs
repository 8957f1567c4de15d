//! Translation of SeaORM failures into the domain error vocabulary.

use post_core::DomainError;
use sea_orm::DbErr;

/// Classify a backend error.
///
/// Only the documented "no rows" signal becomes `NotFound`; everything else is
/// `Internal`, with the backend detail kept in the message.
pub fn classify_db_error(error: DbErr) -> DomainError {
    match error {
        DbErr::RecordNotFound(detail) => DomainError::not_found(detail),
        other => internal_db_error(other),
    }
}

/// Map any backend error to `Internal`.
pub(crate) fn internal_db_error(error: DbErr) -> DomainError {
    tracing::debug!(error = %error, "database operation failed");
    DomainError::internal(format!("database error: {error}"))
}
