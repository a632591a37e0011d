//! Conversions from external infrastructure errors into domain errors.

use proxima_domain::ProximaError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ProximaError);

impl From<InfraError> for ProximaError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ProximaError> for InfraError {
    fn from(value: ProximaError) -> Self {
        InfraError(value)
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        let err = match value {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match err.code {
                    ErrorCode::DatabaseBusy => ProximaError::Storage("database is busy".into()),
                    ErrorCode::DatabaseLocked => {
                        ProximaError::Storage("database is locked".into())
                    }
                    ErrorCode::ConstraintViolation => {
                        ProximaError::Storage(format!("constraint violation: {message}"))
                    }
                    _ => ProximaError::Storage(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => ProximaError::Storage("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                ProximaError::Storage(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                ProximaError::Storage(format!("invalid column type: {ty}"))
            }
            RE::InvalidQuery => ProximaError::Storage("invalid SQL query".into()),
            other => ProximaError::Storage(other.to_string()),
        };
        InfraError(err)
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(ProximaError::Storage(format!("connection pool: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rows_maps_to_storage() {
        let err: ProximaError = InfraError::from(SqlError::QueryReturnedNoRows).into();
        assert!(matches!(err, ProximaError::Storage(_)));
    }

    #[test]
    fn round_trips_domain_errors() {
        let original = ProximaError::Permission("denied".into());
        let back: ProximaError = InfraError::from(original).into();
        assert!(matches!(back, ProximaError::Permission(_)));
    }
}
