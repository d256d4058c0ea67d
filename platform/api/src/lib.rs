use std::sync::Arc;

use async_graphql::{Error, ErrorExtensions};
use thiserror::Error;

/// Shared GraphQL result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("{0}")]
    DuplicateKey(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidPayload(String),
    #[error("bad request: {0}")]
    InvalidInput(String),
    #[error("internal server error")]
    StoreFailure(Arc<anyhow::Error>),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::DuplicateKey(_) => "DUPLICATE_KEY",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InvalidPayload(_) => "INVALID_PAYLOAD",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::StoreFailure(_) => "STORE_FAILURE",
        }
    }

    pub fn store_failure(err: anyhow::Error) -> Self {
        Self::StoreFailure(Arc::new(err))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::store_failure(value)
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> Error {
        let mut err = Error::new(self.to_string());
        err = err.extend_with(|_err, e| {
            e.set("code", self.code());
        });
        if let ApiError::InvalidInput(_) | ApiError::InvalidPayload(_) = self {
            err = err.extend_with(|_err, e| {
                e.set("type", "BAD_REQUEST");
            });
        }
        err
    }
}

/// Convert any error into a GraphQL error payload while hiding internals.
pub fn internal_error(err: impl Into<anyhow::Error>) -> Error {
    ApiError::store_failure(err.into()).extend()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::Value;

    fn code_of(err: &Error) -> Option<Value> {
        err.extensions
            .as_ref()
            .and_then(|map| map.get("code"))
            .cloned()
    }

    #[test]
    fn store_failures_are_masked() {
        let err = internal_error(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.message, "internal server error");
        assert_eq!(code_of(&err), Some(Value::from("STORE_FAILURE")));
    }

    #[test]
    fn domain_errors_keep_their_message() {
        let err = ApiError::DuplicateKey("Employee ID E1 already exists".into()).extend();
        assert_eq!(err.message, "Employee ID E1 already exists");
        assert_eq!(code_of(&err), Some(Value::from("DUPLICATE_KEY")));

        let err = ApiError::InvalidPayload("expected a base64 data URL".into()).extend();
        let kind = err.extensions.as_ref().and_then(|map| map.get("type")).cloned();
        assert_eq!(kind, Some(Value::from("BAD_REQUEST")));
    }
}
