use thiserror::Error;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error)]
pub enum HrError {
    #[error("Employee ID {0} already exists")]
    DuplicateKey(String),
    #[error("Employee ID {0} not found")]
    NotFound(String),
    #[error("invalid photo payload: {0}")]
    InvalidPayload(String),
    #[error(transparent)]
    StoreFailure(#[from] anyhow::Error),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    DuplicateKey,
    NotFound,
    InvalidPayload,
    StoreFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::DuplicateKey => "DUPLICATE_KEY",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::InvalidPayload => "INVALID_PAYLOAD",
            ErrorKind::StoreFailure => "STORE_FAILURE",
        }
    }
}

impl HrError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HrError::DuplicateKey(_) => ErrorKind::DuplicateKey,
            HrError::NotFound(_) => ErrorKind::NotFound,
            HrError::InvalidPayload(_) => ErrorKind::InvalidPayload,
            HrError::StoreFailure(_) => ErrorKind::StoreFailure,
        }
    }
}
