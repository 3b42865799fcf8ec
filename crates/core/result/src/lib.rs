#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

use std::fmt;

/// Result type with custom Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error information
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct Error {
    /// Type of error and additional information
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub error_type: ErrorType,

    /// Where this error occurred
    pub location: String,
}

/// Possible error types
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    /// This error was not labeled :(
    LabelMe,

    // ? Session related errors
    AuthRequired,

    // ? Report related errors
    EmptyComment,

    // ? General errors
    BackendFailure {
        operation: String,
        collection: String,
        message: String,
    },
    InternalError,
    NotFound,
    FailedValidation {
        error: String,
    },
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorType::LabelMe => write!(f, "Something went wrong"),
            ErrorType::AuthRequired => write!(f, "Please login to continue"),
            ErrorType::EmptyComment => write!(f, "Comment cannot be empty"),
            ErrorType::BackendFailure { message, .. } => write!(f, "{message}"),
            ErrorType::InternalError => write!(f, "Internal error"),
            ErrorType::NotFound => write!(f, "Not found"),
            ErrorType::FailedValidation { error } => write!(f, "{error}"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error_type.fmt(f)
    }
}

impl std::error::Error for Error {}

#[macro_export]
macro_rules! create_error {
    ( $error: ident $( $tt:tt )? ) => {
        $crate::Error {
            error_type: $crate::ErrorType::$error $( $tt )?,
            location: format!("{}:{}:{}", file!(), line!(), column!()),
        }
    };
}

#[macro_export]
macro_rules! create_backend_error {
    ( $operation: expr, $collection: expr, $message: expr ) => {
        $crate::create_error!(BackendFailure {
            operation: $operation.to_string(),
            collection: $collection.to_string(),
            message: $message.to_string()
        })
    };
}

#[macro_export]
macro_rules! create_database_error {
    ( $operation: expr, $collection: expr ) => {
        $crate::create_backend_error!(
            $operation,
            $collection,
            format!("failed to {} {}", $operation, $collection)
        )
    };
}
