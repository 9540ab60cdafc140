//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{DomainError, EmployeeId};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("employee hierarchy not loaded: input employees before requesting reports")]
    HierarchyNotLoaded,

    #[error("employee not found in hierarchy: {0}")]
    EmployeeNotFound(EmployeeId),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
