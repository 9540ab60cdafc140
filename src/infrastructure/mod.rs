//! Infrastructure layer: reading employee records from the outside world

pub mod error;
pub mod import;

pub use error::InfraError;
pub use import::{EmployeeCsvImporter, ImportError, ImportResult};
