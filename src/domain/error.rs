//! Domain-level errors (no external dependencies)

use itertools::Itertools;
use thiserror::Error;

use crate::domain::EmployeeId;

/// Domain errors represent invalid input or a structurally broken hierarchy.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("no employees given: cannot find a root")]
    EmptyInput,

    #[error("invalid employee {id}: {reason}")]
    InvalidEmployee { id: EmployeeId, reason: String },

    #[error("duplicate employee id: {0}")]
    DuplicateId(EmployeeId),

    #[error("no root found: every employee has a manager")]
    NoRoot,

    #[error("more than one root found: employees {} have no manager", .ids.iter().join(", "))]
    MultipleRoots { ids: Vec<EmployeeId> },

    #[error("cannot attach employees {} to the hierarchy (cycle or unreachable manager)", .ids.iter().join(", "))]
    Unattachable { ids: Vec<EmployeeId> },
}
