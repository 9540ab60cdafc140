//! Domain entities: core data structures

use std::fmt;

use crate::domain::error::DomainError;

/// Unique key of an employee within one input set.
pub type EmployeeId = i64;

/// An employee record as delivered by an importer.
///
/// Immutable once constructed. Ordering compares `id` first, so report maps
/// keyed by `Employee` iterate in id order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Employee {
    id: EmployeeId,
    first_name: String,
    last_name: String,
    salary: u64,
    manager_id: Option<EmployeeId>,
}

impl Employee {
    /// Create a validated employee.
    ///
    /// Names are trimmed and must not be empty. A `manager_id` of `None`
    /// marks the root (CEO).
    pub fn new(
        id: EmployeeId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        salary: u64,
        manager_id: Option<EmployeeId>,
    ) -> Result<Self, DomainError> {
        let first_name = required_name(id, "first name", first_name.into())?;
        let last_name = required_name(id, "last name", last_name.into())?;

        Ok(Self {
            id,
            first_name,
            last_name,
            salary,
            manager_id,
        })
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn salary(&self) -> u64 {
        self.salary
    }

    pub fn manager_id(&self) -> Option<EmployeeId> {
        self.manager_id
    }

    /// True for the record without a manager.
    pub fn is_root(&self) -> bool {
        self.manager_id.is_none()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.first_name, self.last_name, self.id)
    }
}

fn required_name(id: EmployeeId, field: &str, value: String) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidEmployee {
            id,
            reason: format!("{field} is missing"),
        });
    }
    Ok(trimmed.to_string())
}
