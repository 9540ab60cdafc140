//! Domain layer: entities, hierarchy construction and reports
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod report;

pub use arena::{Hierarchy, HierarchyNode, TreeIterator};
pub use builder::{BuildOutcome, BuildResult, HierarchyBuilder};
pub use entities::{Employee, EmployeeId};
pub use error::DomainError;
pub use report::{
    HierarchyReporter, ReportingLinesReport, SalaryPolicy, SalaryViolation,
    SalaryViolationReport, DEFAULT_MAXIMUM_PERCENTAGE, DEFAULT_MINIMUM_PERCENTAGE,
    DEFAULT_REPORTING_LINES_THRESHOLD,
};
