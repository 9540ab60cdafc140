//! Hierarchy reports: salary policy violations and excessive reporting lines.
//!
//! The reporter only borrows a [`Hierarchy`]; any number of reports can run
//! against the same tree at once.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, instrument};

use crate::domain::arena::{Hierarchy, HierarchyNode};
use crate::domain::entities::Employee;

pub const DEFAULT_MINIMUM_PERCENTAGE: i32 = 20;
pub const DEFAULT_MAXIMUM_PERCENTAGE: i32 = 50;
pub const DEFAULT_REPORTING_LINES_THRESHOLD: i32 = 4;

/// Allowed premium of a manager's salary over the average salary of the
/// manager's direct subordinates, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryPolicy {
    pub minimum_percentage: i32,
    pub maximum_percentage: i32,
}

impl Default for SalaryPolicy {
    fn default() -> Self {
        Self {
            minimum_percentage: DEFAULT_MINIMUM_PERCENTAGE,
            maximum_percentage: DEFAULT_MAXIMUM_PERCENTAGE,
        }
    }
}

impl SalaryPolicy {
    pub fn new(minimum_percentage: i32, maximum_percentage: i32) -> Self {
        Self {
            minimum_percentage,
            maximum_percentage,
        }
    }

    /// Allowed salary range `(min, max)` for a given subordinate average.
    pub fn band(&self, average: f64) -> (f64, f64) {
        (
            scale(average, self.minimum_percentage),
            scale(average, self.maximum_percentage),
        )
    }

    /// Check one salary against the band around `average`.
    ///
    /// The maximum check runs last, so with `minimum > maximum` a salary
    /// outside both bounds is reported as above maximum.
    pub fn check(&self, salary: u64, average: f64) -> Option<SalaryViolation> {
        let (min_allowed, max_allowed) = self.band(average);
        let salary = salary as f64;

        let mut violation = None;
        if salary < min_allowed {
            violation = Some(SalaryViolation::BelowMinimum {
                shortfall: min_allowed - salary,
            });
        }
        if salary > max_allowed {
            violation = Some(SalaryViolation::AboveMaximum {
                excess: salary - max_allowed,
            });
        }
        violation
    }
}

fn scale(average: f64, percentage: i32) -> f64 {
    average * (100.0 + f64::from(percentage)) / 100.0
}

/// How a manager's salary falls outside the allowed band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SalaryViolation {
    BelowMinimum { shortfall: f64 },
    AboveMaximum { excess: f64 },
}

impl SalaryViolation {
    /// Distance to the violated bound.
    pub fn amount(&self) -> f64 {
        match self {
            SalaryViolation::BelowMinimum { shortfall } => *shortfall,
            SalaryViolation::AboveMaximum { excess } => *excess,
        }
    }
}

impl fmt::Display for SalaryViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SalaryViolation::BelowMinimum { shortfall } => {
                write!(f, "salary is {shortfall:.2} below the minimum allowed")
            }
            SalaryViolation::AboveMaximum { excess } => {
                write!(f, "salary is {excess:.2} above the maximum allowed")
            }
        }
    }
}

/// Managers whose salary is outside the policy band, ordered by employee id.
pub type SalaryViolationReport = BTreeMap<Employee, SalaryViolation>;

/// Employees deeper than the threshold, mapped to the number of levels over it.
pub type ReportingLinesReport = BTreeMap<Employee, i64>;

/// Read-only analytics over a built hierarchy.
#[derive(Debug, Clone, Copy)]
pub struct HierarchyReporter<'a> {
    hierarchy: &'a Hierarchy,
}

impl<'a> HierarchyReporter<'a> {
    pub fn new(hierarchy: &'a Hierarchy) -> Self {
        Self { hierarchy }
    }

    /// Average salary of a node's direct subordinates, None for non-managers.
    fn subordinate_average(&self, node: &HierarchyNode) -> Option<f64> {
        let salaries: Vec<u64> = node
            .children
            .iter()
            .filter_map(|&child| self.hierarchy.get_node(child))
            .map(|child| child.employee.salary())
            .collect();
        if salaries.is_empty() {
            return None;
        }
        let total: f64 = salaries.iter().map(|&s| s as f64).sum();
        Some(total / salaries.len() as f64)
    }

    /// Managers (root included) whose salary is outside `policy`'s band
    /// around the average salary of their direct subordinates.
    #[instrument(level = "debug", skip(self))]
    pub fn salary_policy_violations(&self, policy: SalaryPolicy) -> SalaryViolationReport {
        let mut report = SalaryViolationReport::new();
        for (_, node) in self.hierarchy.iter() {
            let Some(average) = self.subordinate_average(node) else {
                continue;
            };
            if let Some(violation) = policy.check(node.employee.salary(), average) {
                report.insert(node.employee.clone(), violation);
            }
        }
        debug!(violations = report.len(), "salary policy report done");
        report
    }

    /// Employees whose reporting-line depth exceeds `threshold`, mapped to
    /// `depth - threshold`. The root has depth 0.
    #[instrument(level = "debug", skip(self))]
    pub fn excessive_reporting_lines(&self, threshold: i32) -> ReportingLinesReport {
        let threshold = i64::from(threshold);
        let report: ReportingLinesReport = self
            .hierarchy
            .iter()
            .filter_map(|(_, node)| {
                let depth = node.depth as i64;
                (depth > threshold).then(|| (node.employee.clone(), depth - threshold))
            })
            .collect();
        debug!(flagged = report.len(), "reporting lines report done");
        report
    }
}
