//! Analytics service
//!
//! Holds the hierarchy built from the last successful load and runs reports
//! against it. Loading publishes a fully built tree under a single lock;
//! reports take a cheap `Arc` snapshot and traverse it without holding the
//! lock, so they may run concurrently with each other and with a reload.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    Employee, EmployeeId, Hierarchy, HierarchyBuilder, HierarchyReporter, ReportingLinesReport,
    SalaryPolicy, SalaryViolationReport,
};

/// Outcome of loading a set of employee records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    /// Records handed to the builder
    pub records: usize,
    /// Records attached to the tree, root included
    pub attached: usize,
    /// Records dropped for referencing an unknown manager
    pub dropped: Vec<Employee>,
}

impl LoadSummary {
    pub fn has_discrepancy(&self) -> bool {
        self.records != self.attached
    }

    pub fn dropped_ids(&self) -> Vec<EmployeeId> {
        self.dropped.iter().map(|e| e.id()).collect()
    }
}

/// Both reports computed against the same snapshot.
#[derive(Debug, Clone)]
pub struct AnalyticsReport {
    pub policy: SalaryPolicy,
    pub threshold: i32,
    pub salary_violations: SalaryViolationReport,
    pub reporting_lines: ReportingLinesReport,
}

/// Service for building the employee hierarchy and reporting on it.
#[derive(Debug, Default)]
pub struct AnalyticsService {
    builder: HierarchyBuilder,
    hierarchy: RwLock<Option<Arc<Hierarchy>>>,
}

impl AnalyticsService {
    /// Create a service without a hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a new hierarchy from `employees` and make it current.
    ///
    /// On failure the previous hierarchy is discarded as well, so reports
    /// never run against a tree from an older input.
    #[instrument(level = "debug", skip_all, fields(records = employees.len()))]
    pub fn load(&self, employees: &[Employee]) -> ApplicationResult<LoadSummary> {
        let built = self.builder.build(employees);
        let mut slot = self.hierarchy.write().unwrap_or_else(PoisonError::into_inner);

        let outcome = match built {
            Ok(outcome) => outcome,
            Err(e) => {
                *slot = None;
                return Err(e.into());
            }
        };

        let summary = LoadSummary {
            records: employees.len(),
            attached: outcome.attached,
            dropped: outcome.dropped,
        };
        if summary.has_discrepancy() {
            warn!(
                records = summary.records,
                attached = summary.attached,
                "not every employee made it into the hierarchy"
            );
        }
        *slot = Some(Arc::new(outcome.hierarchy));
        info!(attached = summary.attached, "employee hierarchy loaded");

        Ok(summary)
    }

    /// Snapshot of the current hierarchy.
    pub fn hierarchy(&self) -> ApplicationResult<Arc<Hierarchy>> {
        self.hierarchy
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ApplicationError::HierarchyNotLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.hierarchy().is_ok()
    }

    pub fn salary_policy_violations(
        &self,
        policy: SalaryPolicy,
    ) -> ApplicationResult<SalaryViolationReport> {
        let hierarchy = self.hierarchy()?;
        Ok(HierarchyReporter::new(&hierarchy).salary_policy_violations(policy))
    }

    pub fn excessive_reporting_lines(&self, threshold: i32) -> ApplicationResult<ReportingLinesReport> {
        let hierarchy = self.hierarchy()?;
        Ok(HierarchyReporter::new(&hierarchy).excessive_reporting_lines(threshold))
    }

    /// Run both reports in parallel on one snapshot.
    pub fn run_all(&self, policy: SalaryPolicy, threshold: i32) -> ApplicationResult<AnalyticsReport> {
        let hierarchy = self.hierarchy()?;
        let reporter = HierarchyReporter::new(&hierarchy);
        let (salary_violations, reporting_lines) = rayon::join(
            || reporter.salary_policy_violations(policy),
            || reporter.excessive_reporting_lines(threshold),
        );
        debug!(
            salary_violations = salary_violations.len(),
            reporting_lines = reporting_lines.len(),
            "reports done"
        );

        Ok(AnalyticsReport {
            policy,
            threshold,
            salary_violations,
            reporting_lines,
        })
    }

    /// Managers of `id` from the direct manager up to the root.
    pub fn reporting_chain(&self, id: EmployeeId) -> ApplicationResult<Vec<Employee>> {
        let hierarchy = self.hierarchy()?;
        let chain = hierarchy
            .reporting_chain(id)
            .ok_or(ApplicationError::EmployeeNotFound(id))?;
        Ok(chain.into_iter().cloned().collect())
    }
}
