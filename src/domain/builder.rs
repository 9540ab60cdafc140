//! Hierarchy builder: turns a flat, unordered set of employees into a tree.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, instrument, warn};

use crate::domain::arena::Hierarchy;
use crate::domain::entities::{Employee, EmployeeId};
use crate::domain::error::DomainError;

/// Result type for hierarchy construction.
pub type BuildResult<T> = Result<T, DomainError>;

/// A successfully built hierarchy plus what was left out of it.
#[derive(Debug)]
pub struct BuildOutcome {
    pub hierarchy: Hierarchy,
    /// Employees attached to the tree, root included
    pub attached: usize,
    /// Employees dropped because their manager id is unknown
    pub dropped: Vec<Employee>,
}

impl BuildOutcome {
    /// True when every input record made it into the tree.
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }

    pub fn into_hierarchy(self) -> Hierarchy {
        self.hierarchy
    }
}

/// Constructs a [`Hierarchy`] from employee records in any order.
#[derive(Debug, Default)]
pub struct HierarchyBuilder;

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the tree.
    ///
    /// # Errors
    /// * [`DomainError::EmptyInput`] for an empty slice
    /// * [`DomainError::DuplicateId`] when two records share an id
    /// * [`DomainError::NoRoot`] / [`DomainError::MultipleRoots`] unless exactly
    ///   one record has no manager
    /// * [`DomainError::Unattachable`] for records that never connect to the
    ///   root (cycles, self-management)
    ///
    /// Records whose manager id is not in the input are dropped with a
    /// warning and reported in [`BuildOutcome::dropped`].
    #[instrument(level = "debug", skip_all, fields(records = employees.len()))]
    pub fn build(&self, employees: &[Employee]) -> BuildResult<BuildOutcome> {
        if employees.is_empty() {
            return Err(DomainError::EmptyInput);
        }

        let ids = collect_ids(employees)?;
        let root = find_root(employees)?;
        let (attachable, dropped) = partition_by_manager(employees, &ids);

        let mut hierarchy = Hierarchy::new(root.clone());
        attach_all(&mut hierarchy, attachable)?;

        let attached = hierarchy.len();
        debug!(attached, dropped = dropped.len(), "hierarchy built");

        Ok(BuildOutcome {
            hierarchy,
            attached,
            dropped,
        })
    }
}

fn collect_ids(employees: &[Employee]) -> BuildResult<HashSet<EmployeeId>> {
    let mut ids = HashSet::with_capacity(employees.len());
    for employee in employees {
        if !ids.insert(employee.id()) {
            return Err(DomainError::DuplicateId(employee.id()));
        }
    }
    Ok(ids)
}

fn find_root(employees: &[Employee]) -> BuildResult<&Employee> {
    let roots: Vec<&Employee> = employees.iter().filter(|e| e.is_root()).collect();
    match roots.as_slice() {
        [] => Err(DomainError::NoRoot),
        [root] => Ok(*root),
        _ => Err(DomainError::MultipleRoots {
            ids: roots.iter().map(|e| e.id()).collect(),
        }),
    }
}

/// Split manager-bearing records into attachable ones and dangling ones.
fn partition_by_manager(
    employees: &[Employee],
    ids: &HashSet<EmployeeId>,
) -> (Vec<Employee>, Vec<Employee>) {
    let mut attachable = Vec::new();
    let mut dropped = Vec::new();

    for employee in employees {
        let Some(manager_id) = employee.manager_id() else {
            continue;
        };
        if ids.contains(&manager_id) {
            attachable.push(employee.clone());
        } else {
            warn!(
                id = employee.id(),
                manager_id, "dropping employee: manager id not found in input"
            );
            dropped.push(employee.clone());
        }
    }

    (attachable, dropped)
}

/// Attach records in any input order, linear in the number of records.
///
/// Records wait under their manager's id until that manager is attached;
/// attaching a node releases its waiting subordinates into the work queue.
/// Whatever still waits when the queue runs dry sits on a cycle or below
/// one and cannot be attached.
fn attach_all(hierarchy: &mut Hierarchy, attachable: Vec<Employee>) -> BuildResult<()> {
    let mut waiting: HashMap<EmployeeId, Vec<Employee>> = HashMap::new();
    for employee in attachable {
        if let Some(manager_id) = employee.manager_id() {
            waiting.entry(manager_id).or_default().push(employee);
        }
    }

    let mut ready = VecDeque::from([hierarchy.root().employee.id()]);
    let mut stuck = Vec::new();
    while let Some(manager_id) = ready.pop_front() {
        let Some(subordinates) = waiting.remove(&manager_id) else {
            continue;
        };
        for employee in subordinates {
            let id = employee.id();
            match hierarchy.attach(employee) {
                Ok(_) => ready.push_back(id),
                Err(employee) => stuck.push(employee.id()),
            }
        }
    }

    stuck.extend(waiting.values().flatten().map(Employee::id));
    if stuck.is_empty() {
        return Ok(());
    }
    stuck.sort_unstable();
    debug!(unattachable = stuck.len(), "records left waiting for a manager");
    Err(DomainError::Unattachable { ids: stuck })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: EmployeeId, manager_id: Option<EmployeeId>) -> Employee {
        Employee::new(id, "First", "Last", 1000, manager_id).unwrap()
    }

    #[test]
    fn given_reversed_chain_when_building_then_attaches_all() {
        let employees = vec![
            employee(4, Some(3)),
            employee(3, Some(2)),
            employee(2, Some(1)),
            employee(1, None),
        ];

        let outcome = HierarchyBuilder::new().build(&employees).unwrap();

        assert_eq!(outcome.attached, 4);
        assert!(outcome.is_complete());
        assert_eq!(outcome.hierarchy.depth_of(4), Some(3));
    }

    #[test]
    fn given_subordinates_listed_before_managers_when_building_then_siblings_keep_input_order() {
        let employees = vec![
            employee(3, Some(2)),
            employee(4, Some(2)),
            employee(2, Some(1)),
            employee(1, None),
        ];

        let hierarchy = HierarchyBuilder::new().build(&employees).unwrap().hierarchy;

        let ids: Vec<EmployeeId> = hierarchy.iter().map(|(_, n)| n.employee.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn given_self_managed_employee_when_building_then_unattachable() {
        let employees = vec![employee(1, None), employee(2, Some(2))];

        let result = HierarchyBuilder::new().build(&employees);

        assert_eq!(
            result.unwrap_err(),
            DomainError::Unattachable { ids: vec![2] }
        );
    }

    #[test]
    fn given_duplicate_id_when_building_then_errors() {
        let employees = vec![employee(1, None), employee(1, Some(1))];

        let result = HierarchyBuilder::new().build(&employees);

        assert_eq!(result.unwrap_err(), DomainError::DuplicateId(1));
    }
}
