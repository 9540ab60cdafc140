//! Tests for AnalyticsService

use std::sync::Arc;

use orgtree::application::services::AnalyticsService;
use orgtree::application::ApplicationError;
use orgtree::domain::{DomainError, Employee, EmployeeId, SalaryPolicy};
use orgtree::util::testing::{chain, employee, init_test_setup};

fn sample_records() -> Vec<Employee> {
    vec![
        Employee::new(123, "Joe", "Doe", 60000, None).unwrap(),
        Employee::new(124, "Martin", "Chekov", 45000, Some(123)).unwrap(),
        Employee::new(125, "Bob", "Ronstad", 47000, Some(123)).unwrap(),
        Employee::new(300, "Alice", "Hasacat", 50000, Some(124)).unwrap(),
        Employee::new(305, "Brett", "Hardleaf", 34000, Some(300)).unwrap(),
    ]
}

#[test]
fn given_no_load_when_requesting_reports_then_usage_error() {
    // Arrange
    init_test_setup();
    let service = AnalyticsService::new();

    // Act / Assert
    assert!(matches!(
        service.salary_policy_violations(SalaryPolicy::default()),
        Err(ApplicationError::HierarchyNotLoaded)
    ));
    assert!(matches!(
        service.run_all(SalaryPolicy::default(), 4),
        Err(ApplicationError::HierarchyNotLoaded)
    ));
}

#[test]
fn given_dangling_record_when_loading_then_summary_reports_discrepancy() {
    // Arrange
    let service = AnalyticsService::new();
    let mut employees = sample_records();
    employees.push(employee(500, 1000, Some(999)));

    // Act
    let summary = service.load(&employees).unwrap();

    // Assert
    assert_eq!(summary.records, 6);
    assert_eq!(summary.attached, 5);
    assert!(summary.has_discrepancy());
    assert_eq!(summary.dropped_ids(), vec![500]);
    assert!(service.is_loaded());
}

#[test]
fn given_failed_reload_when_reporting_then_previous_tree_is_gone() {
    // Arrange
    let service = AnalyticsService::new();
    service.load(&sample_records()).unwrap();
    let mut broken = sample_records();
    broken.push(employee(400, 1000, None));

    // Act
    let result = service.load(&broken);

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::MultipleRoots { .. }))
    ));
    assert!(matches!(
        service.excessive_reporting_lines(2),
        Err(ApplicationError::HierarchyNotLoaded)
    ));
}

#[test]
fn given_loaded_hierarchy_when_running_all_then_both_reports_filled() {
    // Arrange
    let service = AnalyticsService::new();
    service.load(&sample_records()).unwrap();

    // Act
    let report = service.run_all(SalaryPolicy::default(), 2).unwrap();

    // Assert
    let salary: Vec<EmployeeId> = report.salary_violations.keys().map(|e| e.id()).collect();
    let lines: Vec<(EmployeeId, i64)> = report
        .reporting_lines
        .iter()
        .map(|(e, &n)| (e.id(), n))
        .collect();
    assert_eq!(salary, vec![124]);
    assert_eq!(lines, vec![(305, 1)]);
    assert_eq!(report.threshold, 2);
}

#[test]
fn given_unknown_id_when_querying_chain_then_not_found() {
    // Arrange
    let service = AnalyticsService::new();
    service.load(&sample_records()).unwrap();

    // Act
    let chain = service.reporting_chain(305).unwrap();
    let missing = service.reporting_chain(42);

    // Assert
    let ids: Vec<EmployeeId> = chain.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec![300, 124, 123]);
    assert!(matches!(missing, Err(ApplicationError::EmployeeNotFound(42))));
}

#[test]
fn given_concurrent_readers_when_reporting_then_results_are_identical() {
    // Arrange
    let service = Arc::new(AnalyticsService::new());
    service.load(&chain(50, 1000)).unwrap();
    let expected = service.run_all(SalaryPolicy::default(), 4).unwrap();

    // Act
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                scope.spawn(move || service.run_all(SalaryPolicy::default(), 4).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Assert
    for result in results {
        assert_eq!(result.salary_violations, expected.salary_violations);
        assert_eq!(result.reporting_lines, expected.reporting_lines);
    }
}

#[test]
fn given_reload_during_reports_when_reading_then_each_sees_a_whole_tree() {
    // Arrange
    let service = Arc::new(AnalyticsService::new());
    service.load(&chain(10, 1000)).unwrap();

    // Act / Assert: every snapshot is one of the two complete trees
    std::thread::scope(|scope| {
        let writer = {
            let service = Arc::clone(&service);
            scope.spawn(move || {
                for n in [20, 10, 20, 10] {
                    service.load(&chain(n, 1000)).unwrap();
                }
            })
        };
        for _ in 0..4 {
            let service = Arc::clone(&service);
            scope.spawn(move || {
                for _ in 0..50 {
                    let report = service.excessive_reporting_lines(4).unwrap();
                    assert!(report.len() == 5 || report.len() == 15);
                }
            });
        }
        writer.join().unwrap();
    });
}
