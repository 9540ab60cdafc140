//! Tests for EmployeeCsvImporter

use std::path::PathBuf;

use rstest::rstest;
use tempfile::TempDir;

use orgtree::domain::{EmployeeId, HierarchyBuilder};
use orgtree::infrastructure::{EmployeeCsvImporter, ImportError};
use orgtree::util::testing::init_test_setup;

const SAMPLE: &str = "\
Id,firstName,lastName,salary,managerId
123,Joe,Doe,60000,
124,Martin,Chekov,45000,123
125,Bob,Ronstad,47000,123
300,Alice,Hasacat,50000,124
305,Brett,Hardleaf,34000,300
";

fn create_csv_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write csv file");
    path
}

#[test]
fn given_sample_file_when_importing_then_builds_full_hierarchy() {
    // Arrange
    init_test_setup();
    let temp = TempDir::new().unwrap();
    let path = create_csv_file(&temp, "SampleData.csv", SAMPLE);

    // Act
    let employees = EmployeeCsvImporter::default().import_path(&path).unwrap();

    // Assert
    assert_eq!(employees.len(), 5);
    assert_eq!(employees[0].full_name(), "Joe Doe");
    assert_eq!(employees[0].manager_id(), None);
    assert_eq!(employees[4].manager_id(), Some(300));
    let outcome = HierarchyBuilder::new().build(&employees).unwrap();
    assert_eq!(outcome.attached, 5);
}

#[test]
fn given_reordered_columns_when_importing_then_matches_by_name() {
    // Arrange
    let data = "salary, Manager_Id ,last name,ID,first_name\n60000,,Doe,123,Joe\n45000,123,Chekov,124,Martin\n";

    // Act
    let employees = EmployeeCsvImporter::new(true)
        .import_reader(data.as_bytes())
        .unwrap();

    // Assert
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[1].id(), 124);
    assert_eq!(employees[1].first_name(), "Martin");
    assert_eq!(employees[1].last_name(), "Chekov");
    assert_eq!(employees[1].salary(), 45000);
    assert_eq!(employees[1].manager_id(), Some(123));
}

#[test]
fn given_headerless_file_when_importing_then_uses_positional_columns() {
    // Arrange
    let data = "123,Joe,Doe,60000\n124, Martin , Chekov ,45000,123\n\n";

    // Act
    let employees = EmployeeCsvImporter::new(false)
        .import_reader(data.as_bytes())
        .unwrap();

    // Assert
    let ids: Vec<EmployeeId> = employees.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec![123, 124]);
    assert_eq!(employees[0].manager_id(), None);
    assert_eq!(employees[1].first_name(), "Martin");
}

#[test]
fn given_header_without_salary_when_importing_then_missing_header() {
    let data = "id,firstName,lastName,managerId\n1,Joe,Doe,\n";

    let result = EmployeeCsvImporter::default().import_reader(data.as_bytes());

    assert!(matches!(result, Err(ImportError::MissingHeader("salary"))));
}

#[rstest]
#[case("x,Joe,Doe,100,", 2, "invalid id: 'x'")]
#[case("1,,Doe,100,", 2, "first name is missing")]
#[case("1,Joe,Doe,,", 2, "salary is missing")]
#[case("1,Joe,Doe,100,boss", 2, "invalid manager id: 'boss'")]
fn given_bad_row_when_importing_then_reports_line_and_field(
    #[case] row: &str,
    #[case] expected_line: u64,
    #[case] expected_message: &str,
) {
    // Arrange
    let data = format!("id,firstName,lastName,salary,managerId\n{row}\n");

    // Act
    let result = EmployeeCsvImporter::default().import_reader(data.as_bytes());

    // Assert
    match result {
        Err(ImportError::InvalidRow { line, message }) => {
            assert_eq!(line, expected_line);
            assert_eq!(message, expected_message);
        }
        other => panic!("expected invalid row, got {other:?}"),
    }
}

#[test]
fn given_missing_file_when_importing_then_open_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nope.csv");

    // Act
    let result = EmployeeCsvImporter::default().import_path(&path);

    // Assert
    match result {
        Err(ImportError::Open { path: p, source }) => {
            assert_eq!(p, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected open error, got {other:?}"),
    }
}

#[test]
fn given_header_only_when_importing_then_no_employees() {
    let data = "id,firstName,lastName,salary,managerId\n";

    let employees = EmployeeCsvImporter::default()
        .import_reader(data.as_bytes())
        .unwrap();

    assert!(employees.is_empty());
}
