//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::domain::{Employee, ReportingLinesReport, SalaryPolicy, SalaryViolationReport};

const COLUMN_WIDTH: usize = 12;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

fn row(cells: &[String]) -> String {
    cells
        .iter()
        .map(|cell| format!("{cell:<width$}", width = COLUMN_WIDTH))
        .collect::<Vec<_>>()
        .join("|")
}

fn employee_cells(employee: &Employee) -> Vec<String> {
    vec![
        employee.id().to_string(),
        employee.first_name().to_string(),
        employee.last_name().to_string(),
    ]
}

/// Table lines for the salary policy report, header first.
pub fn salary_table(report: &SalaryViolationReport) -> Vec<String> {
    let mut lines = vec![row(&[
        "ID".into(),
        "FIRST NAME".into(),
        "LAST NAME".into(),
        "SALARY".into(),
        "VIOLATION".into(),
    ])];
    for (employee, violation) in report {
        let mut cells = employee_cells(employee);
        cells.push(employee.salary().to_string());
        cells.push(violation.to_string());
        lines.push(row(&cells));
    }
    lines
}

/// Table lines for the reporting lines report, header first.
pub fn reporting_lines_table(report: &ReportingLinesReport) -> Vec<String> {
    let mut lines = vec![row(&[
        "ID".into(),
        "FIRST NAME".into(),
        "LAST NAME".into(),
        "EXCESSIVE REPORTING LINES".into(),
    ])];
    for (employee, excess) in report {
        let mut cells = employee_cells(employee);
        cells.push(excess.to_string());
        lines.push(row(&cells));
    }
    lines
}

pub fn print_salary_report(policy: SalaryPolicy, report: &SalaryViolationReport) {
    header("Managers with salary policy violation");
    detail(&format!("minimum percentage allowed: {}", policy.minimum_percentage));
    detail(&format!("maximum percentage allowed: {}", policy.maximum_percentage));
    if report.is_empty() {
        success("no violations");
    } else {
        for line in salary_table(report) {
            info(&line);
        }
    }
    println!();
}

pub fn print_reporting_lines_report(threshold: i32, report: &ReportingLinesReport) {
    header(&format!("Employees with reporting line longer than {threshold}"));
    if report.is_empty() {
        success("no excessive reporting lines");
    } else {
        for line in reporting_lines_table(report) {
            info(&line);
        }
    }
    println!();
}
