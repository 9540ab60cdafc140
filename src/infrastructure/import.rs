//! CSV import of employee records
//!
//! Accepts files with or without a header row. With a header, columns are
//! matched by name (case, spaces and underscores ignored) and may appear in
//! any order; without one the order is `id, firstName, lastName, salary, managerId`.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{Employee, EmployeeId};

const COLUMNS: [&str; 5] = ["id", "firstname", "lastname", "salary", "managerid"];

const ID: usize = 0;
const FIRST_NAME: usize = 1;
const LAST_NAME: usize = 2;
const SALARY: usize = 3;
const MANAGER_ID: usize = 4;

/// Errors raised while turning CSV text into employees.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("required header not found: {0}")]
    MissingHeader(&'static str),

    #[error("error on line {line}: {message}")]
    InvalidRow { line: u64, message: String },

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
}

pub type ImportResult<T> = Result<T, ImportError>;

/// Reads employee records from comma separated text.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeCsvImporter {
    has_header: bool,
}

impl Default for EmployeeCsvImporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EmployeeCsvImporter {
    pub fn new(has_header: bool) -> Self {
        Self { has_header }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn import_path(&self, path: &Path) -> ImportResult<Vec<Employee>> {
        let file = File::open(path).map_err(|source| ImportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.import_reader(file)
    }

    pub fn import_reader<R: Read>(&self, reader: R) -> ImportResult<Vec<Employee>> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut records = csv_reader.records();
        let mapping = if self.has_header {
            match records.next() {
                Some(header) => column_mapping(&header?)?,
                None => return Ok(Vec::new()),
            }
        } else {
            (0..COLUMNS.len()).collect()
        };

        let mut employees = Vec::new();
        for record in records {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            if record.iter().all(str::is_empty) {
                continue;
            }
            let employee = employee_from_record(&record, &mapping)
                .map_err(|message| ImportError::InvalidRow { line, message })?;
            employees.push(employee);
        }

        debug!(count = employees.len(), "employees imported");
        Ok(employees)
    }
}

/// Position of each known column in the file, indexed like `COLUMNS`.
fn column_mapping(header: &StringRecord) -> ImportResult<Vec<usize>> {
    let names: Vec<String> = header.iter().map(normalize_header).collect();
    COLUMNS
        .iter()
        .map(|&column| {
            names
                .iter()
                .position(|name| name == column)
                .ok_or(ImportError::MissingHeader(column))
        })
        .collect()
}

fn normalize_header(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Non-empty value of a known column, None when absent or blank.
fn cell<'r>(record: &'r StringRecord, mapping: &[usize], column: usize) -> Option<&'r str> {
    record
        .get(mapping[column])
        .filter(|value| !value.is_empty())
}

fn employee_from_record(record: &StringRecord, mapping: &[usize]) -> Result<Employee, String> {
    let field = |column| cell(record, mapping, column);

    let id: EmployeeId = parse_required(field(ID), "id")?;
    let first_name = field(FIRST_NAME).ok_or("first name is missing")?;
    let last_name = field(LAST_NAME).ok_or("last name is missing")?;
    let salary: u64 = parse_required(field(SALARY), "salary")?;
    let manager_id = field(MANAGER_ID)
        .map(|raw| parse_value::<EmployeeId>(raw, "manager id"))
        .transpose()?;

    Employee::new(id, first_name, last_name, salary, manager_id).map_err(|e| e.to_string())
}

fn parse_required<T: std::str::FromStr>(raw: Option<&str>, field: &str) -> Result<T, String> {
    let raw = raw.ok_or_else(|| format!("{field} is missing"))?;
    parse_value(raw, field)
}

fn parse_value<T: std::str::FromStr>(raw: &str, field: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("invalid {field}: '{raw}'"))
}
