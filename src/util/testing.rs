//! Shared test setup
//!
//! Installs a global tracing subscriber once per test binary so that
//! `RUST_LOG=orgtree=trace cargo test` shows builder and reporter spans.

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{Employee, EmployeeId};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(env_filter),
        );

        if tracing::dispatcher::has_been_set() {
            debug!("Tracing subscriber already set");
        } else if let Err(e) = subscriber.try_init() {
            eprintln!("Error: Failed to set up logging: {}", e);
        }
    });
}

/// Employee record for tests; the names are derived from the id.
pub fn employee(id: EmployeeId, salary: u64, manager_id: Option<EmployeeId>) -> Employee {
    Employee::new(
        id,
        format!("First{id}"),
        format!("Last{id}"),
        salary,
        manager_id,
    )
    .unwrap_or_else(|e| panic!("invalid test employee {id}: {e}"))
}

/// A single reporting line `1 <- 2 <- ... <- n`.
pub fn chain(n: i64, salary: u64) -> Vec<Employee> {
    (1..=n)
        .map(|id| employee(id, salary, (id > 1).then(|| id - 1)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_chain_when_generating_then_links_each_to_predecessor() {
        init_test_setup();

        let employees = chain(3, 1000);

        assert_eq!(employees[0].manager_id(), None);
        assert_eq!(employees[2].manager_id(), Some(2));
    }
}
