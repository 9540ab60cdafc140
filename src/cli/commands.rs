//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::{AnalyticsService, LoadSummary};
use crate::cli::args::{Cli, Commands, InputArgs, LinesArgs, SalaryArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{expand_path, Settings};
use crate::domain::SalaryPolicy;
use crate::infrastructure::EmployeeCsvImporter;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, run with --help for usage".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = load_settings(cli)?;
    match command {
        Commands::Report {
            input,
            salary,
            lines,
        } => cmd_report(&settings, input, salary, lines),
        Commands::Salary { input, salary } => cmd_salary(&settings, input, salary),
        Commands::Lines { input, lines } => cmd_lines(&settings, input, lines),
        Commands::Tree { input, max_depth } => cmd_tree(&settings, input, *max_depth),
        Commands::Chain { id, input } => cmd_chain(&settings, input, *id),
        Commands::Config => cmd_config(&settings),
        Commands::Completion { .. } => Ok(()),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let dir = match &cli.config_dir {
        Some(dir) => Some(dir.clone()),
        None => std::env::current_dir().ok(),
    };
    let mut settings = Settings::load(dir.as_deref())?;
    if cli.no_header {
        settings.import.has_header = false;
    }
    debug!(?settings, "settings loaded");
    Ok(settings)
}

fn salary_policy(settings: &Settings, args: &SalaryArgs) -> SalaryPolicy {
    SalaryPolicy::new(
        args.minimum_percentage
            .unwrap_or(settings.report.minimum_percentage),
        args.maximum_percentage
            .unwrap_or(settings.report.maximum_percentage),
    )
}

fn threshold(settings: &Settings, args: &LinesArgs) -> i32 {
    args.threshold
        .unwrap_or(settings.report.reporting_lines_threshold)
}

fn input_path(settings: &Settings, input: &InputArgs) -> PathBuf {
    match &input.file {
        Some(file) => expand_path(file),
        None => {
            output::warning(&format!(
                "no file given, using {}",
                settings.import.default_file.display()
            ));
            settings.import.default_file.clone()
        }
    }
}

/// Import the input file and build the hierarchy.
#[instrument(level = "debug", skip(settings))]
fn load_service(settings: &Settings, path: &Path) -> CliResult<AnalyticsService> {
    let importer = EmployeeCsvImporter::new(settings.import.has_header);
    let employees = importer.import_path(path)?;

    let service = AnalyticsService::new();
    let summary = service.load(&employees)?;
    report_discrepancy(&summary);
    Ok(service)
}

fn report_discrepancy(summary: &LoadSummary) {
    if summary.has_discrepancy() {
        output::warning(&format!(
            "{} of {} employees attached; dropped (unknown manager): {}",
            summary.attached,
            summary.records,
            summary.dropped_ids().iter().join(", ")
        ));
    }
}

fn cmd_report(
    settings: &Settings,
    input: &InputArgs,
    salary: &SalaryArgs,
    lines: &LinesArgs,
) -> CliResult<()> {
    let service = load_service(settings, &input_path(settings, input))?;
    let report = service.run_all(salary_policy(settings, salary), threshold(settings, lines))?;

    output::print_salary_report(report.policy, &report.salary_violations);
    output::print_reporting_lines_report(report.threshold, &report.reporting_lines);
    Ok(())
}

fn cmd_salary(settings: &Settings, input: &InputArgs, salary: &SalaryArgs) -> CliResult<()> {
    let service = load_service(settings, &input_path(settings, input))?;
    let policy = salary_policy(settings, salary);
    let report = service.salary_policy_violations(policy)?;

    output::print_salary_report(policy, &report);
    Ok(())
}

fn cmd_lines(settings: &Settings, input: &InputArgs, lines: &LinesArgs) -> CliResult<()> {
    let service = load_service(settings, &input_path(settings, input))?;
    let threshold = threshold(settings, lines);
    let report = service.excessive_reporting_lines(threshold)?;

    output::print_reporting_lines_report(threshold, &report);
    Ok(())
}

fn cmd_tree(settings: &Settings, input: &InputArgs, max_depth: Option<usize>) -> CliResult<()> {
    let service = load_service(settings, &input_path(settings, input))?;
    let hierarchy = service.hierarchy()?;
    let max_depth = max_depth.unwrap_or(settings.tree.max_depth);

    output::info(&hierarchy.to_tree_string(max_depth));
    output::detail(&format!(
        "{} employees, deepest reporting line: {}",
        hierarchy.len(),
        hierarchy.max_depth()
    ));
    Ok(())
}

fn cmd_chain(settings: &Settings, input: &InputArgs, id: i64) -> CliResult<()> {
    let service = load_service(settings, &input_path(settings, input))?;
    let chain = service.reporting_chain(id)?;

    output::header(&format!("Reporting chain of {id} ({} levels)", chain.len()));
    for manager in &chain {
        output::detail(manager);
    }
    Ok(())
}

fn cmd_config(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}
