//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// Employee hierarchy analytics: salary policy and reporting-line reports
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Input file has no header row (columns: id,firstName,lastName,salary,managerId)
    #[arg(long, global = true)]
    pub no_header: bool,

    /// Directory searched for .orgtree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run both reports
    Report {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        salary: SalaryArgs,
        #[command(flatten)]
        lines: LinesArgs,
    },

    /// Managers whose salary is outside the allowed band
    Salary {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        salary: SalaryArgs,
    },

    /// Employees with too long a reporting line
    Lines {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        lines: LinesArgs,
    },

    /// Show the hierarchy as a tree
    Tree {
        #[command(flatten)]
        input: InputArgs,
        /// Levels shown below the CEO (default: tree.max_depth setting)
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Show the managers between an employee and the CEO
    Chain {
        /// Employee id
        id: i64,
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Employee CSV file (default: import.default_file setting)
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SalaryArgs {
    /// Minimum salary premium over the subordinate average, in percent
    #[arg(long = "min", allow_negative_numbers = true)]
    pub minimum_percentage: Option<i32>,

    /// Maximum salary premium over the subordinate average, in percent
    #[arg(long = "max", allow_negative_numbers = true)]
    pub maximum_percentage: Option<i32>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct LinesArgs {
    /// Deepest allowed reporting line below the CEO
    #[arg(long, allow_negative_numbers = true)]
    pub threshold: Option<i32>,
}
