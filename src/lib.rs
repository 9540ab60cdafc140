//! Employee hierarchy analytics
//!
//! Rebuilds an organisation tree from flat employee records and reports
//! managers paid outside the salary band and employees whose reporting
//! line to the CEO is too long.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
