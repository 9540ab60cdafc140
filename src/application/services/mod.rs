//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod analytics;

pub use analytics::{AnalyticsReport, AnalyticsService, LoadSummary};
