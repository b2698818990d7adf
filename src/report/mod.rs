//! Outputs that live outside the scoring core: the recorded report log and
//! generated scam reports.

pub mod generator;
pub mod log;

pub use generator::{ReportDestination, ReportRequest, ScamReport};
pub use log::{ReportEntry, ReportLog, ReportLogConfig, ReportStats};
