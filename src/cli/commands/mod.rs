//! CLI command implementations.
//!
//! Each submodule implements one top-level CLI command; `output` holds the
//! pieces the analysis commands share.

pub mod ask;
pub mod config;
pub mod email;
pub mod link;
pub mod output;
pub mod profile;
pub mod report;
pub mod reports;
pub mod scan;

pub use ask::cmd_ask;
pub use config::cmd_config;
pub use email::cmd_email;
pub use link::cmd_link;
pub use profile::cmd_profile;
pub use report::cmd_report;
pub use reports::cmd_reports;
pub use scan::cmd_scan;
