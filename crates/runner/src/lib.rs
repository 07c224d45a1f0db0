//! Runner crate for the image sourcing tool.
//!
//! This crate contains the orchestrator that drives one run over the
//! catalog, the ledger of unmatched titles, and the report generator.

pub mod orchestrator;
pub mod report;
pub mod unmatched;

pub use orchestrator::{OUTPUT_DIR_PREFIX, RunConfig, RunOrchestrator, RunSummary};
pub use report::{REPORT_FILE_NAME, ReportGenerator};
pub use unmatched::{UNDEFINED_DISTRIBUTOR, UNDEFINED_TITLE, UnmatchedTitles};
