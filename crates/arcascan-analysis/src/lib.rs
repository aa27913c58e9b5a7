//! Analysis pipeline for ARCA SCAN.
//!
//! # Architecture
//!
//! - [`prompt`] — intake → instruction text with the report skeleton
//! - [`normalize`] — completion text → validated [`Report`](arcascan_core::Report)
//! - [`render`] — report → self-contained HTML document
//! - [`export`] — HTML → `arca-scan-<client>.html` on disk
//! - [`session`] — the Intake → Requesting → Reviewing wizard driving the above

pub mod error;
pub mod export;
pub mod normalize;
pub mod prompt;
pub mod render;
pub mod session;

#[cfg(test)]
mod testutil;

pub use error::{AnalysisError, NormalizeError, SchemaError, WizardError, GENERIC_FAILURE_MESSAGE};
pub use export::{export_file_name, write_report};
pub use normalize::normalize_completion;
pub use prompt::build_prompt;
pub use render::render_report;
pub use session::{analyze, Session, WizardStep};
