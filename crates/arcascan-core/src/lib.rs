//! ARCA SCAN core — intake and report types, configuration, and shared helpers.

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use error::ValidationError;
pub use types::{Intake, IntakeField, ProviderKind, Report};
