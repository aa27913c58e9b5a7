//! LLM provider layer for ARCA SCAN.
//!
//! # Architecture
//!
//! - [`traits::CompletionProvider`] — trait that all providers implement
//! - [`registry`] — static specs for the three supported providers + builder
//! - [`anthropic`], [`openai`], [`gemini`] — one adapter per vendor API shape

pub mod anthropic;
pub mod gemini;
mod http;
pub mod openai;
pub mod registry;
pub mod traits;

// Re-export main types for convenience
pub use registry::{create_provider, spec, ProviderSettings, ProviderSpec, PROVIDERS};
pub use traits::{CompletionProvider, ProviderError};
