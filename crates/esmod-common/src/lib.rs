//! Common types for the esmod import/export rewriter.
//!
//! This crate provides foundational types used across all esmod crates:
//! - Source spans (`Span`)
//! - Diagnostics (`Diagnostic`, `DiagnosticSeverity`)
//! - Rewrite configuration (`RewriteConfig`)

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Diagnostics - error/warning reporting
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticSeverity};

// Rewrite configuration
pub mod config;
pub use config::RewriteConfig;
