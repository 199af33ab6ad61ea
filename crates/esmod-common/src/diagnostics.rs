//! Diagnostic infrastructure.
//!
//! The rewriter reports failures as `Diagnostic` values carrying a severity,
//! the file they occurred in, a span, a message, and a stable numeric code.
//! Components that can fail keep their own error enums and convert to
//! `Diagnostic` at the boundary.

use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// A hint (lowest severity)
    Hint = 4,
    /// Informational message
    Info = 3,
    /// A warning
    Warning = 2,
    /// An error (highest severity)
    Error = 1,
}

/// A single diagnostic message with location and severity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// File the diagnostic refers to
    pub file_name: String,
    /// Location within the file
    pub span: Span,
    /// Human-readable message
    pub message: String,
    /// Stable numeric code
    pub code: u32,
    /// Severity level
    pub severity: DiagnosticSeverity,
}

impl Diagnostic {
    pub fn error(file_name: impl Into<String>, span: Span, message: impl Into<String>, code: u32) -> Self {
        Diagnostic {
            file_name: file_name.into(),
            span,
            message: message.into(),
            code,
            severity: DiagnosticSeverity::Error,
        }
    }

    pub fn warning(
        file_name: impl Into<String>,
        span: Span,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Diagnostic {
            file_name: file_name.into(),
            span,
            message: message.into(),
            code,
            severity: DiagnosticSeverity::Warning,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Info => "info",
            DiagnosticSeverity::Hint => "hint",
        };
        write!(
            f,
            "{}: {} ESM{}: {}",
            self.file_name, severity, self.code, self.message
        )
    }
}
