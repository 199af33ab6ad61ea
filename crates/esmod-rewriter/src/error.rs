//! Rewrite failure conditions.
//!
//! Missing and malformed package descriptors are normal outcomes handled by
//! fallback branches; the only condition that aborts a file rewrite is a
//! declaration shape the interop table cannot express.

use esmod_common::{Diagnostic, Span};
use std::fmt;

/// `export * from` a CommonJS module: no static binding list exists to
/// re-export.
pub const EXPORT_STAR_FROM_COMMONJS: u32 = 1101;

/// A fatal rewrite failure. The whole file's rewrite is abandoned; there is
/// no partial output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteError {
    /// `export * from "pkg"` where `pkg` is CommonJS. The binding list of a
    /// CommonJS module is only known at load time, so the re-export cannot
    /// be made statically analyzable.
    ExportStarFromCommonJs {
        /// File containing the declaration
        file_name: String,
        /// Printed text of the offending declaration
        declaration: String,
        /// Span of the declaration in source
        span: Span,
    },
}

impl RewriteError {
    /// Convert to a diagnostic for host error reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            RewriteError::ExportStarFromCommonJs {
                file_name,
                declaration,
                span,
            } => Diagnostic::error(
                file_name,
                *span,
                format!("cannot export * from a CommonJS module: {declaration}"),
                EXPORT_STAR_FROM_COMMONJS,
            ),
        }
    }
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteError::ExportStarFromCommonJs {
                file_name,
                declaration,
                ..
            } => write!(
                f,
                "cannot export * from a CommonJS module @ {file_name} : {declaration}"
            ),
        }
    }
}

impl std::error::Error for RewriteError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_file_and_declaration() {
        let error = RewriteError::ExportStarFromCommonJs {
            file_name: "src/app.ts".to_string(),
            declaration: "export * from \"legacy-pkg\";".to_string(),
            span: Span::new(10, 40),
        };
        let message = error.to_string();
        assert!(message.contains("src/app.ts"));
        assert!(message.contains("export * from \"legacy-pkg\";"));
    }

    #[test]
    fn test_to_diagnostic_carries_code_and_span() {
        let error = RewriteError::ExportStarFromCommonJs {
            file_name: "src/app.ts".to_string(),
            declaration: "export * from \"legacy-pkg\";".to_string(),
            span: Span::new(10, 40),
        };
        let diagnostic = error.to_diagnostic();
        assert_eq!(diagnostic.code, EXPORT_STAR_FROM_COMMONJS);
        assert_eq!(diagnostic.span, Span::new(10, 40));
    }
}
