//! Module-level AST for the esmod rewriter.
//!
//! The rewriter does not parse source text; the host compiler hands it a
//! statement tree in which import/export declarations are fully structured
//! and everything else is opaque. This crate defines that tree, the builders
//! for the statements the rewriter generates, and a JavaScript printer for
//! the statement forms that can appear in a rewritten file.
//!
//! # Components
//!
//! - [`nodes`] - statement and declaration node types
//! - [`builders`] - constructors for generated interop statements
//! - [`printer`] - JavaScript emission for rewritten statement lists

pub mod builders;
pub mod nodes;
pub mod printer;

pub use nodes::{
    BindingPattern, ConstStmt, ExportClause, ExportDecl, Expr, ImportDecl, ModuleSpecifier,
    NamedBinding, SourceFile, SpecifierKind, Stmt,
};
