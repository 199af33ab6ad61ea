//! Import/export declaration rewriting for strict ESM output.
//!
//! Takes a per-file statement tree from the host compiler and rewrites every
//! import/export declaration so the file is valid ESM: specifiers become
//! extension-complete and entry-point qualified, and bindings imported from
//! CommonJS packages are re-established through a generated `createRequire`
//! loader shim.
//!
//! # Pipeline
//!
//! 1. [`ModuleRewriter`] walks the statement tree depth-first, consuming
//!    import/export declarations and folding their [`RewriteBundle`]s in
//!    source order.
//! 2. [`FileRewriteResult::assemble`] places the generated statements around
//!    the remaining body: imports and loader shims first, body in the
//!    middle, re-exports last.
//!
//! Each rewrite is a pure function of the tree, the configuration, and a
//! filesystem snapshot; no state is shared across files, so the host may
//! process files in parallel.

pub mod bundle;
pub mod error;
pub mod rewrite;

pub use bundle::{FileRewriteResult, RewriteBundle};
pub use error::{EXPORT_STAR_FROM_COMMONJS, RewriteError};
pub use rewrite::ModuleRewriter;

use esmod_ast::nodes::SourceFile;
use esmod_common::RewriteConfig;

/// Rewrite one file and assemble the final statement list.
pub fn rewrite_file(file: &SourceFile, config: &RewriteConfig) -> Result<SourceFile, RewriteError> {
    let mut rewriter = ModuleRewriter::new(config);
    let result = rewriter.rewrite_source_file(file)?;
    Ok(SourceFile::new(
        file.file_name.clone(),
        result.assemble(config),
    ))
}
