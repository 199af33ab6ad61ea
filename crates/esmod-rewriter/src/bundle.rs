//! Per-declaration rewrite output and the file-level fold.
//!
//! Every import/export declaration rewrites to one [`RewriteBundle`]; a
//! file's bundles fold left-to-right in source order into a single bundle
//! with [`RewriteBundle::append`]. The fold concatenates each bucket and ORs
//! the shim flag, never deduplicating: repeated specifiers legitimately
//! produce repeated statements, and bucket order must follow declaration
//! order.

use esmod_ast::builders;
use esmod_ast::nodes::Stmt;
use esmod_common::RewriteConfig;

/// The statements one declaration rewrites into, sorted into the buckets the
/// final assembly zones are built from.
#[derive(Debug, Clone, Default)]
pub struct RewriteBundle {
    /// Generated ESM import declarations (top zone)
    pub esm_imports: Vec<Stmt>,
    /// Generated ESM export declarations (bottom zone)
    pub esm_exports: Vec<Stmt>,
    /// Loader-binding statements; each one requires the shim
    pub requires: Vec<Stmt>,
    /// Destructurings of default-imported objects
    pub destructure_requires: Vec<Stmt>,
    /// Whether the file needs the `createRequire` loader shim
    pub should_create_require: bool,
}

impl RewriteBundle {
    /// Append `other`'s buckets after this bundle's, preserving order, and
    /// OR the shim flag. The designated combine operation for the file fold.
    pub fn append(&mut self, other: RewriteBundle) {
        self.esm_imports.extend(other.esm_imports);
        self.esm_exports.extend(other.esm_exports);
        self.requires.extend(other.requires);
        self.destructure_requires.extend(other.destructure_requires);
        self.should_create_require |= other.should_create_require;
    }

    pub fn is_empty(&self) -> bool {
        self.esm_imports.is_empty()
            && self.esm_exports.is_empty()
            && self.requires.is_empty()
            && self.destructure_requires.is_empty()
            && !self.should_create_require
    }
}

/// A rewritten file: the body with import/export declarations removed, plus
/// the folded bundle of generated statements.
#[derive(Debug, Clone)]
pub struct FileRewriteResult {
    pub body: Vec<Stmt>,
    pub bundle: RewriteBundle,
}

impl FileRewriteResult {
    /// Produce the final statement list:
    ///
    /// 1. generated imports, then (when the shim flag is set) the
    ///    `createRequire` import, the loader construction, and the loader
    ///    bindings, then the destructurings;
    /// 2. the rewritten body;
    /// 3. generated re-exports.
    ///
    /// Imports and loader bindings must precede every use, and re-exports of
    /// generated temporaries must follow the statements establishing them.
    pub fn assemble(self, config: &RewriteConfig) -> Vec<Stmt> {
        let FileRewriteResult { body, bundle } = self;
        let mut statements = Vec::with_capacity(
            bundle.esm_imports.len()
                + bundle.requires.len()
                + bundle.destructure_requires.len()
                + body.len()
                + bundle.esm_exports.len()
                + 2,
        );
        statements.extend(bundle.esm_imports);
        if bundle.should_create_require {
            statements.push(builders::create_require_import(&config.prefix));
            statements.push(builders::create_require_statement(&config.prefix));
            statements.extend(bundle.requires);
        }
        statements.extend(bundle.destructure_requires);
        statements.extend(body);
        statements.extend(bundle.esm_exports);
        statements
    }
}
