//! The per-declaration decision engine and file walker.
//!
//! For every import/export declaration, the rewriter combines the module's
//! classification (builtin, ESM, CommonJS) with the declaration's clause
//! shape and produces a [`RewriteBundle`]:
//!
//! - relative and ESM-package specifiers keep their shape and get a
//!   canonical specifier;
//! - builtins pass through untouched;
//! - CommonJS packages go through the interop table, generating default
//!   imports, destructurings, loader bindings, and re-exports as the shape
//!   demands.
//!
//! The walk over a file is depth-first with a single dispatch point: an
//! import/export node is consumed and not descended into; any other node is
//! reassembled with rewritten children. One `ModuleRewriter` handles one
//! file and caches descriptor lookups so every declaration referencing the
//! same package sees the same classification.

use esmod_ast::builders;
use esmod_ast::nodes::{ExportClause, ExportDecl, ImportDecl, ModuleSpecifier, SourceFile, Stmt};
use esmod_ast::printer::print_statement;
use esmod_common::RewriteConfig;
use esmod_resolver::canonical::canonical_specifier;
use esmod_resolver::classify::{ModuleKind, classify_module};
use esmod_resolver::descriptor::{PackageDescriptor, descriptor_for_specifier};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

use crate::bundle::{FileRewriteResult, RewriteBundle};
use crate::error::RewriteError;

/// Rewrites the declarations of one source file.
pub struct ModuleRewriter<'a> {
    config: &'a RewriteConfig,
    /// Descriptor lookups already performed for this file, keyed by
    /// specifier text. Repeated references to a package must classify
    /// identically, and the filesystem walk is not free.
    descriptors: FxHashMap<String, Option<PackageDescriptor>>,
}

impl<'a> ModuleRewriter<'a> {
    pub fn new(config: &'a RewriteConfig) -> Self {
        ModuleRewriter {
            config,
            descriptors: FxHashMap::default(),
        }
    }

    /// Rewrite a whole file. Returns the body with import/export
    /// declarations removed plus the folded bundle, or the first fatal
    /// error; there is no partial output on failure.
    pub fn rewrite_source_file(
        &mut self,
        file: &SourceFile,
    ) -> Result<FileRewriteResult, RewriteError> {
        let containing_file = PathBuf::from(&file.file_name);
        let (body, bundle) =
            self.rewrite_statements(&file.statements, &file.file_name, &containing_file)?;
        Ok(FileRewriteResult { body, bundle })
    }

    fn rewrite_statements(
        &mut self,
        statements: &[Stmt],
        file_name: &str,
        containing_file: &Path,
    ) -> Result<(Vec<Stmt>, RewriteBundle), RewriteError> {
        let mut body = Vec::with_capacity(statements.len());
        let mut bundle = RewriteBundle::default();
        for stmt in statements {
            match stmt {
                // Side-effect imports (`import "x"`) carry no bindings to
                // rewrite and stay in place.
                Stmt::Import(decl) if !decl.is_side_effect_only() => {
                    bundle.append(self.rewrite_import(decl, containing_file));
                }
                // Local exports (`export { a }` with no `from`) stay in
                // place; only re-exports reference a module.
                Stmt::Export(decl) if decl.specifier.is_some() => {
                    bundle.append(self.rewrite_export(decl, file_name, containing_file)?);
                }
                Stmt::Block(children) => {
                    let (rewritten, nested) =
                        self.rewrite_statements(children, file_name, containing_file)?;
                    bundle.append(nested);
                    body.push(Stmt::Block(rewritten));
                }
                other => body.push(other.clone()),
            }
        }
        Ok((body, bundle))
    }

    fn rewrite_import(&mut self, decl: &ImportDecl, containing_file: &Path) -> RewriteBundle {
        let mut bundle = RewriteBundle::default();

        if decl.specifier.is_relative() {
            let canonical = self.canonicalize(&decl.specifier, containing_file, None);
            bundle.esm_imports.push(Stmt::Import(decl.with_specifier(canonical)));
            return bundle;
        }

        let descriptor = self.descriptor_for(decl.specifier.text());
        let kind = classify_module(decl.specifier.text(), descriptor.as_ref());
        tracing::debug!(specifier = decl.specifier.text(), ?kind, "rewriting import");
        match kind {
            ModuleKind::Builtin => {
                bundle.esm_imports.push(Stmt::Import(decl.clone()));
            }
            ModuleKind::EsModule => {
                let canonical =
                    self.canonicalize(&decl.specifier, containing_file, descriptor.as_ref());
                bundle.esm_imports.push(Stmt::Import(decl.with_specifier(canonical)));
            }
            ModuleKind::CommonJs if !self.config.create_require => {
                let canonical =
                    self.canonicalize(&decl.specifier, containing_file, descriptor.as_ref());
                bundle.esm_imports.push(Stmt::Import(decl.with_specifier(canonical)));
            }
            ModuleKind::CommonJs => {
                self.rewrite_commonjs_import(decl, containing_file, descriptor.as_ref(), &mut bundle);
            }
        }
        bundle
    }

    /// The interop table for imports from CommonJS packages.
    fn rewrite_commonjs_import(
        &mut self,
        decl: &ImportDecl,
        containing_file: &Path,
        descriptor: Option<&PackageDescriptor>,
        bundle: &mut RewriteBundle,
    ) {
        let canonical = self.canonicalize(&decl.specifier, containing_file, descriptor);
        match (&decl.default_name, &decl.named, &decl.namespace) {
            // import A, { a, b as c } from "pkg"
            (Some(default_name), Some(named), _) => {
                bundle
                    .destructure_requires
                    .push(builders::destructure_from_default(default_name, named));
                bundle
                    .esm_imports
                    .push(builders::default_import(default_name, canonical));
            }
            // import { a, b as c } from "pkg"
            (None, Some(named), _) => {
                bundle.requires.push(builders::require_statement_for_import(
                    named,
                    canonical.text(),
                    &self.config.prefix,
                ));
                bundle.should_create_require = true;
            }
            // import * as ns from "pkg"
            (_, None, Some(namespace)) => {
                bundle
                    .esm_imports
                    .push(builders::default_import(namespace, canonical));
            }
            // import A from "pkg"
            (Some(default_name), None, None) => {
                bundle
                    .esm_imports
                    .push(builders::default_import(default_name, canonical));
            }
            (None, None, None) => {}
        }
    }

    fn rewrite_export(
        &mut self,
        decl: &ExportDecl,
        file_name: &str,
        containing_file: &Path,
    ) -> Result<RewriteBundle, RewriteError> {
        let mut bundle = RewriteBundle::default();
        let Some(specifier) = &decl.specifier else {
            return Ok(bundle);
        };

        if specifier.is_relative() {
            let canonical = self.canonicalize(specifier, containing_file, None);
            bundle.esm_exports.push(Stmt::Export(decl.with_specifier(canonical)));
            return Ok(bundle);
        }

        let descriptor = self.descriptor_for(specifier.text());
        let kind = classify_module(specifier.text(), descriptor.as_ref());
        tracing::debug!(specifier = specifier.text(), ?kind, "rewriting export");
        match kind {
            ModuleKind::Builtin => {
                bundle.esm_exports.push(Stmt::Export(decl.clone()));
            }
            ModuleKind::EsModule => {
                let canonical = self.canonicalize(specifier, containing_file, descriptor.as_ref());
                bundle.esm_exports.push(Stmt::Export(decl.with_specifier(canonical)));
            }
            ModuleKind::CommonJs if !self.config.create_require => {
                let canonical = self.canonicalize(specifier, containing_file, descriptor.as_ref());
                bundle.esm_exports.push(Stmt::Export(decl.with_specifier(canonical)));
            }
            ModuleKind::CommonJs => {
                self.rewrite_commonjs_export(
                    decl,
                    specifier,
                    file_name,
                    containing_file,
                    descriptor.as_ref(),
                    &mut bundle,
                )?;
            }
        }
        Ok(bundle)
    }

    /// The interop table for re-exports from CommonJS packages.
    fn rewrite_commonjs_export(
        &mut self,
        decl: &ExportDecl,
        specifier: &ModuleSpecifier,
        file_name: &str,
        containing_file: &Path,
        descriptor: Option<&PackageDescriptor>,
        bundle: &mut RewriteBundle,
    ) -> Result<(), RewriteError> {
        let canonical = self.canonicalize(specifier, containing_file, descriptor);
        let prefix = &self.config.prefix;
        match &decl.clause {
            // export { a, b as c } from "pkg"
            ExportClause::Named(bindings) => {
                bundle.requires.push(builders::require_statement_for_export(
                    bindings,
                    canonical.text(),
                    prefix,
                ));
                bundle
                    .esm_exports
                    .push(builders::export_declaration_for_named_requires(bindings, prefix));
                bundle.should_create_require = true;
            }
            // export * as ns from "pkg"
            ExportClause::Namespace(name) => {
                bundle.esm_imports.push(builders::default_import_for_namespace_export(
                    name, canonical, prefix,
                ));
                bundle
                    .esm_exports
                    .push(builders::named_exports_for_default_import(name, prefix));
            }
            // export * from "pkg"
            ExportClause::Star => {
                return Err(RewriteError::ExportStarFromCommonJs {
                    file_name: file_name.to_string(),
                    declaration: print_statement(&Stmt::Export(decl.clone())),
                    span: decl.span,
                });
            }
        }
        Ok(())
    }

    /// Cached descriptor lookup for a package-rooted specifier.
    fn descriptor_for(&mut self, specifier: &str) -> Option<PackageDescriptor> {
        if let Some(cached) = self.descriptors.get(specifier) {
            return cached.clone();
        }
        let descriptor = descriptor_for_specifier(specifier, &self.config.node_modules_dir());
        self.descriptors
            .insert(specifier.to_string(), descriptor.clone());
        descriptor
    }

    fn canonicalize(
        &self,
        specifier: &ModuleSpecifier,
        containing_file: &Path,
        descriptor: Option<&PackageDescriptor>,
    ) -> ModuleSpecifier {
        ModuleSpecifier::new(canonical_specifier(
            specifier,
            containing_file,
            self.config,
            descriptor,
        ))
    }
}
