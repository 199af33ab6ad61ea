//! Builders for the statements the rewriter generates.
//!
//! Each builder returns a fully formed [`Stmt`]; the rewriter decides which
//! to emit and in what order, it never assembles node structures by hand.
//! Generated temporary identifiers derive deterministically from the
//! declaration's own binding names, so rewriting is a pure function of its
//! inputs.

use crate::nodes::{
    BindingPattern, ConstStmt, ExportClause, ExportDecl, Expr, ImportDecl, ModuleSpecifier,
    NamedBinding, Stmt,
};

/// Module the `createRequire` factory is imported from.
pub const REQUIRE_FACTORY_MODULE: &str = "module";

/// `import { createRequire as <prefix>createRequire } from "module";`
pub fn create_require_import(prefix: &str) -> Stmt {
    let mut decl = ImportDecl::new(ModuleSpecifier::new(REQUIRE_FACTORY_MODULE));
    decl.named = Some(vec![NamedBinding::renamed(
        "createRequire",
        format!("{prefix}createRequire"),
    )]);
    Stmt::Import(decl)
}

/// `const <prefix>require = <prefix>createRequire(import.meta.url);`
///
/// Derives a synchronous loader from the file's own module identity. Emitted
/// once per file, ahead of every statement that calls the loader.
pub fn create_require_statement(prefix: &str) -> Stmt {
    Stmt::Const(ConstStmt {
        pattern: BindingPattern::Identifier(format!("{prefix}require")),
        init: Expr::Call {
            callee: Box::new(Expr::Identifier(format!("{prefix}createRequire"))),
            arguments: vec![Expr::PropertyAccess {
                object: Box::new(Expr::ImportMeta),
                property: "url".to_string(),
            }],
        },
    })
}

/// `import <name> from "<specifier>";`
pub fn default_import(name: &str, specifier: ModuleSpecifier) -> Stmt {
    let mut decl = ImportDecl::new(specifier);
    decl.default_name = Some(name.to_string());
    Stmt::Import(decl)
}

/// `const { a, b: c } = <default_name>;`
///
/// Extracts the named bindings of a default+named import from the
/// default-imported object.
pub fn destructure_from_default(default_name: &str, named: &[NamedBinding]) -> Stmt {
    Stmt::Const(ConstStmt {
        pattern: BindingPattern::Object(named.to_vec()),
        init: Expr::Identifier(default_name.to_string()),
    })
}

/// `const { a, b: c } = <prefix>require("<specifier>");`
///
/// Binds a named-only import's bindings through the loader, honoring
/// renames.
pub fn require_statement_for_import(named: &[NamedBinding], specifier: &str, prefix: &str) -> Stmt {
    Stmt::Const(ConstStmt {
        pattern: BindingPattern::Object(named.to_vec()),
        init: require_call(specifier, prefix),
    })
}

/// `const { a: <prefix>a, b: <prefix>b } = <prefix>require("<specifier>");`
///
/// Binds each requested original to a prefixed temporary; the matching
/// re-export is built by [`export_declaration_for_named_requires`].
pub fn require_statement_for_export(
    bindings: &[NamedBinding],
    specifier: &str,
    prefix: &str,
) -> Stmt {
    let elements = bindings
        .iter()
        .map(|binding| {
            let original = binding.original();
            NamedBinding::renamed(original, format!("{prefix}{original}"))
        })
        .collect();
    Stmt::Const(ConstStmt {
        pattern: BindingPattern::Object(elements),
        init: require_call(specifier, prefix),
    })
}

/// `export { <prefix>a as a, <prefix>b as c };`
///
/// Re-exports each temporary bound by [`require_statement_for_export`] under
/// its public name.
pub fn export_declaration_for_named_requires(bindings: &[NamedBinding], prefix: &str) -> Stmt {
    let elements = bindings
        .iter()
        .map(|binding| {
            NamedBinding::renamed(format!("{}{}", prefix, binding.original()), &binding.name)
        })
        .collect();
    Stmt::Export(ExportDecl {
        clause: ExportClause::Named(elements),
        specifier: None,
        span: Default::default(),
    })
}

/// `import <prefix><name> from "<specifier>";`
///
/// Default-imports a CommonJS module under a temporary for `export * as`.
pub fn default_import_for_namespace_export(
    name: &str,
    specifier: ModuleSpecifier,
    prefix: &str,
) -> Stmt {
    default_import(&format!("{prefix}{name}"), specifier)
}

/// `export { <prefix><name> as <name> };`
pub fn named_exports_for_default_import(name: &str, prefix: &str) -> Stmt {
    Stmt::Export(ExportDecl {
        clause: ExportClause::Named(vec![NamedBinding::renamed(
            format!("{prefix}{name}"),
            name,
        )]),
        specifier: None,
        span: Default::default(),
    })
}

fn require_call(specifier: &str, prefix: &str) -> Expr {
    Expr::Call {
        callee: Box::new(Expr::Identifier(format!("{prefix}require"))),
        arguments: vec![Expr::StringLiteral(specifier.to_string())],
    }
}
