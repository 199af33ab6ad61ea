//! Statement and declaration node types.
//!
//! Import and export declarations are fully structured; every other
//! statement is either a generated `const` binding, an opaque `Raw` leaf, or
//! a `Block` container the walker can descend into.

use esmod_common::Span;
use std::fmt;

/// Whether a specifier is a relative path or rooted in a package name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecifierKind {
    /// Begins with `./`, `../`, or is exactly `..`
    Relative,
    /// Everything else, platform builtins included
    PackageRooted,
}

/// A module specifier as written in a declaration.
///
/// The kind is derived once at construction and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleSpecifier {
    text: String,
    kind: SpecifierKind,
}

impl ModuleSpecifier {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = if text == ".." || text.starts_with("./") || text.starts_with("../") {
            SpecifierKind::Relative
        } else {
            SpecifierKind::PackageRooted
        };
        ModuleSpecifier { text, kind }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> SpecifierKind {
        self.kind
    }

    pub fn is_relative(&self) -> bool {
        self.kind == SpecifierKind::Relative
    }
}

impl fmt::Display for ModuleSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A named binding, used in import clauses (`import { a as b }`), export
/// clauses (`export { a as b }`), and object binding patterns (`{ a: b }`).
///
/// `property_name` is the original name when it differs from the local alias
/// `name`; `None` means the binding is not renamed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedBinding {
    pub property_name: Option<String>,
    pub name: String,
}

impl NamedBinding {
    pub fn new(name: impl Into<String>) -> Self {
        NamedBinding {
            property_name: None,
            name: name.into(),
        }
    }

    pub fn renamed(property_name: impl Into<String>, name: impl Into<String>) -> Self {
        NamedBinding {
            property_name: Some(property_name.into()),
            name: name.into(),
        }
    }

    /// The original (source-side) name of the binding.
    pub fn original(&self) -> &str {
        self.property_name.as_deref().unwrap_or(&self.name)
    }
}

/// An `import` declaration.
///
/// Valid clause shapes are default-only, named-only, namespace-only, and
/// default+named. A declaration with no bindings at all is a side-effect
/// import (`import "x"`), which the rewriter leaves in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub default_name: Option<String>,
    pub named: Option<Vec<NamedBinding>>,
    pub namespace: Option<String>,
    pub specifier: ModuleSpecifier,
    pub span: Span,
}

impl ImportDecl {
    pub fn new(specifier: ModuleSpecifier) -> Self {
        ImportDecl {
            default_name: None,
            named: None,
            namespace: None,
            specifier,
            span: Span::default(),
        }
    }

    pub fn has_default(&self) -> bool {
        self.default_name.is_some()
    }

    pub fn has_named(&self) -> bool {
        self.named.is_some()
    }

    pub fn has_namespace(&self) -> bool {
        self.namespace.is_some()
    }

    /// True for `import "x"` with no bindings.
    pub fn is_side_effect_only(&self) -> bool {
        !self.has_default() && !self.has_named() && !self.has_namespace()
    }

    /// Rebuild this declaration with a new specifier, clause preserved.
    pub fn with_specifier(&self, specifier: ModuleSpecifier) -> ImportDecl {
        ImportDecl {
            specifier,
            ..self.clone()
        }
    }
}

/// The clause of an `export ... from` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportClause {
    /// `export { a, b as c }`
    Named(Vec<NamedBinding>),
    /// `export * as ns`
    Namespace(String),
    /// `export *`
    Star,
}

/// An `export` declaration.
///
/// `specifier` is `None` for local exports (`export { a }` with no `from`
/// clause), which the rewriter leaves in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDecl {
    pub clause: ExportClause,
    pub specifier: Option<ModuleSpecifier>,
    pub span: Span,
}

impl ExportDecl {
    pub fn new(clause: ExportClause, specifier: ModuleSpecifier) -> Self {
        ExportDecl {
            clause,
            specifier: Some(specifier),
            span: Span::default(),
        }
    }

    /// Rebuild this declaration with a new specifier, clause preserved.
    pub fn with_specifier(&self, specifier: ModuleSpecifier) -> ExportDecl {
        ExportDecl {
            specifier: Some(specifier),
            ..self.clone()
        }
    }
}

/// Expressions that can appear in generated statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Identifier: `foo`
    Identifier(String),
    /// String literal: `"./mod.js"`
    StringLiteral(String),
    /// Call expression: `callee(args)`
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    /// Property access: `object.property`
    PropertyAccess { object: Box<Expr>, property: String },
    /// `import.meta`
    ImportMeta,
}

/// Binding target of a generated `const` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingPattern {
    /// `const name = ...`
    Identifier(String),
    /// `const { a, b: c } = ...`
    Object(Vec<NamedBinding>),
}

/// A generated `const <pattern> = <init>;` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstStmt {
    pub pattern: BindingPattern,
    pub init: Expr,
}

/// One statement in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Import(ImportDecl),
    Export(ExportDecl),
    /// Generated binding statement
    Const(ConstStmt),
    /// A container construct (block, function body) whose nested statements
    /// the walker descends into
    Block(Vec<Stmt>),
    /// Opaque statement text the rewriter passes through untouched
    Raw(String),
}

/// A file's statement tree plus its name for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub file_name: String,
    pub statements: Vec<Stmt>,
}

impl SourceFile {
    pub fn new(file_name: impl Into<String>, statements: Vec<Stmt>) -> Self {
        SourceFile {
            file_name: file_name.into(),
            statements,
        }
    }
}
