//! JavaScript printer for rewritten statement lists.
//!
//! Emits exactly the statement forms a rewrite can produce: import/export
//! declarations, generated `const` bindings, opaque raw statements, and
//! blocks. Raw statement text is passed through byte-for-byte.

use crate::nodes::{
    BindingPattern, ConstStmt, ExportClause, ExportDecl, Expr, ImportDecl, NamedBinding,
    SourceFile, Stmt,
};

const INDENT: &str = "    ";

/// Print a whole file, one statement per line.
pub fn print_source_file(file: &SourceFile) -> String {
    print_statements(&file.statements)
}

/// Print a statement list, one statement per line, with a trailing newline.
pub fn print_statements(statements: &[Stmt]) -> String {
    let mut out = String::new();
    for stmt in statements {
        emit_statement(stmt, 0, &mut out);
        out.push('\n');
    }
    out
}

/// Print a single statement without a trailing newline.
pub fn print_statement(stmt: &Stmt) -> String {
    let mut out = String::new();
    emit_statement(stmt, 0, &mut out);
    out
}

fn emit_statement(stmt: &Stmt, indent: usize, out: &mut String) {
    for _ in 0..indent {
        out.push_str(INDENT);
    }
    match stmt {
        Stmt::Import(decl) => emit_import(decl, out),
        Stmt::Export(decl) => emit_export(decl, out),
        Stmt::Const(stmt) => emit_const(stmt, out),
        Stmt::Raw(text) => out.push_str(text),
        Stmt::Block(children) => {
            out.push_str("{\n");
            for child in children {
                emit_statement(child, indent + 1, out);
                out.push('\n');
            }
            for _ in 0..indent {
                out.push_str(INDENT);
            }
            out.push('}');
        }
    }
}

fn emit_import(decl: &ImportDecl, out: &mut String) {
    out.push_str("import ");
    if decl.is_side_effect_only() {
        emit_string_literal(decl.specifier.text(), out);
        out.push(';');
        return;
    }
    let mut wrote_clause = false;
    if let Some(default_name) = &decl.default_name {
        out.push_str(default_name);
        wrote_clause = true;
    }
    if let Some(namespace) = &decl.namespace {
        if wrote_clause {
            out.push_str(", ");
        }
        out.push_str("* as ");
        out.push_str(namespace);
        wrote_clause = true;
    }
    if let Some(named) = &decl.named {
        if wrote_clause {
            out.push_str(", ");
        }
        emit_named_list(named, " as ", out);
    }
    out.push_str(" from ");
    emit_string_literal(decl.specifier.text(), out);
    out.push(';');
}

fn emit_export(decl: &ExportDecl, out: &mut String) {
    out.push_str("export ");
    match &decl.clause {
        ExportClause::Named(bindings) => emit_named_list(bindings, " as ", out),
        ExportClause::Namespace(name) => {
            out.push_str("* as ");
            out.push_str(name);
        }
        ExportClause::Star => out.push('*'),
    }
    if let Some(specifier) = &decl.specifier {
        out.push_str(" from ");
        emit_string_literal(specifier.text(), out);
    }
    out.push(';');
}

fn emit_const(stmt: &ConstStmt, out: &mut String) {
    out.push_str("const ");
    match &stmt.pattern {
        BindingPattern::Identifier(name) => out.push_str(name),
        BindingPattern::Object(elements) => emit_named_list(elements, ": ", out),
    }
    out.push_str(" = ");
    emit_expr(&stmt.init, out);
    out.push(';');
}

/// Emit `{ a, b<sep>c }` where `sep` is `" as "` for clauses and `": "` for
/// object binding patterns.
fn emit_named_list(bindings: &[NamedBinding], sep: &str, out: &mut String) {
    out.push_str("{ ");
    for (i, binding) in bindings.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        match &binding.property_name {
            Some(property) if *property != binding.name => {
                out.push_str(property);
                out.push_str(sep);
                out.push_str(&binding.name);
            }
            _ => out.push_str(&binding.name),
        }
    }
    out.push_str(" }");
}

fn emit_expr(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Identifier(name) => out.push_str(name),
        Expr::StringLiteral(value) => emit_string_literal(value, out),
        Expr::Call { callee, arguments } => {
            emit_expr(callee, out);
            out.push('(');
            for (i, argument) in arguments.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                emit_expr(argument, out);
            }
            out.push(')');
        }
        Expr::PropertyAccess { object, property } => {
            emit_expr(object, out);
            out.push('.');
            out.push_str(property);
        }
        Expr::ImportMeta => out.push_str("import.meta"),
    }
}

fn emit_string_literal(value: &str, out: &mut String) {
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::ModuleSpecifier;

    fn import(f: impl FnOnce(&mut ImportDecl)) -> Stmt {
        let mut decl = ImportDecl::new(ModuleSpecifier::new("./mod.js"));
        f(&mut decl);
        Stmt::Import(decl)
    }

    #[test]
    fn test_print_import_shapes() {
        assert_eq!(print_statement(&import(|_| {})), "import \"./mod.js\";");
        assert_eq!(
            print_statement(&import(|d| d.default_name = Some("A".into()))),
            "import A from \"./mod.js\";"
        );
        assert_eq!(
            print_statement(&import(|d| d.namespace = Some("ns".into()))),
            "import * as ns from \"./mod.js\";"
        );
        assert_eq!(
            print_statement(&import(|d| {
                d.default_name = Some("A".into());
                d.named = Some(vec![NamedBinding::new("a"), NamedBinding::renamed("b", "c")]);
            })),
            "import A, { a, b as c } from \"./mod.js\";"
        );
    }

    #[test]
    fn test_print_export_shapes() {
        let spec = ModuleSpecifier::new("pkg");
        assert_eq!(
            print_statement(&Stmt::Export(ExportDecl::new(
                ExportClause::Named(vec![NamedBinding::renamed("a", "b")]),
                spec.clone(),
            ))),
            "export { a as b } from \"pkg\";"
        );
        assert_eq!(
            print_statement(&Stmt::Export(ExportDecl::new(
                ExportClause::Namespace("ns".into()),
                spec.clone(),
            ))),
            "export * as ns from \"pkg\";"
        );
        assert_eq!(
            print_statement(&Stmt::Export(ExportDecl::new(ExportClause::Star, spec))),
            "export * from \"pkg\";"
        );
    }

    #[test]
    fn test_print_block_indents() {
        let stmt = Stmt::Block(vec![Stmt::Raw("let x = 1;".into())]);
        assert_eq!(print_statement(&stmt), "{\n    let x = 1;\n}");
    }

    #[test]
    fn test_string_literal_escaping() {
        let stmt = Stmt::Import(ImportDecl::new(ModuleSpecifier::new("./we\"ird")));
        assert_eq!(print_statement(&stmt), "import \"./we\\\"ird\";");
    }
}
