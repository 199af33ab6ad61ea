//! End-to-end rewrite of a mixed file: CommonJS interop, ESM passthrough,
//! builtins, relative paths, and the three-zone output layout.

use esmod_ast::nodes::{
    ExportClause, ExportDecl, ImportDecl, ModuleSpecifier, NamedBinding, SourceFile, Stmt,
};
use esmod_ast::printer::print_source_file;
use esmod_common::RewriteConfig;
use esmod_rewriter::rewrite_file;
use std::fs;
use std::path::Path;

fn add_package(root: &Path, name: &str, package_json: &str) {
    let dir = root.join("node_modules").join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("package.json"), package_json).unwrap();
}

fn import(f: impl FnOnce(&mut ImportDecl), specifier: &str) -> Stmt {
    let mut decl = ImportDecl::new(ModuleSpecifier::new(specifier));
    f(&mut decl);
    Stmt::Import(decl)
}

#[test]
fn test_rewrite_mixed_file() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("src")).unwrap();
    add_package(
        tmp.path(),
        "legacy-pkg",
        r#"{"name": "legacy-pkg", "main": "./lib/foo.js"}"#,
    );
    add_package(tmp.path(), "es-pkg", r#"{"name": "es-pkg", "type": "module"}"#);
    let config = RewriteConfig {
        relative_project_root: Some(tmp.path().to_path_buf()),
        ..Default::default()
    };

    let file = SourceFile::new(
        tmp.path().join("src/app.ts").to_string_lossy().into_owned(),
        vec![
            import(
                |d| {
                    d.named = Some(vec![NamedBinding::new("a"), NamedBinding::renamed("b", "c")]);
                },
                "legacy-pkg",
            ),
            import(|d| d.default_name = Some("D".into()), "legacy-pkg"),
            import(|d| d.namespace = Some("ns".into()), "legacy-pkg"),
            import(
                |d| {
                    d.default_name = Some("E".into());
                    d.named = Some(vec![NamedBinding::new("e")]);
                },
                "legacy-pkg",
            ),
            import(
                |d| d.named = Some(vec![NamedBinding::new("x")]),
                "es-pkg",
            ),
            import(|d| d.default_name = Some("fs".into()), "fs"),
            import(|d| d.named = Some(vec![NamedBinding::new("join")]), "./util"),
            Stmt::Raw("const answer = 42;".to_string()),
            Stmt::Export(ExportDecl::new(
                ExportClause::Named(vec![NamedBinding::renamed("a", "publicA")]),
                ModuleSpecifier::new("legacy-pkg"),
            )),
            Stmt::Export(ExportDecl::new(
                ExportClause::Namespace("everything".to_string()),
                ModuleSpecifier::new("legacy-pkg"),
            )),
            Stmt::Export(ExportDecl::new(
                ExportClause::Named(vec![NamedBinding::new("y")]),
                ModuleSpecifier::new("es-pkg"),
            )),
        ],
    );

    let rewritten = rewrite_file(&file, &config).unwrap();
    let expected = "\
import D from \"legacy-pkg/lib/foo.js\";
import ns from \"legacy-pkg/lib/foo.js\";
import E from \"legacy-pkg/lib/foo.js\";
import { x } from \"es-pkg/index.js\";
import fs from \"fs\";
import { join } from \"./util.js\";
import __everything from \"legacy-pkg/lib/foo.js\";
import { createRequire as __createRequire } from \"module\";
const __require = __createRequire(import.meta.url);
const { a, b: c } = __require(\"legacy-pkg/lib/foo.js\");
const { a: __a } = __require(\"legacy-pkg/lib/foo.js\");
const { e } = E;
const answer = 42;
export { __a as publicA };
export { __everything as everything };
export { y } from \"es-pkg/index.js\";
";
    assert_eq!(print_source_file(&rewritten), expected);
}

#[test]
fn test_rewrite_is_deterministic() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("src")).unwrap();
    add_package(
        tmp.path(),
        "legacy-pkg",
        r#"{"name": "legacy-pkg", "main": "./lib/foo.js"}"#,
    );
    let config = RewriteConfig {
        relative_project_root: Some(tmp.path().to_path_buf()),
        ..Default::default()
    };
    let file = SourceFile::new(
        tmp.path().join("src/app.ts").to_string_lossy().into_owned(),
        vec![import(
            |d| d.named = Some(vec![NamedBinding::new("a")]),
            "legacy-pkg",
        )],
    );

    let first = rewrite_file(&file, &config).unwrap();
    let second = rewrite_file(&file, &config).unwrap();
    assert_eq!(first, second);
}
