//! Specifier canonicalization.
//!
//! Produces extension-complete specifiers a strict ESM loader can resolve:
//! bare package references are substituted with the descriptor's entry
//! point, extensionless paths gain the target extension, and references to
//! directories gain `/index.<ext>`. Specifiers that already end in a
//! recognized (or caller-ignored) extension pass through untouched.

use esmod_ast::nodes::ModuleSpecifier;
use esmod_common::RewriteConfig;
use std::path::{Path, PathBuf};

use crate::descriptor::PackageDescriptor;

/// Extensions that never need rewriting.
pub const KNOWN_EXTENSIONS: &[&str] = &[
    "cjs", "cts", "js", "json", "jsx", "mjs", "mts", "node", "ts", "tsx", "wasm",
];

/// The extension of a specifier's final path segment, without the dot.
///
/// Dotfiles (`.env`) and trailing dots do not count as extensions.
pub fn specifier_extension(text: &str) -> Option<&str> {
    let file = text.rsplit('/').next().unwrap_or(text);
    match file.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < file.len() => Some(&file[idx + 1..]),
        _ => None,
    }
}

/// Split a package specifier into package name and optional subpath,
/// honoring `@scope/name` packages.
pub fn parse_package_specifier(specifier: &str) -> (&str, Option<&str>) {
    if let Some(rest) = specifier.strip_prefix('@') {
        // Scoped package: @scope/name or @scope/name/subpath
        if let Some(scope_slash) = rest.find('/') {
            let after_scope = &rest[scope_slash + 1..];
            if let Some(name_slash) = after_scope.find('/') {
                let name_end = 1 + scope_slash + 1 + name_slash;
                return (&specifier[..name_end], Some(&specifier[name_end + 1..]));
            }
        }
        return (specifier, None);
    }
    match specifier.find('/') {
        Some(idx) => (&specifier[..idx], Some(&specifier[idx + 1..])),
        None => (specifier, None),
    }
}

/// Compute the canonical on-disk specifier for a declaration.
///
/// `containing_file` is the file the declaration appears in; `descriptor`
/// is the nearest package descriptor for package-rooted specifiers, when
/// one was found.
pub fn canonical_specifier(
    specifier: &ModuleSpecifier,
    containing_file: &Path,
    config: &RewriteConfig,
    descriptor: Option<&PackageDescriptor>,
) -> String {
    let text = specifier.text();

    // A bare reference to the package itself resolves through the
    // descriptor's entry point.
    if let Some(descriptor) = descriptor
        && descriptor.name.as_deref() == Some(text)
    {
        let canonical = canonical_package_entry(text, descriptor, &config.extension);
        tracing::debug!(specifier = text, %canonical, "canonicalized package entry");
        return canonical;
    }

    let needs_rewrite = match specifier_extension(text) {
        None => true,
        Some(ext) => !KNOWN_EXTENSIONS.contains(&ext) && !config.ignore.contains(ext),
    };
    if !needs_rewrite {
        return text.to_string();
    }

    let location = resolve_on_disk(specifier, containing_file, config, descriptor);
    // Filesystem errors during this check degrade to "not a directory".
    if location.is_dir() {
        format!("{}/index.{}", text, config.extension)
    } else {
        format!("{}.{}", text, config.extension)
    }
}

/// Canonical form of a specifier that exactly names its package.
///
/// A top-level `"."` entry in `exports` already resolves through
/// descriptor-aware resolution and is left alone. Otherwise the entry point
/// is synthesized from `main`, the `"."` target under the `"import"`
/// condition, or `index`.
fn canonical_package_entry(name: &str, descriptor: &PackageDescriptor, extension: &str) -> String {
    if let Some(exports) = &descriptor.exports
        && exports.get(".").is_some()
    {
        return name.to_string();
    }
    let entry = descriptor
        .main
        .as_deref()
        .or_else(|| {
            descriptor
                .exports
                .as_ref()
                .and_then(|exports| exports.get("import"))
                .and_then(|import| import.get("."))
                .and_then(|target| target.as_target())
        })
        .map(trim_entry)
        .unwrap_or("index");
    format!("{name}/{entry}.{extension}")
}

/// Strip a leading `./` and a recognized final extension from an entry
/// target, so `./lib/foo.js` becomes `lib/foo`.
fn trim_entry(target: &str) -> &str {
    let target = target.strip_prefix("./").unwrap_or(target);
    match specifier_extension(target) {
        Some(ext) if KNOWN_EXTENSIONS.contains(&ext) => &target[..target.len() - ext.len() - 1],
        _ => target,
    }
}

/// The absolute location the specifier names, for the directory check.
fn resolve_on_disk(
    specifier: &ModuleSpecifier,
    containing_file: &Path,
    config: &RewriteConfig,
    descriptor: Option<&PackageDescriptor>,
) -> PathBuf {
    let text = specifier.text();
    if specifier.is_relative() {
        let dir = containing_file.parent().unwrap_or(Path::new("."));
        return dir.join(text);
    }
    let node_modules = config.node_modules_dir();
    let plain = node_modules.join(text);
    if plain.exists() {
        return plain;
    }
    // `pkg/util` may live under the package's entry directory, as in
    // `pkg/lib/util` for a package with `"main": "./lib/index.js"`.
    if let Some(descriptor) = descriptor
        && let (package, Some(subpath)) = parse_package_specifier(text)
        && let Some(entry_dir) = entry_directory(descriptor)
    {
        let remapped = node_modules.join(package).join(entry_dir).join(subpath);
        if remapped.exists() {
            return remapped;
        }
    }
    plain
}

/// The directory component of the descriptor's entry point, if any.
fn entry_directory(descriptor: &PackageDescriptor) -> Option<&str> {
    let target = descriptor.main.as_deref().or_else(|| {
        let exports = descriptor.exports.as_ref()?;
        exports
            .get(".")
            .and_then(|target| target.as_target())
            .or_else(|| {
                exports
                    .get("import")
                    .and_then(|import| import.get("."))
                    .and_then(|target| target.as_target())
            })
    })?;
    let target = target.strip_prefix("./").unwrap_or(target);
    let idx = target.rfind('/')?;
    Some(&target[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use esmod_common::RewriteConfig;
    use std::fs;
    use std::path::Path;

    fn config_for(root: &Path) -> RewriteConfig {
        RewriteConfig {
            relative_project_root: Some(root.to_path_buf()),
            ..Default::default()
        }
    }

    fn canonical(text: &str, file: &Path, config: &RewriteConfig) -> String {
        canonical_specifier(&ModuleSpecifier::new(text), file, config, None)
    }

    #[test]
    fn test_specifier_extension() {
        assert_eq!(specifier_extension("./foo.js"), Some("js"));
        assert_eq!(specifier_extension("./foo"), None);
        assert_eq!(specifier_extension("./a.b/foo"), None);
        assert_eq!(specifier_extension(".env"), None);
        assert_eq!(specifier_extension("./foo."), None);
    }

    #[test]
    fn test_parse_package_specifier() {
        assert_eq!(parse_package_specifier("lodash"), ("lodash", None));
        assert_eq!(parse_package_specifier("lodash/get"), ("lodash", Some("get")));
        assert_eq!(parse_package_specifier("@types/node"), ("@types/node", None));
        assert_eq!(
            parse_package_specifier("@babel/core/lib/index"),
            ("@babel/core", Some("lib/index"))
        );
    }

    #[test]
    fn test_relative_directory_gets_index() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("src/components")).unwrap();
        let file = tmp.path().join("src/app.ts");
        let config = config_for(tmp.path());

        assert_eq!(
            canonical("./components", &file, &config),
            "./components/index.js"
        );
    }

    #[test]
    fn test_relative_file_gets_extension() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        let file = tmp.path().join("src/app.ts");
        let config = config_for(tmp.path());

        assert_eq!(canonical("./util", &file, &config), "./util.js");
    }

    #[test]
    fn test_parent_reference_resolves_against_file_dir() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("src/inner")).unwrap();
        let file = tmp.path().join("src/inner/app.ts");
        let config = config_for(tmp.path());

        // `..` names the src directory, which exists.
        assert_eq!(canonical("..", &file, &config), "../index.js");
    }

    #[test]
    fn test_known_extension_unchanged() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("src/app.ts");
        let config = config_for(tmp.path());

        assert_eq!(canonical("./foo.js", &file, &config), "./foo.js");
        assert_eq!(canonical("./data.json", &file, &config), "./data.json");
    }

    #[test]
    fn test_ignored_extension_unchanged() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("src/app.ts");
        let mut config = config_for(tmp.path());
        config.ignore.insert("scss".to_string());

        assert_eq!(canonical("./style.scss", &file, &config), "./style.scss");
    }

    #[test]
    fn test_unknown_extension_rewritten() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("src/app.ts");
        let config = config_for(tmp.path());

        assert_eq!(canonical("./fixture.gen", &file, &config), "./fixture.gen.js");
    }

    #[test]
    fn test_package_entry_from_main() {
        let descriptor: PackageDescriptor =
            serde_json::from_str(r#"{"name": "legacy-pkg", "main": "./lib/foo.js"}"#).unwrap();
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("src/app.ts");
        let config = config_for(tmp.path());

        let canonical = canonical_specifier(
            &ModuleSpecifier::new("legacy-pkg"),
            &file,
            &config,
            Some(&descriptor),
        );
        assert_eq!(canonical, "legacy-pkg/lib/foo.js");
    }

    #[test]
    fn test_package_with_dot_exports_unchanged() {
        let descriptor: PackageDescriptor = serde_json::from_str(
            r#"{"name": "modern-pkg", "exports": {".": "./dist/index.mjs"}}"#,
        )
        .unwrap();
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("src/app.ts");
        let config = config_for(tmp.path());

        let canonical = canonical_specifier(
            &ModuleSpecifier::new("modern-pkg"),
            &file,
            &config,
            Some(&descriptor),
        );
        assert_eq!(canonical, "modern-pkg");
    }

    #[test]
    fn test_package_entry_from_import_condition() {
        let descriptor: PackageDescriptor = serde_json::from_str(
            r#"{"name": "cond-pkg", "exports": {"import": {".": "./dist/index.mjs"}}}"#,
        )
        .unwrap();
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("src/app.ts");
        let config = config_for(tmp.path());

        let canonical = canonical_specifier(
            &ModuleSpecifier::new("cond-pkg"),
            &file,
            &config,
            Some(&descriptor),
        );
        assert_eq!(canonical, "cond-pkg/dist/index.js");
    }

    #[test]
    fn test_package_entry_defaults_to_index() {
        let descriptor: PackageDescriptor =
            serde_json::from_str(r#"{"name": "bare-pkg"}"#).unwrap();
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("src/app.ts");
        let config = config_for(tmp.path());

        let canonical = canonical_specifier(
            &ModuleSpecifier::new("bare-pkg"),
            &file,
            &config,
            Some(&descriptor),
        );
        assert_eq!(canonical, "bare-pkg/index.js");
    }

    #[test]
    fn test_package_subpath_remapped_into_entry_directory() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("node_modules/legacy-pkg/lib/util")).unwrap();
        let descriptor: PackageDescriptor =
            serde_json::from_str(r#"{"name": "legacy-pkg", "main": "./lib/index.js"}"#).unwrap();
        let file = tmp.path().join("src/app.ts");
        let config = config_for(tmp.path());

        // node_modules/legacy-pkg/util does not exist, but lib/util does and
        // is a directory.
        let canonical = canonical_specifier(
            &ModuleSpecifier::new("legacy-pkg/util"),
            &file,
            &config,
            Some(&descriptor),
        );
        assert_eq!(canonical, "legacy-pkg/util/index.js");
    }

    #[test]
    fn test_package_directory_on_disk_gets_index() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("node_modules/some-pkg/helpers")).unwrap();
        let file = tmp.path().join("src/app.ts");
        let config = config_for(tmp.path());

        assert_eq!(
            canonical("some-pkg/helpers", &file, &config),
            "some-pkg/helpers/index.js"
        );
    }
}
