//! Module classification: platform builtin, ESM package, or CommonJS
//! package.
//!
//! Builtins are matched against a fixed name list and always pass through
//! the rewrite untouched. For everything else the nearest package descriptor
//! decides: `"type": "module"` or an `"import"` condition anywhere in
//! `exports` means ESM, anything else (including a missing or unreadable
//! descriptor) means CommonJS.

use crate::descriptor::PackageDescriptor;

/// Node.js built-in module names.
pub const NODE_BUILTINS: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "worker_threads",
    "zlib",
];

/// What kind of module a specifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// Platform builtin: already canonical, already compatible.
    Builtin,
    /// ESM package: shape-preserving rewrite.
    EsModule,
    /// CommonJS package (or unknown package with no descriptor): interop
    /// rewrite.
    CommonJs,
}

/// Check a specifier against the builtin list, honoring the `node:` prefix.
pub fn is_builtin_module(specifier: &str) -> bool {
    let name = specifier.strip_prefix("node:").unwrap_or(specifier);
    NODE_BUILTINS.contains(&name)
}

/// Classify the module a package-rooted specifier names.
///
/// `descriptor` is the nearest package descriptor for the specifier, or
/// `None` when no descriptor could be found or parsed. The builtin check
/// runs first and wins regardless of any descriptor.
pub fn classify_module(specifier: &str, descriptor: Option<&PackageDescriptor>) -> ModuleKind {
    if is_builtin_module(specifier) {
        return ModuleKind::Builtin;
    }
    match descriptor {
        Some(descriptor) if descriptor.is_es_module() || descriptor.has_import_condition() => {
            ModuleKind::EsModule
        }
        _ => ModuleKind::CommonJs,
    }
}
