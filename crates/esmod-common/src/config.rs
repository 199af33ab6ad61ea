//! Rewrite configuration.
//!
//! One `RewriteConfig` drives a whole file rewrite. The defaults match the
//! common case: emit `.js` specifiers, prefix generated identifiers with
//! `__`, resolve packages against the process working directory, and run the
//! full interop rewrite.

use rustc_hash::FxHashSet;
use std::path::PathBuf;

/// Options controlling a file rewrite.
#[derive(Debug, Clone)]
pub struct RewriteConfig {
    /// Target extension appended to canonicalized specifiers, without the
    /// leading dot. Default `"js"`.
    pub extension: String,
    /// Extensions (without the leading dot) treated as already final even
    /// though they are not otherwise recognized. Specifiers ending in one of
    /// these are left unchanged.
    pub ignore: FxHashSet<String>,
    /// Prefix for generated temporary identifiers and the loader function
    /// name. Default `"__"`.
    pub prefix: String,
    /// Base directory whose `node_modules` subdirectory package-rooted
    /// specifiers resolve against. `None` means the process working
    /// directory.
    pub relative_project_root: Option<PathBuf>,
    /// When true, run the full interop rewrite, generating `createRequire`
    /// shims for CommonJS packages. When false, only canonicalize specifiers.
    pub create_require: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        RewriteConfig {
            extension: "js".to_string(),
            ignore: FxHashSet::default(),
            prefix: "__".to_string(),
            relative_project_root: None,
            create_require: true,
        }
    }
}

impl RewriteConfig {
    /// The base directory package-rooted specifiers resolve against.
    pub fn project_root(&self) -> PathBuf {
        self.relative_project_root
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// The `node_modules` directory under the project root.
    pub fn node_modules_dir(&self) -> PathBuf {
        self.project_root().join("node_modules")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RewriteConfig::default();
        assert_eq!(config.extension, "js");
        assert_eq!(config.prefix, "__");
        assert!(config.create_require);
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn test_node_modules_dir_uses_project_root() {
        let config = RewriteConfig {
            relative_project_root: Some(PathBuf::from("/proj")),
            ..Default::default()
        };
        assert_eq!(config.node_modules_dir(), PathBuf::from("/proj/node_modules"));
    }
}
