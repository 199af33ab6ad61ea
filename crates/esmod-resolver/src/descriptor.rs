//! Package descriptor (`package.json`) lookup and model.
//!
//! The lookup walks upward from a candidate path to the nearest readable
//! `package.json`, stopping at a `node_modules` boundary: that directory
//! never carries a meaningful descriptor of its own. A malformed descriptor
//! is treated the same as a missing one; the caller decides the fallback.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path;

/// Directory under which installed packages live.
pub const NODE_MODULES: &str = "node_modules";

/// Simplified package.json structure for resolution.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    pub name: Option<String>,
    pub version: Option<String>,
    pub main: Option<String>,
    /// Bundler-era ESM entry point field.
    pub module: Option<String>,
    #[serde(rename = "type")]
    pub package_type: Option<String>,
    pub exports: Option<PackageExports>,
}

/// Package `exports` field: a target string, a nested map of subpaths and
/// conditions, or an array of fallback targets.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PackageExports {
    Target(String),
    Map(FxHashMap<String, PackageExports>),
    Fallbacks(Vec<PackageExports>),
}

impl PackageExports {
    /// Look up a key in a map-shaped exports value.
    pub fn get(&self, key: &str) -> Option<&PackageExports> {
        match self {
            PackageExports::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// The target string, if this value is a plain target.
    pub fn as_target(&self) -> Option<&str> {
        match self {
            PackageExports::Target(target) => Some(target),
            _ => None,
        }
    }

    /// Whether `condition` appears as a key anywhere in the nested structure.
    pub fn contains_condition(&self, condition: &str) -> bool {
        match self {
            PackageExports::Target(_) => false,
            PackageExports::Map(map) => map
                .iter()
                .any(|(key, value)| key == condition || value.contains_condition(condition)),
            PackageExports::Fallbacks(values) => values
                .iter()
                .any(|value| value.contains_condition(condition)),
        }
    }
}

impl PackageDescriptor {
    /// `"type": "module"` marks the package as ESM.
    pub fn is_es_module(&self) -> bool {
        self.package_type.as_deref() == Some("module")
    }

    /// An `"import"` condition anywhere in `exports` marks the package as
    /// conditionally ESM.
    pub fn has_import_condition(&self) -> bool {
        self.exports
            .as_ref()
            .is_some_and(|exports| exports.contains_condition("import"))
    }

    /// Bundler-era `"module"` field, a pre-`exports` ESM marker.
    pub fn is_legacy_es_module(&self) -> bool {
        self.module.is_some()
    }
}

/// Find the nearest package descriptor at or above `start_dir`.
///
/// Checks `<dir>/package.json` for `start_dir` and each parent in turn. The
/// walk stops without checking as soon as the directory itself is named
/// `node_modules`. The first *readable* file decides the outcome: if it
/// parses, that is the descriptor; if it does not, the result is `None`.
pub fn find_package_descriptor(start_dir: &Path) -> Option<PackageDescriptor> {
    let mut dir = start_dir.to_path_buf();
    loop {
        if dir.file_name().is_some_and(|name| name == NODE_MODULES) {
            tracing::trace!(dir = %dir.display(), "descriptor walk reached node_modules boundary");
            return None;
        }
        let candidate = dir.join("package.json");
        if let Ok(content) = std::fs::read_to_string(&candidate) {
            return parse_descriptor(&content, &candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Find the descriptor governing a package-rooted specifier by walking up
/// from its location inside `node_modules`.
pub fn descriptor_for_specifier(specifier: &str, node_modules_dir: &Path) -> Option<PackageDescriptor> {
    find_package_descriptor(&node_modules_dir.join(specifier))
}

fn parse_descriptor(content: &str, path: &Path) -> Option<PackageDescriptor> {
    match serde_json::from_str(content) {
        Ok(descriptor) => Some(descriptor),
        Err(error) => {
            tracing::debug!(
                path = %path.display(),
                %error,
                "malformed package.json treated as missing"
            );
            None
        }
    }
}
