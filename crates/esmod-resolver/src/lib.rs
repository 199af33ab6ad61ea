//! Specifier resolution for the esmod rewriter.
//!
//! This crate answers the two questions the rewriter asks about every
//! import/export declaration:
//!
//! - what kind of module does the specifier name (platform builtin, ESM
//!   package, CommonJS package)?
//! - what is its canonical on-disk specifier (extension-complete,
//!   directory-vs-file disambiguated, package-entry substituted)?
//!
//! Both are answered from a filesystem snapshot: the nearest `package.json`
//! above the resolved location (found by [`descriptor::find_package_descriptor`])
//! plus direct directory checks. No network access, no writes, and all
//! filesystem failures degrade to a fallback branch rather than propagating.

pub mod canonical;
pub mod classify;
pub mod descriptor;

pub use canonical::{canonical_specifier, specifier_extension};
pub use classify::{ModuleKind, classify_module, is_builtin_module};
pub use descriptor::{PackageDescriptor, PackageExports, descriptor_for_specifier, find_package_descriptor};
