//! Initializr metadata: the capability document and version ranges
//!
//! This module provides:
//! - Metadata document types (MetadataDocument, DependencyCatalog, LinkSet)
//! - Boot version parsing and dependency compatibility checks

pub mod model;
pub mod version;

pub use model::{
    Choice, DependencyCatalog, DependencyEntry, DependencyGroup, Guide, LinkSet,
    MetadataDocument, Reference, SingleSelect, TextField, BOOT_VERSION_PLACEHOLDER,
};
pub use version::{check_compatibility, parse_boot_version, VersionRange};
