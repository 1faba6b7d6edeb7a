//! Dependency lookup and documentation link expansion

use crate::metadata::{DependencyCatalog, DependencyEntry, Guide, MetadataDocument, Reference};

/// Everything shown for one inspected dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDetails {
    pub id: String,
    pub name: String,
    pub description: String,
    pub guides: Vec<Guide>,
    /// Reference links, templated ones already expanded
    pub references: Vec<String>,
}

/// First entry with `id`, scanning groups and entries in catalog order
pub fn find_dependency<'a>(
    catalog: &'a DependencyCatalog,
    id: &str,
) -> Option<&'a DependencyEntry> {
    catalog
        .entries()
        .map(|(_, entry)| entry)
        .find(|entry| entry.id == id)
}

/// Literal references yield their href. Templated references yield one
/// link per boot version, in the order given.
pub fn expand_reference<S: AsRef<str>>(reference: &Reference, boot_versions: &[S]) -> Vec<String> {
    if !reference.templated {
        return vec![reference.href.clone()];
    }
    boot_versions
        .iter()
        .map(|version| reference.resolve(version.as_ref()))
        .collect()
}

/// Details for each requested id, in the order requested.
///
/// Ids with no matching entry are skipped. Templated references are expanded
/// against every boot version in the document, since no version has been
/// chosen at this point.
pub fn describe<S: AsRef<str>>(ids: &[S], metadata: &MetadataDocument) -> Vec<DependencyDetails> {
    let boot_versions: Vec<&str> = metadata.boot_version_ids().collect();

    ids.iter()
        .filter_map(|id| {
            let id = id.as_ref();
            let entry = find_dependency(&metadata.dependencies, id);
            if entry.is_none() {
                tracing::debug!(id, "no dependency matches, skipping");
            }
            entry
        })
        .map(|entry| {
            let links = entry.links.clone().unwrap_or_default();
            DependencyDetails {
                id: entry.id.clone(),
                name: entry.name.clone(),
                description: entry.description.clone(),
                references: links
                    .references
                    .iter()
                    .flat_map(|reference| expand_reference(reference, &boot_versions))
                    .collect(),
                guides: links.guides,
            }
        })
        .collect()
}
