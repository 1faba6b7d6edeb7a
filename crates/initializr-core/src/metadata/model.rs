//! Initializr metadata document types and parsing

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};

/// Placeholder substituted with a boot version in templated references
pub const BOOT_VERSION_PLACEHOLDER: &str = "{bootVersion}";

/// A value from one of the single-select lists (type, language, packaging, ...)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Choice {
    /// Stable identifier sent to the service
    pub id: String,

    /// Human-readable label
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Download action, only present on project types (e.g. `/starter.zip`)
    #[serde(default)]
    pub action: Option<String>,
}

/// A single-select list with an optional server-side default
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SingleSelect {
    #[serde(default)]
    pub default: Option<String>,

    #[serde(default)]
    pub values: Vec<Choice>,
}

impl SingleSelect {
    /// The default id, if the server declared one that is actually in the list
    pub fn default_id(&self) -> Option<&str> {
        self.default
            .as_deref()
            .filter(|id| self.values.iter().any(|c| c.id == *id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.values.iter().any(|c| c.id == id)
    }
}

/// A free-text field with an optional server-side default
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextField {
    #[serde(default)]
    pub default: Option<String>,
}

impl TextField {
    pub fn default_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.default
            .as_deref()
            .filter(|value| !value.is_empty())
            .unwrap_or(fallback)
    }
}

/// Link relations come over the wire either as a single object or an array
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

fn one_or_many<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        Some(OneOrMany::One(item)) => vec![item],
        Some(OneOrMany::Many(items)) => items,
        None => Vec::new(),
    })
}

/// A getting-started guide, used verbatim
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Guide {
    pub href: String,

    #[serde(default)]
    pub title: String,
}

/// A reference documentation link
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reference {
    pub href: String,

    /// When true, `href` contains [`BOOT_VERSION_PLACEHOLDER`]
    #[serde(default)]
    pub templated: bool,

    #[serde(default)]
    pub title: Option<String>,
}

impl Reference {
    /// Substitute a boot version into the link (no-op for literal links)
    pub fn resolve(&self, boot_version: &str) -> String {
        if self.templated {
            self.href.replace(BOOT_VERSION_PLACEHOLDER, boot_version)
        } else {
            self.href.clone()
        }
    }
}

/// Documentation links attached to a dependency
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LinkSet {
    #[serde(rename = "guide", default, deserialize_with = "one_or_many")]
    pub guides: Vec<Guide>,

    #[serde(rename = "reference", default, deserialize_with = "one_or_many")]
    pub references: Vec<Reference>,
}

impl LinkSet {
    pub fn is_empty(&self) -> bool {
        self.guides.is_empty() && self.references.is_empty()
    }
}

/// A single dependency in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DependencyEntry {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Boot versions this dependency supports, e.g. `[3.0.0,3.2.0-M1)`
    #[serde(rename = "versionRange", default)]
    pub version_range: Option<String>,

    #[serde(rename = "_links", default)]
    pub links: Option<LinkSet>,
}

/// A named category of dependencies. The name is for display only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DependencyGroup {
    pub name: String,

    #[serde(default)]
    pub values: Vec<DependencyEntry>,
}

/// The full dependency catalog, groups in service order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependencyCatalog {
    #[serde(default)]
    pub values: Vec<DependencyGroup>,
}

impl DependencyCatalog {
    /// Every entry paired with its group, in catalog order
    pub fn entries(&self) -> impl Iterator<Item = (&DependencyGroup, &DependencyEntry)> {
        self.values
            .iter()
            .flat_map(|group| group.values.iter().map(move |entry| (group, entry)))
    }
}

/// Root metadata document returned by the Initializr service
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataDocument {
    pub dependencies: DependencyCatalog,

    #[serde(rename = "type")]
    pub project_types: SingleSelect,

    pub packaging: SingleSelect,

    #[serde(rename = "javaVersion")]
    pub java_versions: SingleSelect,

    #[serde(rename = "language")]
    pub languages: SingleSelect,

    #[serde(rename = "bootVersion")]
    pub boot_versions: SingleSelect,

    #[serde(rename = "groupId", default)]
    pub group_id: TextField,

    #[serde(rename = "artifactId", default)]
    pub artifact_id: TextField,

    #[serde(default)]
    pub version: TextField,

    #[serde(default)]
    pub name: TextField,

    #[serde(default)]
    pub description: TextField,

    #[serde(rename = "packageName", default)]
    pub package_name: TextField,
}

impl MetadataDocument {
    /// Parse and validate a metadata document. `location` only feeds error messages.
    pub fn from_json(content: &str, location: &str) -> Result<Self> {
        let document: MetadataDocument =
            serde_json::from_str(content).map_err(|e| Error::retrieval(location, e))?;
        document.validate(location)?;
        Ok(document)
    }

    /// Reject documents with an empty mandatory list
    pub fn validate(&self, location: &str) -> Result<()> {
        let lists = [
            ("type", &self.project_types),
            ("language", &self.languages),
            ("bootVersion", &self.boot_versions),
            ("packaging", &self.packaging),
            ("javaVersion", &self.java_versions),
        ];
        for (key, list) in lists {
            if list.values.is_empty() {
                return Err(Error::retrieval(
                    location,
                    format!("metadata has no '{}' values", key),
                ));
            }
        }
        if self.dependencies.values.is_empty() {
            return Err(Error::retrieval(location, "metadata has no dependency groups"));
        }
        Ok(())
    }

    /// Action token declared by a project type, e.g. `/starter.zip`
    pub fn action_for_type(&self, type_id: &str) -> Option<&str> {
        self.project_types
            .values
            .iter()
            .find(|t| t.id == type_id)
            .and_then(|t| t.action.as_deref())
    }

    /// Boot version ids in service order
    pub fn boot_version_ids(&self) -> impl Iterator<Item = &str> {
        self.boot_versions.values.iter().map(|v| v.id.as_str())
    }
}
