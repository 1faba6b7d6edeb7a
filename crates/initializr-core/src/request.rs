//! Canonical query string for project generation requests
//!
//! Parameters are written in the order they are collected, as `?type=..`
//! followed by `&name=value` pairs. Values are not encoded here; the
//! client form-encodes each pair when it sends the request.

use std::fmt;

/// Query parameters understood by the Initializr service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestParam {
    Type,
    Language,
    BootVersion,
    GroupId,
    ArtifactId,
    Name,
    BaseDir,
    Description,
    PackageName,
    Packaging,
    JavaVersion,
    Dependencies,
}

impl RequestParam {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestParam::Type => "type",
            RequestParam::Language => "language",
            RequestParam::BootVersion => "bootVersion",
            RequestParam::GroupId => "groupId",
            RequestParam::ArtifactId => "artifactId",
            RequestParam::Name => "name",
            RequestParam::BaseDir => "baseDir",
            RequestParam::Description => "description",
            RequestParam::PackageName => "packageName",
            RequestParam::Packaging => "packaging",
            RequestParam::JavaVersion => "javaVersion",
            RequestParam::Dependencies => "dependencies",
        }
    }
}

impl fmt::Display for RequestParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered request parameters, always led by the project type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    params: Vec<(RequestParam, String)>,
}

impl RequestParameters {
    pub fn new(project_type: impl Into<String>) -> Self {
        Self {
            params: vec![(RequestParam::Type, project_type.into())],
        }
    }

    /// Append a parameter after everything pushed so far
    pub fn push(&mut self, param: RequestParam, value: impl Into<String>) -> &mut Self {
        self.params.push((param, value.into()));
        self
    }

    /// Append a multi-valued parameter as one comma-joined value.
    /// An empty list still writes the parameter with an empty value.
    pub fn push_list<S: AsRef<str>>(&mut self, param: RequestParam, values: &[S]) -> &mut Self {
        let joined = values
            .iter()
            .map(|value| value.as_ref())
            .collect::<Vec<&str>>()
            .join(",");
        self.push(param, joined)
    }

    /// First value recorded for a parameter
    pub fn get(&self, param: RequestParam) -> Option<&str> {
        self.params
            .iter()
            .find(|(p, _)| *p == param)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (RequestParam, &str)> {
        self.params.iter().map(|(p, value)| (*p, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RequestParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (param, value)) in self.params.iter().enumerate() {
            let separator = if idx == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", separator, param, value)?;
        }
        Ok(())
    }
}
