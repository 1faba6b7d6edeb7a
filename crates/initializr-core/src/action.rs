//! Download actions offered by the Initializr service

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// What the service generates for a project type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Complete project as a zip archive
    ProjectArchive,
    /// Standalone Gradle build file
    GradleBuild,
    /// Standalone Maven POM
    MavenPom,
}

impl Action {
    /// Map an action token from metadata (`/starter.zip`, `build.gradle`, ...)
    pub fn resolve(token: &str) -> Result<Self> {
        match token.trim().trim_start_matches('/') {
            "starter.zip" => Ok(Action::ProjectArchive),
            "build.gradle" => Ok(Action::GradleBuild),
            "pom.xml" => Ok(Action::MavenPom),
            _ => Err(Error::UnknownAction(token.to_string())),
        }
    }

    /// Endpoint path relative to the service root
    pub fn path(&self) -> &'static str {
        match self {
            Action::ProjectArchive => "starter.zip",
            Action::GradleBuild => "build.gradle",
            Action::MavenPom => "pom.xml",
        }
    }

    /// Noun used in the final confirmation message
    pub fn result_noun(&self) -> &'static str {
        match self {
            Action::ProjectArchive => "project",
            Action::GradleBuild => "gradle file",
            Action::MavenPom => "pom file",
        }
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Action::resolve(s)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
