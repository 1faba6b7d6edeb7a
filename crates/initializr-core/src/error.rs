//! Error types for metadata retrieval, selection, and project download.

use thiserror::Error;

/// Failures raised by the selection and request pipeline.
///
/// Every variant is fatal for the command that produced it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to retrieve metadata from {location}: {message}")]
    Retrieval { location: String, message: String },

    #[error("selection aborted at '{prompt}'")]
    SelectionAborted { prompt: String },

    #[error("'{id}' is not one of the available choices for '{prompt}'")]
    InvalidSelection { prompt: String, id: String },

    #[error("no choices available for '{prompt}'")]
    NoOptions { prompt: String },

    #[error("unknown action '{0}' (expected starter.zip, build.gradle or pom.xml)")]
    UnknownAction(String),

    #[error("download of {target} failed: {message}")]
    Download { target: String, message: String },
}

impl Error {
    pub(crate) fn retrieval(location: impl Into<String>, message: impl ToString) -> Self {
        Self::Retrieval {
            location: location.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn download(target: impl Into<String>, message: impl ToString) -> Self {
        Self::Download {
            target: target.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn aborted(prompt: &str) -> Self {
        Self::SelectionAborted {
            prompt: prompt.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
