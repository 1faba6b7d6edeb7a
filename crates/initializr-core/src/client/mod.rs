//! Initializr service client
//!
//! This module provides:
//! - Metadata retrieval from the service or a local file
//! - Generation requests for archives and build files
//! - Writing downloads into an output directory

pub mod fetcher;
pub mod writer;

pub use fetcher::{resolve_service_url, Download, InitializrClient, METADATA_MEDIA_TYPE};
pub use writer::{extract_archive, write_download, ProjectDownloader};
