//! Initializr Core - metadata-driven project selection for Spring Initializr
//!
//! This library turns the Initializr metadata document into interactive
//! choices and the choices into a generation request. It is used by the
//! `spell` binary but keeps the terminal and the network behind traits so
//! the flows can run against any prompt provider or downloader.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Metadata model, selection, link resolution,
//!   request building and action mapping
//! - **Layer 2: Command Flows** - `dependency` and `icreate` over the
//!   `Prompter` and `Downloader` traits, plus the HTTP client behind them
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use initializr_core::{commands, InitializrClient};
//!
//! let client = InitializrClient::from_config(&MyConfig, None)?;
//! let metadata = client.fetch_metadata().await?;
//! let request = commands::collect_project_request(&metadata, &mut my_prompter)?;
//! println!("{}", request.parameters);
//! ```

pub mod action;
pub mod client;
pub mod commands;
pub mod error;
pub mod metadata;
pub mod request;
pub mod resolver;
pub mod selection;
pub mod service;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use action::Action;
pub use client::{InitializrClient, ProjectDownloader};
pub use commands::{CreatedProject, Downloader, ProjectRequest};
pub use error::{Error, Result};
pub use metadata::MetadataDocument;
pub use request::{RequestParam, RequestParameters};
pub use resolver::{describe, DependencyDetails};
pub use selection::{collect_picks, InputPattern, Prompter, SelectOption};
pub use service::ServiceConfig;

#[cfg(feature = "tui")]
pub use tui::{run_create, run_dependency, SessionArgs};
