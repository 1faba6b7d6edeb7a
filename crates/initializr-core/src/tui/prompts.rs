//! Charm-style CLI prompts using cliclack

use crate::action::Action;
use crate::client::{InitializrClient, ProjectDownloader};
use crate::commands::{self, Downloader};
use crate::error::Error;
use crate::metadata::MetadataDocument;
use crate::request::RequestParameters;
use crate::resolver::DependencyDetails;
use crate::selection::{collect_picks, InputPattern, Prompter, SelectOption};
use crate::service::ServiceConfig;
use anyhow::Result;
use colored::Colorize;
use std::io;
use std::path::PathBuf;

/// CLI arguments shared by the interactive commands
#[derive(Debug, Clone, Default)]
pub struct SessionArgs {
    /// Service root overriding the configured one
    pub service_url: Option<String>,

    /// Local metadata JSON to use instead of fetching it
    pub metadata_file: Option<PathBuf>,

    /// Where generated files are written (defaults to the current directory)
    pub output_dir: Option<PathBuf>,
}

/// [`Prompter`] backed by cliclack
pub struct CliclackPrompter;

fn aborted(prompt: &str, err: io::Error) -> Error {
    if err.kind() != io::ErrorKind::Interrupted {
        tracing::debug!(prompt, error = %err, "prompt failed");
    }
    Error::aborted(prompt)
}

fn display_hint(option: &SelectOption) -> String {
    match (&option.group, option.hint.is_empty()) {
        (Some(group), true) => group.clone(),
        (Some(group), false) => format!("{} · {}", group, option.hint),
        (None, _) => option.hint.clone(),
    }
}

impl Prompter for CliclackPrompter {
    fn select_one(
        &mut self,
        prompt: &str,
        options: &[SelectOption],
        initial: Option<&str>,
    ) -> crate::Result<String> {
        let mut select = cliclack::select(prompt);
        for option in options {
            select = select.item(option.id.clone(), &option.label, display_hint(option));
        }
        if let Some(initial) = initial {
            select = select.initial_value(initial.to_string());
        }
        select.interact().map_err(|e| aborted(prompt, e))
    }

    fn select_many(
        &mut self,
        prompt: &str,
        options: &[SelectOption],
    ) -> crate::Result<Vec<String>> {
        collect_picks(prompt, options, |remaining, chosen| {
            let title = if chosen.is_empty() {
                prompt.to_string()
            } else {
                format!("{} ({})", prompt, chosen.join(", "))
            };

            // indices into `remaining`, `None` finishes the selection
            let mut select = cliclack::select(title).item(
                None,
                "Done",
                format!("{} selected", chosen.len()),
            );
            for (idx, option) in remaining.iter().enumerate() {
                select = select.item(Some(idx), &option.label, display_hint(option));
            }
            select.interact().map_err(|e| aborted(prompt, e))
        })
    }

    fn input(
        &mut self,
        prompt: &str,
        default: &str,
        pattern: Option<&InputPattern>,
    ) -> crate::Result<String> {
        let mut input = cliclack::input(prompt)
            .placeholder(default)
            .default_input(default);

        if let Some(pattern) = pattern.cloned() {
            input = input.validate(move |value: &String| {
                if pattern.is_match(value) {
                    Ok(())
                } else {
                    Err(pattern.message())
                }
            });
        }

        input.interact().map_err(|e| aborted(prompt, e))
    }
}

/// Wraps a downloader with a progress spinner
struct SpinnerDownloader<D> {
    inner: D,
}

impl<D: Downloader> Downloader for SpinnerDownloader<D> {
    async fn download(
        &mut self,
        action: Action,
        parameters: &RequestParameters,
    ) -> crate::Result<String> {
        let spinner = cliclack::spinner();
        spinner.start(format!("Generating {}...", action.result_noun()));

        let result = self.inner.download(action, parameters).await;
        match &result {
            Ok(name) => spinner.stop(format!("Generated {}", name)),
            Err(_) => spinner.stop(format!("Failed to generate {}", action.result_noun())),
        }
        result
    }
}

/// Show details for interactively chosen dependencies
pub async fn run_dependency<C: ServiceConfig>(config: &C, args: SessionArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let client = setup_client(config, &args)?;
    let metadata = load_metadata(config, &client).await?;

    let details =
        commands::inspect_dependencies(&metadata, &mut CliclackPrompter).map_err(cancelled)?;

    println!();
    for line in render_details(&details) {
        println!("{}", line);
    }

    cliclack::outro(format!("{} dependencies described", details.len()))?;
    Ok(())
}

/// Create a project interactively
pub async fn run_create<C: ServiceConfig>(config: &C, args: SessionArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let client = setup_client(config, &args)?;
    let metadata = load_metadata(config, &client).await?;

    let output_dir = match args.output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let mut downloader = SpinnerDownloader {
        inner: ProjectDownloader::new(&client, output_dir),
    };
    let created = commands::create_project(&metadata, &mut CliclackPrompter, &mut downloader)
        .await
        .map_err(cancelled)?;

    cliclack::outro(created.confirmation().green().bold())?;
    Ok(())
}

fn cancelled(err: Error) -> anyhow::Error {
    if matches!(err, Error::SelectionAborted { .. }) {
        let _ = cliclack::outro_cancel("Operation cancelled.");
    }
    err.into()
}

fn setup_client<C: ServiceConfig>(config: &C, args: &SessionArgs) -> Result<InitializrClient> {
    let client = InitializrClient::from_config(config, args.service_url.as_deref())?;

    let client = match &args.metadata_file {
        Some(path) => {
            cliclack::log::info(format!("Using local metadata from {}", path.display()))?;
            client.with_metadata_file(path.clone())
        }
        None => {
            cliclack::log::info(format!("Using {}", client.base_url()))?;
            client
        }
    };

    Ok(client)
}

async fn load_metadata<C: ServiceConfig>(
    config: &C,
    client: &InitializrClient,
) -> Result<MetadataDocument> {
    let spinner = cliclack::spinner();
    spinner.start("Loading metadata...");

    match client.fetch_metadata().await {
        Ok(metadata) => {
            spinner.stop(format!(
                "Metadata loaded ({} dependency groups)",
                metadata.dependencies.values.len()
            ));
            Ok(metadata)
        }
        Err(e) => {
            spinner.stop("Failed to load metadata");
            cliclack::log::info(format!("Service documentation: {}", config.docs_url()))?;
            Err(e.into())
        }
    }
}

/// Terminal lines for inspected dependencies
pub fn render_details(details: &[DependencyDetails]) -> Vec<String> {
    let mut lines = Vec::new();

    for detail in details {
        lines.push(detail.name.magenta().bold().underline().to_string());
        lines.push(detail.description.clone());
        lines.push(String::new());

        if !detail.guides.is_empty() {
            lines.push("Guides:".green().bold().underline().to_string());
            for guide in &detail.guides {
                lines.push(guide.title.clone());
                lines.push(guide.href.clone());
            }
            lines.push(String::new());
        }

        if !detail.references.is_empty() {
            lines.push("References:".green().bold().underline().to_string());
            lines.extend(detail.references.iter().cloned());
            lines.push(String::new());
        }
    }

    lines
}
