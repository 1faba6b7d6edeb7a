//! spell - interactive Spring Initializr client

use anyhow::Result;
use clap::{Parser, Subcommand};
use initializr_core::{ServiceConfig, SessionArgs};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Spring Initializr service configuration
#[derive(Clone)]
pub struct SpringInitializr;

impl ServiceConfig for SpringInitializr {
    fn name(&self) -> &'static str {
        "spell"
    }

    fn display_name(&self) -> &'static str {
        "Spring Initializr"
    }

    fn default_service_url(&self) -> &'static str {
        "https://start.spring.io"
    }

    fn service_url_env(&self) -> &'static str {
        "SPELL_INITIALIZR_URL"
    }

    fn docs_url(&self) -> &'static str {
        "https://docs.spring.io/initializr/docs/current/reference/html/"
    }

    fn user_agent(&self) -> &'static str {
        concat!("spell/", env!("CARGO_PKG_VERSION"))
    }
}

#[derive(Parser, Debug)]
#[command(name = "spell")]
#[command(about = "Interactive client for Spring Initializr")]
#[command(version)]
pub struct Args {
    /// Initializr service root (overrides SPELL_INITIALIZR_URL)
    #[arg(long = "service-url", global = true)]
    pub service_url: Option<String>,

    /// Read metadata from a local JSON file instead of the service
    #[arg(long = "metadata-file", global = true)]
    pub metadata_file: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show details of selected dependencies
    Dependency,
    /// Create a Spring Boot project interactively
    Icreate(IcreateArgs),
}

#[derive(Parser, Debug)]
pub struct IcreateArgs {
    /// Directory the generated project or build file is written to
    #[arg(short, long = "output-dir")]
    pub output_dir: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("initializr_core=debug,spell=debug")
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_logging(args.verbose);
    let config = SpringInitializr;

    let mut session = SessionArgs {
        service_url: args.service_url,
        metadata_file: args.metadata_file,
        output_dir: None,
    };

    let result = match args.command {
        Command::Dependency => initializr_core::run_dependency(&config, session).await,
        Command::Icreate(create_args) => {
            session.output_dir = create_args.output_dir;
            initializr_core::run_create(&config, session).await
        }
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
