//! wayfile - Browse a remote project workspace from the terminal.
//!
//! Usage:
//!   wayfile [PROJECT]                 Launch interactive TUI
//!   wayfile ls PROJECT [PATH]         List a directory
//!   wayfile status < signals.ndjson   Follow status signals on stdin
//!   wayfile check-update              Look for a newer release
//!   wayfile --help                    Show help

mod logging;
mod signals;
mod update;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::warn;

use wayfile_core::format::{format_optional_size, format_relative_time};
use wayfile_core::{DirectoryEntry, Project};
use wayfile_nav::{
    ClientConfig, HttpListingService, ListingService, MemoryPreferenceStore, TomlPreferenceStore,
};
use wayfile_status::{StatusConfig, StatusDriver};
use wayfile_tui::{StatusFeed, TuiConfig, UserSettings};

/// Server used when neither the command line nor the settings name one.
const DEFAULT_SERVER: &str = "http://localhost:3001";

#[derive(Parser)]
#[command(
    name = "wayfile",
    version,
    about = "Browse a remote project workspace",
    long_about = "wayfile browses the files of a project served by a workspace server \
                  and follows the activity of a running assistant task.\n\n\
                  Launch the interactive TUI by running `wayfile [PROJECT]`, or use \
                  subcommands for quick operations."
)]
struct Cli {
    /// Project to open (defaults to the last opened project)
    project: Option<String>,

    /// Project root path on the server, shown in the root breadcrumb
    #[arg(long)]
    root: Option<String>,

    /// Newline-delimited JSON status signals to follow in the TUI
    #[arg(long, value_name = "FILE")]
    signals: Option<PathBuf>,

    /// Workspace server URL
    #[arg(long, global = true, env = "WAYFILE_SERVER")]
    server: Option<String>,

    /// Bearer token for the workspace server
    #[arg(long, global = true, env = "WAYFILE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List a directory of a project
    Ls {
        /// Project name on the server
        project: String,

        /// Path relative to the project root
        #[arg(default_value = "")]
        path: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Follow status signals read from stdin and print the status line
    Status {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Check whether a newer release is available
    CheckUpdate {
        /// GitHub repository as owner/name
        #[arg(long, default_value = "wayfile/wayfile")]
        repo: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let settings = UserSettings::load();

    match &cli.command {
        Some(Command::Ls {
            project,
            path,
            format,
        }) => {
            logging::init_stderr();
            let client = client_config(&cli, &settings)?;
            run_ls(client, project, path, *format)?;
        }
        Some(Command::Status { format }) => {
            logging::init_stderr();
            run_status(*format)?;
        }
        Some(Command::CheckUpdate { repo, format }) => {
            logging::init_stderr();
            run_check_update(repo, *format)?;
        }
        None => {
            let _guard = logging::init_file();
            run_tui(&cli, settings)?;
        }
    }

    Ok(())
}

/// Resolve connection settings: command line, then saved settings, then
/// the local default server.
fn client_config(cli: &Cli, settings: &UserSettings) -> Result<ClientConfig> {
    let server = cli
        .server
        .clone()
        .or_else(|| settings.server_url.clone())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());

    let mut builder = ClientConfig::builder();
    builder.base_url(server);
    if let Some(token) = cli.token.clone().or_else(|| settings.auth_token.clone()) {
        builder.auth_token(token);
    }
    if let Some(secs) = cli.timeout {
        builder.timeout(Duration::from_secs(secs));
    }
    builder.build().wrap_err("Invalid server configuration")
}

/// Launch the interactive browser.
fn run_tui(cli: &Cli, settings: UserSettings) -> Result<()> {
    let client = client_config(cli, &settings)?;
    let listing = HttpListingService::new(client).wrap_err("Failed to create HTTP client")?;

    let project = cli
        .project
        .clone()
        .or_else(|| settings.last_project.clone())
        .map(|name| {
            let root = cli.root.clone().unwrap_or_else(|| name.clone());
            Project::new(name, root)
        });

    let mut config = TuiConfig::new(Arc::new(listing)).with_settings(settings);

    config = match TomlPreferenceStore::open_default() {
        Ok(store) => config.with_preferences(store),
        Err(err) => {
            warn!(error = %err, "Preferences unavailable, keeping them in memory");
            config.with_preferences(MemoryPreferenceStore::new())
        }
    };

    if let Some(project) = project {
        config = config.with_project(project);
    }

    if let Some(path) = cli.signals.clone() {
        let (tx, rx) = mpsc::channel(signals::SIGNAL_BUFFER);
        config = config.with_status_feed(StatusFeed::new(rx, signals::forward_file(path, tx)));
    }

    wayfile_tui::run_with_config(config)
}

/// List one directory.
fn run_ls(client: ClientConfig, project: &str, path: &str, format: OutputFormat) -> Result<()> {
    let service = HttpListingService::new(client).wrap_err("Failed to create HTTP client")?;
    let project = Project::new(project, project);

    let rt = tokio::runtime::Runtime::new()?;
    let entries = rt
        .block_on(service.list(&project, path))
        .wrap_err_with(|| format!("Failed to list {}/{}", project.name, path))?;

    match format {
        OutputFormat::Text => print_listing(&entries),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

fn print_listing(entries: &[DirectoryEntry]) {
    if entries.is_empty() {
        println!(" No files found.");
        return;
    }

    let now = Utc::now();
    let name_width = entries
        .iter()
        .map(|entry| entry.name.chars().count() + usize::from(entry.is_dir()))
        .max()
        .unwrap_or(0)
        .max(4);

    println!(" {:<name_width$}  {:>10}  Modified", "Name", "Size");
    println!("{}", "─".repeat(name_width + 32));
    for entry in entries {
        let name = if entry.is_dir() {
            format!("{}/", entry.name)
        } else {
            entry.name.to_string()
        };
        let modified = entry
            .modified()
            .map_or_else(|| "-".to_string(), |at| format_relative_time(at, now));
        println!(
            " {:<name_width$}  {:>10}  {}",
            name,
            format_optional_size(entry.size()),
            modified
        );
    }
}

/// Feed stdin through the status engine and print every change.
fn run_status(format: OutputFormat) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(follow_status(format))
}

async fn follow_status(format: OutputFormat) -> Result<()> {
    let (tx, rx) = mpsc::channel(signals::SIGNAL_BUFFER);
    let (driver, mut views) = StatusDriver::new(StatusConfig::default(), rx);
    let reader = tokio::spawn(signals::forward_signals(
        BufReader::new(tokio::io::stdin()),
        tx,
    ));
    let driver = tokio::spawn(driver.run());

    // Ends once stdin is exhausted and the driver drops its sender.
    while views.changed().await.is_ok() {
        let view = views.borrow_and_update().clone();
        match format {
            OutputFormat::Text if view.visible => println!("{}", view.line()),
            OutputFormat::Text => println!("(idle)"),
            OutputFormat::Json => println!("{}", serde_json::to_string(&view)?),
        }
    }

    driver.await.wrap_err("Status driver panicked")?;
    let forwarded = reader
        .await
        .wrap_err("Signal reader panicked")?
        .wrap_err("Failed to read status signals")?;
    if forwarded == 0 {
        bail!("No valid status signals on stdin");
    }

    Ok(())
}

/// Compare the running version with the latest release.
fn run_check_update(repo: &str, format: OutputFormat) -> Result<()> {
    eprintln!("Checking {repo} for releases...");

    let rt = tokio::runtime::Runtime::new()?;
    let check = rt.block_on(update::check(repo, env!("CARGO_PKG_VERSION")))?;

    match format {
        OutputFormat::Text => {
            println!("{}", check.summary());
            if let Some(info) = check.latest.as_ref().filter(|_| check.update_available) {
                println!();
                println!(" {}", info.title);
                if let Some(published) = &info.published_at {
                    println!(" Published {published}");
                }
                if !info.body.trim().is_empty() {
                    println!();
                    for line in info.body.lines() {
                        println!("   {line}");
                    }
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&check)?);
        }
    }

    Ok(())
}
