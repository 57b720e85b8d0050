//! # fabula-cli
//!
//! Fabula command-line client binary: the composition root that wires
//! settings, the REST client, and the push channel together and runs one
//! command against the backend.

#![deny(unsafe_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fabula_api::{ApiClient, PageRequest};
use fabula_channel::{ChannelConfig, ChannelContext, EventChannel, TopicKey};
use fabula_core::{LogNotifier, Notifier, ProjectId};
use fabula_events::ALL_EVENT_KINDS;
use fabula_settings::{FabulaSettings, load_settings};

/// Fabula backend client.
#[derive(Parser, Debug)]
#[command(name = "fabula", about = "Command-line client for the fabula authoring backend")]
struct Cli {
    /// REST API base URL (overrides settings).
    #[arg(long)]
    api_base: Option<String>,

    /// WebSocket base URL (overrides settings).
    #[arg(long)]
    ws_base: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all text projects.
    Projects,
    /// List one page of a project's chapters.
    Chapters {
        /// Project to list chapters for.
        #[arg(long)]
        project: String,

        /// One-based page number.
        #[arg(long, default_value = "1")]
        page: u32,

        /// Rows per page.
        #[arg(long, default_value = "20")]
        page_size: u32,
    },
    /// Open a push channel and print events until interrupted.
    Listen {
        /// Scope the channel to one project instead of the global stream.
        #[arg(long)]
        project: Option<String>,
    },
}

/// Initialize logging. `FABULA_LOG` overrides the settings file level.
fn init_logging(settings: &FabulaSettings) {
    let filter = EnvFilter::try_from_env("FABULA_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Load settings early (needed for log level before logging init).
    let settings = load_settings().unwrap_or_default();
    init_logging(&settings);

    let api_base = args.api_base.unwrap_or(settings.server.api_base);
    let ws_base = args.ws_base.unwrap_or(settings.server.ws_base);
    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);

    match args.command {
        Command::Projects => {
            let client = ApiClient::new(api_base, notifier).context("Invalid API base URL")?;
            let projects = client
                .list_projects()
                .await
                .context("Failed to list projects")?;
            for project in &projects {
                println!(
                    "{}  {}  ({} chapters)",
                    project.project_id, project.project_name, project.chapter_count
                );
            }
        }
        Command::Chapters {
            project,
            page,
            page_size,
        } => {
            let client = ApiClient::new(api_base, notifier).context("Invalid API base URL")?;
            let response = client
                .chapters(
                    &ProjectId::from_string(project),
                    &PageRequest {
                        current: page,
                        page_size,
                    },
                )
                .await
                .context("Failed to list chapters")?;
            for chapter in &response.records {
                println!("{}  {}", chapter.chapter_id, chapter.chapter_name);
            }
            println!("{} of {} chapters", response.records.len(), response.total);
        }
        Command::Listen { project } => {
            let context = match project {
                Some(id) => ChannelContext::for_project(ws_base, ProjectId::from_string(id)),
                None => ChannelContext::global(ws_base),
            }
            .context("Invalid WebSocket base URL")?;

            let config = ChannelConfig {
                reconnect_delay_ms: settings.channel.reconnect_delay_ms,
            };
            let channel = EventChannel::new(context, config, notifier);

            for &kind in ALL_EVENT_KINDS {
                channel.subscribe(
                    TopicKey::Event(kind),
                    Arc::new(move |envelope| println!("{kind}  {envelope}")),
                );
            }
            if let Some(project_id) = channel.context().project_id().cloned() {
                let label = project_id.clone();
                channel.subscribe(
                    TopicKey::Project(project_id),
                    Arc::new(move |payload| println!("{label}  {payload}")),
                );
            }

            channel.connect();
            tracing::info!(url = %channel.context().url(), "listening, press ctrl-c to stop");

            tokio::signal::ctrl_c()
                .await
                .context("Failed to listen for ctrl-c")?;
            tracing::info!("Shutting down...");
            channel.disconnect();
        }
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_projects() {
        let cli = Cli::parse_from(["fabula", "projects"]);
        assert!(matches!(cli.command, Command::Projects));
        assert!(cli.api_base.is_none());
        assert!(cli.ws_base.is_none());
    }

    #[test]
    fn cli_api_base_override() {
        let cli = Cli::parse_from(["fabula", "--api-base", "https://api.example.com", "projects"]);
        assert_eq!(cli.api_base.as_deref(), Some("https://api.example.com"));
    }

    #[test]
    fn cli_chapters_defaults() {
        let cli = Cli::parse_from(["fabula", "chapters", "--project", "p-1"]);
        match cli.command {
            Command::Chapters {
                project,
                page,
                page_size,
            } => {
                assert_eq!(project, "p-1");
                assert_eq!(page, 1);
                assert_eq!(page_size, 20);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_chapters_custom_page() {
        let cli = Cli::parse_from([
            "fabula",
            "chapters",
            "--project",
            "p-1",
            "--page",
            "3",
            "--page-size",
            "50",
        ]);
        match cli.command {
            Command::Chapters { page, page_size, .. } => {
                assert_eq!(page, 3);
                assert_eq!(page_size, 50);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_listen_global() {
        let cli = Cli::parse_from(["fabula", "listen"]);
        match cli.command {
            Command::Listen { project } => assert!(project.is_none()),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_listen_scoped() {
        let cli = Cli::parse_from([
            "fabula",
            "--ws-base",
            "ws://push.example.com",
            "listen",
            "--project",
            "p-2",
        ]);
        assert_eq!(cli.ws_base.as_deref(), Some("ws://push.example.com"));
        match cli.command {
            Command::Listen { project } => assert_eq!(project.as_deref(), Some("p-2")),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
