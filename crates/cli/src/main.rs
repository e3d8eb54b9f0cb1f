use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use factbox_core::SkillEvent;
use factbox_observability::{init_tracing, AppMetrics};
use factbox_skill::SkillService;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "factbox")]
#[command(about = "Factbox voice skill router")]
struct Cli {
    /// JSON catalog replacing the built-in responses.
    #[arg(long, env = "FACTBOX_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Route an inbound event read from a file, or stdin when omitted.
    Route {
        #[arg(long)]
        event: Option<PathBuf>,
    },
    /// Build an event for an intent name and route it.
    Invoke {
        #[arg(required_unless_present = "launch")]
        name: Option<String>,
        #[arg(long, conflicts_with = "name")]
        launch: bool,
        #[arg(long)]
        session_id: Option<String>,
    },
    Intents,
}

fn main() -> Result<()> {
    init_tracing("factbox_cli");
    let cli = Cli::parse();

    let service = SkillService::load(cli.catalog.as_deref(), AppMetrics::shared())?;

    match cli.command {
        Command::Route { event } => {
            let body = read_event(event.as_ref())?;
            let envelope = service.handle_json(&body)?;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        Command::Invoke {
            name,
            launch,
            session_id,
        } => {
            let event = build_event(name, launch, session_id);
            let envelope = service.handle_event(&event)?;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        Command::Intents => {
            for name in service.intents() {
                println!("{name}");
            }
        }
    }

    Ok(())
}

fn read_event(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed reading event from {}", path.display()))
        }
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("failed reading event from stdin")?;
            Ok(buffer)
        }
    }
}

fn build_event(name: Option<String>, launch: bool, session_id: Option<String>) -> SkillEvent {
    let session_id = session_id.unwrap_or_else(|| format!("factbox.session.{}", Uuid::new_v4()));
    let request_id = format!("factbox.request.{}", Uuid::new_v4());

    let event = match name {
        Some(name) if !launch => SkillEvent::intent(session_id, name),
        _ => SkillEvent::launch(session_id),
    };
    event.with_request_id(request_id)
}
