pub mod note;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Validate;
use notes_client::{NoteBoard, NotesApiClient};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "notes",
    author,
    version,
    about = "Notes - create, search, edit and delete short notes",
    long_about = "Talks to a notes server over HTTP.\n\nThe server address comes from --server, \
                  NOTES_SERVER_URL, or defaults to http://localhost:3000"
)]
pub struct Cli {
    #[arg(long, global = true, env = "NOTES_SERVER_URL", help = "Base URL of the notes server")]
    pub server: Option<String>,

    #[arg(long, global = true, help = "Request timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(long, global = true, help = "Output as JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List every note")]
    List,

    #[command(about = "Show notes whose title contains a fragment")]
    Search(note::SearchArgs),

    #[command(about = "Show one note in full")]
    Show(note::ShowArgs),

    #[command(about = "Create a new note")]
    Create(note::CreateArgs),

    #[command(about = "Change the title and/or content of a note")]
    Edit(note::EditArgs),

    #[command(about = "Delete a note")]
    Delete(note::DeleteArgs)
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut client_config = config::load_client_from_env()?;
    if let Some(server) = cli.server {
        client_config.base_url = server;
    }
    if let Some(timeout) = cli.timeout {
        client_config.timeout_seconds = timeout;
    }
    client_config
        .validate()
        .map_err(config::ConfigError::from)?;

    tracing::debug!(
        server = %client_config.base_url,
        timeout = ?Duration::from_secs(client_config.timeout_seconds),
        "Using notes server"
    );
    let api = NotesApiClient::from_config(&client_config)?;
    let mut board = NoteBoard::new(api);

    match cli.command {
        Commands::List => note::list(&mut board, cli.json).await,
        Commands::Search(args) => note::search(&mut board, args, cli.json).await,
        Commands::Show(args) => note::show(&mut board, args, cli.json).await,
        Commands::Create(args) => note::create(&mut board, args, cli.json).await,
        Commands::Edit(args) => note::edit(&mut board, args, cli.json).await,
        Commands::Delete(args) => note::delete(&mut board, args).await
    }
}
