// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{Context, Result};
use application::{NoteService, PadService};
use infrastructure::{Config, MemoryStore, SqliteStore, StorageBackend};
use ports::{AppState, SharedStore};
use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::cli::args::{Args, Command};
use crate::domain::Note;
use crate::util::text::{extract_first_line, preview};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting edgepad with arguments");

    let mut config = Config::discover(args.config.as_deref())?;
    if let Some(path) = &args.database {
        debug!(?path, "Using provided database path");
        config.storage.backend = StorageBackend::Sqlite;
        config.storage.path = path.to_string_lossy().into_owned();
    }

    match args.command {
        Command::Serve { bind, memory } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if memory {
                config.storage.backend = StorageBackend::Memory;
            }
            serve(config).await
        }
        Command::Show { pad_id, json } => {
            let pads = PadService::with_limit(open_store(&config)?, config.limits.max_content_bytes);
            let pad = pads.load(&pad_id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&pad)?);
            } else {
                println!("{}", pad.content);
            }
            Ok(())
        }
        Command::Delete { pad_id } => {
            let pads = PadService::new(open_store(&config)?);
            pads.clear(&pad_id)?;
            println!("Deleted pad {pad_id}");
            Ok(())
        }
        Command::List { search } => {
            let notes = NoteService::new(open_store(&config)?);
            for note in filter_notes(notes.list()?, search.as_deref()) {
                println!("{}\t{}", note.id, list_line(&note));
            }
            Ok(())
        }
    }
}

pub async fn serve(config: Config) -> Result<()> {
    let store = open_store(&config)?;
    let state = Arc::new(AppState::new(store, &config));
    let router = ports::create_router(state, config.server.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;

    ports::http::serve(listener, router).await
}

/// Open the backend selected by `config`.
pub fn open_store(config: &Config) -> Result<SharedStore> {
    match config.storage.backend {
        StorageBackend::Sqlite => {
            let path = config.database_path()?;
            let store = SqliteStore::open(&path)?;
            info!(path = %store.path().display(), "Using SQLite store");
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory store; pads and notes are lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

fn filter_notes(notes: Vec<Note>, search: Option<&str>) -> Vec<Note> {
    match search {
        None => notes,
        Some(query) => notes
            .into_iter()
            .filter(|n| n.title.contains(query) || n.content.contains(query))
            .collect(),
    }
}

fn list_line(note: &Note) -> String {
    let first = extract_first_line(&note.content);
    if first.is_empty() {
        note.title.clone()
    } else {
        format!("{} - {}", note.title, preview(&first, 60))
    }
}
