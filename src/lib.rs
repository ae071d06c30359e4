// src/lib.rs
pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use application::{BoardState, MediaResolver, NoteCreator, NoteRepository, Submission};
use config::{default_config_path, BackendKind, Config};
use domain::RequestAuth;
use infrastructure::{DataApiClient, LocalAuthenticator, MemoryNoteStore, SignedUrlResolver};
use ports::web::{self, AppState, Board};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, info, warn};

use crate::cli::args::{Args, Command};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notelog with arguments");

    let load = || -> Result<Config> {
        let config = Config::discover(args.config.as_deref())?;
        debug!(?config.backend.kind, auth = config.auth.enabled, "Loaded configuration");
        Ok(config)
    };

    match args.command {
        Command::Init { force } => init(args.config.as_deref(), force),
        Command::Serve { bind } => {
            let config = load()?;
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            serve(&config, &bind).await
        }
        Command::List { all, json } => list(&load()?, all, json).await,
        Command::Add { title, comment } => add(&load()?, &title, &comment).await,
    }
}

/// Writes the default configuration, refusing to clobber an existing file
pub fn init(path: Option<&Path>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path().context("Could not determine config directory")?,
    };
    if path.exists() && !force {
        bail!(
            "Config file {} already exists, pass --force to overwrite",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    Config::create_default(&path)?;
    info!(path = %path.display(), "Wrote default configuration");
    println!("Wrote {}", path.display());
    Ok(())
}

/// Backend selected by `backend.kind`
pub fn build_repository(config: &Config) -> Result<Arc<dyn NoteRepository>> {
    let repository: Arc<dyn NoteRepository> = match config.backend.kind {
        BackendKind::Memory => {
            info!("Using in-memory note store");
            Arc::new(MemoryNoteStore::new())
        }
        BackendKind::Http => {
            info!(endpoint = %config.backend.endpoint, "Using data API backend");
            Arc::new(DataApiClient::new(
                &config.backend.endpoint,
                &config.backend.api_key,
            )?)
        }
    };
    Ok(repository)
}

/// Board wired to the configured backend; images resolve only behind sign-in
pub fn build_board(config: &Config) -> Result<Board> {
    let board = Board::new(build_repository(config)?);

    if !config.auth.enabled {
        return Ok(board);
    }
    if config.storage.base_url.is_empty() {
        warn!("storage.base_url is empty, note images will not be resolved");
        return Ok(board);
    }

    let media: Arc<dyn MediaResolver> = Arc::new(SignedUrlResolver::new(
        &config.storage.base_url,
        &config.storage.signing_key,
        Duration::from_secs(config.storage.url_ttl_secs),
    )?);
    Ok(board.with_media(media))
}

pub fn build_state(config: &Config) -> Result<AppState> {
    let auth = config
        .auth
        .enabled
        .then(|| LocalAuthenticator::new(config.auth.users.clone()));
    Ok(AppState::new(build_board(config)?, auth))
}

async fn serve(config: &Config, bind: &str) -> Result<()> {
    let app = web::router(build_state(config)?);

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind to {bind}"))?;
    info!(address = %bind, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn list(config: &Config, all: bool, json: bool) -> Result<()> {
    let board = build_board(config)?;
    let mut state = BoardState::new();
    board.fetch_notes(&mut state, &RequestAuth::ApiKey).await?;

    let notes: Vec<_> = if all {
        state.notes().iter().collect()
    } else {
        state.visible_notes().collect()
    };
    info!(shown = notes.len(), fetched = state.notes().len(), "Listing notes");

    if json {
        let output =
            serde_json::to_string_pretty(&notes).context("Failed to serialize notes to JSON")?;
        println!("{output}");
        return Ok(());
    }

    for note in notes {
        println!(
            "{}\t{}: {}",
            note.id,
            note.name.as_deref().unwrap_or_default(),
            util::text::first_line(note.description.as_deref().unwrap_or_default())
        );
    }
    Ok(())
}

async fn add(config: &Config, title: &str, comment: &str) -> Result<()> {
    let creator = NoteCreator::new(build_repository(config)?);

    match creator.submit(title, comment, &RequestAuth::ApiKey).await? {
        Submission::Created(note) => {
            println!("Created note {}", note.id);
            Ok(())
        }
        Submission::Rejected(err) => Err(err.into()),
    }
}
