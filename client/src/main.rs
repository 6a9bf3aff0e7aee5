//! `echelon` entry point: restores the session and runs the terminal shell.

use std::env;
use std::io;
use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::io::BufReader;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use echelon::config::EchelonSettings;
use echelon::domain::SessionStore;
use echelon::domain::ports::KeyValueStore;
use echelon::inbound::shell::Shell;
use echelon::outbound::mock_api::MockApi;
use echelon::outbound::storage::{DirectoryKeyValueStore, InMemoryKeyValueStore};

fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = EchelonSettings::load_from_iter(env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    init_tracing(settings.json_logs);

    let storage = open_storage(&settings)?;
    let api = MockApi::new(Arc::new(DefaultClock)).with_latency(settings.latency());
    let shell = Shell::with_collaborator(
        SessionStore::with_key(storage, settings.session_key()),
        Arc::new(api),
    );

    // One thread, like the browser event loop the shell stands in for.
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build shell runtime")?;
    let mut stdout = io::stdout().lock();
    runtime
        .block_on(shell.run(BufReader::new(tokio::io::stdin()), &mut stdout))
        .wrap_err("terminal session failed")?;
    Ok(())
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(error) = result {
        warn!(%error, "tracing init failed");
    }
}

fn open_storage(settings: &EchelonSettings) -> Result<Arc<dyn KeyValueStore>> {
    let Some(dir) = settings.storage_dir() else {
        info!("no storage directory configured; the session ends with this run");
        return Ok(Arc::new(InMemoryKeyValueStore::new()));
    };
    let store = DirectoryKeyValueStore::open(dir)
        .wrap_err_with(|| format!("failed to open storage directory {}", dir.display()))?;
    info!(path = %dir.display(), "persisting session on disk");
    Ok(Arc::new(store))
}
