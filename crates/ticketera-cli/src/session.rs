//! Gateway construction and session file location.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::warn;

use ticketera_core::ApiConfig;
use ticketera_http::Gateway;
use ticketera_store::FileSessionStore;

use crate::cli::GlobalArgs;
use crate::output;

/// Resolve the session file, preferring an explicit path.
pub fn session_path(global: &GlobalArgs) -> Result<PathBuf> {
    if let Some(path) = &global.session_file {
        return Ok(path.clone());
    }

    let dirs =
        ProjectDirs::from("", "", "ticketera").context("Could not determine data directory")?;
    Ok(dirs.data_dir().join("session.json"))
}

/// Build a gateway backed by the session file.
pub fn connect(global: &GlobalArgs) -> Result<Gateway> {
    let mut config = ApiConfig::for_server(&global.api_url, &global.api_version)
        .context("Invalid API address")?
        .with_user_agent(concat!("ticketera-cli/", env!("TICKETERA_VERSION")));
    if let Some(secs) = global.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let store = FileSessionStore::new(session_path(global)?);

    Gateway::builder(config)
        .store(Arc::new(store))
        .notifier(Arc::new(|| {
            warn!("Session expired");
            output::warning("Tu sesión expiró. Inicia sesión nuevamente con `ticketera auth login`.");
        }))
        .build()
        .context("Failed to create API client")
}
