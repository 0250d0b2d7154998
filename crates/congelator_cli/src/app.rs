//! Shared command context.

use congelator_sync::{
    ClientConfig, FileConfigStore, LocalStore, ReqwestClient, SessionContext, SyncClient,
};
use std::path::PathBuf;

/// Result type for command implementations.
pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Store type used by every command.
pub type Store = LocalStore<ReqwestClient>;

/// Settings resolved from flags and environment.
#[derive(Debug, Clone)]
pub struct App {
    /// Directory holding the session record.
    pub home: PathBuf,
    /// Remote service settings.
    pub client: ClientConfig,
    /// Acting user written into the audit log.
    pub user: String,
}

impl App {
    /// The persisted session record.
    pub fn config_store(&self) -> FileConfigStore {
        FileConfigStore::in_dir(&self.home)
    }

    /// Loads the session context.
    pub fn session(&self) -> CliResult<SessionContext> {
        Ok(SessionContext::load(Box::new(self.config_store()))?)
    }

    /// Builds a store without contacting the service.
    pub fn open_store(&self) -> CliResult<Store> {
        let http = ReqwestClient::new(self.client.timeout)?;
        let client = SyncClient::new(self.client.clone(), http);
        Ok(LocalStore::new(client, self.session()?))
    }

    /// Builds a store and pulls the remote document.
    pub async fn hydrated_store(&self) -> CliResult<Store> {
        let mut store = self.open_store()?;
        store.hydrate().await?;
        Ok(store)
    }
}

/// `<config dir>/congelator`, or `.congelator` when there is none.
pub fn default_home() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("congelator"))
        .unwrap_or_else(|| PathBuf::from(".congelator"))
}

/// The OS user name, or `anonymous`.
pub fn default_user() -> String {
    ["USER", "USERNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|name| name.trim().to_string())
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| "anonymous".to_string())
}
