//! Local store.
//!
//! [`LocalStore`] owns the canonical in-memory [`Document`] and keeps the
//! remote copy in step with it by whole-document overwrite.
//!
//! ## State machine
//!
//! ```text
//! Uninitialized ──hydrate──► Loading ──┬──► Ready ◄──────────────┐
//!                                      ├──► ErrorFlagged         │
//!                                      └──► ConfigInvalid        │
//! Ready / ErrorFlagged ──mutation──► Saving ──┬── ok ────────────┘
//!                                             └── err ──► ErrorFlagged
//! ```
//!
//! `ErrorFlagged` clears on the next successful operation. `ConfigInvalid`
//! only clears through [`LocalStore::reconfigure`] or [`LocalStore::setup`].
//!
//! Mutations overwrite the whole remote document, so they are refused with
//! [`SyncError::NotHydrated`] until one hydrate has succeeded for the
//! current session. A store that failed its first fetch holds only the
//! empty placeholder and must not write it back. Likewise a fetched
//! document with unreadable records stays readable but is never
//! overwritten, since the overwrite would delete those records.

use crate::client::SyncClient;
use crate::error::{ErrorKind, SyncError, SyncResult};
use crate::http::HttpClient;
use crate::session::{SessionConfig, SessionContext};
use chrono::{DateTime, Utc};
use congelator_model::{AuditLogEntry, Category, Document, Item, ItemId, Location};
use tracing::{error, info, warn};

/// Lifecycle state of a [`LocalStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// Nothing fetched yet.
    Uninitialized,
    /// A fetch is in flight.
    Loading,
    /// In step with the last successful remote operation.
    Ready,
    /// A replace is in flight.
    Saving,
    /// The last operation failed; data may be stale.
    ErrorFlagged,
    /// The remote document is gone and the session was discarded.
    ConfigInvalid,
}

/// What a mutation does to local state when the replace fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Keep the previous document (adds).
    Reject,
    /// Adopt the candidate anyway (removes).
    KeepLocal,
}

/// The error indicator shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorFlag {
    /// Remedy class.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
}

impl From<&SyncError> for ErrorFlag {
    fn from(err: &SyncError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Canonical in-memory document synchronized with one remote document.
pub struct LocalStore<C: HttpClient> {
    client: SyncClient<C>,
    session: SessionContext,
    document: Document,
    state: StoreState,
    loaded: bool,
    unreadable_records: usize,
    last_error: Option<ErrorFlag>,
    last_synced_at: Option<DateTime<Utc>>,
}

impl<C: HttpClient> LocalStore<C> {
    /// Creates an uninitialized store.
    pub fn new(client: SyncClient<C>, session: SessionContext) -> Self {
        Self {
            client,
            session,
            document: Document::empty(),
            state: StoreState::Uninitialized,
            loaded: false,
            unreadable_records: 0,
            last_error: None,
            last_synced_at: None,
        }
    }

    /// Current items, newest first.
    pub fn items(&self) -> &[Item] {
        &self.document.items
    }

    /// Current audit log, newest first.
    pub fn logs(&self) -> &[AuditLogEntry] {
        &self.document.logs
    }

    /// The canonical document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Current state.
    pub fn state(&self) -> StoreState {
        self.state
    }

    /// The error flag, if raised.
    pub fn error(&self) -> Option<&ErrorFlag> {
        self.last_error.as_ref()
    }

    /// Returns true if the error flag is raised.
    pub fn is_error_flagged(&self) -> bool {
        self.last_error.is_some()
    }

    /// Returns true once the remote document has been fetched for the
    /// current session.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Number of remote records the last fetch could not decode.
    pub fn unreadable_records(&self) -> usize {
        self.unreadable_records
    }

    /// Time of the last successful fetch or replace.
    pub fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.last_synced_at
    }

    /// The session context.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// The sync client.
    pub fn client(&self) -> &SyncClient<C> {
        &self.client
    }

    /// Replaces the in-memory document with the remote one.
    ///
    /// A missing remote document discards the session and fails with
    /// [`SyncError::ConfigInvalid`]. Any other failure leaves the document
    /// untouched and raises the error flag.
    pub async fn hydrate(&mut self) -> SyncResult<()> {
        let config = self.require_session()?;
        self.state = StoreState::Loading;

        match self.client.fetch_decoded(&config).await {
            Ok(decoded) => {
                info!(
                    items = decoded.document.items.len(),
                    logs = decoded.document.logs.len(),
                    "document hydrated"
                );
                if !decoded.is_lossless() {
                    warn!(
                        skipped = decoded.skipped.len(),
                        "remote document has unreadable records, writes disabled"
                    );
                }
                self.unreadable_records = decoded.skipped.len();
                self.document = decoded.document;
                self.loaded = true;
                self.mark_synced();
                Ok(())
            }
            Err(SyncError::NotFound) => {
                error!(document_id = %config.document_id, "remote document not found, discarding session");
                self.invalidate_session();
                Err(SyncError::ConfigInvalid)
            }
            Err(err) => {
                warn!(error = %err, "hydrate failed, keeping local data");
                self.raise_flag(&err);
                Err(err)
            }
        }
    }

    /// Pulls the remote document again. Same contract as [`hydrate`](Self::hydrate).
    pub async fn refresh(&mut self) -> SyncResult<()> {
        self.hydrate().await
    }

    /// Adds an item and its `ADDED` entry.
    ///
    /// Nothing changes locally unless the replace succeeds. Fails with
    /// [`SyncError::NotHydrated`] before the first successful hydrate.
    pub async fn add_item(
        &mut self,
        name: &str,
        category: Category,
        location: Location,
        user: &str,
    ) -> SyncResult<Item> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SyncError::InvalidInput("item name must not be empty".into()));
        }
        let user = acting_user(user)?;
        let config = self.require_loaded()?;

        let now = Utc::now();
        let item = Item::new(name, category, location, now);
        let candidate = self.document.with_added(item.clone(), user, now);

        self.commit(&config, candidate, FailurePolicy::Reject).await?;
        Ok(item)
    }

    /// Removes an item and records a `REMOVED` entry.
    ///
    /// The removal stays applied locally even if the replace fails. Fails
    /// with [`SyncError::NotHydrated`] before the first successful hydrate.
    pub async fn remove_item(&mut self, id: &ItemId, user: &str) -> SyncResult<Item> {
        let user = acting_user(user)?;
        let config = self.require_loaded()?;

        let (candidate, removed) = self
            .document
            .with_removed(id, user, Utc::now())
            .ok_or_else(|| SyncError::ItemNotFound(id.to_string()))?;

        self.commit(&config, candidate, FailurePolicy::KeepLocal)
            .await?;
        Ok(removed)
    }

    /// Starts a new session targeting `config`.
    ///
    /// The local document is reset; call [`hydrate`](Self::hydrate) next.
    pub fn reconfigure(&mut self, config: SessionConfig) -> SyncResult<()> {
        self.session.set(config)?;
        self.document = Document::empty();
        self.state = StoreState::Uninitialized;
        self.loaded = false;
        self.unreadable_records = 0;
        self.last_error = None;
        self.last_synced_at = None;
        Ok(())
    }

    /// Rotates the credential of the current session.
    pub fn replace_credential(&mut self, credential: &str) -> SyncResult<()> {
        self.session.replace_credential(credential)
    }

    /// Connects to an existing document or creates a new one, then commits
    /// the session.
    ///
    /// With `existing_id`, the document is probed first and a missing one
    /// is reported as [`SyncError::NotFound`] without touching the session.
    /// Without it, a document seeded with `initial_items` is created.
    pub async fn setup(
        &mut self,
        credential: &str,
        existing_id: Option<&str>,
        initial_items: &[Item],
    ) -> SyncResult<SessionConfig> {
        let config = match existing_id {
            Some(id) => {
                let config = SessionConfig::new(credential, id)?;
                self.client.check_connection(&config).await?;
                config
            }
            None => {
                if credential.trim().is_empty() {
                    return Err(SyncError::InvalidInput("credential must not be empty".into()));
                }
                let id = self
                    .client
                    .create_document(credential.trim(), initial_items)
                    .await?;
                SessionConfig::new(credential, id)?
            }
        };

        info!(document_id = %config.document_id, "session configured");
        self.reconfigure(config.clone())?;
        Ok(config)
    }

    async fn commit(
        &mut self,
        config: &SessionConfig,
        candidate: Document,
        policy: FailurePolicy,
    ) -> SyncResult<()> {
        self.state = StoreState::Saving;

        match self.client.replace_document(config, &candidate).await {
            Ok(()) => {
                info!(
                    items = candidate.items.len(),
                    logs = candidate.logs.len(),
                    "document replaced"
                );
                self.document = candidate;
                self.mark_synced();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, ?policy, "replace failed");
                if policy == FailurePolicy::KeepLocal {
                    self.document = candidate;
                }
                self.raise_flag(&err);
                Err(err)
            }
        }
    }

    fn require_session(&self) -> SyncResult<SessionConfig> {
        if self.state == StoreState::ConfigInvalid {
            return Err(SyncError::ConfigInvalid);
        }
        self.session
            .config()
            .cloned()
            .ok_or(SyncError::NotConfigured)
    }

    fn require_loaded(&self) -> SyncResult<SessionConfig> {
        let config = self.require_session()?;
        if !self.loaded {
            return Err(SyncError::NotHydrated);
        }
        if self.unreadable_records > 0 {
            return Err(SyncError::MalformedDocument(format!(
                "{} unreadable records in the remote document, refusing to overwrite them",
                self.unreadable_records
            )));
        }
        Ok(config)
    }

    fn mark_synced(&mut self) {
        self.state = StoreState::Ready;
        self.last_error = None;
        self.last_synced_at = Some(Utc::now());
    }

    fn raise_flag(&mut self, err: &SyncError) {
        self.state = StoreState::ErrorFlagged;
        self.last_error = Some(ErrorFlag::from(err));
    }

    fn invalidate_session(&mut self) {
        if let Err(err) = self.session.clear() {
            warn!(error = %err, "failed to remove stored session");
        }
        self.state = StoreState::ConfigInvalid;
        self.loaded = false;
        self.last_error = Some(ErrorFlag::from(&SyncError::ConfigInvalid));
    }
}

fn acting_user(user: &str) -> SyncResult<&str> {
    let user = user.trim();
    if user.is_empty() {
        return Err(SyncError::InvalidInput("acting user must not be empty".into()));
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientConfig, RetryConfig};
    use crate::session::MemoryConfigStore;
    use crate::transport::MockHttpClient;
    use congelator_model::{decode, inspect_shape, AuditAction, DocumentShape};
    use std::sync::Arc;

    const LEGACY: &str = r#"[{"id":"1","name":"Soup","category":"Plat","location":"Freezer","dateAdded":"2024-01-01T00:00:00Z"}]"#;

    struct Fixture {
        mock: Arc<MockHttpClient>,
        config_store: MemoryConfigStore,
        store: LocalStore<Arc<MockHttpClient>>,
    }

    fn fixture() -> Fixture {
        let mock = Arc::new(MockHttpClient::new());
        let config_store =
            MemoryConfigStore::with_config(SessionConfig::new("key", "doc").unwrap());
        let session = SessionContext::load(Box::new(config_store.clone())).unwrap();
        let client = SyncClient::new(
            ClientConfig::new("https://store.test/json").with_retry(RetryConfig::no_retry()),
            Arc::clone(&mock),
        );
        Fixture {
            mock,
            config_store,
            store: LocalStore::new(client, session),
        }
    }

    async fn hydrated_with(raw: &str) -> Fixture {
        let mut f = fixture();
        f.mock.push_response(200, raw);
        f.store.hydrate().await.unwrap();
        f
    }

    fn sent_document(mock: &MockHttpClient) -> Document {
        decode(mock.last_request().unwrap().body.as_deref().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn hydrate_empty_document() {
        let f = hydrated_with("").await;
        assert!(f.store.items().is_empty());
        assert!(f.store.logs().is_empty());
        assert!(!f.store.is_error_flagged());
        assert_eq!(f.store.state(), StoreState::Ready);
        assert!(f.store.last_synced_at().is_some());
    }

    #[tokio::test]
    async fn legacy_document_is_written_back_as_object() {
        let mut f = hydrated_with(LEGACY).await;
        assert_eq!(f.store.items()[0].name, "Soup");
        assert!(f.store.logs().is_empty());

        f.mock.push_response(200, "");
        f.store
            .add_item("Peas", Category::Vegetables, Location::Freezer, "alice")
            .await
            .unwrap();

        let body = f.mock.last_request().unwrap().body.unwrap();
        assert_eq!(inspect_shape(&body).unwrap(), DocumentShape::Canonical);
        let sent = decode(&body).unwrap();
        assert_eq!(sent.items.len(), 2);
        assert_eq!(sent.logs.len(), 1);
    }

    #[tokio::test]
    async fn hydrate_not_found_invalidates_session() {
        let mut f = fixture();
        f.mock.push_response(404, "");

        let err = f.store.hydrate().await.unwrap_err();
        assert!(matches!(err, SyncError::ConfigInvalid));
        assert_eq!(f.store.state(), StoreState::ConfigInvalid);
        assert!(!f.store.session().is_configured());
        assert!(f.config_store.stored().is_none());

        // No further remote calls until reconfigured.
        assert!(matches!(
            f.store.refresh().await,
            Err(SyncError::ConfigInvalid)
        ));
        assert_eq!(f.mock.call_count(), 1);

        f.store
            .reconfigure(SessionConfig::new("key", "other").unwrap())
            .unwrap();
        assert_eq!(f.store.state(), StoreState::Uninitialized);
        f.mock.push_response(200, "");
        f.store.hydrate().await.unwrap();
        assert_eq!(f.store.state(), StoreState::Ready);
    }

    #[tokio::test]
    async fn hydrate_failure_keeps_stale_data() {
        let mut f = hydrated_with(LEGACY).await;
        f.mock.push_response(500, "");

        let err = f.store.refresh().await.unwrap_err();
        assert!(matches!(err, SyncError::FetchFailed { status: 500 }));
        assert_eq!(f.store.items().len(), 1);
        assert_eq!(f.store.state(), StoreState::ErrorFlagged);
        assert_eq!(f.store.error().unwrap().kind, ErrorKind::Transient);
        assert!(f.store.session().is_configured());

        // Cleared by the next success.
        f.mock.push_response(200, "");
        f.store.refresh().await.unwrap();
        assert!(!f.store.is_error_flagged());
        assert!(f.store.items().is_empty());
    }

    #[tokio::test]
    async fn hydrate_malformed_document_is_flagged() {
        let mut f = fixture();
        f.mock.push_response(200, "{broken");
        let err = f.store.hydrate().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
        assert_eq!(f.store.error().unwrap().kind, ErrorKind::MalformedDocument);
    }

    #[tokio::test]
    async fn add_item_pairs_audit_entry() {
        let mut f = hydrated_with(LEGACY).await;
        let logs_before = f.store.logs().len();

        f.mock.push_response(200, "");
        let item = f
            .store
            .add_item("  Saumon ", Category::Fish, Location::TopDrawer, "bob")
            .await
            .unwrap();

        assert_eq!(item.name, "Saumon");
        assert_eq!(f.store.items()[0], item);
        assert_eq!(f.store.logs().len(), logs_before + 1);
        let entry = &f.store.logs()[0];
        assert_eq!(entry.action, AuditAction::Added);
        assert_eq!(entry.item_name, "Saumon");
        assert_eq!(entry.category, Category::Fish);
        assert_eq!(entry.user, "bob");
        assert_eq!(&sent_document(&f.mock), f.store.document());
        assert_eq!(f.store.state(), StoreState::Ready);
    }

    #[tokio::test]
    async fn add_item_failure_is_atomic() {
        let mut f = hydrated_with(LEGACY).await;
        let before = f.store.document().clone();

        f.mock.push_response(503, "");
        let err = f
            .store
            .add_item("Peas", Category::Vegetables, Location::Freezer, "alice")
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::ReplaceFailed { status: 503 }));
        assert_eq!(f.store.document(), &before);
        assert!(f.store.is_error_flagged());
        assert_eq!(f.store.state(), StoreState::ErrorFlagged);
    }

    #[tokio::test]
    async fn add_item_rejects_blank_input_without_remote_call() {
        let mut f = hydrated_with("").await;
        let calls = f.mock.call_count();

        let err = f
            .store
            .add_item("   ", Category::Sauce, Location::Freezer, "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::InvalidInput(_)));

        let err = f
            .store
            .add_item("Pesto", Category::Sauce, Location::Freezer, " ")
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::InvalidInput(_)));

        assert_eq!(f.mock.call_count(), calls);
        assert!(!f.store.is_error_flagged());
    }

    #[tokio::test]
    async fn remove_item_pairs_audit_entry() {
        let mut f = hydrated_with(LEGACY).await;

        f.mock.push_response(200, "");
        let removed = f.store.remove_item(&ItemId::new("1"), "carol").await.unwrap();

        assert_eq!(removed.name, "Soup");
        assert!(f.store.items().is_empty());
        assert_eq!(f.store.logs().len(), 1);
        assert!(f.store.logs()[0].describes(AuditAction::Removed, &removed));
        assert_eq!(&sent_document(&f.mock), f.store.document());
    }

    #[tokio::test]
    async fn remove_item_failure_keeps_local_removal() {
        let mut f = hydrated_with(LEGACY).await;

        f.mock.push_response(401, "");
        let err = f
            .store
            .remove_item(&ItemId::new("1"), "carol")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AuthFailed);
        assert!(f.store.document().find_item(&ItemId::new("1")).is_none());
        assert!(f.store.is_error_flagged());
        assert_eq!(f.store.error().unwrap().kind, ErrorKind::AuthFailed);
    }

    #[tokio::test]
    async fn remove_unknown_item_makes_no_remote_call() {
        let mut f = hydrated_with(LEGACY).await;
        let calls = f.mock.call_count();

        let err = f
            .store
            .remove_item(&ItemId::new("missing"), "carol")
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::ItemNotFound(_)));
        assert_eq!(f.mock.call_count(), calls);
        assert_eq!(f.store.items().len(), 1);
        assert!(f.store.logs().is_empty());
    }

    #[tokio::test]
    async fn mutations_compose_without_hydrate() {
        let mut f = hydrated_with("").await;
        f.mock.set_fallback(200, "");

        let a = f
            .store
            .add_item("A", Category::Meat, Location::BottomDrawer, "u")
            .await
            .unwrap();
        f.store
            .add_item("B", Category::Herbs, Location::MiddleDrawer, "u")
            .await
            .unwrap();
        f.store.remove_item(&a.id, "u").await.unwrap();

        let sent = sent_document(&f.mock);
        assert_eq!(sent.items.len(), 1);
        assert_eq!(sent.items[0].name, "B");
        assert_eq!(sent.logs.len(), 3);
        assert_eq!(sent.logs[0].action, AuditAction::Removed);
    }

    #[tokio::test]
    async fn mutations_before_hydrate_never_overwrite_remote() {
        let mut f = fixture();
        assert!(!f.store.is_loaded());

        let err = f
            .store
            .add_item("Glace", Category::Dish, Location::Freezer, "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::NotHydrated));

        let err = f
            .store
            .remove_item(&ItemId::new("1"), "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::NotHydrated));

        assert_eq!(f.mock.call_count(), 0);
        assert_eq!(f.store.state(), StoreState::Uninitialized);
        assert!(!f.store.is_error_flagged());
    }

    #[tokio::test]
    async fn failed_first_hydrate_blocks_mutations() {
        let mut f = fixture();
        f.mock.push_response(500, "");
        f.store.hydrate().await.unwrap_err();
        assert_eq!(f.store.state(), StoreState::ErrorFlagged);
        assert!(!f.store.is_loaded());

        let err = f
            .store
            .add_item("Glace", Category::Dish, Location::Freezer, "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::NotHydrated));
        assert_eq!(f.mock.call_count(), 1);

        // A later successful fetch unlocks writes on top of remote data.
        f.mock.push_response(200, LEGACY).push_response(200, "");
        f.store.refresh().await.unwrap();
        f.store
            .add_item("Glace", Category::Dish, Location::Freezer, "alice")
            .await
            .unwrap();
        assert_eq!(sent_document(&f.mock).items.len(), 2);
    }

    #[tokio::test]
    async fn stale_store_still_accepts_mutations() {
        let mut f = hydrated_with(LEGACY).await;
        f.mock.push_response(503, "").push_response(200, "");
        f.store.refresh().await.unwrap_err();
        assert_eq!(f.store.state(), StoreState::ErrorFlagged);
        assert!(f.store.is_loaded());

        f.store
            .remove_item(&ItemId::new("1"), "bob")
            .await
            .unwrap();
        assert_eq!(f.store.state(), StoreState::Ready);
    }

    #[tokio::test]
    async fn reconfigure_requires_fresh_hydrate() {
        let mut f = hydrated_with(LEGACY).await;
        f.store
            .reconfigure(SessionConfig::new("key", "other").unwrap())
            .unwrap();
        assert!(!f.store.is_loaded());

        let err = f
            .store
            .add_item("Pesto", Category::Sauce, Location::Freezer, "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::NotHydrated));
    }

    #[tokio::test]
    async fn unreadable_record_keeps_inventory_visible_but_read_only() {
        let raw = r#"[{"id":"1","name":"Soup","category":"Plat","location":"Freezer","dateAdded":"2024-01-01T00:00:00Z"},{"id":"2","name":"Glace","category":"Dessert"}]"#;
        let mut f = hydrated_with(raw).await;

        assert_eq!(f.store.state(), StoreState::Ready);
        assert_eq!(f.store.items().len(), 1);
        assert_eq!(f.store.unreadable_records(), 1);

        let err = f
            .store
            .add_item("Pesto", Category::Sauce, Location::Freezer, "alice")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
        let err = f
            .store
            .remove_item(&ItemId::new("1"), "alice")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
        assert_eq!(f.mock.call_count(), 1);

        // Once the remote copy is repaired, writes resume.
        f.mock.push_response(200, LEGACY).push_response(200, "");
        f.store.refresh().await.unwrap();
        assert_eq!(f.store.unreadable_records(), 0);
        f.store
            .add_item("Pesto", Category::Sauce, Location::Freezer, "alice")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unconfigured_store_refuses_remote_calls() {
        let mock = Arc::new(MockHttpClient::new());
        let client = SyncClient::new(ClientConfig::default(), Arc::clone(&mock));
        let mut store = LocalStore::new(client, SessionContext::in_memory(None));

        assert!(matches!(store.hydrate().await, Err(SyncError::NotConfigured)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn setup_with_existing_document() {
        let mock = Arc::new(MockHttpClient::new());
        let client = SyncClient::new(ClientConfig::default(), Arc::clone(&mock));
        let mut store = LocalStore::new(client, SessionContext::in_memory(None));

        mock.push_response(404, "");
        let err = store.setup("key", Some("nope"), &[]).await.unwrap_err();
        assert!(matches!(err, SyncError::NotFound));
        assert!(!store.session().is_configured());

        mock.push_response(200, "");
        let config = store.setup("key", Some("doc"), &[]).await.unwrap();
        assert_eq!(config.document_id, "doc");
        assert_eq!(store.session().config(), Some(&config));
    }

    #[tokio::test]
    async fn setup_creates_document() {
        let mock = Arc::new(MockHttpClient::new());
        let client = SyncClient::new(ClientConfig::default(), Arc::clone(&mock));
        let mut store = LocalStore::new(client, SessionContext::in_memory(None));

        mock.push_response(201, r#"{"uri":"https://api.jsonstorage.net/v1/json/u/fresh"}"#);
        let config = store.setup("key", None, &[]).await.unwrap();
        assert_eq!(config.document_id, "fresh");
        assert_eq!(store.state(), StoreState::Uninitialized);
    }

    #[tokio::test]
    async fn replace_credential_keeps_document() {
        let mut f = fixture();
        f.store.replace_credential("rotated").unwrap();
        let stored = f.config_store.stored().unwrap();
        assert_eq!(stored.credential, "rotated");
        assert_eq!(stored.document_id, "doc");
    }
}
