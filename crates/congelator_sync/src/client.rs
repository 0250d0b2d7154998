//! Sync client for the remote document service.
//!
//! Four verbs over whole documents: create, check, fetch and replace.
//! Status codes are mapped onto [`SyncError`] here; retries live in the
//! [`Transport`] underneath.

use crate::config::{AuthScheme, ClientConfig};
use crate::error::{SyncError, SyncResult};
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use crate::session::SessionConfig;
use crate::transport::Transport;
use congelator_model::{decode_detailed, encode, CreateResponse, DecodeOptions, Decoded, Document, Item};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::{debug, info, warn};

/// Characters left unescaped in path segments and query values.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Client for the remote document service.
pub struct SyncClient<C: HttpClient> {
    config: ClientConfig,
    transport: Transport<C>,
}

impl<C: HttpClient> SyncClient<C> {
    /// Creates a client.
    pub fn new(config: ClientConfig, client: C) -> Self {
        let transport = Transport::new(client, config.retry.clone());
        Self { config, transport }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the transport.
    pub fn transport(&self) -> &Transport<C> {
        &self.transport
    }

    /// Creates a remote document holding `initial_items` and an empty log.
    ///
    /// Returns the identifier assigned by the service.
    pub async fn create_document(
        &self,
        credential: &str,
        initial_items: &[Item],
    ) -> SyncResult<String> {
        let body = encode(&Document::from_items(initial_items.to_vec()))?;
        let request = self
            .authorize(HttpRequest::post(self.config.base_url.clone()), credential)
            .with_json_body(body);

        let response = self.transport.send(&request).await?;
        if !response.is_success() {
            return Err(SyncError::CreationFailed {
                status: response.status,
            });
        }

        let id = CreateResponse::parse(&response.body)?.document_id()?;
        info!(document_id = %id, items = initial_items.len(), "document created");
        Ok(id)
    }

    /// Probes the configured document with a single request.
    pub async fn check_connection(&self, session: &SessionConfig) -> SyncResult<()> {
        let request = self.read_request(session);
        let response = self.transport.send_once(&request).await?;
        match response.status {
            404 => Err(SyncError::NotFound),
            _ if response.is_success() => Ok(()),
            status => Err(SyncError::ConnectionFailed { status }),
        }
    }

    /// Fetches and decodes the configured document.
    pub async fn fetch_document(&self, session: &SessionConfig) -> SyncResult<Document> {
        Ok(self.fetch_decoded(session).await?.document)
    }

    /// Fetches the configured document, keeping the decode report.
    ///
    /// Records that do not match the schema are left out of the document
    /// and listed in [`Decoded::skipped`].
    pub async fn fetch_decoded(&self, session: &SessionConfig) -> SyncResult<Decoded> {
        let request = self.read_request(session);
        let response = self.transport.send(&request).await?;
        match response.status {
            404 => return Err(SyncError::NotFound),
            _ if response.is_success() => {}
            status => return Err(SyncError::FetchFailed { status }),
        }

        let decoded = decode_detailed(&response.body, DecodeOptions::default())?;
        for err in &decoded.skipped {
            warn!(error = %err, "skipping unreadable record");
        }
        debug!(
            shape = ?decoded.shape,
            items = decoded.document.items.len(),
            logs = decoded.document.logs.len(),
            skipped = decoded.skipped.len(),
            "document fetched"
        );
        Ok(decoded)
    }

    /// Overwrites the configured document with `document`.
    pub async fn replace_document(
        &self,
        session: &SessionConfig,
        document: &Document,
    ) -> SyncResult<()> {
        let body = encode(document)?;
        let url = self.document_url(&session.document_id);
        let request = self
            .authorize(HttpRequest::put(url), &session.credential)
            .with_json_body(body);

        let response = self.transport.send(&request).await?;
        map_replace_status(&response)
    }

    fn document_url(&self, document_id: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url,
            utf8_percent_encode(document_id, COMPONENT)
        )
    }

    /// Reads carry the credential only under bearer auth; the hosted
    /// backend serves documents publicly by id.
    fn read_request(&self, session: &SessionConfig) -> HttpRequest {
        let request = HttpRequest::get(self.document_url(&session.document_id));
        match self.config.auth {
            AuthScheme::QueryApiKey => request,
            AuthScheme::Bearer => self.authorize(request, &session.credential),
        }
    }

    fn authorize(&self, mut request: HttpRequest, credential: &str) -> HttpRequest {
        match self.config.auth {
            AuthScheme::QueryApiKey => {
                request.url = format!(
                    "{}?apiKey={}",
                    request.url,
                    utf8_percent_encode(credential, COMPONENT)
                );
                request
            }
            AuthScheme::Bearer => {
                request.with_header("Authorization", format!("Bearer {credential}"))
            }
        }
    }
}

fn map_replace_status(response: &HttpResponse) -> SyncResult<()> {
    match response.status {
        404 => Err(SyncError::NotFound),
        401 | 403 => Err(SyncError::AuthFailed(format!("status {}", response.status))),
        _ if response.is_success() => Ok(()),
        status => Err(SyncError::ReplaceFailed { status }),
    }
}
