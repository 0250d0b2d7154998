//! Server configuration.

/// Shape of the creation response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateResponseStyle {
    /// `{"uri": "<base>/<id>"}`.
    #[default]
    Locator,
    /// `"<id>"`.
    BareId,
}

/// Configuration for the blob service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Public collection URI; documents live at `<base_uri>/<id>`.
    pub base_uri: String,
    /// API keys allowed to create and write documents.
    pub api_keys: Vec<String>,
    /// Creation response shape.
    pub create_style: CreateResponseStyle,
    /// Whether reads also need a valid key.
    pub require_key_for_read: bool,
}

impl ServerConfig {
    /// Creates a configuration serving under `base_uri`.
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into().trim_end_matches('/').to_string(),
            api_keys: Vec::new(),
            create_style: CreateResponseStyle::default(),
            require_key_for_read: false,
        }
    }

    /// Accepts `key` for writes.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_keys.push(key.into());
        self
    }

    /// Sets the creation response shape.
    pub fn with_create_style(mut self, style: CreateResponseStyle) -> Self {
        self.create_style = style;
        self
    }

    /// Requires a valid key on reads too.
    pub fn with_key_for_read(mut self, required: bool) -> Self {
        self.require_key_for_read = required;
        self
    }

    /// Path component of [`base_uri`](Self::base_uri), e.g. `/v1/json`.
    pub fn base_path(&self) -> &str {
        let without_scheme = self
            .base_uri
            .split_once("://")
            .map_or(self.base_uri.as_str(), |(_, rest)| rest);
        without_scheme
            .find('/')
            .map_or("", |i| &without_scheme[i..])
    }

    /// Returns true if `key` is accepted.
    pub fn accepts_key(&self, key: &str) -> bool {
        self.api_keys.iter().any(|k| k == key)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("http://localhost/v1/json")
    }
}
