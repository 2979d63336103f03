use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Every request to the vault backend is bounded by this timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Resource-path convention used by the backend.
///
/// `Flat` matches the Obsidian Local REST API (`/vault/{path}`, raw markdown
/// bodies). `Files` is the alternate layout (`/vault/files/{path}`, JSON
/// `{"content": ...}` bodies). Both share `POST /vault/files` for creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceLayout {
    #[default]
    Flat,
    Files,
}

impl ResourceLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceLayout::Flat => "flat",
            ResourceLayout::Files => "files",
        }
    }

    /// Path prefix (relative to the base URL) under which single files live.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            ResourceLayout::Flat => "/vault/",
            ResourceLayout::Files => "/vault/files/",
        }
    }
}

impl fmt::Display for ResourceLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(ResourceLayout::Flat),
            "files" => Ok(ResourceLayout::Files),
            other => Err(format!(
                "unknown resource layout '{}' (must be: flat|files)",
                other
            )),
        }
    }
}

/// Connection settings for the vault backend.
///
/// Built once at startup and never mutated; the client keeps its own copy.
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub verify_tls: bool,
    pub layout: ResourceLayout,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            verify_tls: true,
            layout: ResourceLayout::default(),
        }
    }

    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    pub fn with_layout(mut self, layout: ResourceLayout) -> Self {
        self.layout = layout;
        self
    }
}

// Hand-written so the API key never ends up in logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("verify_tls", &self.verify_tls)
            .field("layout", &self.layout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_verify_tls_and_flat_layout() {
        let config = ClientConfig::new("https://127.0.0.1:27124", "secret");
        assert!(config.verify_tls);
        assert_eq!(config.layout, ResourceLayout::Flat);
    }

    #[test]
    fn layout_parses_case_insensitively() {
        assert_eq!("Files".parse::<ResourceLayout>(), Ok(ResourceLayout::Files));
        assert_eq!(" flat ".parse::<ResourceLayout>(), Ok(ResourceLayout::Flat));
        assert!("nested".parse::<ResourceLayout>().is_err());
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = ClientConfig::new("http://localhost", "top-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
