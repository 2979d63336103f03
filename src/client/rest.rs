use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde_json::json;
use tracing::{debug, warn};

use super::config::{ClientConfig, ResourceLayout, REQUEST_TIMEOUT};
use super::error::{VaultError, VaultResult};
use super::file::VaultFile;
use super::VaultApi;

/// Media type that asks the backend for the note plus its metadata.
pub const NOTE_JSON_MEDIA_TYPE: &str = "application/vnd.olrapi.note+json";

/// HTTP client for the vault REST API.
///
/// Cheap to share behind an `Arc`: the underlying `reqwest::Client` owns the
/// connection pool and nothing here is mutated after construction.
#[derive(Clone)]
pub struct RestClient {
    base_url: String,
    api_key: String,
    layout: ResourceLayout,
    http: Client,
}

impl RestClient {
    pub fn new(config: ClientConfig) -> VaultResult<Self> {
        Self::with_timeout(config, REQUEST_TIMEOUT)
    }

    pub(crate) fn with_timeout(config: ClientConfig, timeout: Duration) -> VaultResult<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(VaultError::Config("base URL is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|e| VaultError::Config(format!("failed to build HTTP client: {}", e)))?;

        debug!(
            base_url = %base_url,
            layout = %config.layout,
            verify_tls = config.verify_tls,
            "vault client configured"
        );

        Ok(Self {
            base_url,
            api_key: config.api_key,
            layout: config.layout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn layout(&self) -> ResourceLayout {
        self.layout
    }

    /// URL of a single file under the configured layout.
    pub fn file_url(&self, path: &str) -> VaultResult<String> {
        Ok(format!(
            "{}{}{}",
            self.base_url,
            self.layout.file_prefix(),
            encode_path(path)?
        ))
    }

    fn collection_url(&self) -> String {
        format!("{}/vault/files", self.base_url)
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.api_key)
    }

    async fn send(&self, method: &str, url: &str, builder: RequestBuilder) -> VaultResult<Response> {
        debug!(method, url, "vault request");
        let response = self.request(builder).send().await.map_err(|e| {
            warn!(method, url, error = %e, "vault request did not complete");
            VaultError::from(e)
        })?;
        debug!(method, url, status = response.status().as_u16(), "vault response");
        Ok(response)
    }
}

/// Drain a non-success response into a `BackendRequestFailed`.
async fn failure(response: Response) -> VaultError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
    warn!(status, "vault backend returned an error status");
    VaultError::BackendRequestFailed { status, body }
}

/// Check that `path` names a note inside the vault.
///
/// A single leading `/` is tolerated. Empty, `.` and `..` segments are
/// rejected: the URL parser would resolve them and the request could leave
/// the vault resource.
pub fn validate_path(path: &str) -> VaultResult<()> {
    let invalid = |reason| VaultError::InvalidPath {
        path: path.to_string(),
        reason,
    };

    let relative = path.strip_prefix('/').unwrap_or(path);
    if relative.is_empty() {
        return Err(invalid("path is empty"));
    }
    for segment in relative.split('/') {
        match segment {
            "" => return Err(invalid("empty segments are not allowed")),
            "." | ".." => return Err(invalid("'.' and '..' segments are not allowed")),
            _ => {}
        }
    }
    Ok(())
}

/// Percent-encode each path segment, keeping `/` separators.
fn encode_path(path: &str) -> VaultResult<String> {
    validate_path(path)?;
    Ok(path
        .strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/"))
}

#[async_trait]
impl VaultApi for RestClient {
    async fn get_file(&self, path: &str) -> VaultResult<VaultFile> {
        let url = self.file_url(path)?;
        let builder = self
            .http
            .get(&url)
            .header(header::ACCEPT, NOTE_JSON_MEDIA_TYPE);
        let response = self.send("GET", &url, builder).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(VaultError::NotFound {
                path: path.to_string(),
            }),
            status if status.is_success() => {
                let body = response.bytes().await?;
                Ok(serde_json::from_slice(&body)?)
            }
            _ => Err(failure(response).await),
        }
    }

    async fn update_file(&self, path: &str, content: &str) -> VaultResult<()> {
        let url = self.file_url(path)?;
        let builder = match self.layout {
            ResourceLayout::Flat => self
                .http
                .put(&url)
                .header(header::CONTENT_TYPE, "text/markdown")
                .body(content.to_string()),
            ResourceLayout::Files => self.http.put(&url).json(&json!({ "content": content })),
        };
        let response = self.send("PUT", &url, builder).await?;

        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            _ => Err(failure(response).await),
        }
    }

    /// Only the files layout has a create endpoint. On the flat API a POST to
    /// `/vault/{path}` appends, so flat clients refuse before sending.
    async fn create_file(&self, path: &str, content: &str) -> VaultResult<()> {
        if self.layout == ResourceLayout::Flat {
            return Err(VaultError::Unsupported {
                operation: "create",
                layout: self.layout.as_str(),
            });
        }
        validate_path(path)?;
        let url = self.collection_url();
        let builder = self
            .http
            .post(&url)
            .json(&json!({ "path": path, "content": content }));
        let response = self.send("POST", &url, builder).await?;

        match response.status() {
            StatusCode::CREATED => Ok(()),
            _ => Err(failure(response).await),
        }
    }

    async fn delete_file(&self, path: &str) -> VaultResult<()> {
        let url = self.file_url(path)?;
        let builder = self.http.delete(&url);
        let response = self.send("DELETE", &url, builder).await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(()),
            _ => Err(failure(response).await),
        }
    }

    async fn get_file_content(&self, path: &str) -> VaultResult<String> {
        let url = self.file_url(path)?;
        let builder = self.http.get(&url);
        let response = self.send("GET", &url, builder).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(VaultError::NotFound {
                path: path.to_string(),
            }),
            status if status.is_success() => {
                let body = response.bytes().await?;
                String::from_utf8(body.to_vec())
                    .map_err(|e| VaultError::MalformedResponse(e.to_string()))
            }
            _ => Err(failure(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    fn client(base: &str, layout: ResourceLayout) -> RestClient {
        RestClient::new(ClientConfig::new(base, "key").with_layout(layout)).unwrap()
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let result = RestClient::new(ClientConfig::new("  ", "key"));
        assert!(matches!(result, Err(VaultError::Config(_))));
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        let c = client("http://vault.local:27123/", ResourceLayout::Flat);
        assert_eq!(c.base_url(), "http://vault.local:27123");
        assert_eq!(c.file_url("a.md").unwrap(), "http://vault.local:27123/vault/a.md");
    }

    #[test]
    fn file_url_follows_layout() {
        let flat = client("http://h", ResourceLayout::Flat);
        let files = client("http://h", ResourceLayout::Files);
        assert_eq!(flat.file_url("Notes/x.md").unwrap(), "http://h/vault/Notes/x.md");
        assert_eq!(
            files.file_url("Notes/x.md").unwrap(),
            "http://h/vault/files/Notes/x.md"
        );
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        let c = client("http://h", ResourceLayout::Flat);
        assert_eq!(
            c.file_url("/Daily Notes/what? #1.md").unwrap(),
            "http://h/vault/Daily%20Notes/what%3F%20%231.md"
        );
    }

    #[test]
    fn dot_segments_cannot_leave_the_vault() {
        let c = client("http://h", ResourceLayout::Flat);
        for path in ["../active/", "a/../../b.md", "./x.md", "a//b.md", "", "/", "a/"] {
            let err = c.file_url(path).unwrap_err();
            assert!(matches!(err, VaultError::InvalidPath { .. }), "{:?}: {:?}", path, err);
        }
        assert!(validate_path("notes/..hidden.md").is_ok());
        assert!(validate_path("/a/b.md").is_ok());
    }

    #[test]
    fn insecure_tls_client_builds() {
        let config = ClientConfig::new("https://127.0.0.1:27124", "key").with_verify_tls(false);
        assert!(RestClient::new(config).is_ok());
    }

    #[tokio::test]
    async fn stalled_backend_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let c = RestClient::with_timeout(
            ClientConfig::new(format!("http://{}", addr), "key"),
            Duration::from_millis(200),
        )
        .unwrap();

        let err = c.get_file("slow.md").await.unwrap_err();
        assert!(matches!(err, VaultError::Timeout), "got {:?}", err);
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let c = client(&format!("http://{}", addr), ResourceLayout::Flat);
        let err = c.delete_file("a.md").await.unwrap_err();
        assert!(matches!(err, VaultError::Transport(_)), "got {:?}", err);
        assert!(err.to_string().starts_with("request failed"));
    }
}
