//! Data loader: fetches the mapping document once at startup.
//!
//! The location is configuration: a local path or an `http(s)://` URL. There is
//! no retry and no timeout beyond the HTTP client's defaults.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::validation::{find_unresolved, ReferencePolicy, UnresolvedReference};
use crate::catalog::Catalog;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("mapping document is not valid: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{} unresolved reference(s), first: {}", .0.len(), first_reference(.0))]
    UnresolvedReferences(Vec<UnresolvedReference>),
}

fn first_reference(refs: &[UnresolvedReference]) -> String {
    refs.first().map(ToString::to_string).unwrap_or_default()
}

/// Where the mapping document comes from.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self) -> Result<String, LoadError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

#[async_trait]
impl DocumentSource for FileSource {
    async fn fetch(&self) -> Result<String, LoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.display().to_string(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self) -> Result<String, LoadError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Picks an HTTP source for `http://` / `https://` locations, a file otherwise.
pub fn source_from_location(location: &str) -> Box<dyn DocumentSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource {
            path: PathBuf::from(location),
        })
    }
}

/// Fetches, parses and checks the document.
///
/// Under `ReferencePolicy::Placeholder` each unresolved reference is logged and
/// the catalog is still returned; under `Reject` the load fails.
pub async fn load_catalog(
    source: &dyn DocumentSource,
    policy: ReferencePolicy,
) -> Result<Catalog, LoadError> {
    info!("Loading mapping document from {}", source.describe());

    let raw = source.fetch().await?;
    let catalog = Catalog::from_json(&raw)?;

    let unresolved = find_unresolved(&catalog);
    if !unresolved.is_empty() {
        match policy {
            ReferencePolicy::Reject => return Err(LoadError::UnresolvedReferences(unresolved)),
            ReferencePolicy::Placeholder => {
                for reference in &unresolved {
                    warn!("Unresolved reference: {reference}");
                }
            }
        }
    }

    info!(
        "Mapping loaded: {} roles, {} skills, {} responsibilities",
        catalog.role_count(),
        catalog.skill_count(),
        catalog.responsibility_count()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::net::SocketAddr;

    use axum::{routing::get, Router};

    use super::*;
    use crate::catalog::fixtures::SAMPLE_JSON;

    struct StaticSource(&'static str);

    #[async_trait]
    impl DocumentSource for StaticSource {
        async fn fetch(&self) -> Result<String, LoadError> {
            Ok(self.0.to_string())
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    const GAPPY_JSON: &str = r#"{
        "skills": {},
        "responsibilities": {},
        "roles": { "Ops": { "description": "ops", "responsibilities": ["r1"] } }
    }"#;

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_JSON.as_bytes()).unwrap();

        let source = FileSource {
            path: file.path().to_path_buf(),
        };
        let catalog = load_catalog(&source, ReferencePolicy::Reject).await.unwrap();
        assert_eq!(catalog.role_names().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource {
            path: dir.path().join("absent.json"),
        };
        let err = load_catalog(&source, ReferencePolicy::Placeholder)
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_malformed_document_is_parse_error() {
        let err = load_catalog(&StaticSource("{\"roles\": ["), ReferencePolicy::Placeholder)
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[tokio::test]
    async fn test_placeholder_policy_tolerates_gaps() {
        let catalog = load_catalog(&StaticSource(GAPPY_JSON), ReferencePolicy::Placeholder)
            .await
            .unwrap();
        assert_eq!(catalog.role_count(), 1);
    }

    #[tokio::test]
    async fn test_reject_policy_fails_on_gaps() {
        let err = load_catalog(&StaticSource(GAPPY_JSON), ReferencePolicy::Reject)
            .await
            .unwrap_err();
        match err {
            LoadError::UnresolvedReferences(refs) => assert_eq!(refs.len(), 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_bundled_mapping_is_fully_resolved() {
        let bundled = StaticSource(include_str!("../../data/mapping.json"));
        let catalog = load_catalog(&bundled, ReferencePolicy::Reject).await.unwrap();
        assert_eq!(
            catalog.role_names().next(),
            Some("Application Developer")
        );
    }

    async fn serve(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn local_source(addr: SocketAddr, path: &str) -> HttpSource {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpSource::with_client(client, format!("http://{addr}{path}"))
    }

    #[tokio::test]
    async fn test_load_over_http() {
        let addr = serve(Router::new().route("/mapping.json", get(|| async { SAMPLE_JSON }))).await;

        let source = local_source(addr, "/mapping.json");
        let catalog = load_catalog(&source, ReferencePolicy::Reject).await.unwrap();
        assert_eq!(catalog.role_names().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_http_error_status_is_reported() {
        let addr = serve(Router::new().route("/mapping.json", get(|| async { SAMPLE_JSON }))).await;

        let source = local_source(addr, "/missing.json");
        let err = load_catalog(&source, ReferencePolicy::Placeholder)
            .await
            .unwrap_err();
        match err {
            LoadError::Status { status, url } => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/missing.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_source_selection() {
        assert_eq!(
            source_from_location("https://example.org/mapping.json").describe(),
            "https://example.org/mapping.json"
        );
        assert_eq!(
            source_from_location("data/mapping.json").describe(),
            "data/mapping.json"
        );
    }
}
