//! S3-compatible HTTP object store.

use async_trait::async_trait;

use crate::error::{QuillError, Result};
use crate::types::Artifact;

use super::ArtifactStore;

/// Writes objects with `PUT {endpoint}/{bucket}/{key}`, the path-style
/// convention S3-compatible stores accept.
pub struct HttpArtifactStore {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpArtifactStore {
    pub fn new(endpoint: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| QuillError::Configuration(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

}

#[async_trait]
impl ArtifactStore for HttpArtifactStore {
    async fn put(&self, artifact: &Artifact) -> Result<()> {
        let url = format!("{}/{}/{}", self.endpoint, artifact.bucket, artifact.key);

        let resp = self
            .client
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(artifact.body.clone())
            .send()
            .await
            .map_err(|e| QuillError::Storage(format!("put {url}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(QuillError::Storage(format!(
                "put {url}: status {status}: {body}"
            )));
        }
        Ok(())
    }
}
