use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::StatusCode;
use thiserror::Error;

// Keep path separators and the usual filename characters intact.
const OBJECT_KEY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("object store rejected upload: {0}")]
    Rejected(StatusCode),
}

/// Client for the object store's HTTP API. Uploads land in a bucket under a
/// caller-chosen key and are served back from a stable public URL.
#[derive(Debug, Clone)]
pub struct StorageClient {
    base_url: String,
    service_key: String,
    http: reqwest::Client,
}

impl StorageClient {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            service_key: service_key.into(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let url = format!(
            "{}/object/{}/{}",
            self.base_url,
            bucket,
            utf8_percent_encode(key, OBJECT_KEY)
        );
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.service_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::Rejected(response.status()));
        }
        Ok(())
    }

    pub fn public_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/object/public/{}/{}",
            self.base_url,
            bucket,
            utf8_percent_encode(key, OBJECT_KEY)
        )
    }
}
