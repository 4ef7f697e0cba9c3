//! HTTP object client
//!
//! Protocol:
//! - `GET {endpoint}/{bucket}?prefix=P` answers `{"keys": [...]}`
//! - `GET {endpoint}/{bucket}/{key}` answers the object, 404 when absent
//! - `PUT {endpoint}/{bucket}/{key}` with `If-None-Match: *`, 412 when the
//!   object already exists
//!
//! Transport failures, timeouts and 5xx answers are `StoreUnavailable`.

use crate::backend::object::ObjectClient;
use crate::backend::CreateOutcome;
use crate::errors::{store_unavailable, Result};
use pressroom_core::errors::{ExError, ExErrorKind};
use reqwest::blocking::{Client, Response};
use reqwest::header::{CONTENT_TYPE, IF_NONE_MATCH};
use reqwest::StatusCode;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;

/// Header carrying the hex SHA-256 of a PUT body, for end-to-end integrity
pub const CONTENT_SHA256_HEADER: &str = "x-content-sha256";

const NAME: &str = "http";

#[derive(Debug, Deserialize)]
struct ListResponse {
    keys: Vec<String>,
}

pub struct HttpObjectClient {
    http: Client,
    endpoint: String,
    bucket: String,
}

impl HttpObjectClient {
    /// Client for `bucket` at `endpoint` (e.g. `http://127.0.0.1:9000`)
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::Config` if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, bucket: impl Into<String>) -> Result<Self> {
        let http = Client::builder().build().map_err(|e| {
            ExError::new(ExErrorKind::Config)
                .with_op("http_client_init")
                .with_message(e.to_string())
        })?;
        Ok(Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            bucket: bucket.into(),
        })
    }

    fn bucket_url(&self) -> String {
        format!("{}/{}", self.endpoint, self.bucket)
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.bucket_url(), key)
    }
}

fn transport_error(operation: &str, err: reqwest::Error) -> ExError {
    let reason = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else {
        err.to_string()
    };
    store_unavailable(operation, NAME, reason)
}

fn unexpected_status(operation: &str, response: &Response) -> ExError {
    store_unavailable(
        operation,
        NAME,
        format!("unexpected status {}", response.status()),
    )
}

fn content_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

impl ObjectClient for HttpObjectClient {
    fn name(&self) -> &'static str {
        NAME
    }

    fn list_keys(&self, prefix: &str, timeout: Duration) -> Result<Vec<String>> {
        let response = self
            .http
            .get(self.bucket_url())
            .query(&[("prefix", prefix)])
            .timeout(timeout)
            .send()
            .map_err(|e| transport_error("object_list", e))?;

        if !response.status().is_success() {
            return Err(unexpected_status("object_list", &response));
        }

        let listing: ListResponse = response.json().map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("object_list")
                .with_message(format!("Invalid listing response: {}", e))
        })?;
        Ok(listing.keys)
    }

    fn get_object(&self, key: &str, timeout: Duration) -> Result<Option<Vec<u8>>> {
        let response = self
            .http
            .get(self.object_url(key))
            .timeout(timeout)
            .send()
            .map_err(|e| transport_error("object_read", e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let bytes = response
                    .bytes()
                    .map_err(|e| transport_error("object_read", e))?;
                Ok(Some(bytes.to_vec()))
            }
            _ => Err(unexpected_status("object_read", &response)),
        }
    }

    fn put_if_absent(&self, key: &str, bytes: &[u8], timeout: Duration) -> Result<CreateOutcome> {
        let response = self
            .http
            .put(self.object_url(key))
            .header(IF_NONE_MATCH, "*")
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_SHA256_HEADER, content_digest(bytes))
            .body(bytes.to_vec())
            .timeout(timeout)
            .send()
            .map_err(|e| transport_error("object_create", e))?;

        match response.status() {
            StatusCode::PRECONDITION_FAILED => Ok(CreateOutcome::AlreadyExists),
            status if status.is_success() => Ok(CreateOutcome::Created),
            _ => Err(unexpected_status("object_create", &response)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_trim_trailing_slash() {
        let client = HttpObjectClient::new("http://127.0.0.1:9000/", "site").unwrap();
        assert_eq!(
            client.object_url("releases/home/1.0.0.json"),
            "http://127.0.0.1:9000/site/releases/home/1.0.0.json"
        );
    }

    #[test]
    fn test_content_digest_is_sha256_hex() {
        let digest = content_digest(b"test");
        assert_eq!(digest.len(), 64);
        assert_eq!(
            digest,
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_refused_connection_is_unavailable() {
        // Port 1 is never served in the test environment
        let client = HttpObjectClient::new("http://127.0.0.1:1", "site").unwrap();

        let err = client
            .get_object("releases/home/1.0.0.json", Duration::from_secs(2))
            .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::StoreUnavailable);
        assert_ne!(err.kind(), ExErrorKind::NotFound);
    }
}
