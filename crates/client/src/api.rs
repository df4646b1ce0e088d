//! REST client for the upstream absence and conflict endpoints.
//!
//! Wraps the two read-only JSON endpoints (absence listing and per-absence
//! conflict lookup) using [`reqwest`].

use std::time::Duration;

use absences_core::absence::{AbsenceRecord, ConflictRecord};
use absences_core::types::AbsenceId;
use async_trait::async_trait;

use crate::source::AbsenceSource;

/// HTTP client for the absences API.
pub struct AbsenceApi {
    client: reqwest::Client,
    absences_url: String,
    conflict_url: String,
}

/// Errors from the absences REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum AbsenceApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, body
    /// decoding, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Absences API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl AbsenceApi {
    /// Create a new API client.
    ///
    /// * `absences_url` - Full URL of the absence listing.
    /// * `conflict_url` - Base URL of the conflict lookup; the absence id is
    ///   appended as a path segment.
    pub fn new(absences_url: String, conflict_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), absences_url, conflict_url)
    }

    /// Create an API client whose requests give up after `timeout`.
    pub fn with_timeout(
        absences_url: String,
        conflict_url: String,
        timeout: Duration,
    ) -> Result<Self, AbsenceApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, absences_url, conflict_url))
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, absences_url: String, conflict_url: String) -> Self {
        Self {
            client,
            absences_url,
            conflict_url,
        }
    }

    /// URL of the conflict lookup for `id`.
    pub fn conflict_url_for(&self, id: AbsenceId) -> String {
        format!("{}/{}", self.conflict_url.trim_end_matches('/'), id)
    }

    /// Fetch every absence.
    ///
    /// Sends `GET <absences_url>` and decodes a JSON array of
    /// [`AbsenceRecord`].
    pub async fn get_absences(&self) -> Result<Vec<AbsenceRecord>, AbsenceApiError> {
        let response = self.client.get(&self.absences_url).send().await?;
        Self::parse_response(response).await
    }

    /// Fetch the conflict flag for one absence.
    ///
    /// Sends `GET <conflict_url>/{id}`.
    pub async fn get_conflict(&self, id: AbsenceId) -> Result<ConflictRecord, AbsenceApiError> {
        let response = self.client.get(self.conflict_url_for(id)).send().await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`AbsenceApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, AbsenceApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AbsenceApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AbsenceApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AbsenceSource for AbsenceApi {
    async fn fetch_absences(&self) -> Result<Vec<AbsenceRecord>, AbsenceApiError> {
        self.get_absences().await
    }

    async fn fetch_conflict(&self, id: AbsenceId) -> Result<ConflictRecord, AbsenceApiError> {
        self.get_conflict(id).await
    }
}
