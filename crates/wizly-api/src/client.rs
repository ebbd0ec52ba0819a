// Bulb backend HTTP client
//
// Wraps `reqwest::Client` with backend URL construction, status checking,
// and envelope unwrapping. Endpoint methods live in `bulbs.rs` as inherent
// methods to keep this module focused on transport mechanics.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{BulbRecord, BulbsResponse};
use crate::transport::TransportConfig;

/// Raw HTTP client for the bulb backend.
///
/// Handles the `{ bulbs } | { error }` envelope and path-segment URL
/// construction. List-returning methods hand back the unwrapped bulb
/// records; the envelope never reaches the caller.
#[derive(Debug, Clone)]
pub struct BulbClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BulbClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `http://192.168.1.20:8001`).
    /// A path prefix is allowed (`http://host/lights/`) and is kept in
    /// front of every endpoint path.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{seg}/{seg}/...`, percent-encoding each segment so an
    /// address can never escape its own path component.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the bulbs envelope. `timeout`
    /// replaces the client-wide request timeout for this call.
    pub(crate) async fn get_bulbs(
        &self,
        url: Url,
        timeout: Option<Duration>,
    ) -> Result<Vec<BulbRecord>, Error> {
        debug!("GET {}", url);

        let mut req = self.http.get(url);
        if let Some(timeout) = timeout {
            req = req.timeout(timeout);
        }
        let resp = req.send().await.map_err(Error::Transport)?;

        let envelope: BulbsResponse = Self::parse_json(resp).await?;
        envelope.into_result()
    }

    /// Send a GET request and decode a bare JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        Self::parse_json(resp).await
    }

    /// Send a PUT request with JSON body and unwrap the bulbs envelope.
    pub(crate) async fn put_bulbs(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<Vec<BulbRecord>, Error> {
        debug!("PUT {}", url);

        let resp = self
            .http
            .put(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let envelope: BulbsResponse = Self::parse_json(resp).await?;
        envelope.into_result()
    }

    /// Send a DELETE request. Success is decided by the status alone;
    /// whatever body comes back is discarded.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);

        let resp = self
            .http
            .delete(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::check_status(&resp)?;
        Ok(())
    }

    // ── Response handling ────────────────────────────────────────────

    /// Reject any non-2xx status, regardless of body content.
    fn check_status(resp: &reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Error::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_owned(),
        })
    }

    /// Check the status, then decode the body as JSON.
    async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        Self::check_status(&resp)?;

        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(len = body.len(), "response body received");

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }
}
