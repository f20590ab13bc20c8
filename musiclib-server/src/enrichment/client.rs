//! HTTP client for the metadata service
//!
//! `GET {base}/info?group=<group>&song=<title>`; 200 carries a
//! [`SongDetail`] body, any other status means "no entry".

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::{LookupError, MetadataLookup, SongDetail};

/// Default per-request timeout for the metadata service
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// reqwest-backed [`MetadataLookup`]
#[derive(Debug, Clone)]
pub struct HttpMetadataClient {
    http: Client,
    base_url: Url,
}

impl HttpMetadataClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8081`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| LookupError::Unavailable(format!("invalid base url: {e}")))?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Unavailable(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    /// Full lookup URL with query parameters encoded.
    pub fn info_url(&self, group: &str, title: &str) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}/info", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url.query_pairs_mut()
            .clear()
            .append_pair("group", group)
            .append_pair("song", title);
        url
    }
}

#[async_trait]
impl MetadataLookup for HttpMetadataClient {
    async fn lookup(&self, group: &str, title: &str) -> Result<SongDetail, LookupError> {
        let url = self.info_url(group, title);

        let response = self.http.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout
            } else {
                LookupError::Unavailable(e.to_string())
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(LookupError::NotFound {
                status: status.as_u16(),
            });
        }

        response.json::<SongDetail>().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout
            } else {
                LookupError::Decode(e.to_string())
            }
        })
    }
}
