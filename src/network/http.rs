use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;

use crate::osf::OsfError;

use super::{StreamResponse, TransportExt};

/// HTTP transport over a single reused `reqwest` blocking client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration
}

impl HttpTransport {
    /// Build transport with `REQUESTS_TIMEOUT` applied to metadata requests
    #[inline]
    pub fn new() -> Result<Self, OsfError> {
        Self::with_timeout(*crate::REQUESTS_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, OsfError> {
        // No client-wide timeout: it would cover the whole body of
        // arbitrarily large streamed archives
        let client = Client::builder()
            .user_agent(format!("osf-downloader/{}", crate::VERSION))
            .timeout(None::<Duration>)
            .build()?;

        Ok(Self {
            client,
            timeout
        })
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl TransportExt for HttpTransport {
    type Body = Response;

    #[tracing::instrument(level = "trace", skip(self))]
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, OsfError> {
        tracing::trace!("Fetching JSON document");

        let body = self.client.get(url)
            .header(ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()?
            .error_for_status()?
            .text()?;

        Ok(serde_json::from_str(&body)?)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn get_stream(&self, url: &str) -> Result<StreamResponse<Self::Body>, OsfError> {
        tracing::trace!("Opening download stream");

        let response = self.client.get(url)
            .send()?
            .error_for_status()?;

        Ok(StreamResponse {
            content_length: response.content_length(),
            body: response
        })
    }
}
