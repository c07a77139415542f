use std::io::Read;

use serde::de::DeserializeOwned;

use crate::osf::OsfError;

pub mod http;

pub use http::HttpTransport;

/// Opened streaming response
#[derive(Debug)]
pub struct StreamResponse<R> {
    /// Value of the `content-length` header, if the server sent one
    pub content_length: Option<u64>,

    /// Response body reader
    pub body: R
}

pub trait TransportExt {
    type Body: Read;

    /// Request given URL and decode its body as JSON document
    ///
    /// Return `OsfError::Request` if the request failed or the server
    /// responded with an error status, `OsfError::Protocol` if the body
    /// doesn't match the expected shape
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, OsfError>;

    /// Open streaming GET request to the given URL
    ///
    /// Status code is checked before the body is returned
    fn get_stream(&self, url: &str) -> Result<StreamResponse<Self::Body>, OsfError>;
}
