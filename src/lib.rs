use std::time::Duration;

pub mod consts;
pub mod network;
pub mod osf;
pub mod downloader;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use super::consts::*;
    pub use super::network::{TransportExt, HttpTransport};
    pub use super::osf::OsfError;
    pub use super::downloader::{Downloader, DownloadTarget, Update};
    pub use super::downloader::save_path::resolve_save_path;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

lazy_static::lazy_static! {
    /// OSF API root, `OSF_API_ROOT` or [`consts::API_ROOT`]
    pub static ref API_ROOT: String = std::env::var(consts::API_ROOT_ENV)
        .ok()
        .map(|root| root.trim_end_matches('/').to_string())
        .filter(|root| !root.is_empty())
        .unwrap_or_else(|| consts::API_ROOT.to_string());

    /// Metadata requests timeout, `OSF_REQUESTS_TIMEOUT` (seconds) or [`consts::DEFAULT_REQUESTS_TIMEOUT`]
    pub static ref REQUESTS_TIMEOUT: Duration = std::env::var(consts::REQUESTS_TIMEOUT_ENV)
        .ok()
        .and_then(|secs| secs.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(consts::DEFAULT_REQUESTS_TIMEOUT);
}
