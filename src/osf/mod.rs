use thiserror::Error;

use crate::consts::OSF_STORAGE_PROVIDER;
use crate::network::TransportExt;

use api_schemas::files::{EntryKind, FileListing};
use api_schemas::node::NodeResponse;
use api_schemas::storage::ProviderList;

pub mod api_schemas;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OsfError {
    /// HTTP transport or status failure, during metadata or content retrieval
    #[error("Request failed: {0}")]
    Request(String),

    /// Storage provider or path segment couldn't be found
    #[error("{0}")]
    NotFound(String),

    /// Requested path ended on a folder, not on a file
    #[error("Path resolves to a folder: {0}")]
    PathIsFolder(String),

    /// OSF responded with a document of unexpected shape
    #[error("Unexpected OSF API response: {0}")]
    Protocol(String),

    #[error("IO error: {0}")]
    Io(String)
}

impl From<reqwest::Error> for OsfError {
    #[inline(always)]
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error.to_string())
    }
}

impl From<serde_json::Error> for OsfError {
    #[inline(always)]
    fn from(error: serde_json::Error) -> Self {
        Self::Protocol(error.to_string())
    }
}

impl From<std::io::Error> for OsfError {
    #[inline(always)]
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

#[inline]
pub fn node_url(api_root: &str, project_id: &str) -> String {
    format!("{}/nodes/{project_id}", api_root.trim_end_matches('/'))
}

/// Build URL of the ZIP archive of the whole storage root
///
/// `https://api.osf.io/v2/nodes/abcde/files/osfstorage/`
/// -> `https://api.osf.io/v1/resources/abcde/files/osfstorage/?zip=`
#[inline]
pub fn zip_url(storage_root_url: &str) -> String {
    format!("{}?zip=", storage_root_url.replace("/v2/", "/v1/").replace("nodes", "resources"))
}

/// Split requested file path into non-empty segments
#[inline]
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Return given file path if it points to anything below the storage root
///
/// `None`, `""` and `"/"` all mean the whole project
#[inline]
pub fn requested_path(file_path: Option<&str>) -> Option<&str> {
    file_path.filter(|path| !path_segments(path).is_empty())
}

/// Fetch project node and find URL of its `osfstorage` root listing
#[tracing::instrument(level = "debug", skip(transport))]
pub fn storage_root_url(transport: &impl TransportExt, api_root: &str, project_id: &str) -> Result<String, OsfError> {
    let node = transport.get_json::<NodeResponse>(&node_url(api_root, project_id))?;

    let files_url = node.data.files_link()
        .ok_or_else(|| OsfError::Protocol(format!("Node {} has no files relationship", node.data.id)))?;

    tracing::debug!("Fetching storage providers list");

    let providers = transport.get_json::<ProviderList>(files_url)?;

    let mut matching = providers.data.iter()
        .filter(|provider| provider.attributes.provider == OSF_STORAGE_PROVIDER);

    let Some(provider) = matching.next() else {
        return Err(OsfError::NotFound(format!("{OSF_STORAGE_PROVIDER} provider not found")));
    };

    if matching.next().is_some() {
        tracing::warn!("Node has several {OSF_STORAGE_PROVIDER} providers, using the first one");
    }

    provider.files_link()
        .map(String::from)
        .ok_or_else(|| OsfError::Protocol(format!("{OSF_STORAGE_PROVIDER} provider has no files relationship")))
}

/// Walk folder listings from the storage root down to the file under given path
/// and return its download link
///
/// A file matched while path segments remain is reported as `NotFound`
/// for the first unconsumed segment
#[tracing::instrument(level = "debug", skip(transport, root_url))]
pub fn resolve_file_path(transport: &impl TransportExt, root_url: &str, path: &str) -> Result<String, OsfError> {
    let segments = path_segments(path);
    let mut current_url = root_url.to_string();

    for (i, segment) in segments.iter().enumerate() {
        let listing = transport.get_json::<FileListing>(&current_url)?;

        let Some(entry) = listing.data.iter().find(|entry| entry.attributes.name == *segment) else {
            return Err(OsfError::NotFound(format!("Path not found: {segment}")));
        };

        match entry.attributes.kind {
            EntryKind::Folder => {
                tracing::trace!("Entering folder {segment}");

                current_url = entry.files_link()
                    .ok_or_else(|| OsfError::Protocol(format!("Folder {segment} has no files relationship")))?
                    .to_string();
            }

            EntryKind::File => {
                if let Some(next) = segments.get(i + 1) {
                    tracing::debug!("{segment} is a file but the path continues");

                    return Err(OsfError::NotFound(format!("Path not found: {next}")));
                }

                return entry.download_link()
                    .map(String::from)
                    .ok_or_else(|| OsfError::Protocol(format!("File {segment} has no download link")));
            }
        }
    }

    Err(OsfError::PathIsFolder(path.to_string()))
}

/// Resolve download URL for given project and optional file path
///
/// Without a file path the URL of the whole project ZIP archive is returned
pub fn resolve(transport: &impl TransportExt, api_root: &str, project_id: &str, file_path: Option<&str>) -> Result<String, OsfError> {
    let root_url = storage_root_url(transport, api_root, project_id)?;

    match requested_path(file_path) {
        Some(path) => resolve_file_path(transport, &root_url, path),
        None => Ok(zip_url(&root_url))
    }
}
