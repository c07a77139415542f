use std::path::{Path, PathBuf};

use crate::network::{HttpTransport, TransportExt};
use crate::osf::{self, OsfError};

pub mod save_path;
pub mod stream;

use save_path::resolve_save_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// (project id)
    Connecting(String),

    /// Whole project archive was requested
    PreparingZip,

    /// Download URL and output path are known
    Resolved(DownloadTarget),

    DownloadingStarted {
        path: PathBuf,

        /// `content-length / CHUNK_SIZE`, or `None` if the length is unknown
        total_chunks: Option<u64>
    },

    /// Sent after every written chunk
    DownloadingProgress {
        chunks: u64,
        bytes: u64
    },

    DownloadingFinished,

    /// (absolute output path)
    Saved(PathBuf)
}

/// Resolved download URL and the local path it will be saved to
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: String,
    pub path: PathBuf
}

/// OSF project files downloader
///
/// Each `download` call is independent. The transport is reused
/// between calls for connection pooling only
#[derive(Debug)]
pub struct Downloader<T = HttpTransport> {
    transport: T,
    api_root: String
}

impl Downloader<HttpTransport> {
    /// Create downloader with the default HTTP transport
    #[inline]
    pub fn new() -> Result<Self, OsfError> {
        Ok(Self::with_transport(HttpTransport::new()?))
    }
}

impl<T: TransportExt> Downloader<T> {
    #[inline]
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            api_root: crate::API_ROOT.clone()
        }
    }

    /// Change OSF API root (`https://api.osf.io/v2` by default)
    #[inline]
    pub fn with_api_root(self, api_root: impl AsRef<str>) -> Self {
        Self {
            api_root: api_root.as_ref().trim_end_matches('/').to_string(),
            ..self
        }
    }

    #[inline]
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    #[inline]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve download URL of the project file, or of the whole project archive
    #[inline]
    pub fn resolve(&self, project_id: impl AsRef<str>, file_path: Option<&str>) -> Result<String, OsfError> {
        osf::resolve(&self.transport, &self.api_root, project_id.as_ref(), file_path)
    }

    /// Download project file, or the whole project as ZIP archive
    /// if `file_path` is `None`
    ///
    /// Return absolute path of the saved file
    #[inline]
    pub fn download(&self, project_id: impl AsRef<str>, save_path: impl AsRef<Path>, file_path: Option<&str>) -> Result<PathBuf, OsfError> {
        self.download_with_updater(project_id, save_path, file_path, |_| {})
    }

    /// Same as `download` but reports its progress to the `updater`
    ///
    /// If it fails while downloading the payload, partially written
    /// file stays on the disk
    #[tracing::instrument(level = "debug", skip_all, fields(project_id = project_id.as_ref(), file_path = ?file_path))]
    pub fn download_with_updater<F>(
        &self,
        project_id: impl AsRef<str>,
        save_path: impl AsRef<Path>,
        file_path: Option<&str>,
        mut updater: F
    ) -> Result<PathBuf, OsfError>
    where
        F: FnMut(Update)
    {
        let project_id = project_id.as_ref();
        let file_path = osf::requested_path(file_path);

        tracing::debug!("Connecting to OSF project {project_id}");

        (updater)(Update::Connecting(project_id.to_string()));

        let root_url = osf::storage_root_url(&self.transport, &self.api_root, project_id)?;

        let url = match file_path {
            Some(path) => osf::resolve_file_path(&self.transport, &root_url, path)?,

            None => {
                tracing::debug!("Preparing project ZIP");

                (updater)(Update::PreparingZip);

                osf::zip_url(&root_url)
            }
        };

        let target = DownloadTarget {
            path: resolve_save_path(save_path, file_path),
            url
        };

        (updater)(Update::Resolved(target.clone()));

        let path = stream::download_stream(&self.transport, &target.url, &target.path, &mut updater)?;

        tracing::debug!("Saved to {path:?}");

        (updater)(Update::Saved(path.clone()));

        Ok(path)
    }
}
