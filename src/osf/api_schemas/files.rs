use serde::{Deserialize, Serialize};

use super::{ApiResponse, Relationships};

pub type FileListing = ApiResponse<Vec<FileEntry>>;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder
}

/// One entry of a folder listing
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub attributes: EntryAttributes,

    #[serde(default)]
    pub links: EntryLinks,

    #[serde(default)]
    pub relationships: Relationships
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryAttributes {
    pub name: String,
    pub kind: EntryKind
}

#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLinks {
    #[serde(default)]
    pub download: Option<String>
}

impl FileEntry {
    /// Direct download link of a file
    #[inline]
    pub fn download_link(&self) -> Option<&str> {
        self.links.download.as_deref()
    }

    /// Link to the child listing of a folder
    #[inline]
    pub fn files_link(&self) -> Option<&str> {
        self.relationships.files_link()
    }
}
