use serde::{Deserialize, Serialize};

pub mod node;
pub mod storage;
pub mod files;

/// Every OSF API document wraps its payload into `data`
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationLinks {
    pub related: Link
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub links: RelationLinks
}

#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationships {
    #[serde(default)]
    pub files: Option<Relation>
}

impl Relationships {
    /// `files.links.related.href`
    #[inline]
    pub fn files_link(&self) -> Option<&str> {
        self.files.as_ref()
            .map(|files| files.links.related.href.as_str())
    }
}
