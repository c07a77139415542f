use serde::{Deserialize, Serialize};

use super::{ApiResponse, Relationships};

pub type NodeResponse = ApiResponse<Node>;

/// OSF project or component
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub relationships: Relationships
}

impl Node {
    /// Link to the list of node's storage providers
    #[inline]
    pub fn files_link(&self) -> Option<&str> {
        self.relationships.files_link()
    }
}
