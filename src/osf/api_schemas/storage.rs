use serde::{Deserialize, Serialize};

use super::{ApiResponse, Relationships};

pub type ProviderList = ApiResponse<Vec<StorageProvider>>;

#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageProvider {
    pub attributes: ProviderAttributes,

    #[serde(default)]
    pub relationships: Relationships
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAttributes {
    pub provider: String
}

impl StorageProvider {
    /// Link to the provider's root folder listing
    #[inline]
    pub fn files_link(&self) -> Option<&str> {
        self.relationships.files_link()
    }
}
