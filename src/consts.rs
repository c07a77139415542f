use std::time::Duration;

/// Root of the OSF v2 JSON API
pub const API_ROOT: &str = "https://api.osf.io/v2";

/// Name of the built-in storage provider holding a node's primary file tree
pub const OSF_STORAGE_PROVIDER: &str = "osfstorage";

/// Amount of bytes read from the response body before writing them onto the disk
pub const CHUNK_SIZE: usize = 8192;

/// Timeout applied to OSF metadata requests. Streaming downloads are not limited
pub const DEFAULT_REQUESTS_TIMEOUT: Duration = Duration::from_secs(8);

/// Environment variable overriding [`API_ROOT`]
pub const API_ROOT_ENV: &str = "OSF_API_ROOT";

/// Environment variable overriding [`DEFAULT_REQUESTS_TIMEOUT`], in seconds
pub const REQUESTS_TIMEOUT_ENV: &str = "OSF_REQUESTS_TIMEOUT";
