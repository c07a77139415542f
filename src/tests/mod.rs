use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Read;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::network::{StreamResponse, TransportExt};
use crate::osf::OsfError;


pub const API_ROOT: &str = "https://api.test.osf.io/v2";
pub const PROJECT_ID: &str = "ytpuq";

pub const NODE_URL: &str = "https://api.test.osf.io/v2/nodes/ytpuq";
pub const PROVIDERS_URL: &str = "https://api.test.osf.io/v2/nodes/ytpuq/files/";
pub const STORAGE_ROOT_URL: &str = "https://api.test.osf.io/v2/nodes/ytpuq/files/osfstorage/";

/// Body failing with an IO error once its content is read
pub struct FailingBody {
    content: Vec<u8>,
    position: usize
}

impl Read for FailingBody {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.position >= self.content.len() {
            return Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset by peer"));
        }

        let n = buf.len().min(self.content.len() - self.position);

        buf[..n].copy_from_slice(&self.content[self.position..self.position + n]);
        self.position += n;

        Ok(n)
    }
}

#[derive(Debug, Clone)]
enum Body {
    Complete(Vec<u8>),
    Failing(Vec<u8>)
}

/// In-memory OSF API
#[derive(Debug, Default)]
pub struct MockTransport {
    documents: HashMap<String, Value>,
    bodies: HashMap<String, (Option<u64>, Body)>,
    requests: RefCell<Vec<String>>
}

impl MockTransport {
    pub fn with_document(mut self, url: &str, document: Value) -> Self {
        self.documents.insert(url.to_string(), document);

        self
    }

    /// Serve `body` with a correct `content-length` header
    pub fn with_body(mut self, url: &str, body: &[u8]) -> Self {
        self.bodies.insert(url.to_string(), (Some(body.len() as u64), Body::Complete(body.to_vec())));

        self
    }

    pub fn with_unsized_body(mut self, url: &str, body: &[u8]) -> Self {
        self.bodies.insert(url.to_string(), (None, Body::Complete(body.to_vec())));

        self
    }

    /// Serve `body` and then fail with a connection reset
    pub fn with_failing_body(mut self, url: &str, body: &[u8]) -> Self {
        self.bodies.insert(url.to_string(), (None, Body::Failing(body.to_vec())));

        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl TransportExt for MockTransport {
    type Body = Box<dyn Read>;

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, OsfError> {
        self.requests.borrow_mut().push(url.to_string());

        let Some(document) = self.documents.get(url) else {
            return Err(OsfError::Request(format!("HTTP status client error (404 Not Found) for url ({url})")));
        };

        Ok(serde_json::from_value(document.clone())?)
    }

    fn get_stream(&self, url: &str) -> Result<StreamResponse<Self::Body>, OsfError> {
        self.requests.borrow_mut().push(url.to_string());

        let Some((content_length, body)) = self.bodies.get(url).cloned() else {
            return Err(OsfError::Request(format!("HTTP status client error (404 Not Found) for url ({url})")));
        };

        let body: Box<dyn Read> = match body {
            Body::Complete(content) => Box::new(std::io::Cursor::new(content)),
            Body::Failing(content) => Box::new(FailingBody { content, position: 0 })
        };

        Ok(StreamResponse {
            content_length,
            body
        })
    }
}

pub fn relation(href: &str) -> Value {
    json!({
        "files": {
            "links": {
                "related": {
                    "href": href,
                    "meta": {}
                }
            }
        }
    })
}

pub fn node(id: &str, files_url: &str) -> Value {
    json!({
        "data": {
            "id": id,
            "type": "nodes",
            "attributes": { "title": "Test project" },
            "relationships": relation(files_url)
        }
    })
}

pub fn provider(name: &str, files_url: &str) -> Value {
    json!({
        "id": format!("{PROJECT_ID}:{name}"),
        "type": "files",
        "attributes": {
            "kind": "folder",
            "name": name,
            "provider": name
        },
        "relationships": relation(files_url)
    })
}

pub fn file(name: &str, download_url: &str) -> Value {
    json!({
        "type": "files",
        "attributes": {
            "kind": "file",
            "name": name,
            "provider": "osfstorage"
        },
        "links": {
            "download": download_url
        },
        "relationships": {}
    })
}

pub fn folder(name: &str, files_url: &str) -> Value {
    json!({
        "type": "files",
        "attributes": {
            "kind": "folder",
            "name": name,
            "provider": "osfstorage"
        },
        "links": {},
        "relationships": relation(files_url)
    })
}

pub fn listing(entries: Vec<Value>) -> Value {
    json!({ "data": entries })
}

/// Project with `a/b/c.csv`, `a/notes.txt` and `readme.md`
///
/// File `c.csv` serves a body of 3 full chunks and a few bytes
pub fn project() -> MockTransport {
    MockTransport::default()
        .with_document(NODE_URL, node(PROJECT_ID, PROVIDERS_URL))
        .with_document(PROVIDERS_URL, listing(vec![
            provider("github", "https://api.test.osf.io/v2/nodes/ytpuq/files/github/"),
            provider("osfstorage", STORAGE_ROOT_URL)
        ]))
        .with_document(STORAGE_ROOT_URL, listing(vec![
            folder("a", "https://api.test.osf.io/v2/nodes/ytpuq/files/osfstorage/a/"),
            file("readme.md", "https://files.test.osf.io/v1/resources/ytpuq/providers/osfstorage/readme")
        ]))
        .with_document("https://api.test.osf.io/v2/nodes/ytpuq/files/osfstorage/a/", listing(vec![
            file("notes.txt", "https://files.test.osf.io/v1/resources/ytpuq/providers/osfstorage/notes"),
            folder("b", "https://api.test.osf.io/v2/nodes/ytpuq/files/osfstorage/a/b/")
        ]))
        .with_document("https://api.test.osf.io/v2/nodes/ytpuq/files/osfstorage/a/b/", listing(vec![
            file("c.csv", "https://files.test.osf.io/v1/resources/ytpuq/providers/osfstorage/c")
        ]))
        .with_body("https://files.test.osf.io/v1/resources/ytpuq/providers/osfstorage/c", &csv_content())
        .with_body("https://files.test.osf.io/v1/resources/ytpuq/providers/osfstorage/readme", b"# Test project\n")
        .with_unsized_body("https://api.test.osf.io/v1/resources/ytpuq/files/osfstorage/?zip=", b"PK\x03\x04 archive")
}

pub fn csv_content() -> Vec<u8> {
    (0..crate::consts::CHUNK_SIZE * 3 + 17)
        .map(|i| b"id,value\n"[i % 9])
        .collect()
}
