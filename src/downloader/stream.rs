use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::fs::File;

use crate::consts::CHUNK_SIZE;
use crate::network::TransportExt;
use crate::osf::OsfError;

use super::Update;
use super::save_path::expand_target;

/// Lazy sequence of fixed-size chunks read from a response body
///
/// Every chunk except the last one is exactly `chunk_size` bytes long.
/// Read errors are reported as `OsfError::Request` and end the sequence
pub struct Chunks<R> {
    reader: R,
    chunk_size: usize,
    finished: bool
}

impl<R: Read> Chunks<R> {
    #[inline]
    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, CHUNK_SIZE)
    }

    #[inline]
    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk_size: chunk_size.max(1),
            finished: false
        }
    }
}

impl<R: Read> Iterator for Chunks<R> {
    type Item = Result<Vec<u8>, OsfError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut chunk = vec![0; self.chunk_size];
        let mut filled = 0;

        while filled < self.chunk_size {
            match self.reader.read(&mut chunk[filled..]) {
                Ok(0) => {
                    self.finished = true;

                    break;
                }

                Ok(n) => filled += n,

                Err(err) if err.kind() == ErrorKind::Interrupted => continue,

                Err(err) => {
                    self.finished = true;

                    return Some(Err(OsfError::Request(err.to_string())));
                }
            }
        }

        if filled == 0 {
            return None;
        }

        chunk.truncate(filled);

        Some(Ok(chunk))
    }
}

/// Write chunks in order into the target file, truncating it first
///
/// Empty chunks are skipped. On error the already written chunks
/// stay on the disk. Return amount of written bytes
pub fn write_chunks<I, F>(chunks: I, target: impl AsRef<Path>, mut updater: F) -> Result<u64, OsfError>
where
    I: IntoIterator<Item = Result<Vec<u8>, OsfError>>,
    F: FnMut(Update)
{
    let mut file = File::create(target.as_ref())?;

    let mut written_chunks = 0;
    let mut written_bytes = 0;

    for chunk in chunks {
        let chunk = chunk?;

        if chunk.is_empty() {
            continue;
        }

        file.write_all(&chunk)?;

        written_chunks += 1;
        written_bytes += chunk.len() as u64;

        (updater)(Update::DownloadingProgress {
            chunks: written_chunks,
            bytes: written_bytes
        });
    }

    file.flush()?;

    Ok(written_bytes)
}

/// Expected amount of chunks for given content length, `None` if unknown
#[inline]
pub fn total_chunks(content_length: Option<u64>) -> Option<u64> {
    content_length
        .filter(|length| *length > 0)
        .map(|length| length / CHUNK_SIZE as u64)
}

/// Download given URL into the target file
///
/// Parent folders are created before the request is sent. Return
/// resolved absolute path of the written file
#[tracing::instrument(level = "debug", skip(transport, target, updater), fields(path = ?target.as_ref()))]
pub fn download_stream<T, F>(transport: &T, url: &str, target: impl AsRef<Path>, mut updater: F) -> Result<PathBuf, OsfError>
where
    T: TransportExt,
    F: FnMut(Update)
{
    let target = expand_target(target)?;

    let response = transport.get_stream(url)?;
    let total_chunks = total_chunks(response.content_length);

    tracing::debug!(?total_chunks, "Downloading to {target:?}");

    (updater)(Update::DownloadingStarted {
        path: target.clone(),
        total_chunks
    });

    let bytes = write_chunks(Chunks::new(response.body), &target, &mut updater)?;

    tracing::debug!("Downloaded {bytes} bytes");

    (updater)(Update::DownloadingFinished);

    Ok(target)
}
