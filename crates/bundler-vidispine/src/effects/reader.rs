use std::borrow::Cow;
use std::io::{self, Read};

use bytes::Bytes;
use tracing::debug;

use super::client::HttpClient;
use super::lookup::fetch_descriptor;
use super::transport::Transport;
use crate::core::{next_block_len, range_header};
use crate::data::{ApiRequest, FileDocument, SizedFile};
use crate::error::{Error, Result};

/// Sequential reader over a remote file, one ranged GET per block.
///
/// At most one block is held in memory at a time. The reader is exhausted
/// once [`bytes_read`](Self::bytes_read) reaches the declared size, after
/// which [`read_next`](Self::read_next) returns `Ok(None)` without touching
/// the network.
pub struct ChunkedReader<'a, C> {
    transport: &'a Transport<C>,
    file: Cow<'a, SizedFile>,
    storage_id: String,
    file_id: String,
    block_size: u64,
    bytes_read: u64,
}

impl<'a, C: HttpClient> ChunkedReader<'a, C> {
    /// Read a file whose descriptor was already looked up.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBlockSize`] if `block_size` is 0.
    pub fn new(
        transport: &'a Transport<C>,
        file: &'a SizedFile,
        block_size: usize,
    ) -> Result<Self> {
        Self::with_file(
            transport,
            Cow::Borrowed(file),
            file.storage_id().to_string(),
            file.file_id().to_string(),
            block_size,
        )
    }

    /// Validate `document` and read it. Fails with [`Error::InvalidSize`]
    /// before any request when the size is unknown.
    pub fn from_document(
        transport: &'a Transport<C>,
        document: FileDocument,
        block_size: usize,
    ) -> Result<Self> {
        let file = document.into_sized()?;
        let storage_id = file.storage_id().to_string();
        let file_id = file.file_id().to_string();
        Self::with_file(transport, Cow::Owned(file), storage_id, file_id, block_size)
    }

    /// Look the file up first, then read it.
    pub fn open(
        transport: &'a Transport<C>,
        storage_id: &str,
        file_id: &str,
        block_size: usize,
    ) -> Result<Self> {
        if block_size == 0 {
            return Err(Error::InvalidBlockSize);
        }
        let file = fetch_descriptor(transport, storage_id, file_id)?.into_sized()?;
        Self::with_file(
            transport,
            Cow::Owned(file),
            storage_id.to_string(),
            file_id.to_string(),
            block_size,
        )
    }

    fn with_file(
        transport: &'a Transport<C>,
        file: Cow<'a, SizedFile>,
        storage_id: String,
        file_id: String,
        block_size: usize,
    ) -> Result<Self> {
        if block_size == 0 {
            return Err(Error::InvalidBlockSize);
        }
        Ok(Self {
            transport,
            file,
            storage_id,
            file_id,
            block_size: block_size as u64,
            bytes_read: 0,
        })
    }

    pub fn file(&self) -> &SizedFile {
        &self.file
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn is_exhausted(&self) -> bool {
        self.bytes_read == self.file.size()
    }

    /// Fetch the next block, or `None` once the whole file was delivered.
    ///
    /// # Errors
    ///
    /// - [`Error::TransferFailed`] wrapping the transport error
    /// - [`Error::EmptyChunk`] if the server answered with no bytes
    /// - [`Error::LengthMismatch`] if it answered with more than requested
    pub fn read_next(&mut self) -> Result<Option<Bytes>> {
        self.fetch(self.block_size)
    }

    fn fetch(&mut self, limit: u64) -> Result<Option<Bytes>> {
        let size = self.file.size();
        let len = next_block_len(limit, size, self.bytes_read);
        if len == 0 {
            debug!(file_id = %self.file_id, "download completed");
            return Ok(None);
        }

        let offset = self.bytes_read;
        debug!(
            file_id = %self.file_id,
            "reading {len} bytes, total read {offset} / {size}"
        );

        let request = ApiRequest::get(format!(
            "/API/storage/{}/file/{}/data",
            self.storage_id, self.file_id
        ))
        .header("Range", range_header(offset, len));

        let chunk = self
            .transport
            .request(&request)
            .map_err(|source| Error::TransferFailed {
                offset,
                source: Box::new(source),
            })?;

        let actual = chunk.len() as u64;
        if actual == 0 {
            return Err(Error::EmptyChunk { offset });
        }
        if actual > len {
            return Err(Error::LengthMismatch {
                expected: len,
                actual,
            });
        }

        self.bytes_read += actual;
        Ok(Some(chunk))
    }
}

impl<C: HttpClient> Read for ChunkedReader<'_, C> {
    /// Requests at most `buf.len()` bytes so nothing is buffered between calls.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let limit = self.block_size.min(buf.len() as u64);
        match self.fetch(limit).map_err(io::Error::other)? {
            Some(chunk) => {
                buf[..chunk.len()].copy_from_slice(&chunk);
                Ok(chunk.len())
            }
            None => Ok(0),
        }
    }
}
