use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};
use crate::names::EntryNames;

/// A ZIP archive being written to disk.
///
/// Entries are stored uncompressed. Unless [`finish`](Self::finish) succeeds,
/// dropping the bundle deletes the output file, so a failed run never leaves
/// a truncated archive behind.
pub struct Bundle {
    path: PathBuf,
    writer: Option<ZipWriter<File>>,
    names: EntryNames,
    entries: usize,
    committed: bool,
}

impl Bundle {
    /// Create (or truncate) the archive at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| Error::Create {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            path,
            writer: Some(ZipWriter::new(file)),
            names: EntryNames::new(),
            entries: 0,
            committed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry_count(&self) -> usize {
        self.entries
    }

    /// Add one entry of `size` bytes, letting `write` stream its content.
    ///
    /// `write` returns how many bytes it wrote; anything other than `size`
    /// fails the entry. Returns the name the entry was stored under, which
    /// differs from `name` when `name` was already used.
    pub fn add_entry<F>(&mut self, name: &str, size: u64, write: F) -> Result<String>
    where
        F: FnOnce(&mut dyn Write) -> io::Result<u64>,
    {
        let name = self.names.claim(name);
        let writer = self.writer_mut()?;

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .large_file(size >= u64::from(u32::MAX));

        writer
            .start_file(name.as_str(), options)
            .map_err(|source| Error::StartEntry {
                name: name.clone(),
                source,
            })?;

        let sink: &mut dyn Write = writer;
        let written = write(sink).map_err(|source| Error::WriteEntry {
            name: name.clone(),
            source,
        })?;

        if written != size {
            return Err(Error::SizeMismatch {
                name,
                declared: size,
                written,
            });
        }

        self.entries += 1;
        info!(entry = %name, size, "added entry");
        Ok(name)
    }

    /// Write the central directory and keep the file.
    pub fn finish(mut self) -> Result<PathBuf> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| io::Error::other("bundle already finished"))?;
        let file = writer.finish().map_err(Error::Finish)?;
        file.sync_all()?;

        self.committed = true;
        info!(path = %self.path.display(), entries = self.entries, "bundle complete");
        Ok(self.path.clone())
    }

    fn writer_mut(&mut self) -> Result<&mut ZipWriter<File>> {
        self.writer
            .as_mut()
            .ok_or_else(|| Error::Io(io::Error::other("bundle already finished")))
    }
}

impl Drop for Bundle {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        // close the handle before unlinking so removal also works on Windows
        drop(self.writer.take());
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), "could not remove partial bundle: {e}");
        } else {
            warn!(path = %self.path.display(), "removed partial bundle");
        }
    }
}
