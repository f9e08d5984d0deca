//! StagedUpload - scoped temp-file staging for uploaded ingest payloads.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::{CsvRows, IngestError};

/// An uploaded payload staged to a temporary file.
///
/// The file is removed when the value drops, whether the ingest that
/// read it succeeded, failed, or panicked.
pub struct StagedUpload {
    file: NamedTempFile,
}

impl StagedUpload {
    /// Copy everything `reader` yields into a new file under `dir`, or
    /// under the system temp directory when `dir` is `None`.
    pub fn stage(mut reader: impl Read, dir: Option<&Path>) -> Result<Self, IngestError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("records-upload-").suffix(".csv");
        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        let len = io::copy(&mut reader, &mut file)?;
        file.flush()?;
        tracing::debug!(path = %file.path().display(), bytes = len, "staged upload");
        Ok(Self { file })
    }

    /// Open a fresh row iterator over the staged file.
    pub fn rows(&self, delimiter: u8) -> Result<CsvRows<BufReader<File>>, IngestError> {
        let file = self.file.reopen()?;
        CsvRows::new(BufReader::new(file), delimiter)
    }
}
