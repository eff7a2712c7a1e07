//! Whole-file read and write, used by `ByteBuffer::from_path` and `save`.

use std::fs::File;
use std::path::Path;

use embedded_io::Write as _;
use embedded_io_adapters::std::FromStd;
use log::debug;

use crate::error::{ByteBufferError, Result};
use crate::io::read_to_end;

/// Reads the file at `path` as raw bytes.
///
/// # Errors
///
/// Returns `ByteBufferError::Io` if the file cannot be opened or read.
pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| ByteBufferError::from_io(&e, "opening file for reading"))?;
    let mut reader = FromStd::new(file);

    let mut bytes = Vec::new();
    let n = read_to_end(&mut reader, &mut bytes)?;
    debug!("Loaded {n} bytes from {}", path.display());
    Ok(bytes)
}

/// Replaces the content of the file at `path` with `bytes`, creating it if needed.
///
/// # Errors
///
/// Returns `ByteBufferError::Io` if the file cannot be created or written.
pub fn write_all(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| ByteBufferError::from_io(&e, "opening file for writing"))?;
    let mut writer = FromStd::new(file);

    writer
        .write_all(bytes)
        .map_err(|e| ByteBufferError::from_io(&e, "writing file"))?;
    writer
        .flush()
        .map_err(|e| ByteBufferError::from_io(&e, "flushing file"))?;
    debug!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
