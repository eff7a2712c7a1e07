//! Stream bridging on top of `embedded-io`.

use alloc::vec::Vec;

use embedded_io::{Error as _, ErrorKind, Read};

use crate::error::{ByteBufferError, Result};

const CHUNK_SIZE: usize = 4096;

/// Reads from `reader` until EOF, appending everything to `bytes`.
///
/// Returns the number of bytes read. Interrupted reads are retried.
///
/// # Errors
///
/// Returns `ByteBufferError::Io` with the reader's error kind.
pub fn read_to_end<R: Read>(reader: &mut R, bytes: &mut Vec<u8>) -> Result<usize> {
    let mut chunk = [0u8; CHUNK_SIZE];
    let mut total = 0;
    loop {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            #[allow(clippy::indexing_slicing)] // n <= CHUNK_SIZE
            Ok(n) => {
                bytes.extend_from_slice(&chunk[..n]);
                total += n;
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(ByteBufferError::from_io(&e, "reading source")),
        }
    }
    Ok(total)
}
