use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;

#[cfg(feature = "std")]
use std::path::{Path, PathBuf};

use log::{trace, warn};

use crate::error::{ByteBufferError, Result};
use crate::io::read_to_end;
use crate::iter::ByteBufferIter;
use crate::range::Range;

const BYTES_PER_UNIT: f64 = 1024.0;
const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// A growable byte store with an optional hard capacity ceiling.
///
/// Occupied bytes live in `storage[..len]`. The allocation grows by doubling,
/// and never beyond the ceiling when one is set.
pub struct ByteBuffer {
    storage: Box<[u8]>,
    len: usize,
    max_capacity: Option<usize>,
    #[cfg(feature = "std")]
    source_path: Option<PathBuf>,
}

fn allocate(capacity: usize) -> Box<[u8]> {
    vec![0u8; capacity].into_boxed_slice()
}

impl ByteBuffer {
    /// Creates an empty, unbounded buffer with room for one byte.
    #[must_use]
    pub fn new() -> Self {
        Self::from_storage(allocate(1), 0, None)
    }

    /// Creates an unbounded buffer holding a copy of `bytes`.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from(bytes)
    }

    /// Creates an empty buffer whose length and allocation can never exceed
    /// `max_capacity`. Storage for the full ceiling is allocated upfront.
    ///
    /// # Errors
    ///
    /// Returns `ByteBufferError::InvalidCapacity` if `max_capacity` is 0.
    pub fn with_max_capacity(max_capacity: usize) -> Result<Self> {
        if max_capacity == 0 {
            return Err(ByteBufferError::InvalidCapacity {
                value: max_capacity,
            });
        }
        Ok(Self::from_storage(
            allocate(max_capacity),
            0,
            Some(max_capacity),
        ))
    }

    /// Creates an unbounded buffer from everything `reader` yields until EOF.
    ///
    /// # Errors
    ///
    /// Returns `ByteBufferError::Io` if the reader fails.
    pub fn from_reader<R: embedded_io::Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = Vec::new();
        read_to_end(reader, &mut bytes)?;
        Ok(Self::from(bytes))
    }

    fn from_storage(storage: Box<[u8]>, len: usize, max_capacity: Option<usize>) -> Self {
        Self {
            storage,
            len,
            max_capacity,
            #[cfg(feature = "std")]
            source_path: None,
        }
    }

    /// Number of occupied bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn size_kb(&self) -> f64 {
        self.len as f64 / BYTES_PER_UNIT
    }

    #[must_use]
    pub fn size_mb(&self) -> f64 {
        self.size_kb() / BYTES_PER_UNIT
    }

    #[must_use]
    pub fn size_gb(&self) -> f64 {
        self.size_mb() / BYTES_PER_UNIT
    }

    /// Size of the current allocation. Always at least `size()`.
    #[must_use]
    pub fn allocated_capacity(&self) -> usize {
        self.storage.len()
    }

    /// The ceiling, or `None` if the buffer is unbounded.
    #[must_use]
    pub fn max_capacity(&self) -> Option<usize> {
        self.max_capacity
    }

    #[must_use]
    #[allow(clippy::indexing_slicing)] // len <= storage.len()
    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    #[must_use]
    pub fn iter(&self) -> ByteBufferIter<'_> {
        self.into_iter()
    }

    /// Makes room for `additional` more bytes.
    ///
    /// The allocation doubles until it fits `size() + additional`, clamped to
    /// the ceiling. Occupied bytes are copied into the new storage.
    ///
    /// # Errors
    ///
    /// Returns `ByteBufferError::CapacityExceeded` if the buffer is bounded and
    /// `size() + additional` is above the ceiling. The buffer is left unchanged.
    pub fn ensure_capacity(&mut self, additional: usize) -> Result<()> {
        let limit = self.max_capacity.unwrap_or(usize::MAX);
        let available = limit.saturating_sub(self.len);
        if additional > available {
            warn!(
                "Rejected request for {additional} more bytes: length {}, ceiling {limit}",
                self.len
            );
            return Err(ByteBufferError::CapacityExceeded {
                requested: additional,
                available,
            });
        }

        let required = self.len + additional;
        if required <= self.storage.len() {
            return Ok(());
        }

        let mut new_capacity = self.storage.len().max(1);
        while new_capacity < required {
            new_capacity = new_capacity.saturating_mul(2);
        }
        new_capacity = new_capacity.min(limit);

        trace!(
            "Growing allocation from {} to {new_capacity} bytes",
            self.storage.len()
        );
        self.reallocate(new_capacity);
        Ok(())
    }

    /// Moves the occupied bytes into a fresh allocation of exactly `capacity`
    /// bytes. Bytes that do not fit are dropped.
    #[allow(clippy::indexing_slicing)]
    fn reallocate(&mut self, capacity: usize) {
        let kept = self.len.min(capacity);
        let mut storage = allocate(capacity);
        storage[..kept].copy_from_slice(&self.storage[..kept]);
        self.storage = storage;
        self.len = kept;
    }

    /// Rebuilds storage as `[..start]`, `replacement`, `[end..len]`.
    ///
    /// Callers validate `start <= end <= len` and reserve room first.
    #[allow(clippy::indexing_slicing)]
    fn splice(&mut self, start: usize, end: usize, replacement: &[u8]) {
        let new_len = self.len - (end - start) + replacement.len();
        debug_assert!(new_len <= self.storage.len());

        let mut storage = allocate(self.storage.len());
        let middle = start + replacement.len();
        storage[..start].copy_from_slice(&self.storage[..start]);
        storage[start..middle].copy_from_slice(replacement);
        storage[middle..new_len].copy_from_slice(&self.storage[end..self.len]);

        self.storage = storage;
        self.len = new_len;
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(ByteBufferError::IndexOutOfBounds {
                index,
                length: self.len,
            });
        }
        Ok(())
    }

    fn check_range(&self, range: &Range) -> Result<()> {
        if range.upper_bound() >= self.len {
            return Err(ByteBufferError::RangeOutOfBounds {
                upper: range.upper_bound(),
                length: self.len,
            });
        }
        Ok(())
    }

    /// Returns the byte at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ByteBufferError::IndexOutOfBounds` if `index >= size()`.
    #[allow(clippy::indexing_slicing)]
    pub fn at(&self, index: usize) -> Result<u8> {
        self.check_index(index)?;
        Ok(self.storage[index])
    }

    /// Returns a copy of the bytes from `range.lower_bound()` through
    /// `range.upper_bound()` inclusive.
    ///
    /// # Errors
    ///
    /// Returns `ByteBufferError::RangeOutOfBounds` if the range reaches past
    /// the last occupied byte.
    #[allow(clippy::indexing_slicing)]
    pub fn bytes_in_range(&self, range: &Range) -> Result<Vec<u8>> {
        self.check_range(range)?;
        Ok(self.storage[range.as_std()].to_vec())
    }

    /// Appends a byte, growing the allocation if needed.
    ///
    /// # Errors
    ///
    /// Returns `ByteBufferError::CapacityExceeded` if a bounded buffer is full.
    #[allow(clippy::indexing_slicing)]
    pub fn append(&mut self, byte: u8) -> Result<()> {
        self.ensure_capacity(1)?;
        self.storage[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    /// Inserts a byte at the front, shifting every occupied byte right.
    ///
    /// # Errors
    ///
    /// Returns `ByteBufferError::CapacityExceeded` if a bounded buffer is full.
    pub fn prepend(&mut self, byte: u8) -> Result<()> {
        self.ensure_capacity(1)?;
        self.splice(0, 0, &[byte]);
        Ok(())
    }

    /// Inserts `bytes` so that the first of them lands at `at_index`.
    /// Inserting at `size()` appends.
    ///
    /// # Errors
    ///
    /// - `ByteBufferError::IndexOutOfBounds` if `at_index > size()`
    /// - `ByteBufferError::CapacityExceeded` if the result would not fit under
    ///   the ceiling; the buffer is left unchanged
    pub fn insert_bytes(&mut self, bytes: &[u8], at_index: usize) -> Result<()> {
        if at_index > self.len {
            return Err(ByteBufferError::IndexOutOfBounds {
                index: at_index,
                length: self.len,
            });
        }
        self.ensure_capacity(bytes.len())?;
        self.splice(at_index, at_index, bytes);
        Ok(())
    }

    /// Replaces the bytes addressed by `range` with `bytes`.
    ///
    /// A longer replacement pushes the following bytes right, a shorter one
    /// pulls them left. The length changes by `bytes.len() - range.len()`.
    ///
    /// # Errors
    ///
    /// - `ByteBufferError::RangeOutOfBounds` if the range reaches past the
    ///   last occupied byte
    /// - `ByteBufferError::CapacityExceeded` if the result would not fit under
    ///   the ceiling; the buffer is left unchanged
    pub fn override_bytes(&mut self, bytes: &[u8], range: &Range) -> Result<()> {
        self.check_range(range)?;
        self.ensure_capacity(bytes.len().saturating_sub(range.len()))?;
        self.splice(range.lower_bound(), range.upper_bound() + 1, bytes);
        Ok(())
    }

    /// Removes and returns the byte at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ByteBufferError::IndexOutOfBounds` if `index >= size()`.
    #[allow(clippy::indexing_slicing)]
    pub fn remove_byte_at(&mut self, index: usize) -> Result<u8> {
        self.check_index(index)?;
        let byte = self.storage[index];
        self.splice(index, index + 1, &[]);
        Ok(byte)
    }

    /// Removes every byte addressed by `range`.
    ///
    /// # Errors
    ///
    /// Returns `ByteBufferError::RangeOutOfBounds` if the range reaches past
    /// the last occupied byte.
    pub fn remove_bytes_in(&mut self, range: &Range) -> Result<()> {
        self.check_range(range)?;
        self.splice(range.lower_bound(), range.upper_bound() + 1, &[]);
        Ok(())
    }

    /// Sets or lifts the ceiling.
    ///
    /// `None` removes the ceiling and keeps the current allocation.
    /// `Some(n)` reallocates to exactly `n` bytes and keeps the first
    /// `min(n, size())` bytes: shrinking below the current length discards data.
    ///
    /// # Errors
    ///
    /// Returns `ByteBufferError::InvalidCapacity` for `Some(0)`.
    pub fn set_capacity(&mut self, max_capacity: Option<usize>) -> Result<()> {
        match max_capacity {
            None => {
                self.max_capacity = None;
            }
            Some(0) => {
                return Err(ByteBufferError::InvalidCapacity { value: 0 });
            }
            Some(capacity) => {
                if capacity < self.len {
                    warn!(
                        "Shrinking ceiling to {capacity} bytes discards {} bytes",
                        self.len - capacity
                    );
                }
                self.reallocate(capacity);
                self.max_capacity = Some(capacity);
            }
        }
        Ok(())
    }

    /// Drops every occupied byte. The allocation and ceiling are kept.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Occupied bytes as text, one `char` per byte.
    #[must_use]
    pub fn digest(&self) -> String {
        self.iter().map(char::from).collect()
    }

    /// Occupied bytes as lowercase, zero-padded hex pairs without separators.
    #[must_use]
    pub fn hex_digest(&self) -> String {
        let mut digest = String::with_capacity(self.len * 2);
        for byte in self {
            digest.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
            digest.push(char::from(HEX_DIGITS[usize::from(byte & 0x0f)]));
        }
        digest
    }

    /// Writes the occupied bytes to `writer` and flushes it.
    ///
    /// # Errors
    ///
    /// Returns `ByteBufferError::Io` if the writer fails.
    pub fn write_to<W: embedded_io::Write>(&self, writer: &mut W) -> Result<()> {
        writer
            .write_all(self.as_slice())
            .map_err(|e| ByteBufferError::from_io(&e, "writing buffer"))?;
        writer
            .flush()
            .map_err(|e| ByteBufferError::from_io(&e, "flushing writer"))
    }
}

#[cfg(feature = "std")]
impl ByteBuffer {
    /// Loads the whole file at `path` and remembers the path for `save()`.
    ///
    /// # Errors
    ///
    /// Returns `ByteBufferError::Io` if the file cannot be opened or read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut buffer = Self::from(crate::file::read_all(path)?);
        buffer.source_path = Some(path.to_path_buf());
        Ok(buffer)
    }

    /// The file this buffer is saved to, if any.
    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Overwrites the remembered file with the occupied bytes.
    ///
    /// # Errors
    ///
    /// - `ByteBufferError::NoSourcePath` if the buffer has no remembered path
    /// - `ByteBufferError::Io` if the file cannot be written
    pub fn save(&self) -> Result<()> {
        let path = self
            .source_path
            .as_deref()
            .ok_or(ByteBufferError::NoSourcePath)?;
        crate::file::write_all(path, self.as_slice())
    }

    /// Binds the buffer to `path`, then saves. The new path is kept even when
    /// the write fails.
    ///
    /// # Errors
    ///
    /// Returns `ByteBufferError::Io` if the file cannot be written.
    pub fn save_to_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.source_path = Some(path.as_ref().to_path_buf());
        self.save()
    }
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ByteBuffer {
    #[allow(clippy::indexing_slicing)]
    fn clone(&self) -> Self {
        let mut storage = allocate(self.storage.len());
        storage[..self.len].copy_from_slice(self.as_slice());
        Self {
            storage,
            len: self.len,
            max_capacity: self.max_capacity,
            #[cfg(feature = "std")]
            source_path: self.source_path.clone(),
        }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from(bytes.to_vec())
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        let len = bytes.len();
        Self::from_storage(bytes.into_boxed_slice(), len, None)
    }
}

impl FromIterator<u8> for ByteBuffer {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<u8>>())
    }
}

impl Extend<u8> for ByteBuffer {
    /// Appends bytes until the iterator ends or the ceiling is reached.
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        for byte in iter {
            if self.append(byte).is_err() {
                break;
            }
        }
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl PartialEq for ByteBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ByteBuffer {}

impl Index<usize> for ByteBuffer {
    type Output = u8;

    /// # Panics
    ///
    /// Panics if `index >= size()`.
    fn index(&self, index: usize) -> &u8 {
        assert!(
            index < self.len,
            "Index {} out of bounds for buffer of length {}",
            index,
            self.len
        );
        &self.as_slice()[index]
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ByteBuffer {{ len: {:?}, allocated: {:?}, max_capacity: {:?}, bytes: {:?} }}",
            self.len,
            self.storage.len(),
            self.max_capacity,
            self.as_slice()
        )
    }
}

impl fmt::Display for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} bytes>", self.len)?;
        if let Some(max) = self.max_capacity {
            write!(f, " of {max}")?;
        }
        Ok(())
    }
}

impl fmt::LowerHex for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_new_buffer_has_room_for_one_byte() {
        let buffer = ByteBuffer::new();
        assert_eq!(buffer.size(), 0);
        assert!(buffer.is_empty());
        assert_eq!(buffer.allocated_capacity(), 1);
        assert_eq!(buffer.max_capacity(), None);
    }

    #[test]
    fn test_growth_doubles_allocation() {
        let mut buffer = ByteBuffer::new();
        for (i, expected) in [(1, 1), (2, 2), (3, 4), (5, 8), (9, 16)] {
            while buffer.size() < i {
                buffer.append(0).unwrap();
            }
            assert_eq!(buffer.allocated_capacity(), expected, "after {i} appends");
        }
    }

    #[test]
    fn test_growth_from_zero_allocation() {
        let mut buffer = ByteBuffer::from_bytes(&[]);
        assert_eq!(buffer.allocated_capacity(), 0);
        buffer.ensure_capacity(3).unwrap();
        assert_eq!(buffer.allocated_capacity(), 4);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_growth_is_clamped_to_ceiling() {
        let mut buffer = ByteBuffer::from_bytes(&[1, 2, 3]);
        buffer.max_capacity = Some(5);
        buffer.ensure_capacity(2).unwrap();
        assert_eq!(buffer.allocated_capacity(), 5);
        assert_eq!(buffer.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_ensure_capacity_rejects_above_ceiling() {
        let mut buffer = ByteBuffer::with_max_capacity(4).unwrap();
        buffer.insert_bytes(&[1, 2, 3], 0).unwrap();
        assert_eq!(
            buffer.ensure_capacity(2),
            Err(ByteBufferError::CapacityExceeded {
                requested: 2,
                available: 1
            })
        );
        assert!(buffer.ensure_capacity(1).is_ok());
    }

    #[test]
    fn test_splice_keeps_allocation() {
        let mut buffer = ByteBuffer::from_bytes(&[1, 2, 3, 4]);
        buffer.ensure_capacity(4).unwrap();
        let allocated = buffer.allocated_capacity();
        buffer.splice(1, 3, &[9]);
        assert_eq!(buffer.as_slice(), &[1, 9, 4]);
        assert_eq!(buffer.allocated_capacity(), allocated);
    }

    #[test]
    fn test_clone_is_deep() {
        let original = ByteBuffer::from_bytes(&[1, 2, 3]);
        let mut copy = original.clone();
        copy.append(4).unwrap();
        copy.override_bytes(&[7, 7], &Range::new(0, 1).unwrap())
            .unwrap();

        assert_eq!(original.as_slice(), &[1, 2, 3]);
        assert_eq!(copy.as_slice(), &[7, 7, 3, 4]);
    }

    #[test]
    fn test_clone_keeps_capacity_configuration() {
        let mut original = ByteBuffer::with_max_capacity(6).unwrap();
        original.append(1).unwrap();
        let copy = original.clone();
        assert_eq!(copy.max_capacity(), Some(6));
        assert_eq!(copy.allocated_capacity(), 6);
        assert_eq!(copy, original);
    }

    #[test]
    fn test_display_and_hex_formatting() {
        let buffer = ByteBuffer::from_bytes(&[5, 99, 255]);
        assert_eq!(format!("{buffer}"), "<3 bytes>");
        assert_eq!(format!("{buffer:x}"), "0563ff");

        let bounded = ByteBuffer::with_max_capacity(10).unwrap();
        assert_eq!(format!("{bounded}"), "<0 bytes> of 10");
    }

    #[test]
    #[should_panic(expected = "Index 3 out of bounds for buffer of length 3")]
    fn test_index_out_of_bounds_panics() {
        let buffer = ByteBuffer::from_bytes(&[1, 2, 3]);
        let _ = buffer[3];
    }
}
