#![cfg_attr(not(feature = "std"), no_std)]

//! `ByteBuffer`: a growable, randomly-addressable byte store with capacity control.
//!
//! `ByteBuffer` keeps its bytes in one contiguous allocation and tracks the
//! occupied length separately from the allocated size. Mutations that need
//! room go through a single growth primitive, `ensure_capacity()`, which
//! doubles the allocation and never grows past an optional hard ceiling.
//!
//! Bulk reads and edits are addressed with `Range`, a closed interval of
//! indices that cannot be empty or inverted.
//!
//! # Performance Characteristics
//!
//! ## Time Complexity
//! - `append()`: O(1) amortized
//! - `at()`, indexing: O(1)
//! - `prepend()`, `insert_bytes()`, `override_bytes()`, `remove_byte_at()`,
//!   `remove_bytes_in()`: O(n) - storage is rebuilt as prefix, new bytes, suffix
//! - `set_capacity()`: O(n) - reallocates to exactly the new ceiling
//!
//! ## Atomicity
//! Every check runs before any write, and rebuilt storage is swapped in only
//! once complete. A failed operation leaves the buffer as it was.
//!
//! ## `no_std` Compatibility
//!
//! Without the default `std` feature the crate is `no_std` and needs only
//! `alloc`. Streams are read and written through `embedded-io` traits. The
//! `std` feature adds file backing:
//! ```toml
//! [dependencies]
//! bytebuf = { version = "0.1", default-features = false }
//! ```
//!
//! # Editing
//!
//! ```
//! # use bytebuf::{ByteBuffer, Range};
//! let mut buffer = ByteBuffer::from_bytes(&[5, 99, 255, 33, 42, 65, 33]);
//! assert_eq!(buffer.hex_digest(), "0563ff212a4121");
//!
//! buffer.insert_bytes(&[5, 8, 12], 4).unwrap();
//! assert_eq!(buffer.as_slice(), &[5, 99, 255, 33, 5, 8, 12, 42, 65, 33]);
//!
//! let range = Range::new(2, 5).unwrap();
//! assert_eq!(buffer.bytes_in_range(&range).unwrap(), vec![255, 33, 5, 8]);
//!
//! // A longer replacement pushes the rest of the buffer to the right
//! buffer.override_bytes(&[11, 33, 22, 55, 44], &range).unwrap();
//! assert_eq!(buffer.size(), 11);
//! ```
//!
//! # Capacity Ceilings
//!
//! A bounded buffer rejects writes that would not fit and stays unchanged:
//!
//! ```
//! # use bytebuf::{ByteBuffer, ByteBufferError};
//! let mut buffer = ByteBuffer::with_max_capacity(2).unwrap();
//! buffer.append(1).unwrap();
//! buffer.append(2).unwrap();
//!
//! assert_eq!(
//!     buffer.append(3),
//!     Err(ByteBufferError::CapacityExceeded { requested: 1, available: 0 })
//! );
//! assert_eq!(buffer.as_slice(), &[1, 2]);
//!
//! // Lifting the ceiling lets the buffer grow again
//! buffer.set_capacity(None).unwrap();
//! buffer.append(3).unwrap();
//! assert_eq!(buffer.as_slice(), &[1, 2, 3]);
//! ```
//!
//! Shrinking the ceiling below the current length discards the tail:
//!
//! ```
//! # use bytebuf::ByteBuffer;
//! let mut buffer: ByteBuffer = (0..10).collect();
//! buffer.set_capacity(Some(5)).unwrap();
//! assert_eq!(buffer.as_slice(), &[0, 1, 2, 3, 4]);
//! assert_eq!(buffer.max_capacity(), Some(5));
//! ```

extern crate alloc;

mod buffer;
mod error;
pub mod io;
mod iter;
mod range;

#[cfg(feature = "std")]
pub mod file;

pub use buffer::ByteBuffer;
pub use error::{ByteBufferError, Result};
pub use iter::ByteBufferIter;
pub use range::Range;
