use bytebuf::{ByteBuffer, ByteBufferError, Range};

#[test]
fn test_buffer_initialization() {
    let buffer = ByteBuffer::new();

    assert_eq!(buffer.size(), 0);
    assert!(buffer.is_empty());
    assert_eq!(buffer.allocated_capacity(), 1);
    assert_eq!(buffer.max_capacity(), None);
    assert_eq!(buffer.digest(), "");
    assert_eq!(buffer.hex_digest(), "");
}

#[test]
fn test_from_bytes_copies_verbatim() {
    let bytes = [5u8, 99, 255, 33, 42, 65, 33];
    let buffer = ByteBuffer::from_bytes(&bytes);

    assert_eq!(buffer.size(), 7);
    assert_eq!(buffer.as_slice(), &bytes);
    assert_eq!(buffer.max_capacity(), None);
    assert!(buffer.allocated_capacity() >= buffer.size());
}

#[test]
fn test_digests() {
    let buffer = ByteBuffer::from_bytes(&[5, 99, 255, 33, 42, 65, 33]);

    assert_eq!(buffer.hex_digest(), "0563ff212a4121");
    assert_eq!(buffer.digest(), "\u{5}c\u{ff}!*A!");
    assert_eq!(buffer.digest().chars().count(), buffer.size());
}

#[test]
fn test_hex_digest_is_zero_padded() {
    let buffer = ByteBuffer::from_bytes(&[0, 1, 15, 16, 171]);
    assert_eq!(buffer.hex_digest(), "00010f10ab");
}

#[test]
fn test_bounds_checking_empty_buffer() {
    let buffer = ByteBuffer::new();

    assert_eq!(
        buffer.at(0),
        Err(ByteBufferError::IndexOutOfBounds {
            index: 0,
            length: 0
        })
    );
    let range = Range::new(0, 1).unwrap();
    assert_eq!(
        buffer.bytes_in_range(&range),
        Err(ByteBufferError::RangeOutOfBounds {
            upper: 1,
            length: 0
        })
    );
}

#[test]
fn test_indexed_access() {
    let buffer = ByteBuffer::from_bytes(b"hello");

    assert_eq!(buffer.at(0).unwrap(), b'h');
    assert_eq!(buffer.at(4).unwrap(), b'o');
    assert_eq!(buffer[1], b'e');
    assert!(buffer.at(5).is_err());
}

#[test]
fn test_bytes_in_range_uses_lower_bound() {
    let buffer = ByteBuffer::from_bytes(&[10, 11, 12, 13, 14, 15]);

    let range = Range::new(3, 5).unwrap();
    assert_eq!(buffer.bytes_in_range(&range).unwrap(), vec![13, 14, 15]);

    let range = Range::new(0, 1).unwrap();
    assert_eq!(buffer.bytes_in_range(&range).unwrap(), vec![10, 11]);

    let range = Range::new(4, 6).unwrap();
    assert!(buffer.bytes_in_range(&range).is_err());
}

#[test]
fn test_range_reuse_across_buffers() {
    let range = Range::new(1, 2).unwrap();
    let first = ByteBuffer::from_bytes(&[1, 2, 3]);
    let second = ByteBuffer::from_bytes(&[4, 5, 6, 7]);

    assert_eq!(first.bytes_in_range(&range).unwrap(), vec![2, 3]);
    assert_eq!(second.bytes_in_range(&range).unwrap(), vec![5, 6]);
}

#[test]
fn test_size_units_are_fractional() {
    let buffer: ByteBuffer = core::iter::repeat(0u8).take(512).collect();

    assert_eq!(buffer.size(), 512);
    assert!((buffer.size_kb() - 0.5).abs() < f64::EPSILON);
    assert!((buffer.size_mb() - 0.5 / 1024.0).abs() < f64::EPSILON);
    assert!((buffer.size_gb() - 0.5 / 1024.0 / 1024.0).abs() < f64::EPSILON);
}

#[test]
fn test_clear_operation() {
    let mut buffer = ByteBuffer::from_bytes(b"hello");
    let allocated = buffer.allocated_capacity();

    buffer.clear();

    assert!(buffer.is_empty());
    assert_eq!(buffer.allocated_capacity(), allocated);
    buffer.append(b'x').unwrap();
    assert_eq!(buffer.as_slice(), b"x");
}

#[test]
fn test_clone_is_independent() {
    let mut original = ByteBuffer::from_bytes(b"abc");
    let copy = original.clone();

    original.prepend(b'z').unwrap();
    original.remove_byte_at(3).unwrap();

    assert_eq!(original.as_slice(), b"zab");
    assert_eq!(copy.as_slice(), b"abc");
    assert_eq!(copy.max_capacity(), original.max_capacity());
}

#[test]
fn test_equality_ignores_allocation() {
    let mut grown = ByteBuffer::new();
    grown.extend([1, 2, 3]);
    let exact = ByteBuffer::from(vec![1, 2, 3]);

    assert_ne!(grown.allocated_capacity(), exact.allocated_capacity());
    assert_eq!(grown, exact);
}

#[test]
fn test_error_messages() {
    let err = Range::new(3, 1).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid range: upper bound 1 must be greater than lower bound 3"
    );

    let err = ByteBuffer::with_max_capacity(0).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid capacity: 0 (the ceiling must be greater than zero)"
    );
}
