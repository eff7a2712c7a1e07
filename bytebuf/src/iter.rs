use crate::buffer::ByteBuffer;

/// Iterator over the occupied bytes of a `ByteBuffer`
///
/// This iterator implements `Clone` and can be walked from both ends.
#[derive(Clone, Debug)]
pub struct ByteBufferIter<'a> {
    bytes: &'a [u8],
    front: usize,
    back: usize,
}

impl<'a> ByteBufferIter<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            front: 0,
            back: bytes.len(),
        }
    }
}

impl Iterator for ByteBufferIter<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let byte = self.bytes.get(self.front).copied();
        self.front += 1;
        byte
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for ByteBufferIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.bytes.get(self.back).copied()
    }
}

impl ExactSizeIterator for ByteBufferIter<'_> {}

impl<'a> IntoIterator for &'a ByteBuffer {
    type Item = u8;
    type IntoIter = ByteBufferIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        ByteBufferIter::new(self.as_slice())
    }
}
