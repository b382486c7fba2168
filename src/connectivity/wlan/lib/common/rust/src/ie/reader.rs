// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{Header, Id},
    crate::buffer_reader::BufferReader,
    std::mem::size_of,
    zerocopy::ByteSlice,
};

/// Iterates over a chain of elements. Iteration ends at the first element whose declared length
/// runs past the end of the buffer.
pub struct Reader<B>(BufferReader<B>);

impl<B: ByteSlice> Reader<B> {
    pub fn new(bytes: B) -> Self {
        Reader(BufferReader::new(bytes))
    }
}

impl<B: ByteSlice> Iterator for Reader<B> {
    type Item = (Id, B);

    fn next(&mut self) -> Option<Self::Item> {
        let header = self.0.peek::<Header>()?;
        let body_len = header.body_len as usize;
        if self.0.bytes_remaining() < size_of::<Header>() + body_len {
            None
        } else {
            let id = self.0.read::<Header>()?.id;
            let body = self.0.read_bytes(body_len)?;
            Some((id, body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn empty() {
        assert_eq!(None, Reader::new(&[][..]).next());
    }

    #[test]
    pub fn less_than_header() {
        assert_eq!(None, Reader::new(&[0][..]).next());
    }

    #[test]
    pub fn body_too_short() {
        assert_eq!(None, Reader::new(&[0, 2, 10][..]).next());
    }

    #[test]
    pub fn empty_body() {
        let elems: Vec<_> = Reader::new(&[0, 0][..]).collect();
        assert_eq!(&[(Id::SSID, &[][..])], &elems[..]);
    }

    #[test]
    pub fn stops_at_truncated_element() {
        #[rustfmt::skip]
        let bytes = vec![
            3, 1, 6, // DSSS parameter set: channel 6
            37, 3, 0, 11, // Channel switch announcement, one byte short
        ];
        let elems: Vec<_> = Reader::new(&bytes[..]).collect();
        assert_eq!(&[(Id::DSSS_PARAM_SET, &[6][..])], &elems[..]);
    }

    #[test]
    pub fn vendor_and_extension_elements() {
        #[rustfmt::skip]
        let bytes = vec![
            0, 2, 10, 20, // SSID
            0xdd, 0x05, 0x00, 0x90, 0x4c, 0x04, 0x08, // Vendor specific
            255, 2, 11, 1, // Extension
        ];
        let elems: Vec<_> = Reader::new(&bytes[..]).collect();
        assert_eq!(
            &[
                (Id::SSID, &[10, 20][..]),
                (Id::VENDOR_SPECIFIC, &[0x00, 0x90, 0x4c, 0x04, 0x08][..]),
                (Id::EXTENSION, &[11, 1][..]),
            ],
            &elems[..]
        );
    }
}
