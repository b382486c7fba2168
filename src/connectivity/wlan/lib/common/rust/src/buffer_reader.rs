// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    std::mem::size_of,
    zerocopy::{ByteSlice, FromBytes, LayoutVerified, Unaligned},
};

pub struct BufferReader<B> {
    buffer: Option<B>,
    bytes_read: usize,
}

impl<B: ByteSlice> BufferReader<B> {
    pub fn new(bytes: B) -> Self {
        BufferReader { buffer: Some(bytes), bytes_read: 0 }
    }

    pub fn peek<T: Unaligned + FromBytes>(&self) -> Option<LayoutVerified<&[u8], T>> {
        let buffer = self.buffer.as_ref()?;
        LayoutVerified::new_unaligned_from_prefix(&buffer[..]).map(|(x, _)| x)
    }

    pub fn read<T: Unaligned + FromBytes>(&mut self) -> Option<LayoutVerified<B, T>> {
        if self.bytes_remaining() < size_of::<T>() {
            return None;
        }
        let bytes = self.read_bytes(size_of::<T>())?;
        LayoutVerified::new_unaligned(bytes)
    }

    pub fn read_value<T: Unaligned + FromBytes + Copy>(&mut self) -> Option<T> {
        self.read::<T>().map(|x| *x)
    }

    pub fn read_byte(&mut self) -> Option<u8> {
        self.read_bytes(1).map(|x| x[0])
    }

    pub fn read_bytes(&mut self, len: usize) -> Option<B> {
        let buffer = self.buffer.take()?;
        if len > buffer.len() {
            self.buffer = Some(buffer);
            return None;
        }
        let (head, tail) = buffer.split_at(len);
        self.buffer = Some(tail);
        self.bytes_read += len;
        Some(head)
    }

    pub fn into_remaining(self) -> Option<B> {
        self.buffer
    }

    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    pub fn bytes_remaining(&self) -> usize {
        self.buffer.as_ref().map_or(0, |buffer| buffer.len())
    }
}
