// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::error::Error;

/// Source of the buffers that back BSS descriptions.
pub trait BufferProvider: Send + Sync {
    /// Returns an empty buffer able to hold at least `min_len` bytes without reallocating.
    fn get_buffer(&self, min_len: usize) -> Result<Vec<u8>, Error>;
}

/// Allocates from the heap and reports allocation failure instead of aborting.
#[derive(Debug, Default)]
pub struct HeapBufferProvider;

impl BufferProvider for HeapBufferProvider {
    fn get_buffer(&self, min_len: usize) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(min_len).map_err(|_| Error::NoResources(min_len))?;
        Ok(buf)
    }
}

#[cfg(test)]
pub use test_utils::*;

#[cfg(test)]
mod test_utils {
    use super::*;

    /// Fails every request.
    pub struct FailingBufferProvider;

    impl BufferProvider for FailingBufferProvider {
        fn get_buffer(&self, min_len: usize) -> Result<Vec<u8>, Error> {
            Err(Error::NoResources(min_len))
        }
    }
}
