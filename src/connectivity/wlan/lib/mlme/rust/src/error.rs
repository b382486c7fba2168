// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {thiserror::Error, wlan_common::error::FrameParseError};

#[derive(Error, Debug)]
pub enum Error {
    #[error("out of buffers; requested {0} bytes")]
    NoResources(usize),
    #[error("frame body of {payload_len} bytes carries no elements")]
    MalformedFrame { payload_len: usize },
    #[error("{0}")]
    ParsingFrame(#[from] FrameParseError),
    #[error("no scan result sink registered")]
    NoSink,
    #[error("invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(format!("{}", Error::NoResources(42)), "out of buffers; requested 42 bytes");
        assert_eq!(
            format!("{}", Error::MalformedFrame { payload_len: 12 }),
            "frame body of 12 bytes carries no elements"
        );
        let e: Error = FrameParseError::new("too short").into();
        assert_eq!(format!("{}", e), "error parsing frame: too short");
    }
}
