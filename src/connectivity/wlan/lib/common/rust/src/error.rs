// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("error parsing frame: {0}")]
pub struct FrameParseError(pub String);

pub type FrameParseResult<T> = Result<T, FrameParseError>;

impl FrameParseError {
    pub fn new<T: Into<String>>(debug_message: T) -> Self {
        FrameParseError(debug_message.into())
    }
}
