// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Turns received Beacon and Probe Response frames into BSS descriptions for the scan result
//! cache. See [`client::scan`].
//!
//! [`client::scan`]: crate::client::scan

pub mod buffer;
pub mod client;
pub mod clock;
pub mod config;
pub mod device;
pub mod error;
#[cfg(test)]
mod test_utils;

