// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    TwoGhz,
    FiveGhz,
}

impl Default for Band {
    fn default() -> Self {
        Band::TwoGhz
    }
}

/// Metadata the radio reports alongside a received frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RxInfo {
    /// Channel the radio was tuned to when the frame arrived, or 0 if unknown.
    pub channel: u8,
    pub band: Band,
    /// RSSI normalized to dBm.
    pub rssi_dbm: i8,
    /// RSSI as reported by the hardware.
    pub rssi_raw: i8,
    /// Offset between the BSS TSF and the local TSF.
    pub tsf_delta: u32,
    /// Local TSF at reception, low 32 bits.
    pub timestamp: u32,
}
