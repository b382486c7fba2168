// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

mod fields;
mod parse;
mod reader;

pub use {fields::*, parse::*, reader::*};

use zerocopy::{AsBytes, FromBytes, Unaligned};

#[repr(C, packed)]
#[derive(AsBytes, FromBytes, Unaligned)]
pub struct Header {
    pub id: Id,
    pub body_len: u8,
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsBytes, FromBytes, Unaligned)]
pub struct Id(pub u8);

// IEEE Std 802.11-2016, 9.4.2.1, Table 9-77
impl Id {
    pub const SSID: Self = Self(0);
    pub const SUPPORTED_RATES: Self = Self(1);
    pub const DSSS_PARAM_SET: Self = Self(3);
    pub const BSS_LOAD: Self = Self(11);
    pub const CHANNEL_SWITCH_ANNOUNCEMENT: Self = Self(37);
    pub const HT_CAPABILITIES: Self = Self(45);
    pub const EXT_SUPPORTED_RATES: Self = Self(50);
    pub const MOBILITY_DOMAIN: Self = Self(54);
    pub const HT_OPERATION: Self = Self(61);
    pub const VHT_CAPABILITIES: Self = Self(191);
    pub const VHT_OPERATION: Self = Self(192);
    pub const FILS_INDICATION: Self = Self(240);
    pub const VENDOR_SPECIFIC: Self = Self(221);
    pub const EXTENSION: Self = Self(255);
}

// IEEE Std 802.11-2016, 9.4.2.1, Table 9-77, Element ID Extension values
pub struct ExtId;
impl ExtId {
    pub const ESTIMATED_SERVICE_PARAMS: u8 = 11;
}

pub const SSID_MAX_LEN: usize = 32;
