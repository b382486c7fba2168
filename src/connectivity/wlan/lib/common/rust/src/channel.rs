// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/// Channel bandwidth advertised by a BSS.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Cbw {
    Cbw20,
    Cbw40,
    Cbw80,
}

impl Default for Cbw {
    fn default() -> Self {
        Cbw::Cbw20
    }
}

/// Center frequency in MHz of a 20 MHz primary channel, or None if the channel number does not
/// name a channel in the 2.4 GHz, 4.9 GHz or 5 GHz bands.
pub fn chan_to_freq(primary: u8) -> Option<u16> {
    let primary = primary as u16;
    match primary {
        1..=13 => Some(2407 + 5 * primary),
        14 => Some(2484),
        // IEEE Std 802.11-2016, Annex E: 4.9 GHz channels sit below the 5 GHz starting frequency.
        182..=196 => Some(4000 + 5 * primary),
        36..=181 => Some(5000 + 5 * primary),
        _ => None,
    }
}

/// Absolute difference in MHz between two primary channels.
pub fn freq_diff(a: u8, b: u8) -> Option<u16> {
    let a = chan_to_freq(a)?;
    let b = chan_to_freq(b)?;
    Some(if a > b { a - b } else { b - a })
}

pub fn is_2ghz(primary: u8) -> bool {
    primary >= 1 && primary <= 14
}
