// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::mac::{MacAddr, MgmtSubtype};

#[rustfmt::skip]
pub const DEFAULT_MOCK_IES: &'static [u8] = &[
    // SSID: "fuchsia"
    0x00, 0x07, 0x66, 0x75, 0x63, 0x68, 0x73, 0x69, 0x61,
    // Supported rates: 6(B), 9, 12(B), 18, 24(B), 36, 48, 54
    0x01, 0x08, 0x8c, 0x12, 0x98, 0x24, 0xb0, 0x48, 0x60, 0x6c,
    // DS parameter set: channel 140
    0x03, 0x01, 0x8c,
    // TIM - DTIM count: 0, DTIM period: 1, PVB: 2
    0x05, 0x04, 0x00, 0x01, 0x00, 0x02,
    // HT Capabilities
    0x2d, 0x1a, 0xef, 0x09, // HT capabilities info
    0x17, // A-MPDU parameters
    0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, // MCS set
    0x00, 0x00, // HT extended capabilities
    0x00, 0x00, 0x00, 0x00, // Transmit beamforming
    0x00, // Antenna selection capabilities
    // HT Operation
    0x3d, 0x16, 0x8c, // Primary channel: 140
    0x0d, // HT info subset - secondary channel above, any channel width, RIFS permitted
    0x16, 0x00, 0x00, 0x00, // HT info subsets
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, // Basic MCS set
    // VHT Capabilities
    0xbf, 0x0c, 0x91, 0x59, 0x82, 0x0f, // VHT capabilities info
    0xea, 0xff, 0x00, 0x00, 0xea, 0xff, 0x00, 0x00, // VHT supported MCS set
    // VHT Operation
    0xc0, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00,
    // WMM parameters
    0xdd, 0x18, 0x00, 0x50, 0xf2, 0x02, 0x01, 0x01, 0x80, // U-APSD enabled
    0x00, // reserved
    0x03, 0xa4, 0x00, 0x00, // AC_BE parameters
    0x27, 0xa4, 0x00, 0x00, // AC_BK parameters
    0x42, 0x43, 0x5e, 0x00, // AC_VI parameters
    0x62, 0x32, 0x2f, 0x00, // AC_VO parameters
];

/// Beacon or Probe Response body with a fixed TSF, a beacon interval of 100 TU and an ESS
/// capability with privacy, short preamble and short slot time.
pub fn fake_beacon_body(ies: &[u8]) -> Vec<u8> {
    fake_beacon_body_with_interval(100, ies)
}

pub fn fake_beacon_body_with_interval(beacon_interval: u16, ies: &[u8]) -> Vec<u8> {
    #[rustfmt::skip]
    let mut body = vec![
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, // timestamp
    ];
    body.extend_from_slice(&beacon_interval.to_le_bytes()[..]);
    body.extend_from_slice(&[0x31, 0x04]); // capabilities
    body.extend_from_slice(ies);
    body
}

fn fake_mgmt_frame(subtype: u8, bssid: MacAddr, body: &[u8]) -> Vec<u8> {
    let mut frame = vec![subtype << 4, 0x00, 0x00, 0x00]; // frame control, duration
    frame.extend_from_slice(&[0xff; 6][..]); // addr1
    frame.extend_from_slice(&bssid[..]); // addr2
    frame.extend_from_slice(&bssid[..]); // addr3
    frame.extend_from_slice(&[0x10, 0x00]); // sequence control: seq 1
    frame.extend_from_slice(body);
    frame
}

pub fn fake_beacon_frame(bssid: MacAddr, ies: &[u8]) -> Vec<u8> {
    fake_mgmt_frame(MgmtSubtype::BEACON, bssid, &fake_beacon_body(ies)[..])
}

pub fn fake_probe_resp_frame(bssid: MacAddr, ies: &[u8]) -> Vec<u8> {
    fake_mgmt_frame(MgmtSubtype::PROBE_RESP, bssid, &fake_beacon_body(ies)[..])
}

pub fn fake_ssid_ie(ssid: &[u8]) -> Vec<u8> {
    let mut ie = vec![0x00, ssid.len() as u8];
    ie.extend_from_slice(ssid);
    ie
}

pub fn fake_ds_param_ie(channel: u8) -> Vec<u8> {
    vec![0x03, 0x01, channel]
}

pub fn fake_csa_ie(new_channel: u8) -> Vec<u8> {
    // Mode: no restriction, switch count: 5
    vec![0x25, 0x03, 0x00, new_channel, 0x05]
}

pub fn fake_mdie() -> Vec<u8> {
    // MDID 0x1234, FT over DS
    vec![0x36, 0x03, 0x34, 0x12, 0x01]
}

pub fn fake_bss_load_ie(station_count: u16, channel_utilization: u8, avail: u16) -> Vec<u8> {
    let mut ie = vec![0x0b, 0x05];
    ie.extend_from_slice(&station_count.to_le_bytes()[..]);
    ie.push(channel_utilization);
    ie.extend_from_slice(&avail.to_le_bytes()[..]);
    ie
}

/// ESP element with one ESP Information field per (ACI, estimated air time fraction) pair.
pub fn fake_esp_ie(infos: &[(u8, u8)]) -> Vec<u8> {
    let mut ie = vec![0xff, 1 + 3 * infos.len() as u8, 11];
    for (aci, fraction) in infos {
        // Data format 0, BA window size 0, PPDU duration target 0
        ie.extend_from_slice(&[aci & 0b11, *fraction, 0x00]);
    }
    ie
}

/// FILS Indication advertising FILS SK authentication without PFS.
pub fn fake_fils_indication_ie(realms: &[[u8; 2]], cache_id: Option<[u8; 2]>) -> Vec<u8> {
    let mut info: u16 = 1 << 9;
    info |= ((realms.len() as u16) & 0b111) << 3;
    if cache_id.is_some() {
        info |= 1 << 7;
    }
    let mut body = info.to_le_bytes().to_vec();
    if let Some(cache_id) = cache_id {
        body.extend_from_slice(&cache_id[..]);
    }
    for realm in realms {
        body.extend_from_slice(&realm[..]);
    }
    let mut ie = vec![0xf0, body.len() as u8];
    ie.extend_from_slice(&body[..]);
    ie
}

/// HT Capabilities with the given 20/40 MHz support and Rx MCS bitmask for four streams.
pub fn fake_ht_cap_ie(cbw_40: bool, rx_mcs: [u8; 4]) -> Vec<u8> {
    let cap_info: u16 = if cbw_40 { 0x09ef } else { 0x09ed };
    let mut ie = vec![0x2d, 0x1a];
    ie.extend_from_slice(&cap_info.to_le_bytes()[..]);
    ie.push(0x17); // A-MPDU parameters
    ie.extend_from_slice(&rx_mcs[..]);
    ie.extend_from_slice(&[0x00; 12][..]); // rest of MCS set
    ie.extend_from_slice(&[0x00; 7][..]); // HT extended, TxBF and ASEL capabilities
    ie
}

pub fn fake_ht_operation_ie(primary_chan: u8) -> Vec<u8> {
    let mut ie = vec![0x3d, 0x16, primary_chan];
    ie.extend_from_slice(&[0x00; 21][..]);
    ie
}

pub fn fake_vht_cap_ie(rx_mcs_map: u16, su_bfer: bool) -> Vec<u8> {
    fake_vht_cap_ie_with_cbw_set(rx_mcs_map, su_bfer, 0)
}

pub fn fake_vht_cap_ie_with_cbw_set(rx_mcs_map: u16, su_bfer: bool, cbw_set: u8) -> Vec<u8> {
    let mut cap_info: u32 = 0x0f825191 & !(1 << 11);
    if su_bfer {
        cap_info |= 1 << 11;
    }
    cap_info |= ((cbw_set & 0b11) as u32) << 2;
    let mut ie = vec![0xbf, 0x0c];
    ie.extend_from_slice(&cap_info.to_le_bytes()[..]);
    ie.extend_from_slice(&rx_mcs_map.to_le_bytes()[..]);
    ie.extend_from_slice(&[0x00, 0x00]);
    ie.extend_from_slice(&rx_mcs_map.to_le_bytes()[..]); // Tx MCS map mirrors Rx
    ie.extend_from_slice(&[0x00, 0x00]);
    ie
}

pub fn fake_vht_op_ie(vht_cbw: u8) -> Vec<u8> {
    vec![0xc0, 0x05, vht_cbw, 0x9b, 0x00, 0xfc, 0xff]
}

/// Vendor VHT element wrapping a VHT Capabilities element with SU beamformer support.
pub fn fake_vendor_vht_ie() -> Vec<u8> {
    let vht_cap = fake_vht_cap_ie(0xfffa, true);
    let mut ie = vec![0xdd, (5 + vht_cap.len()) as u8, 0x00, 0x90, 0x4c, 0x04, 0x08];
    ie.extend_from_slice(&vht_cap[..]);
    ie
}
