// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    bitfield::bitfield,
    byteorder::{ByteOrder, LittleEndian},
    zerocopy::{AsBytes, ByteSlice, FromBytes, LayoutVerified, Unaligned},
};

pub type MacAddr = [u8; 6];
pub const BCAST_ADDR: MacAddr = [0xFF; 6];
pub const ZERO_ADDR: MacAddr = [0x00; 6];

// IEEE Std 802.11-2016, 9.2.4.1.3
pub const FRAME_TYPE_MGMT: u8 = 0;

// IEEE Std 802.11-2016, 9.2.4.1.3, Table 9-1
pub struct MgmtSubtype;
impl MgmtSubtype {
    pub const ASSOC_REQ: u8 = 0b0000;
    pub const ASSOC_RESP: u8 = 0b0001;
    pub const REASSOC_REQ: u8 = 0b0010;
    pub const REASSOC_RESP: u8 = 0b0011;
    pub const PROBE_REQ: u8 = 0b0100;
    pub const PROBE_RESP: u8 = 0b0101;
    pub const BEACON: u8 = 0b1000;
    pub const ATIM: u8 = 0b1001;
    pub const DISASSOC: u8 = 0b1010;
    pub const AUTH: u8 = 0b1011;
    pub const DEAUTH: u8 = 0b1100;
    pub const ACTION: u8 = 0b1101;
}

bitfield! {
    // IEEE Std 802.11-2016, 9.2.4.1.1
    #[derive(AsBytes, FromBytes, Clone, Copy, PartialEq, Eq, Default)]
    #[repr(C)]
    pub struct FrameControl(u16);
    impl Debug;
    pub u8, protocol_version, set_protocol_version: 1, 0;
    pub u8, frame_type, set_frame_type: 3, 2;
    pub u8, frame_subtype, set_frame_subtype: 7, 4;
    bool;
    pub to_ds, set_to_ds: 8;
    pub from_ds, set_from_ds: 9;
    pub more_frags, set_more_frags: 10;
    pub retry, set_retry: 11;
    pub pwr_mgmt, set_pwr_mgmt: 12;
    pub more_data, set_more_data: 13;
    pub protected, set_protected: 14;
    pub htc_order, set_htc_order: 15;
}

impl FrameControl {
    pub fn from_raw(raw: u16) -> Self {
        FrameControl(raw)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }
}

bitfield! {
    // IEEE Std 802.11-2016, 9.2.4.4
    #[derive(AsBytes, FromBytes, Clone, Copy, PartialEq, Eq, Default)]
    #[repr(C)]
    pub struct SequenceControl(u16);
    impl Debug;
    pub u8, frag_num, set_frag_num: 3, 0;
    pub u16, seq_num, set_seq_num: 15, 4;
}

impl SequenceControl {
    pub fn from_raw(raw: u16) -> Self {
        SequenceControl(raw)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }
}

bitfield! {
    // IEEE Std 802.11-2016, 9.4.1.4
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct CapabilityInfo(u16);
    impl Debug;
    bool;
    pub ess, set_ess: 0;
    pub ibss, set_ibss: 1;
    pub cf_pollable, set_cf_pollable: 2;
    pub cf_poll_req, set_cf_poll_req: 3;
    pub privacy, set_privacy: 4;
    pub short_preamble, set_short_preamble: 5;
    // bit 6-7 reserved
    pub spectrum_mgmt, set_spectrum_mgmt: 8;
    pub qos, set_qos: 9;
    pub short_slot_time, set_short_slot_time: 10;
    pub apsd, set_apsd: 11;
    pub radio_measurement, set_radio_measurement: 12;
    // bit 13 reserved
    pub delayed_block_ack, set_delayed_block_ack: 14;
    pub immediate_block_ack, set_immediate_block_ack: 15;
}

impl CapabilityInfo {
    pub fn from_raw(raw: u16) -> Self {
        CapabilityInfo(raw)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }
}

/// Capability Info as it appears on the wire.
pub type RawCapabilityInfo = [u8; 2];

/// Reads a wire-order Capability Info field. Management frame fields are little endian.
pub fn get_capability_info(raw: &RawCapabilityInfo) -> CapabilityInfo {
    CapabilityInfo(LittleEndian::read_u16(&raw[..]))
}

// IEEE Std 802.11-2016, 9.3.3.2
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct MgmtHdr {
    pub frame_ctrl: FrameControl,
    pub duration: u16,
    pub addr1: MacAddr,
    pub addr2: MacAddr,
    pub addr3: MacAddr,
    pub seq_ctrl: SequenceControl,
}

// IEEE Std 802.11-2016, 9.3.3.3 and 9.3.3.11
#[derive(FromBytes, AsBytes, Unaligned, Clone, Copy, Debug)]
#[repr(C, packed)]
pub struct BeaconHdr {
    pub timestamp: u64,
    pub beacon_interval: u16,
    pub capabilities: RawCapabilityInfo,
}

/// Offset of the first element (the SSID) within a Beacon or Probe Response body.
pub const BEACON_SSID_OFFSET: usize = std::mem::size_of::<BeaconHdr>();

/// The two management frames carrying a BSS advertisement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeaconKind {
    Beacon,
    ProbeResponse,
}

impl BeaconKind {
    pub fn from_frame_ctrl(fc: FrameControl) -> Option<Self> {
        if fc.frame_type() != FRAME_TYPE_MGMT {
            return None;
        }
        match fc.frame_subtype() {
            MgmtSubtype::BEACON => Some(BeaconKind::Beacon),
            MgmtSubtype::PROBE_RESP => Some(BeaconKind::ProbeResponse),
            _ => None,
        }
    }

    pub fn is_probe_response(&self) -> bool {
        *self == BeaconKind::ProbeResponse
    }
}

pub struct MgmtFrame<B: ByteSlice> {
    pub mgmt_hdr: LayoutVerified<B, MgmtHdr>,
    pub body: B,
}

impl<B: ByteSlice> MgmtFrame<B> {
    pub fn parse(bytes: B) -> Option<Self> {
        let (mgmt_hdr, body) = LayoutVerified::<B, MgmtHdr>::new_unaligned_from_prefix(bytes)?;
        let fc = { mgmt_hdr.frame_ctrl };
        if fc.frame_type() != FRAME_TYPE_MGMT {
            return None;
        }
        // A management frame carries HT Control when the order bit is set.
        let body = if fc.htc_order() {
            let (_, body) = LayoutVerified::<B, [u8; 4]>::new_unaligned_from_prefix(body)?;
            body
        } else {
            body
        };
        Some(Self { mgmt_hdr, body })
    }

    pub fn beacon_kind(&self) -> Option<BeaconKind> {
        let frame_ctrl = { self.mgmt_hdr.frame_ctrl };
        BeaconKind::from_frame_ctrl(frame_ctrl)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::test_utils::fake_frames::fake_beacon_frame};

    #[test]
    fn frame_control_subtype() {
        let mut fc = FrameControl::default();
        fc.set_frame_subtype(MgmtSubtype::PROBE_RESP);
        assert_eq!(fc.raw(), 0x0050);
        assert_eq!(BeaconKind::from_frame_ctrl(fc), Some(BeaconKind::ProbeResponse));

        let fc = FrameControl::from_raw(0x0080);
        assert_eq!(BeaconKind::from_frame_ctrl(fc), Some(BeaconKind::Beacon));

        // Data frame with a beacon's subtype bits.
        let fc = FrameControl::from_raw(0x0088);
        assert_eq!(BeaconKind::from_frame_ctrl(fc), None);
    }

    #[test]
    fn sequence_control_fields() {
        let sc = SequenceControl::from_raw(0x1234);
        assert_eq!(sc.frag_num(), 4);
        assert_eq!(sc.seq_num(), 0x123);
    }

    #[test]
    fn capability_info_little_endian() {
        let cap = get_capability_info(&[0x11, 0x04]);
        assert_eq!(cap.raw(), 0x0411);
        assert!(cap.ess());
        assert!(cap.privacy());
        assert!(cap.short_slot_time());
        assert!(!cap.ibss());
    }

    #[test]
    fn beacon_ssid_offset() {
        assert_eq!(BEACON_SSID_OFFSET, 12);
    }

    #[test]
    fn parse_mgmt_frame() {
        let bytes = fake_beacon_frame([1, 2, 3, 4, 5, 6], &[0, 3, b'f', b'o', b'o']);
        let frame = MgmtFrame::parse(&bytes[..]).expect("valid mgmt frame");
        assert_eq!(frame.mgmt_hdr.addr3, [1, 2, 3, 4, 5, 6]);
        assert_eq!(frame.beacon_kind(), Some(BeaconKind::Beacon));
        assert_eq!(frame.body.len(), BEACON_SSID_OFFSET + 5);
    }

    #[test]
    fn parse_mgmt_frame_too_short() {
        assert!(MgmtFrame::parse(&[0x80, 0x00, 0x00][..]).is_none());
    }
}
