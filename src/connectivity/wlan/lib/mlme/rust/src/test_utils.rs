// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::{
        client::scan::{AddBssFlags, ScanResultSink},
        device::{Band, RxInfo},
    },
    parking_lot::Mutex,
    std::sync::Arc,
    wlan_common::{
        bss::BssDescription,
        mac::{
            FrameControl, MacAddr, MgmtHdr, MgmtSubtype, SequenceControl, BCAST_ADDR,
            FRAME_TYPE_MGMT,
        },
    },
};

pub const BSSID: MacAddr = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05];

pub fn fake_mgmt_hdr(subtype: u8, bssid: MacAddr) -> MgmtHdr {
    let mut frame_ctrl = FrameControl::from_raw(0);
    frame_ctrl.set_frame_type(FRAME_TYPE_MGMT);
    frame_ctrl.set_frame_subtype(subtype);
    let mut seq_ctrl = SequenceControl::from_raw(0);
    seq_ctrl.set_seq_num(42);
    MgmtHdr {
        frame_ctrl,
        duration: 0,
        addr1: BCAST_ADDR,
        addr2: bssid,
        addr3: bssid,
        seq_ctrl,
    }
}

pub fn fake_beacon_hdr(bssid: MacAddr) -> MgmtHdr {
    fake_mgmt_hdr(MgmtSubtype::BEACON, bssid)
}

pub fn fake_probe_resp_hdr(bssid: MacAddr) -> MgmtHdr {
    fake_mgmt_hdr(MgmtSubtype::PROBE_RESP, bssid)
}

pub fn fake_rx_info(channel: u8) -> RxInfo {
    RxInfo {
        channel,
        band: if channel > 14 { Band::FiveGhz } else { Band::TwoGhz },
        rssi_dbm: -40,
        rssi_raw: -38,
        tsf_delta: 0x1234,
        timestamp: 0xdead_beef,
    }
}

/// Records every delivered description. Clones share the same record.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub delivered: Arc<Mutex<Vec<(BssDescription, u64, AddBssFlags)>>>,
}

impl ScanResultSink for RecordingSink {
    fn add_bss_description(&mut self, bss: BssDescription, scan_id: u64, flags: AddBssFlags) {
        self.delivered.lock().push((bss, scan_id, flags));
    }
}
