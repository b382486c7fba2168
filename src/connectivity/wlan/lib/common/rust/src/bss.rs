// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::{
        beacon::ParsedBeacon,
        channel::{self, Cbw},
        ie::{FilsCacheId, FilsRealm},
        mac::{CapabilityInfo, MacAddr, SequenceControl},
    },
    std::{convert::TryFrom, mem::size_of},
    zerocopy::{AsBytes, FromBytes, Unaligned},
};

/// Upper bound on FILS realm identifiers kept per BSS.
pub const MAX_REALM_COUNT: usize = 7;

/// PHY flavor of a BSS as seen on a given channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkType {
    A,
    B,
    G,
}

impl Default for NetworkType {
    fn default() -> Self {
        NetworkType::B
    }
}

impl NetworkType {
    /// Channels outside 2.4 GHz are 802.11a. On 2.4 GHz, a BSS is 802.11g if it advertises an
    /// OFDM rate, Extended Supported Rates, HT Operation or VHT capability, and 802.11b otherwise.
    pub fn classify(channel: u8, beacon: &ParsedBeacon) -> Self {
        if !channel::is_2ghz(channel) {
            return NetworkType::A;
        }
        let vht_capable = beacon.vht_cap.map_or(false, |vht_cap| vht_cap.is_vht_capable());
        if beacon.supported_rates.iter().any(|rate| rate.is_ofdm())
            || beacon.ext_supported_rates.is_some()
            || beacon.ht_op.is_some()
            || vht_capable
        {
            NetworkType::G
        } else {
            NetworkType::B
        }
    }

    fn raw(&self) -> u8 {
        match self {
            NetworkType::A => 0,
            NetworkType::B => 1,
            NetworkType::G => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QbssLoadInfo {
    pub avail_admission_capacity: u16,
    pub channel_utilization: u8,
    pub station_count: u16,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilsInfo {
    /// At most `MAX_REALM_COUNT` entries.
    pub realms: Vec<FilsRealm>,
    pub cache_id: Option<FilsCacheId>,
    pub is_fils_sk_supported: bool,
}

/// Flat layout of the fixed part of a BSS description. The IE bytes follow it directly.
#[repr(C, packed)]
#[derive(AsBytes, FromBytes, Unaligned, Clone, Copy, Default)]
pub struct RawBssDescriptionHdr {
    pub length: u16,
    pub bssid: MacAddr,
    pub boot_time_ns: u64,
    pub timestamp: [u32; 2],
    pub beacon_interval: u16,
    pub capability_info: u16,
    pub nw_type: u8,
    pub rssi: i8,
    pub rssi_raw: i8,
    pub sinr: i8,
    pub channel: u8,
    pub channel_self: u8,
    pub rx_channel: u8,
    pub received_time_ms: u64,
    pub parent_tsf: u32,
    pub start_tsf: [u32; 2],
    pub tsf_delta: u32,
    pub seq_ctrl: u16,
    pub chan_width: u8,
    pub ht_caps_present: u8,
    pub vht_caps_present: u8,
    pub beamforming_capable: u8,
    pub nss: u8,
    pub air_time_fraction: u8,
    pub mdie_present: u8,
    pub mdie: [u8; 3],
    pub qbss_load_present: u8,
    pub qbss_load_avail: u16,
    pub qbss_chan_load: u8,
    pub qbss_sta_count: u16,
    pub fils_info_present: u8,
    pub fils_realm_count: u8,
    pub fils_realms: [u8; 2 * MAX_REALM_COUNT],
    pub fils_cache_id_present: u8,
    pub fils_cache_id: FilsCacheId,
    pub fils_sk_supported: u8,
    pub is_probe_response: u8,
}

/// A BSS as cached from a single Beacon or Probe Response.
///
/// `length` and `ies` are kept consistent by construction: `length` counts every byte of the flat
/// layout except the length field itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BssDescription {
    length: u16,
    pub bssid: MacAddr,
    /// Boot-time clock in nanoseconds when the frame was processed.
    pub boot_time_ns: u64,
    pub timestamp: [u32; 2],
    pub beacon_interval: u16,
    pub capability_info: CapabilityInfo,
    pub nw_type: NetworkType,
    pub rssi: i8,
    pub rssi_raw: i8,
    /// Always zero. Hardware no longer reports SINR.
    pub sinr: i8,
    pub channel: u8,
    pub channel_self: u8,
    pub rx_channel: u8,
    /// Wall clock in milliseconds when the frame was processed.
    pub received_time_ms: u64,
    pub parent_tsf: u32,
    pub start_tsf: [u32; 2],
    pub tsf_delta: u32,
    pub seq_ctrl: SequenceControl,
    pub cbw: Cbw,
    pub ht_caps_present: bool,
    pub vht_caps_present: bool,
    pub beamforming_capable: bool,
    pub nss: u8,
    pub air_time_fraction: u8,
    pub mdie: Option<[u8; 3]>,
    pub qbss_load: Option<QbssLoadInfo>,
    pub fils_info: Option<FilsInfo>,
    pub is_probe_response: bool,
    ies: Vec<u8>,
}

// Bytes of the flat layout after the length field, excluding IEs.
const FIXED_LENGTH: usize = size_of::<RawBssDescriptionHdr>() - size_of::<u16>();

impl Default for BssDescription {
    fn default() -> Self {
        Self {
            length: FIXED_LENGTH as u16,
            bssid: [0; 6],
            boot_time_ns: 0,
            timestamp: [0; 2],
            beacon_interval: 0,
            capability_info: CapabilityInfo::default(),
            nw_type: NetworkType::default(),
            rssi: 0,
            rssi_raw: 0,
            sinr: 0,
            channel: 0,
            channel_self: 0,
            rx_channel: 0,
            received_time_ms: 0,
            parent_tsf: 0,
            start_tsf: [0; 2],
            tsf_delta: 0,
            seq_ctrl: SequenceControl::default(),
            cbw: Cbw::default(),
            ht_caps_present: false,
            vht_caps_present: false,
            beamforming_capable: false,
            nss: 0,
            air_time_fraction: 0,
            mdie: None,
            qbss_load: None,
            fils_info: None,
            is_probe_response: false,
            ies: vec![],
        }
    }
}

impl BssDescription {
    /// Length of a description carrying `ie_len` bytes of elements, or None if it does not fit
    /// the 16-bit length field.
    pub fn length_for(ie_len: usize) -> Option<u16> {
        u16::try_from(FIXED_LENGTH.checked_add(ie_len)?).ok()
    }

    /// Creates a description owning `ies`. Returns None if the elements are too long to describe.
    pub fn new(bssid: MacAddr, ies: Vec<u8>) -> Option<Self> {
        let length = Self::length_for(ies.len())?;
        Some(Self { length, bssid, ies, ..Default::default() })
    }

    pub fn length(&self) -> u16 {
        self.length
    }

    pub fn ies(&self) -> &[u8] {
        &self.ies[..]
    }

    pub fn into_ies(self) -> Vec<u8> {
        self.ies
    }

    /// Serializes the description into its flat layout followed by the IE bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut hdr = RawBssDescriptionHdr {
            length: self.length,
            bssid: self.bssid,
            boot_time_ns: self.boot_time_ns,
            timestamp: self.timestamp,
            beacon_interval: self.beacon_interval,
            capability_info: self.capability_info.raw(),
            nw_type: self.nw_type.raw(),
            rssi: self.rssi,
            rssi_raw: self.rssi_raw,
            sinr: self.sinr,
            channel: self.channel,
            channel_self: self.channel_self,
            rx_channel: self.rx_channel,
            received_time_ms: self.received_time_ms,
            parent_tsf: self.parent_tsf,
            start_tsf: self.start_tsf,
            tsf_delta: self.tsf_delta,
            seq_ctrl: self.seq_ctrl.raw(),
            chan_width: match self.cbw {
                Cbw::Cbw20 => 0,
                Cbw::Cbw40 => 1,
                Cbw::Cbw80 => 2,
            },
            ht_caps_present: self.ht_caps_present as u8,
            vht_caps_present: self.vht_caps_present as u8,
            beamforming_capable: self.beamforming_capable as u8,
            nss: self.nss,
            air_time_fraction: self.air_time_fraction,
            is_probe_response: self.is_probe_response as u8,
            ..Default::default()
        };
        if let Some(mdie) = self.mdie {
            hdr.mdie_present = 1;
            hdr.mdie = mdie;
        }
        if let Some(qbss) = self.qbss_load {
            hdr.qbss_load_present = 1;
            hdr.qbss_load_avail = qbss.avail_admission_capacity;
            hdr.qbss_chan_load = qbss.channel_utilization;
            hdr.qbss_sta_count = qbss.station_count;
        }
        if let Some(fils) = &self.fils_info {
            hdr.fils_info_present = 1;
            let realms = &fils.realms[..fils.realms.len().min(MAX_REALM_COUNT)];
            hdr.fils_realm_count = realms.len() as u8;
            for (dst, realm) in hdr.fils_realms.chunks_mut(2).zip(realms) {
                dst.copy_from_slice(&realm[..]);
            }
            if let Some(cache_id) = fils.cache_id {
                hdr.fils_cache_id_present = 1;
                hdr.fils_cache_id = cache_id;
            }
            hdr.fils_sk_supported = fils.is_fils_sk_supported as u8;
        }

        let mut bytes = Vec::with_capacity(size_of::<RawBssDescriptionHdr>() + self.ies.len());
        bytes.extend_from_slice(hdr.as_bytes());
        bytes.extend_from_slice(&self.ies[..]);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{ie, test_utils::fake_frames::*},
        zerocopy::LayoutVerified,
    };

    #[test]
    fn fixed_header_size() {
        assert_eq!(size_of::<RawBssDescriptionHdr>(), 98);
    }

    #[test]
    fn length_matches_flat_layout() {
        for ie_len in &[1usize, 2, 12, 255, 1024, 2304] {
            let bss = BssDescription::new([1; 6], vec![0xdd; *ie_len]).expect("fits");
            assert_eq!(bss.length(), BssDescription::length_for(*ie_len).expect("fits"));
            assert_eq!(bss.length() as usize, bss.to_bytes().len() - size_of::<u16>());
        }
    }

    #[test]
    fn length_overflow() {
        assert_eq!(BssDescription::length_for(0xFFFF), None);
        assert!(BssDescription::new([1; 6], vec![0; 0xFFFF]).is_none());
    }

    #[test]
    fn default_length_counts_fixed_fields() {
        let bss = BssDescription::default();
        assert_eq!(Some(bss.length()), BssDescription::length_for(0));
        assert_eq!(bss.length(), 96);

        let bytes = bss.to_bytes();
        let hdr = LayoutVerified::<_, RawBssDescriptionHdr>::new_unaligned(&bytes[..])
            .expect("flat header");
        assert_eq!({ hdr.length } as usize, bytes.len() - size_of::<u16>());
    }

    #[test]
    fn to_bytes_layout() {
        let mut bss = BssDescription::new([1, 2, 3, 4, 5, 6], vec![0, 3, b'f', b'o', b'o'])
            .expect("fits");
        bss.beacon_interval = 100;
        bss.channel = 6;
        bss.rx_channel = 7;
        bss.cbw = Cbw::Cbw40;
        bss.mdie = Some([0x34, 0x12, 0x01]);
        bss.qbss_load = Some(QbssLoadInfo {
            avail_admission_capacity: 1000,
            channel_utilization: 50,
            station_count: 3,
        });
        bss.fils_info = Some(FilsInfo {
            realms: vec![[0xaa, 0xbb]],
            cache_id: None,
            is_fils_sk_supported: true,
        });
        bss.is_probe_response = true;

        let bytes = bss.to_bytes();
        let (hdr, ies) =
            LayoutVerified::<_, RawBssDescriptionHdr>::new_unaligned_from_prefix(&bytes[..])
                .expect("flat header");
        assert_eq!({ hdr.length }, bss.length());
        assert_eq!(hdr.bssid, [1, 2, 3, 4, 5, 6]);
        assert_eq!({ hdr.beacon_interval }, 100);
        assert_eq!(hdr.channel, 6);
        assert_eq!(hdr.rx_channel, 7);
        assert_eq!(hdr.chan_width, 1);
        assert_eq!(hdr.mdie_present, 1);
        assert_eq!(hdr.mdie, [0x34, 0x12, 0x01]);
        assert_eq!(hdr.qbss_load_present, 1);
        assert_eq!({ hdr.qbss_load_avail }, 1000);
        assert_eq!(hdr.fils_realm_count, 1);
        assert_eq!(&hdr.fils_realms[..2], &[0xaa, 0xbb]);
        assert_eq!(hdr.fils_cache_id_present, 0);
        assert_eq!(hdr.fils_sk_supported, 1);
        assert_eq!(hdr.is_probe_response, 1);
        assert_eq!(ies, &[0, 3, b'f', b'o', b'o']);
    }

    #[test]
    fn classify_5ghz() {
        assert_eq!(NetworkType::classify(36, &ParsedBeacon::default()), NetworkType::A);
        assert_eq!(NetworkType::classify(0, &ParsedBeacon::default()), NetworkType::A);
    }

    #[test]
    fn classify_2ghz() {
        let mut beacon = ParsedBeacon::default();
        beacon.supported_rates = vec![ie::SupportedRate(0x82), ie::SupportedRate(0x84)];
        assert_eq!(NetworkType::classify(1, &beacon), NetworkType::B);

        beacon.supported_rates.push(ie::SupportedRate(0x0c));
        assert_eq!(NetworkType::classify(1, &beacon), NetworkType::G);

        beacon.supported_rates.pop();
        beacon.ext_supported_rates = Some(vec![ie::SupportedRate(0x30)]);
        assert_eq!(NetworkType::classify(11, &beacon), NetworkType::G);

        let body = fake_beacon_body(&fake_ht_operation_ie(6));
        let beacon = ParsedBeacon::parse(&body[..]).expect("valid");
        assert_eq!(NetworkType::classify(6, &beacon), NetworkType::G);
    }
}
