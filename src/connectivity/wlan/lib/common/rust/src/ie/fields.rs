// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::mac::MacAddr,
    bitfield::bitfield,
    zerocopy::{AsBytes, FromBytes, Unaligned},
};

// IEEE Std 802.11-2016, 9.4.2.3
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct SupportedRate(pub u8);

impl SupportedRate {
    pub fn rate(&self) -> u8 {
        self.0 & 0x7F
    }

    pub fn basic(&self) -> bool {
        self.0 & 0x80 != 0
    }

    /// Rates of the Clause 17 and Clause 18 OFDM PHYs, in units of 500 kb/s.
    pub fn is_ofdm(&self) -> bool {
        match self.rate() {
            12 | 18 | 24 | 36 | 48 | 72 | 96 | 108 => true,
            _ => false,
        }
    }
}

// IEEE Std 802.11-2016, 9.4.2.4
#[repr(C, packed)]
#[derive(PartialEq, Eq, Clone, Copy, Debug, AsBytes, FromBytes, Unaligned)]
pub struct DsssParamSet {
    pub current_chan: u8,
}

// IEEE Std 802.11-2016, 9.4.2.28
#[repr(C, packed)]
#[derive(PartialEq, Eq, Clone, Copy, Debug, AsBytes, FromBytes, Unaligned)]
pub struct BssLoad {
    pub station_count: u16,
    pub channel_utilization: u8,
    pub avail_admission_capacity: u16,
}

// IEEE Std 802.11-2016, 9.4.2.19
#[repr(C, packed)]
#[derive(PartialEq, Eq, Clone, Copy, Debug, AsBytes, FromBytes, Unaligned)]
pub struct ChannelSwitchAnnouncement {
    pub mode: u8,
    pub new_channel_number: u8,
    pub channel_switch_count: u8,
}

// IEEE Std 802.11-2016, 9.4.2.47
#[repr(C, packed)]
#[derive(PartialEq, Eq, Clone, Copy, Debug, AsBytes, FromBytes, Unaligned)]
pub struct MobilityDomain {
    pub mdid: [u8; 2],
    pub ft_capability_policy: u8,
}

// IEEE Std 802.11-2016, 9.4.2.56
#[repr(C, packed)]
#[derive(PartialEq, Eq, Clone, Copy, Debug, AsBytes, FromBytes, Unaligned)]
pub struct HtCapabilities {
    pub ht_cap_info: HtCapabilityInfo,
    pub ampdu_params: u8,
    pub mcs_set: SupportedMcsSet,
    pub ht_ext_cap: u16,
    pub txbf_cap: u32,
    pub asel_cap: u8,
}

bitfield! {
    // IEEE Std 802.11-2016, 9.4.2.56.2
    #[derive(PartialEq, Eq, Clone, Copy, Default, AsBytes, FromBytes)]
    #[repr(C)]
    pub struct HtCapabilityInfo(u16);
    impl Debug;
    bool;
    pub ldpc_coding_cap, set_ldpc_coding_cap: 0;
    // false: 20 MHz only, true: 20 MHz and 40 MHz
    pub chan_width_set, set_chan_width_set: 1;
    pub u8, sm_power_save, set_sm_power_save: 3, 2;
    pub greenfield, set_greenfield: 4;
    pub short_gi_20, set_short_gi_20: 5;
    pub short_gi_40, set_short_gi_40: 6;
    pub tx_stbc, set_tx_stbc: 7;
    pub u8, rx_stbc, set_rx_stbc: 9, 8;
    pub delayed_block_ack, set_delayed_block_ack: 10;
    pub max_amsdu_len, set_max_amsdu_len: 11;
    pub dsss_in_40, set_dsss_in_40: 12;
    // bit 13 reserved
    pub intolerant_40, set_intolerant_40: 14;
    pub lsig_txop_protect, set_lsig_txop_protect: 15;
}

impl HtCapabilityInfo {
    pub fn from_raw(raw: u16) -> Self {
        HtCapabilityInfo(raw)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }
}

// IEEE Std 802.11-2016, 9.4.2.56.4
#[repr(C)]
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, AsBytes, FromBytes, Unaligned)]
pub struct SupportedMcsSet(pub [u8; 16]);

impl SupportedMcsSet {
    /// One byte of the Rx MCS bitmask per spatial stream, for the first four streams.
    pub fn rx_mcs_bitmask(&self) -> &[u8] {
        &self.0[0..4]
    }
}

// IEEE Std 802.11-2016, 9.4.2.57
#[repr(C, packed)]
#[derive(PartialEq, Eq, Clone, Copy, Debug, AsBytes, FromBytes, Unaligned)]
pub struct HtOperation {
    pub primary_chan: u8,
    pub ht_op_info: [u8; 5],
    pub basic_ht_mcs_set: SupportedMcsSet,
}

// IEEE Std 802.11-2016, 9.4.2.158
#[repr(C, packed)]
#[derive(PartialEq, Eq, Clone, Copy, Debug, AsBytes, FromBytes, Unaligned)]
pub struct VhtCapabilities {
    pub vht_cap_info: VhtCapabilitiesInfo,
    pub vht_mcs_nss: VhtMcsNssSet,
}

bitfield! {
    // IEEE Std 802.11-2016, 9.4.2.158.2
    #[derive(PartialEq, Eq, Clone, Copy, Default, AsBytes, FromBytes)]
    #[repr(C)]
    pub struct VhtCapabilitiesInfo(u32);
    impl Debug;
    pub u8, max_mpdu_len, set_max_mpdu_len: 1, 0;
    pub u8, supported_cbw_set, set_supported_cbw_set: 3, 2;
    bool;
    pub rx_ldpc, set_rx_ldpc: 4;
    pub sgi_cbw80, set_sgi_cbw80: 5;
    pub sgi_cbw160, set_sgi_cbw160: 6;
    pub tx_stbc, set_tx_stbc: 7;
    pub u8, rx_stbc, set_rx_stbc: 10, 8;
    pub su_bfer, set_su_bfer: 11;
    pub su_bfee, set_su_bfee: 12;
    pub u8, bfee_sts, set_bfee_sts: 15, 13;
    pub u8, num_sounding, set_num_sounding: 18, 16;
    pub mu_bfer, set_mu_bfer: 19;
    pub mu_bfee, set_mu_bfee: 20;
    pub txop_ps, set_txop_ps: 21;
    pub htc_vht, set_htc_vht: 22;
    pub u8, max_ampdu_exponent, set_max_ampdu_exponent: 25, 23;
    pub u8, link_adapt, set_link_adapt: 27, 26;
    pub rx_ant_pattern, set_rx_ant_pattern: 28;
    pub tx_ant_pattern, set_tx_ant_pattern: 29;
    pub u8, ext_nss_bw, set_ext_nss_bw: 31, 30;
}

impl VhtCapabilitiesInfo {
    // Supported Channel Width Set value 3 is reserved.
    pub const SUPPORTED_CBW_SET_RESERVED: u8 = 3;

    pub fn from_raw(raw: u32) -> Self {
        VhtCapabilitiesInfo(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

// IEEE Std 802.11-2016, 9.4.2.158.3
#[repr(C, packed)]
#[derive(PartialEq, Eq, Clone, Copy, Debug, AsBytes, FromBytes, Unaligned)]
pub struct VhtMcsNssSet {
    pub rx_mcs_map: u16,
    pub rx_max_data_rate: u16,
    pub tx_mcs_map: u16,
    pub tx_max_data_rate: u16,
}

impl VhtCapabilities {
    /// A VHT Capabilities element signals VHT support when its Supported Channel Width Set
    /// subfield holds a defined value.
    pub fn is_vht_capable(&self) -> bool {
        let info = self.vht_cap_info;
        info.supported_cbw_set() != VhtCapabilitiesInfo::SUPPORTED_CBW_SET_RESERVED
    }

    pub fn su_beamformer(&self) -> bool {
        let info = self.vht_cap_info;
        info.su_bfer()
    }

    pub fn rx_mcs_map(&self) -> u16 {
        self.vht_mcs_nss.rx_mcs_map
    }
}

// IEEE Std 802.11-2016, 9.4.2.159
#[repr(C, packed)]
#[derive(PartialEq, Eq, Clone, Copy, Debug, AsBytes, FromBytes, Unaligned)]
pub struct VhtOperation {
    pub vht_cbw: VhtChannelBandwidth,
    pub center_freq_seg0: u8,
    pub center_freq_seg1: u8,
    pub basic_mcs_nss: u16,
}

// IEEE Std 802.11-2016, Table 9-252
#[repr(C, packed)]
#[derive(PartialEq, Eq, Clone, Copy, Debug, AsBytes, FromBytes, Unaligned)]
pub struct VhtChannelBandwidth(pub u8);

impl VhtChannelBandwidth {
    pub const CBW_20_40: Self = Self(0);
    pub const CBW_80_160_80P80: Self = Self(1);
    pub const CBW_160: Self = Self(2); // deprecated
    pub const CBW_80P80: Self = Self(3); // deprecated
}

// IEEE Std 802.11-2016, 9.4.2.29, Table 9-137
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct AccessCategory(pub u8);

impl AccessCategory {
    pub const BE: Self = Self(0);
    pub const BK: Self = Self(1);
    pub const VI: Self = Self(2);
    pub const VO: Self = Self(3);
}

// IEEE Std 802.11-2016, 9.4.2.174, Figure 9-589
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct EspInfo {
    pub access_category: AccessCategory,
    pub data_format: u8,
    pub ba_window_size: u8,
    /// Percentage of air time available to a new station, in units of 255/100 %.
    pub estimated_air_time_fraction: u8,
    pub data_ppdu_duration_target: u8,
}

/// Estimated Service Parameters, one optional entry per access category.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct EspInformation {
    pub ac_be: Option<EspInfo>,
    pub ac_bk: Option<EspInfo>,
    pub ac_vi: Option<EspInfo>,
    pub ac_vo: Option<EspInfo>,
}

bitfield! {
    // IEEE Std 802.11ai-2016, 9.4.2.179, Figure 9-603a
    #[derive(PartialEq, Eq, Clone, Copy, Default)]
    pub struct FilsIndicationInfo(u16);
    impl Debug;
    pub u8, num_public_key_ids, set_num_public_key_ids: 2, 0;
    pub u8, num_realm_ids, set_num_realm_ids: 5, 3;
    bool;
    pub ip_addr_config, set_ip_addr_config: 6;
    pub cache_id_included, set_cache_id_included: 7;
    pub hessid_included, set_hessid_included: 8;
    pub fils_sk_auth_without_pfs, set_fils_sk_auth_without_pfs: 9;
    pub fils_sk_auth_with_pfs, set_fils_sk_auth_with_pfs: 10;
    pub fils_public_key_auth, set_fils_public_key_auth: 11;
}

impl FilsIndicationInfo {
    pub fn from_raw(raw: u16) -> Self {
        FilsIndicationInfo(raw)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }
}

pub type FilsRealm = [u8; 2];
pub type FilsCacheId = [u8; 2];

// IEEE Std 802.11ai-2016, 9.4.2.179
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct FilsIndication {
    pub info: FilsIndicationInfo,
    pub cache_identifier: Option<FilsCacheId>,
    pub hessid: Option<MacAddr>,
    pub realm_identifiers: Vec<FilsRealm>,
}

impl FilsIndication {
    pub fn is_fils_sk_auth_supported(&self) -> bool {
        self.info.fils_sk_auth_without_pfs()
    }
}
