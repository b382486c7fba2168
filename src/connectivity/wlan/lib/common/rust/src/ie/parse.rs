// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{fields::*, Id, Reader, SSID_MAX_LEN},
    crate::{
        buffer_reader::BufferReader,
        error::{FrameParseError, FrameParseResult},
        mac::MacAddr,
    },
    byteorder::{ByteOrder, LittleEndian},
    zerocopy::{ByteSlice, FromBytes, LayoutVerified, Unaligned},
};

// Broadcom vendor element wrapping VHT elements for 2.4 GHz VHT ("VHT in 2.4 GHz").
pub const VENDOR_VHT_OUI_TYPE: [u8; 4] = [0x00, 0x90, 0x4c, 0x04];

const ESP_INFO_LEN: usize = 3;

fn parse_fixed<B: ByteSlice, T: FromBytes + Unaligned + Copy>(
    raw_body: B,
    name: &str,
) -> FrameParseResult<T> {
    LayoutVerified::<B, T>::new_unaligned(raw_body)
        .map(|body| *body)
        .ok_or_else(|| FrameParseError::new(format!("Invalid length of {} element", name)))
}

pub fn parse_ssid<B: ByteSlice>(raw_body: B) -> FrameParseResult<B> {
    if raw_body.len() > SSID_MAX_LEN {
        Err(FrameParseError::new("SSID is too long"))
    } else {
        Ok(raw_body)
    }
}

pub fn parse_supported_rates<B: ByteSlice>(raw_body: B) -> FrameParseResult<Vec<SupportedRate>> {
    if raw_body.is_empty() {
        return Err(FrameParseError::new("Empty rates element"));
    }
    Ok(raw_body.iter().map(|r| SupportedRate(*r)).collect())
}

pub fn parse_dsss_param_set<B: ByteSlice>(raw_body: B) -> FrameParseResult<DsssParamSet> {
    parse_fixed(raw_body, "DSSS Parameter Set")
}

pub fn parse_bss_load<B: ByteSlice>(raw_body: B) -> FrameParseResult<BssLoad> {
    parse_fixed(raw_body, "BSS Load")
}

pub fn parse_channel_switch_announcement<B: ByteSlice>(
    raw_body: B,
) -> FrameParseResult<ChannelSwitchAnnouncement> {
    parse_fixed(raw_body, "Channel Switch Announcement")
}

pub fn parse_mobility_domain<B: ByteSlice>(raw_body: B) -> FrameParseResult<MobilityDomain> {
    parse_fixed(raw_body, "Mobility Domain")
}

pub fn parse_ht_capabilities<B: ByteSlice>(raw_body: B) -> FrameParseResult<HtCapabilities> {
    parse_fixed(raw_body, "HT Capabilities")
}

pub fn parse_ht_operation<B: ByteSlice>(raw_body: B) -> FrameParseResult<HtOperation> {
    parse_fixed(raw_body, "HT Operation")
}

pub fn parse_vht_capabilities<B: ByteSlice>(raw_body: B) -> FrameParseResult<VhtCapabilities> {
    parse_fixed(raw_body, "VHT Capabilities")
}

pub fn parse_vht_operation<B: ByteSlice>(raw_body: B) -> FrameParseResult<VhtOperation> {
    parse_fixed(raw_body, "VHT Operation")
}

/// Parses the body of an Estimated Service Parameters element, excluding the extension id.
/// Each ESP Information field lands in the slot of the access category it names.
pub fn parse_esp_information<B: ByteSlice>(raw_body: B) -> FrameParseResult<EspInformation> {
    let len = raw_body.len();
    if len == 0 || len % ESP_INFO_LEN != 0 || len > 4 * ESP_INFO_LEN {
        return Err(FrameParseError::new("Invalid length of ESP element"));
    }
    let mut esp = EspInformation::default();
    for chunk in raw_body.chunks(ESP_INFO_LEN) {
        let info = EspInfo {
            access_category: AccessCategory(chunk[0] & 0b11),
            data_format: (chunk[0] >> 3) & 0b11,
            ba_window_size: chunk[0] >> 5,
            estimated_air_time_fraction: chunk[1],
            data_ppdu_duration_target: chunk[2],
        };
        let slot = match info.access_category {
            AccessCategory::BE => &mut esp.ac_be,
            AccessCategory::BK => &mut esp.ac_bk,
            AccessCategory::VI => &mut esp.ac_vi,
            _ => &mut esp.ac_vo,
        };
        slot.get_or_insert(info);
    }
    Ok(esp)
}

pub fn parse_fils_indication<B: ByteSlice>(raw_body: B) -> FrameParseResult<FilsIndication> {
    let mut reader = BufferReader::new(raw_body);
    let info = reader
        .read_value::<[u8; 2]>()
        .map(|raw| FilsIndicationInfo::from_raw(LittleEndian::read_u16(&raw[..])))
        .ok_or_else(|| FrameParseError::new("FILS Indication element too short"))?;

    let cache_identifier = if info.cache_id_included() {
        Some(
            reader
                .read_value::<FilsCacheId>()
                .ok_or_else(|| FrameParseError::new("FILS cache identifier truncated"))?,
        )
    } else {
        None
    };
    let hessid = if info.hessid_included() {
        Some(
            reader
                .read_value::<MacAddr>()
                .ok_or_else(|| FrameParseError::new("FILS HESSID truncated"))?,
        )
    } else {
        None
    };
    for _ in 0..info.num_public_key_ids() {
        // Each public key identifier is a type octet, a length octet and the key indicator.
        let _key_type = reader.read_byte();
        let len = reader
            .read_byte()
            .ok_or_else(|| FrameParseError::new("FILS public key identifier truncated"))?;
        reader
            .read_bytes(len as usize)
            .ok_or_else(|| FrameParseError::new("FILS public key indicator truncated"))?;
    }
    let mut realm_identifiers = Vec::with_capacity(info.num_realm_ids() as usize);
    for _ in 0..info.num_realm_ids() {
        let realm = reader
            .read_value::<FilsRealm>()
            .ok_or_else(|| FrameParseError::new("FILS realm identifier truncated"))?;
        realm_identifiers.push(realm);
    }
    Ok(FilsIndication { info, cache_identifier, hessid, realm_identifiers })
}

/// Returns true if the vendor specific element body is a vendor VHT element.
pub fn is_vendor_vht<B: ByteSlice>(raw_body: &B) -> bool {
    raw_body.len() >= VENDOR_VHT_OUI_TYPE.len() && raw_body[..4] == VENDOR_VHT_OUI_TYPE[..]
}

/// Parses a vendor VHT element body: OUI, type and sub-type followed by VHT elements.
/// Returns the embedded VHT Capabilities, if any.
pub fn parse_vendor_vht_capabilities<B: ByteSlice>(
    raw_body: B,
) -> FrameParseResult<Option<VhtCapabilities>> {
    if !is_vendor_vht(&raw_body) {
        return Err(FrameParseError::new("Not a vendor VHT element"));
    }
    let mut reader = BufferReader::new(raw_body);
    // OUI, OUI type and sub-type.
    reader
        .read_bytes(VENDOR_VHT_OUI_TYPE.len() + 1)
        .ok_or_else(|| FrameParseError::new("Vendor VHT element too short"))?;
    let embedded = match reader.into_remaining() {
        Some(embedded) => embedded,
        None => return Ok(None),
    };
    for (id, body) in Reader::new(embedded) {
        if id == Id::VHT_CAPABILITIES {
            return parse_vht_capabilities(body).map(Some);
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use {super::*, assert_matches::assert_matches};

    #[test]
    fn dsss_param_set() {
        let dsss = parse_dsss_param_set(&[11][..]).expect("valid DSSS element");
        assert_eq!(dsss.current_chan, 11);
        assert_matches!(parse_dsss_param_set(&[][..]), Err(_));
        assert_matches!(parse_dsss_param_set(&[11, 12][..]), Err(_));
    }

    #[test]
    fn ssid_too_long() {
        assert_matches!(parse_ssid(&[b'a'; 32][..]), Ok(_));
        assert_matches!(parse_ssid(&[b'a'; 33][..]), Err(_));
    }

    #[test]
    fn bss_load() {
        let load = parse_bss_load(&[0x05, 0x00, 0x80, 0x10, 0x27][..]).expect("valid BSS Load");
        assert_eq!({ load.station_count }, 5);
        assert_eq!(load.channel_utilization, 0x80);
        assert_eq!({ load.avail_admission_capacity }, 10000);
    }

    #[test]
    fn ht_capabilities() {
        #[rustfmt::skip]
        let raw = [
            0xef, 0x09, // HT capabilities info
            0x17, // A-MPDU parameters
            0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // MCS set
            0x00, 0x00, // HT extended capabilities
            0x00, 0x00, 0x00, 0x00, // Transmit beamforming
            0x00, // Antenna selection capabilities
        ];
        let ht_cap = parse_ht_capabilities(&raw[..]).expect("valid HT Capabilities");
        assert!({ ht_cap.ht_cap_info }.chan_width_set());
        assert_eq!(ht_cap.mcs_set.rx_mcs_bitmask(), &[0xff, 0xff, 0xff, 0x00][..]);
        assert_matches!(parse_ht_capabilities(&raw[..25]), Err(_));
    }

    #[test]
    fn vht_operation() {
        let vht_op = parse_vht_operation(&[0x01, 0x9b, 0x00, 0xfc, 0xff][..]).expect("valid");
        assert_eq!(vht_op.vht_cbw, VhtChannelBandwidth::CBW_80_160_80P80);
        assert_eq!(vht_op.center_freq_seg0, 155);
    }

    #[test]
    fn esp_information_by_access_category() {
        #[rustfmt::skip]
        let raw = [
            0x03, 40, 0x00, // AC_VO, 40
            0x01, 90, 0x00, // AC_BK, 90
        ];
        let esp = parse_esp_information(&raw[..]).expect("valid ESP");
        assert_eq!(esp.ac_be, None);
        assert_eq!(esp.ac_vi, None);
        assert_eq!(esp.ac_vo.map(|i| i.estimated_air_time_fraction), Some(40));
        assert_eq!(esp.ac_bk.map(|i| i.estimated_air_time_fraction), Some(90));
    }

    #[test]
    fn esp_information_invalid_length() {
        assert_matches!(parse_esp_information(&[][..]), Err(_));
        assert_matches!(parse_esp_information(&[0x00, 10][..]), Err(_));
        assert_matches!(parse_esp_information(&[0u8; 15][..]), Err(_));
    }

    #[test]
    fn fils_indication_full() {
        #[rustfmt::skip]
        let raw = [
            0x91, 0x03, // 1 public key id, 2 realms, cache id, HESSID, SK auth without PFS
            0xaa, 0xbb, // cache identifier
            1, 2, 3, 4, 5, 6, // HESSID
            0x01, 0x02, 0x55, 0x66, // public key identifier
            0x10, 0x11, 0x20, 0x21, // realms
        ];
        let fils = parse_fils_indication(&raw[..]).expect("valid FILS indication");
        assert_eq!(fils.cache_identifier, Some([0xaa, 0xbb]));
        assert_eq!(fils.hessid, Some([1, 2, 3, 4, 5, 6]));
        assert_eq!(fils.realm_identifiers, vec![[0x10, 0x11], [0x20, 0x21]]);
        assert!(fils.is_fils_sk_auth_supported());
    }

    #[test]
    fn fils_indication_truncated_realm() {
        assert_matches!(parse_fils_indication(&[0x08, 0x00, 0x10][..]), Err(_));
        assert_matches!(parse_fils_indication(&[0x08][..]), Err(_));
    }

    #[test]
    fn vendor_vht() {
        #[rustfmt::skip]
        let raw = [
            0x00, 0x90, 0x4c, 0x04, // OUI and type
            0x08, // sub-type
            0xbf, 0x0c, 0x91, 0x59, 0x82, 0x0f, // VHT capabilities info
            0xea, 0xff, 0x00, 0x00, 0xea, 0xff, 0x00, 0x00, // VHT supported MCS set
        ];
        assert!(is_vendor_vht(&&raw[..]));
        let vht_cap = parse_vendor_vht_capabilities(&raw[..])
            .expect("valid vendor VHT")
            .expect("VHT Capabilities present");
        assert!(vht_cap.su_beamformer());
        assert_eq!(vht_cap.rx_mcs_map(), 0xffea);
    }

    #[test]
    fn vendor_vht_without_caps() {
        let raw = [0x00, 0x90, 0x4c, 0x04, 0x08];
        assert_matches!(parse_vendor_vht_capabilities(&raw[..]), Ok(None));
        assert_matches!(parse_vendor_vht_capabilities(&[0x00, 0x50, 0xf2, 0x04, 0x08][..]), Err(_));
    }
}
