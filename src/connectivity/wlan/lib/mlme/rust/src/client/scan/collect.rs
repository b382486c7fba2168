// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{RxBeacon, ScanContext},
    crate::{buffer::BufferProvider, clock::Clock, config::Features, error::Error},
    log::{debug, error, info},
    wlan_common::{
        beacon::ParsedBeacon,
        bss::{BssDescription, FilsInfo, NetworkType, QbssLoadInfo, MAX_REALM_COUNT},
        ie::{AccessCategory, FilsIndication, HtCapabilities, VhtCapabilities, VhtChannelBandwidth},
        mac::{get_capability_info, BEACON_SSID_OFFSET},
        Cbw,
    },
};

/// Beacon interval, in TU, assumed for a BSS that advertises 0.
pub const DEFAULT_BEACON_INTERVAL: u16 = 100;

/// Builds the BSS description of an admitted Beacon or Probe Response. `frame.rx_info` must
/// already carry any receive channel override decided at admission.
///
/// On success the resolved channel is written back to `beacon.channel_number` and the scan's
/// beacon/probe counter is bumped. On failure neither `ctx` nor `beacon` is modified.
pub fn collect_bss_description(
    ctx: &mut ScanContext,
    frame: &RxBeacon<'_>,
    beacon: &mut ParsedBeacon,
    scanning: bool,
    features: Features,
    buf_provider: &dyn BufferProvider,
    clock: &dyn Clock,
) -> Result<BssDescription, Error> {
    let bssid = frame.mgmt_hdr.addr3;
    let payload_len = frame.body.len();
    let ies = match frame.body.get(BEACON_SSID_OFFSET..) {
        Some(ies) if !ies.is_empty() => ies,
        _ => {
            error!("{:?} from {:02x?} carries no elements", frame.kind, bssid);
            return Err(Error::MalformedFrame { payload_len });
        }
    };

    let mut ie_buf = buf_provider.get_buffer(ies.len()).map_err(|e| {
        error!("cannot collect BSS description for {:02x?}: {}", bssid, e);
        e
    })?;
    ie_buf.extend_from_slice(ies);
    let mut bss =
        BssDescription::new(bssid, ie_buf).ok_or(Error::MalformedFrame { payload_len })?;

    bss.boot_time_ns = clock.boot_time_ns();
    bss.timestamp = beacon.timestamp;
    bss.beacon_interval = match beacon.beacon_interval {
        0 => {
            info!(
                "{:02x?} advertises a beacon interval of 0; using {} TU",
                bssid, DEFAULT_BEACON_INTERVAL
            );
            DEFAULT_BEACON_INTERVAL
        }
        beacon_interval => beacon_interval,
    };
    bss.capability_info = get_capability_info(&beacon.capability_info);

    if let Some(ht_cap) = beacon.ht_cap {
        bss.ht_caps_present = true;
        let ht_cap_info = ht_cap.ht_cap_info;
        if ht_cap_info.chan_width_set() {
            bss.cbw = Cbw::Cbw40;
        }
    }

    let vht_cap = beacon.vht_cap.filter(VhtCapabilities::is_vht_capable);
    let vendor_vht_cap = beacon.vendor_vht_cap.filter(VhtCapabilities::is_vht_capable);
    if vht_cap.is_some() || vendor_vht_cap.is_some() {
        bss.vht_caps_present = true;
        bss.beamforming_capable =
            vht_cap.iter().chain(vendor_vht_cap.iter()).any(|cap| cap.su_beamformer());
    }
    if let Some(vht_op) = beacon.vht_op {
        if vht_op.vht_cbw == VhtChannelBandwidth::CBW_80_160_80P80 {
            bss.cbw = Cbw::Cbw80;
        }
    }

    bss.air_time_fraction = air_time_fraction(beacon);
    bss.nss = supported_nss(beacon.vht_cap.as_ref(), beacon.ht_cap.as_ref());

    let mut rx_channel = frame.rx_info.channel;
    let channel = match beacon.self_reported_channel() {
        0 => {
            if rx_channel == 0 {
                rx_channel = ctx.current_channel();
            }
            rx_channel
        }
        channel => channel,
    };
    bss.channel = channel;
    bss.channel_self = channel;
    bss.rx_channel = rx_channel;
    bss.nw_type = NetworkType::classify(channel, beacon);

    bss.rssi = frame.rx_info.rssi_dbm;
    bss.rssi_raw = frame.rx_info.rssi_raw;
    bss.sinr = 0;
    bss.received_time_ms = clock.wall_time_ms();
    bss.tsf_delta = frame.rx_info.tsf_delta;
    bss.seq_ctrl = { frame.mgmt_hdr.seq_ctrl };
    debug!(
        "{:02x?} rssi: norm {} raw {} tsf_delta {} received {} ssid {}",
        bssid,
        bss.rssi,
        bss.rssi_raw,
        bss.tsf_delta,
        bss.received_time_ms,
        beacon.ssid.as_ref().map(|ssid| String::from_utf8_lossy(&ssid[..])).unwrap_or_default()
    );

    if scanning {
        bss.start_tsf = ctx.start_tsf();
        bss.parent_tsf = frame.rx_info.timestamp;
    }

    bss.mdie = beacon.mobility_domain.map(|md| [md.mdid[0], md.mdid[1], md.ft_capability_policy]);
    if features.qbss_load {
        bss.qbss_load = beacon.bss_load.map(|load| QbssLoadInfo {
            avail_admission_capacity: load.avail_admission_capacity,
            channel_utilization: load.channel_utilization,
            station_count: load.station_count,
        });
    }
    if features.fils {
        bss.fils_info = beacon.fils_indication.as_ref().map(fils_info);
    }
    bss.is_probe_response = frame.kind.is_probe_response();

    beacon.channel_number = channel;
    debug!(
        "collected BSS description on channel {} length {} IE bytes {}",
        channel,
        bss.length(),
        bss.ies().len()
    );
    ctx.count_beacon_probe_rsp();
    Ok(bss)
}

/// Estimated air time fraction of the first access category, in the order BE, VI, VO, BK,
/// whose ESP field is tagged with that category.
fn air_time_fraction(beacon: &ParsedBeacon) -> u8 {
    let esp = match &beacon.esp {
        Some(esp) => esp,
        None => return 0,
    };
    [
        (esp.ac_be, AccessCategory::BE),
        (esp.ac_vi, AccessCategory::VI),
        (esp.ac_vo, AccessCategory::VO),
        (esp.ac_bk, AccessCategory::BK),
    ]
    .iter()
    .find_map(|&(info, ac)| info.filter(|info| info.access_category == ac))
    .map_or(0, |info| info.estimated_air_time_fraction)
}

/// Number of spatial streams the BSS receives on. A VHT Rx MCS map holds two bits per stream
/// with 0b11 meaning unsupported. An HT Rx MCS bitmask holds one byte per stream.
fn supported_nss(vht_cap: Option<&VhtCapabilities>, ht_cap: Option<&HtCapabilities>) -> u8 {
    if let Some(vht_cap) = vht_cap {
        let rx_mcs_map = vht_cap.rx_mcs_map();
        if rx_mcs_map & 0xc0 != 0xc0 {
            return 4;
        }
        if rx_mcs_map & 0x30 != 0x30 {
            return 3;
        }
        if rx_mcs_map & 0x0c != 0x0c {
            return 2;
        }
    } else if let Some(ht_cap) = ht_cap {
        let mcs_set = ht_cap.mcs_set;
        let rx_mcs = mcs_set.rx_mcs_bitmask();
        if rx_mcs[3] != 0 {
            return 4;
        }
        if rx_mcs[2] != 0 {
            return 3;
        }
        if rx_mcs[1] != 0 {
            return 2;
        }
    }
    1
}

fn fils_info(fils: &FilsIndication) -> FilsInfo {
    let realm_count = fils.realm_identifiers.len().min(MAX_REALM_COUNT);
    FilsInfo {
        realms: fils.realm_identifiers[..realm_count].to_vec(),
        cache_id: fils.cache_identifier,
        is_fils_sk_supported: fils.is_fils_sk_auth_supported(),
    }
}
