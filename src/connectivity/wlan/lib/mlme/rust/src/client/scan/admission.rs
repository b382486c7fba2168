// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    super::{AddBssFlags, RxBeacon},
    log::{debug, error},
    wlan_common::{
        beacon::ParsedBeacon,
        channel,
        mac::{BEACON_SSID_OFFSET, ZERO_ADDR},
    },
};

/// Largest frequency offset, in MHz, at which a BSS counts as heard on an adjacent channel.
pub const MAX_ADJACENT_FREQ_DIFF_MHZ: u16 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// The frame becomes a BSS description. If `rx_channel_override` is set, the description's
    /// receive channel is the BSS's own channel rather than the one the frame was heard on.
    Admit { flags: AddBssFlags, rx_channel_override: Option<u8> },
    Drop(DropReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropReason {
    /// Address 3 is all zeros.
    ZeroBssid,
    /// The BSS announced an upcoming channel switch.
    ChannelSwitch,
    /// A Beacon advertising a channel other than the one it was heard on.
    ChannelMismatch { rx_channel: u8, bss_channel: u8 },
    /// The body ends before the first element.
    NoElements { payload_len: usize },
}

/// Decides whether a received Beacon or Probe Response may be cached. Rules apply in order and
/// the first drop wins.
pub fn check(
    frame: &RxBeacon<'_>,
    beacon: &ParsedBeacon,
    allow_adjacent_channel: bool,
) -> Admission {
    let bssid = frame.mgmt_hdr.addr3;
    if bssid == ZERO_ADDR {
        debug!("dropping {:?} with zero BSSID", frame.kind);
        return Admission::Drop(DropReason::ZeroBssid);
    }

    if let Some(csa) = beacon.channel_switch {
        debug!(
            "dropping {:?} from {:02x?}: switching to channel {}",
            frame.kind, bssid, csa.new_channel_number
        );
        return Admission::Drop(DropReason::ChannelSwitch);
    }

    let mut flags = AddBssFlags::empty();
    let mut rx_channel_override = None;
    let rx_channel = frame.rx_info.channel;
    if beacon.has_channel_element() {
        let bss_channel = beacon.self_reported_channel();
        if bss_channel != rx_channel {
            let adjacent = allow_adjacent_channel
                && channel::freq_diff(bss_channel, rx_channel)
                    .map_or(false, |diff| diff <= MAX_ADJACENT_FREQ_DIFF_MHZ);
            if !adjacent && !frame.kind.is_probe_response() {
                debug!(
                    "dropping beacon from {:02x?}: advertises channel {} but was heard on {}",
                    bssid, bss_channel, rx_channel
                );
                return Admission::Drop(DropReason::ChannelMismatch { rx_channel, bss_channel });
            }
            debug!(
                "{:?} from {:02x?} advertises channel {} but was heard on {}",
                frame.kind, bssid, bss_channel, rx_channel
            );
            if !allow_adjacent_channel {
                flags |= AddBssFlags::SKIP_RSSI_UPDATE;
            }
            rx_channel_override = Some(bss_channel);
        }
    }

    let payload_len = frame.body.len();
    if payload_len <= BEACON_SSID_OFFSET {
        error!(
            "{:?} from {:02x?} is {} bytes long and carries no elements",
            frame.kind, bssid, payload_len
        );
        return Admission::Drop(DropReason::NoElements { payload_len });
    }

    Admission::Admit { flags, rx_channel_override }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::test_utils::*,
        assert_matches::assert_matches,
        test_case::test_case,
        wlan_common::{
            mac::{BeaconKind, MgmtHdr, MgmtSubtype},
            test_utils::fake_frames::*,
        },
    };

    fn check_body(
        hdr: &MgmtHdr,
        kind: BeaconKind,
        body: &[u8],
        rx_channel: u8,
        allow_adjacent_channel: bool,
    ) -> Admission {
        let beacon = ParsedBeacon::parse(body).expect("valid beacon body");
        let frame = RxBeacon { mgmt_hdr: hdr, body, kind, rx_info: fake_rx_info(rx_channel) };
        check(&frame, &beacon, allow_adjacent_channel)
    }

    fn check_ies(kind: BeaconKind, ies: &[u8], rx_channel: u8, allow_adjacent: bool) -> Admission {
        let hdr = match kind {
            BeaconKind::Beacon => fake_beacon_hdr(BSSID),
            BeaconKind::ProbeResponse => fake_probe_resp_hdr(BSSID),
        };
        check_body(&hdr, kind, &fake_beacon_body(ies)[..], rx_channel, allow_adjacent)
    }

    fn ies_on_channel(channel: u8) -> Vec<u8> {
        let mut ies = fake_ssid_ie(b"foo");
        ies.extend(fake_ds_param_ie(channel));
        ies
    }

    #[test_case(BeaconKind::Beacon)]
    #[test_case(BeaconKind::ProbeResponse)]
    fn drop_zero_bssid(kind: BeaconKind) {
        let subtype =
            if kind.is_probe_response() { MgmtSubtype::PROBE_RESP } else { MgmtSubtype::BEACON };
        let hdr = fake_mgmt_hdr(subtype, ZERO_ADDR);
        let body = fake_beacon_body(&ies_on_channel(6)[..]);
        assert_eq!(
            check_body(&hdr, kind, &body[..], 6, false),
            Admission::Drop(DropReason::ZeroBssid)
        );
    }

    #[test]
    fn zero_bssid_checked_before_channel_switch() {
        let hdr = fake_beacon_hdr(ZERO_ADDR);
        let mut ies = ies_on_channel(6);
        ies.extend(fake_csa_ie(11));
        let body = fake_beacon_body(&ies[..]);
        assert_eq!(
            check_body(&hdr, BeaconKind::Beacon, &body[..], 6, false),
            Admission::Drop(DropReason::ZeroBssid)
        );
    }

    #[test_case(BeaconKind::Beacon, false)]
    #[test_case(BeaconKind::Beacon, true)]
    #[test_case(BeaconKind::ProbeResponse, false)]
    #[test_case(BeaconKind::ProbeResponse, true)]
    fn drop_channel_switch(kind: BeaconKind, allow_adjacent: bool) {
        let mut ies = ies_on_channel(6);
        ies.extend(fake_csa_ie(11));
        assert_eq!(
            check_ies(kind, &ies[..], 6, allow_adjacent),
            Admission::Drop(DropReason::ChannelSwitch)
        );
    }

    #[test_case(BeaconKind::Beacon, 6)]
    #[test_case(BeaconKind::Beacon, 149)]
    #[test_case(BeaconKind::ProbeResponse, 1)]
    #[test_case(BeaconKind::ProbeResponse, 165)]
    fn admit_matching_channel(kind: BeaconKind, channel: u8) {
        assert_eq!(
            check_ies(kind, &ies_on_channel(channel)[..], channel, false),
            Admission::Admit { flags: AddBssFlags::empty(), rx_channel_override: None }
        );
    }

    #[test]
    fn admit_without_channel_element() {
        assert_eq!(
            check_ies(BeaconKind::Beacon, &fake_ssid_ie(b"foo")[..], 11, false),
            Admission::Admit { flags: AddBssFlags::empty(), rx_channel_override: None }
        );
    }

    #[test]
    fn drop_mismatched_beacon() {
        assert_eq!(
            check_ies(BeaconKind::Beacon, &ies_on_channel(11)[..], 6, false),
            Admission::Drop(DropReason::ChannelMismatch { rx_channel: 6, bss_channel: 11 })
        );
    }

    #[test]
    fn drop_beacon_mismatched_on_ht_operation() {
        let mut ies = fake_ssid_ie(b"foo");
        ies.extend(fake_ht_operation_ie(40));
        assert_eq!(
            check_ies(BeaconKind::Beacon, &ies[..], 36, false),
            Admission::Drop(DropReason::ChannelMismatch { rx_channel: 36, bss_channel: 40 })
        );
    }

    #[test]
    fn dsss_channel_takes_precedence_over_ht_operation() {
        let mut ies = ies_on_channel(6);
        ies.extend(fake_ht_operation_ie(11));
        assert_eq!(
            check_ies(BeaconKind::Beacon, &ies[..], 6, false),
            Admission::Admit { flags: AddBssFlags::empty(), rx_channel_override: None }
        );
    }

    #[test]
    fn admit_mismatched_probe_resp_skipping_rssi() {
        assert_eq!(
            check_ies(BeaconKind::ProbeResponse, &ies_on_channel(11)[..], 6, false),
            Admission::Admit {
                flags: AddBssFlags::SKIP_RSSI_UPDATE,
                rx_channel_override: Some(11),
            }
        );
    }

    #[test]
    fn admit_far_probe_resp_with_adjacent_policy() {
        assert_eq!(
            check_ies(BeaconKind::ProbeResponse, &ies_on_channel(11)[..], 1, true),
            Admission::Admit { flags: AddBssFlags::empty(), rx_channel_override: Some(11) }
        );
    }

    // rx channel, BSS channel, admitted
    #[test_case(6, 8, true ; "10 MHz apart")]
    #[test_case(6, 4, true ; "10 MHz apart, below")]
    #[test_case(6, 7, true ; "5 MHz apart")]
    #[test_case(6, 9, false ; "15 MHz apart")]
    #[test_case(13, 14, false ; "channel 14 is 12 MHz above 13")]
    #[test_case(36, 40, false ; "5 GHz neighbors are 20 MHz apart")]
    #[test_case(1, 195, false ; "far apart")]
    #[test_case(0, 1, false ; "unknown rx channel")]
    fn adjacent_beacon(rx_channel: u8, bss_channel: u8, admitted: bool) {
        let admission =
            check_ies(BeaconKind::Beacon, &ies_on_channel(bss_channel)[..], rx_channel, true);
        if admitted {
            assert_eq!(
                admission,
                Admission::Admit {
                    flags: AddBssFlags::empty(),
                    rx_channel_override: Some(bss_channel),
                }
            );
        } else {
            assert_matches!(admission, Admission::Drop(DropReason::ChannelMismatch { .. }));
        }
    }

    #[test]
    fn adjacent_beacon_ignored_without_policy() {
        assert_matches!(
            check_ies(BeaconKind::Beacon, &ies_on_channel(8)[..], 6, false),
            Admission::Drop(DropReason::ChannelMismatch { rx_channel: 6, bss_channel: 8 })
        );
    }

    #[test_case(BeaconKind::Beacon)]
    #[test_case(BeaconKind::ProbeResponse)]
    fn drop_without_elements(kind: BeaconKind) {
        assert_eq!(
            check_ies(kind, &[], 6, false),
            Admission::Drop(DropReason::NoElements { payload_len: BEACON_SSID_OFFSET })
        );
    }

    #[test]
    fn single_byte_of_elements_is_enough() {
        // A truncated element still counts as payload.
        assert_eq!(
            check_ies(BeaconKind::Beacon, &[0x00], 6, false),
            Admission::Admit { flags: AddBssFlags::empty(), rx_channel_override: None }
        );
    }

    #[test]
    fn check_does_not_touch_inputs() {
        let hdr = fake_probe_resp_hdr(BSSID);
        let body = fake_beacon_body(&ies_on_channel(11)[..]);
        let beacon = ParsedBeacon::parse(&body[..]).expect("valid beacon body");
        let before = beacon.clone();
        let frame = RxBeacon {
            mgmt_hdr: &hdr,
            body: &body[..],
            kind: BeaconKind::ProbeResponse,
            rx_info: fake_rx_info(6),
        };
        assert_matches!(check(&frame, &beacon, false), Admission::Admit { .. });
        assert_eq!(frame.rx_info.channel, 6);
        assert_eq!(beacon, before);
    }
}
