// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::{
        error::{FrameParseError, FrameParseResult},
        ie::{self, Id},
        mac::{BeaconHdr, RawCapabilityInfo},
    },
    log::debug,
    zerocopy::LayoutVerified,
};

/// Logical view of a Beacon or Probe Response body. Every optional element is `None` unless the
/// frame carried a well-formed instance of it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedBeacon {
    /// TSF timer value as two 32-bit words, low word first.
    pub timestamp: [u32; 2],
    pub beacon_interval: u16,
    pub capability_info: RawCapabilityInfo,
    /// Channel number carried with the frame. Filled from the DSSS Parameter Set when present,
    /// and otherwise written back once the channel of the BSS has been resolved.
    pub channel_number: u8,
    pub ssid: Option<Vec<u8>>,
    pub supported_rates: Vec<ie::SupportedRate>,
    pub ext_supported_rates: Option<Vec<ie::SupportedRate>>,
    pub dsss_param_set: Option<ie::DsssParamSet>,
    pub bss_load: Option<ie::BssLoad>,
    pub channel_switch: Option<ie::ChannelSwitchAnnouncement>,
    pub mobility_domain: Option<ie::MobilityDomain>,
    pub ht_cap: Option<ie::HtCapabilities>,
    pub ht_op: Option<ie::HtOperation>,
    pub vht_cap: Option<ie::VhtCapabilities>,
    pub vht_op: Option<ie::VhtOperation>,
    pub vendor_vht_cap: Option<ie::VhtCapabilities>,
    pub esp: Option<ie::EspInformation>,
    pub fils_indication: Option<ie::FilsIndication>,
}

impl ParsedBeacon {
    /// Parses a Beacon or Probe Response frame body, i.e. everything after the MAC header.
    pub fn parse(body: &[u8]) -> FrameParseResult<Self> {
        let (hdr, elements) = LayoutVerified::<_, BeaconHdr>::new_unaligned_from_prefix(body)
            .ok_or_else(|| FrameParseError::new("Beacon body shorter than its fixed fields"))?;
        let timestamp = { hdr.timestamp };
        let mut beacon = ParsedBeacon {
            timestamp: [timestamp as u32, (timestamp >> 32) as u32],
            beacon_interval: { hdr.beacon_interval },
            capability_info: hdr.capabilities,
            ..Default::default()
        };
        for (id, body) in ie::Reader::new(elements) {
            if let Err(e) = beacon.add_element(id, body) {
                debug!("skipping element {}: {}", id.0, e);
            }
        }
        if let Some(dsss) = beacon.dsss_param_set {
            beacon.channel_number = dsss.current_chan;
        }
        Ok(beacon)
    }

    fn add_element(&mut self, id: Id, body: &[u8]) -> FrameParseResult<()> {
        match id {
            Id::SSID if self.ssid.is_none() => {
                self.ssid = Some(ie::parse_ssid(body)?.to_vec());
            }
            Id::SUPPORTED_RATES if self.supported_rates.is_empty() => {
                self.supported_rates = ie::parse_supported_rates(body)?;
            }
            Id::EXT_SUPPORTED_RATES if self.ext_supported_rates.is_none() => {
                self.ext_supported_rates = Some(ie::parse_supported_rates(body)?);
            }
            Id::DSSS_PARAM_SET if self.dsss_param_set.is_none() => {
                self.dsss_param_set = Some(ie::parse_dsss_param_set(body)?);
            }
            Id::BSS_LOAD if self.bss_load.is_none() => {
                self.bss_load = Some(ie::parse_bss_load(body)?);
            }
            Id::CHANNEL_SWITCH_ANNOUNCEMENT if self.channel_switch.is_none() => {
                self.channel_switch = Some(ie::parse_channel_switch_announcement(body)?);
            }
            Id::MOBILITY_DOMAIN if self.mobility_domain.is_none() => {
                self.mobility_domain = Some(ie::parse_mobility_domain(body)?);
            }
            Id::HT_CAPABILITIES if self.ht_cap.is_none() => {
                self.ht_cap = Some(ie::parse_ht_capabilities(body)?);
            }
            Id::HT_OPERATION if self.ht_op.is_none() => {
                self.ht_op = Some(ie::parse_ht_operation(body)?);
            }
            Id::VHT_CAPABILITIES if self.vht_cap.is_none() => {
                self.vht_cap = Some(ie::parse_vht_capabilities(body)?);
            }
            Id::VHT_OPERATION if self.vht_op.is_none() => {
                self.vht_op = Some(ie::parse_vht_operation(body)?);
            }
            Id::FILS_INDICATION if self.fils_indication.is_none() => {
                self.fils_indication = Some(ie::parse_fils_indication(body)?);
            }
            Id::VENDOR_SPECIFIC if self.vendor_vht_cap.is_none() && ie::is_vendor_vht(&body) => {
                self.vendor_vht_cap = ie::parse_vendor_vht_capabilities(body)?;
            }
            Id::EXTENSION if self.esp.is_none() => match body.split_first() {
                Some((&ie::ExtId::ESTIMATED_SERVICE_PARAMS, esp)) => {
                    self.esp = Some(ie::parse_esp_information(esp)?);
                }
                _ => (),
            },
            _ => (),
        }
        Ok(())
    }

    /// The channel the BSS reports for itself: the DSSS Parameter Set channel, else the HT
    /// Operation primary channel, else the frame's own channel number.
    pub fn self_reported_channel(&self) -> u8 {
        match (self.dsss_param_set, self.ht_op) {
            (Some(dsss), _) => dsss.current_chan,
            (None, Some(ht_op)) => ht_op.primary_chan,
            (None, None) => self.channel_number,
        }
    }

    /// True if the frame carries an element that names its operating channel.
    pub fn has_channel_element(&self) -> bool {
        self.dsss_param_set.is_some() || self.ht_op.is_some()
    }
}
