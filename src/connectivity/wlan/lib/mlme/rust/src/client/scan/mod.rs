// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Scan result collection. Every received Beacon or Probe Response goes through
//! [`admission::check`], and admitted frames are turned into a [`BssDescription`] by
//! [`collect::collect_bss_description`]. [`BssCollector`] runs both steps as one critical
//! section against the scan session's state.

pub mod admission;
pub mod collect;

use {
    crate::{
        buffer::BufferProvider,
        clock::Clock,
        config::ScanConfig,
        device::RxInfo,
        error::Error,
    },
    admission::{Admission, DropReason},
    bitflags::bitflags,
    log::warn,
    parking_lot::Mutex,
    wlan_common::{
        beacon::ParsedBeacon,
        bss::BssDescription,
        error::FrameParseError,
        mac::{BeaconKind, MgmtFrame, MgmtHdr},
    },
};

/// Scan id handed to sinks. Results are not attributed to a particular scan request.
pub const UNUSED_SCAN_ID: u64 = 0;

bitflags! {
    /// Side effects requested alongside an admitted BSS description.
    pub struct AddBssFlags: u32 {
        /// The signal strength was measured off the BSS's channel and must not replace the
        /// cached value.
        const SKIP_RSSI_UPDATE = 1 << 0;
    }
}

/// A received Beacon or Probe Response with the radio's metadata.
#[derive(Clone, Copy, Debug)]
pub struct RxBeacon<'a> {
    pub mgmt_hdr: &'a MgmtHdr,
    /// Frame body, starting with the timestamp.
    pub body: &'a [u8],
    pub kind: BeaconKind,
    pub rx_info: RxInfo,
}

#[derive(Debug)]
pub enum ScanOutcome {
    Admitted { bss: BssDescription, flags: AddBssFlags },
    Dropped(DropReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    Dropped(DropReason),
}

/// Consumer of admitted BSS descriptions, typically the scan result cache.
pub trait ScanResultSink: Send {
    fn add_bss_description(&mut self, bss: BssDescription, scan_id: u64, flags: AddBssFlags);
}

/// State of the ongoing scan session.
#[derive(Debug, Default)]
pub struct ScanContext {
    current_channel: u8,
    start_tsf: [u32; 2],
    beacon_probe_rsp_count: u32,
}

impl ScanContext {
    /// Starts a new scan session. The per-scan frame count restarts at zero.
    pub fn begin_scan(&mut self, start_tsf: [u32; 2]) {
        self.start_tsf = start_tsf;
        self.beacon_probe_rsp_count = 0;
    }

    pub fn set_current_channel(&mut self, channel: u8) {
        self.current_channel = channel;
    }

    pub fn current_channel(&self) -> u8 {
        self.current_channel
    }

    pub fn start_tsf(&self) -> [u32; 2] {
        self.start_tsf
    }

    /// Number of Beacons and Probe Responses turned into BSS descriptions during this scan.
    pub fn beacon_probe_rsp_count(&self) -> u32 {
        self.beacon_probe_rsp_count
    }

    fn count_beacon_probe_rsp(&mut self) {
        self.beacon_probe_rsp_count = self.beacon_probe_rsp_count.saturating_add(1);
    }
}

struct CollectorState {
    ctx: ScanContext,
    sink: Option<Box<dyn ScanResultSink>>,
}

pub struct BssCollector {
    config: ScanConfig,
    buf_provider: Box<dyn BufferProvider>,
    clock: Box<dyn Clock>,
    state: Mutex<CollectorState>,
}

impl BssCollector {
    pub fn new(
        config: ScanConfig,
        buf_provider: Box<dyn BufferProvider>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            config,
            buf_provider,
            clock,
            state: Mutex::new(CollectorState { ctx: ScanContext::default(), sink: None }),
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Registers the consumer of admitted descriptions, returning the previous one.
    pub fn register_sink(&self, sink: Box<dyn ScanResultSink>) -> Option<Box<dyn ScanResultSink>> {
        self.state.lock().sink.replace(sink)
    }

    pub fn unregister_sink(&self) -> Option<Box<dyn ScanResultSink>> {
        self.state.lock().sink.take()
    }

    pub fn begin_scan(&self, start_tsf: [u32; 2]) {
        self.state.lock().ctx.begin_scan(start_tsf);
    }

    pub fn set_scan_channel(&self, channel: u8) {
        self.state.lock().ctx.set_current_channel(channel);
    }

    pub fn beacon_probe_rsp_count(&self) -> u32 {
        self.state.lock().ctx.beacon_probe_rsp_count()
    }

    /// Runs admission and, for admitted frames, builds the BSS description. The result is
    /// returned to the caller; no sink is involved.
    pub fn collect(
        &self,
        frame: &RxBeacon<'_>,
        beacon: &mut ParsedBeacon,
        scanning: bool,
    ) -> Result<ScanOutcome, Error> {
        let mut state = self.state.lock();
        self.collect_locked(&mut state.ctx, frame, beacon, scanning)
    }

    /// Like `collect`, but hands admitted descriptions to the registered sink.
    /// `scanning` is false for frames received outside of a scan.
    pub fn check_and_add_bss_description(
        &self,
        frame: &RxBeacon<'_>,
        beacon: &mut ParsedBeacon,
        scanning: bool,
    ) -> Result<DeliveryStatus, Error> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        match self.collect_locked(&mut state.ctx, frame, beacon, scanning)? {
            ScanOutcome::Dropped(reason) => Ok(DeliveryStatus::Dropped(reason)),
            ScanOutcome::Admitted { bss, flags } => match state.sink.as_mut() {
                Some(sink) => {
                    sink.add_bss_description(bss, UNUSED_SCAN_ID, flags);
                    Ok(DeliveryStatus::Delivered)
                }
                None => {
                    warn!("no scan result sink; discarding BSS description for {:02x?}", bss.bssid);
                    Err(Error::NoSink)
                }
            },
        }
    }

    /// Parses a raw Beacon or Probe Response MPDU and hands it to
    /// `check_and_add_bss_description`.
    pub fn handle_beacon_frame(
        &self,
        bytes: &[u8],
        rx_info: RxInfo,
        scanning: bool,
    ) -> Result<DeliveryStatus, Error> {
        let frame = MgmtFrame::parse(bytes)
            .ok_or_else(|| FrameParseError::new("invalid management frame"))?;
        let kind = frame
            .beacon_kind()
            .ok_or_else(|| FrameParseError::new("not a Beacon or Probe Response"))?;
        let mut beacon = ParsedBeacon::parse(frame.body)?;
        let rx_beacon = RxBeacon { mgmt_hdr: &*frame.mgmt_hdr, body: frame.body, kind, rx_info };
        self.check_and_add_bss_description(&rx_beacon, &mut beacon, scanning)
    }

    fn collect_locked(
        &self,
        ctx: &mut ScanContext,
        frame: &RxBeacon<'_>,
        beacon: &mut ParsedBeacon,
        scanning: bool,
    ) -> Result<ScanOutcome, Error> {
        match admission::check(frame, beacon, self.config.allow_adjacent_channel) {
            Admission::Drop(reason) => Ok(ScanOutcome::Dropped(reason)),
            Admission::Admit { flags, rx_channel_override } => {
                let mut rx_info = frame.rx_info;
                if let Some(channel) = rx_channel_override {
                    rx_info.channel = channel;
                }
                let frame = RxBeacon { rx_info, ..*frame };
                let bss = collect::collect_bss_description(
                    ctx,
                    &frame,
                    beacon,
                    scanning,
                    self.config.features,
                    &*self.buf_provider,
                    &*self.clock,
                )?;
                Ok(ScanOutcome::Admitted { bss, flags })
            }
        }
    }
}
