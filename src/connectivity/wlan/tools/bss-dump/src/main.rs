// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    anyhow::{format_err, Context, Error},
    argh::FromArgs,
    log::{set_logger, set_max_level, LevelFilter},
    std::{
        io::{self, BufRead, Write},
        path::PathBuf,
    },
    wlan_common::bss::BssDescription,
    wlan_mlme::{
        buffer::HeapBufferProvider,
        client::scan::{AddBssFlags, BssCollector, DeliveryStatus, ScanResultSink},
        clock::SystemClock,
        config::ScanConfig,
        device::{Band, RxInfo},
    },
};

#[derive(FromArgs, Debug)]
/// Decode hex-encoded Beacon and Probe Response MPDUs and print the BSS descriptions collected
/// from them. Frames are read from standard input, one per line, when none are given.
struct Args {
    /// scan configuration JSON file
    #[argh(option)]
    config: Option<PathBuf>,

    /// channel the frames were received on
    #[argh(option, default = "0")]
    channel: u8,

    /// RSSI of the received frames in dBm
    #[argh(option, default = "-50")]
    rssi: i8,

    /// treat the frames as part of an active scan
    #[argh(switch)]
    scanning: bool,

    /// log debug messages
    #[argh(switch, short = 'v')]
    verbose: bool,

    /// hex-encoded frames, MAC header included
    #[argh(positional)]
    frames: Vec<String>,
}

// Writes log records to stderr so they do not mix with the descriptions on stdout.
struct StderrLogger;

impl StderrLogger {
    fn init(filter: LevelFilter) -> Result<(), Error> {
        static LOGGER: StderrLogger = StderrLogger;
        set_logger(&LOGGER).map_err(|e| format_err!("failed to install logger: {}", e))?;
        set_max_level(filter);
        Ok(())
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

struct PrintingSink<W> {
    out: W,
}

impl<W: Write + Send> ScanResultSink for PrintingSink<W> {
    fn add_bss_description(&mut self, bss: BssDescription, _scan_id: u64, flags: AddBssFlags) {
        if let Err(e) = write_bss(&mut self.out, &bss, flags) {
            log::error!("failed to print BSS description: {}", e);
        }
    }
}

fn fmt_mac(addr: &[u8; 6]) -> String {
    addr.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(":")
}

fn write_bss<W: Write>(out: &mut W, bss: &BssDescription, flags: AddBssFlags) -> io::Result<()> {
    writeln!(out, "BSS {}", fmt_mac(&bss.bssid))?;
    writeln!(
        out,
        "  channel {} (self {}, rx {}) {:?} {:?}",
        bss.channel, bss.channel_self, bss.rx_channel, bss.cbw, bss.nw_type
    )?;
    writeln!(out, "  rssi {} dBm (raw {}) flags {:?}", bss.rssi, bss.rssi_raw, flags)?;
    writeln!(
        out,
        "  beacon interval {} TU, capabilities {:#06x}, {}",
        bss.beacon_interval,
        bss.capability_info.raw(),
        if bss.is_probe_response { "probe response" } else { "beacon" }
    )?;
    writeln!(
        out,
        "  ht {} vht {} beamforming {} nss {} air time fraction {}",
        bss.ht_caps_present,
        bss.vht_caps_present,
        bss.beamforming_capable,
        bss.nss,
        bss.air_time_fraction
    )?;
    if let Some(mdie) = bss.mdie {
        writeln!(out, "  mobility domain {}", hex::encode(&mdie[..]))?;
    }
    if let Some(qbss) = bss.qbss_load {
        writeln!(
            out,
            "  bss load: {} stations, utilization {}, capacity {}",
            qbss.station_count, qbss.channel_utilization, qbss.avail_admission_capacity
        )?;
    }
    if let Some(fils) = &bss.fils_info {
        writeln!(
            out,
            "  fils: {} realms, cache id {}, sk {}",
            fils.realms.len(),
            fils.cache_id.map_or("none".to_string(), |id| hex::encode(&id[..])),
            fils.is_fils_sk_supported
        )?;
    }
    writeln!(out, "  length {} ies {}", bss.length(), hex::encode(bss.ies()))
}

fn rx_info(args: &Args) -> RxInfo {
    RxInfo {
        channel: args.channel,
        band: if args.channel > 14 { Band::FiveGhz } else { Band::TwoGhz },
        rssi_dbm: args.rssi,
        rssi_raw: args.rssi,
        ..Default::default()
    }
}

/// Feeds every frame to `collector` and returns the number of descriptions delivered.
fn process_frames<I>(collector: &BssCollector, frames: I, rx_info: RxInfo, scanning: bool) -> usize
where
    I: IntoIterator<Item = String>,
{
    let mut delivered = 0;
    for (i, frame) in frames.into_iter().enumerate() {
        let frame = frame.trim();
        if frame.is_empty() {
            continue;
        }
        let bytes = match hex::decode(frame) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("frame {}: invalid hex: {}", i, e);
                continue;
            }
        };
        match collector.handle_beacon_frame(&bytes[..], rx_info, scanning) {
            Ok(DeliveryStatus::Delivered) => delivered += 1,
            Ok(DeliveryStatus::Dropped(reason)) => log::info!("frame {}: dropped: {:?}", i, reason),
            Err(e) => log::error!("frame {}: {}", i, e),
        }
    }
    delivered
}

fn main() -> Result<(), Error> {
    let args: Args = argh::from_env();
    StderrLogger::init(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })?;

    let config = match &args.config {
        Some(path) => ScanConfig::load_from_file(path)?,
        None => ScanConfig::default(),
    };
    let collector =
        BssCollector::new(config, Box::new(HeapBufferProvider), Box::new(SystemClock));
    collector.register_sink(Box::new(PrintingSink { out: io::stdout() }));
    collector.set_scan_channel(args.channel);
    if args.scanning {
        collector.begin_scan([0, 0]);
    }

    let rx_info = rx_info(&args);
    let delivered = if args.frames.is_empty() {
        let lines = io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .context("failed to read frames from stdin")?;
        process_frames(&collector, lines, rx_info, args.scanning)
    } else {
        process_frames(&collector, args.frames.clone(), rx_info, args.scanning)
    };
    log::info!("{} BSS descriptions collected", delivered);
    Ok(())
}
