// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

/*!
MultiTool host simulator

Runs the device loop on a mock board. Lines read from stdin arrive as writes
from one connected phone; notifications are written to stdout.

Usage:
  cargo run --bin multitool-sim -- --tag-uid 04-A1-B2-C3 --tag-data hello

Example session:
  SET_MODE:RFID|SUBMODE:READ
  RFID_SCAN
*/

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};

use multitool::config::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config,
    validate_config, MultitoolConfig,
};
use multitool::hal::nus::{uuid_to_string, NUS_SERVICE_UUID};
use multitool::hal::{Board, ConnectionId, LinkError, LinkProvider, StatusDisplay, StdClock, TagUid};
use multitool::hal_mock::{MockTagReader, RecordingCarrier, ScriptedIrReceiver};
use multitool::observability::{init_logging, CrateDebugFlags, DEBUG_ENV};
use multitool::runtime::{BoardParts, Device};

/// Connection id the stdin peer is attached as
const STDIN_PEER: ConnectionId = 1;

/// MultiTool host simulator - device loop over stdin/stdout
#[derive(Parser, Debug)]
#[command(name = "multitool-sim", version, author, long_about = None)]
struct Args {
    /// Path to multitool.toml (searched for when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// UID of a card placed on the reader, e.g. 04-A1-B2-C3
    #[arg(long)]
    tag_uid: Option<String>,

    /// Text pre-written to the card's data block
    #[arg(long, requires = "tag_uid")]
    tag_data: Option<String>,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Override a config value (key=value, repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// Enable debug logging for a crate (repeatable, or "all")
    #[arg(long = "debug", value_name = "CRATE")]
    debug_crates: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

/// Board whose link is the process's stdout
struct SimBoard;

impl Board for SimBoard {
    type Clock = StdClock;
    type IrReceiver = ScriptedIrReceiver<StdClock>;
    type IrCarrier = RecordingCarrier<StdClock>;
    type Tags = MockTagReader;
    type Display = ConsoleDisplay;
    type Link = StdoutLink;

    const NAME: &'static str = "Host simulator";
}

/// Writes every notification to stdout as-is
struct StdoutLink;

impl LinkProvider for StdoutLink {
    type Error = LinkError;

    fn start_advertising(&self, device_name: &str, interval_us: u32) -> Result<(), Self::Error> {
        info!(
            name = device_name,
            interval_us,
            service = %uuid_to_string(&NUS_SERVICE_UUID),
            "advertising"
        );
        Ok(())
    }

    fn notify(&self, connection: ConnectionId, chunk: &[u8]) -> Result<(), Self::Error> {
        if connection != STDIN_PEER {
            return Err(LinkError::NotConnected(connection));
        }
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(chunk)
            .and_then(|()| stdout.flush())
            .map_err(|e| LinkError::Stack(e.to_string()))
    }
}

/// Display that logs what the OLED would show
struct ConsoleDisplay;

impl StatusDisplay for ConsoleDisplay {
    fn show_idle(&self) {
        debug!(target: "display", "idle screen");
    }

    fn show_tag(&self, uid: &TagUid) {
        info!(target: "display", uid = %uid, "tag");
    }

    fn show_message(&self, text: &str) {
        info!(target: "display", text, "message");
    }

    fn set_mode(&self, mode: &str) {
        info!(target: "display", mode, "mode");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let overrides = parse_overrides(&args.overrides)?;
    let config = resolve_config(args.config.as_deref(), &overrides)?;
    validate_config(&config).context("Invalid configuration")?;

    let mut debug_flags = CrateDebugFlags::from_args(
        args.debug_crates
            .iter()
            .map(|name| format!("--debug-{}", name)),
    );
    if let Ok(value) = std::env::var(DEBUG_ENV) {
        debug_flags.merge_env_value(&value);
    }
    let level = if args.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let log_dir = config
        .logging
        .file_logging
        .then(|| config.logging.log_dir.clone());
    let _logging = init_logging(&debug_flags, level, log_dir).context("Failed to initialise logging")?;

    let tags = MockTagReader::new();
    if let Some(uid) = &args.tag_uid {
        let uid: TagUid = uid
            .parse()
            .with_context(|| format!("Invalid --tag-uid {:?}", uid))?;
        match &args.tag_data {
            Some(data) => tags.present_with_block(uid, config.rfid.data_block, data),
            None => tags.present(uid),
        }
    }

    let clock = StdClock::new();
    let parts = BoardParts::<SimBoard> {
        clock,
        ir_receiver: ScriptedIrReceiver::new(clock),
        ir_carrier: RecordingCarrier::new(clock),
        tags,
        display: Arc::new(ConsoleDisplay),
        link: Arc::new(StdoutLink),
    };
    let (mut device, mut handler) = Device::new(parts, &config);

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        info!("Shutdown signal received...");
        r.store(false, Ordering::SeqCst);
    })
    .context("Failed to install Ctrl-C handler")?;

    let input_done = Arc::new(AtomicBool::new(false));
    let done = Arc::clone(&input_done);
    thread::Builder::new()
        .name("stdin-link".to_string())
        .spawn(move || {
            handler.on_connect(STDIN_PEER);
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(mut line) => {
                        line.push('\n');
                        handler.on_bytes_received(STDIN_PEER, line.as_bytes());
                    }
                    Err(e) => {
                        warn!(error = %e, "stdin read failed");
                        break;
                    }
                }
            }
            done.store(true, Ordering::SeqCst);
        })
        .context("Failed to spawn stdin reader")?;

    info!(board = SimBoard::NAME, "Simulator running (Ctrl+C to stop)");
    let mut ticks = 0u64;
    while running.load(Ordering::Relaxed) {
        if args.ticks.is_some_and(|max| ticks >= max) {
            break;
        }
        let outcome = device.tick();
        ticks += 1;

        if input_done.load(Ordering::SeqCst)
            && outcome.command.is_none()
            && device.transport().pending_commands() == 0
        {
            debug!("input exhausted and queue drained");
            break;
        }
    }

    info!(ticks, mode = %device.state().label(), "Simulator stopped");
    Ok(())
}

fn parse_overrides(pairs: &[String]) -> Result<HashMap<String, String>> {
    let mut overrides = HashMap::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Override {:?} is not KEY=VALUE", pair);
        };
        overrides.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(overrides)
}

/// Explicit path, then a discovered file, then built-in defaults
fn resolve_config(
    path: Option<&std::path::Path>,
    overrides: &HashMap<String, String>,
) -> Result<MultitoolConfig> {
    if let Some(path) = path {
        return load_config(Some(path), Some(overrides))
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    match find_config_file() {
        Ok(found) => load_config(Some(&found), Some(overrides))
            .with_context(|| format!("Failed to load config from {}", found.display())),
        Err(_) => {
            let mut config = MultitoolConfig::default();
            apply_environment_overrides(&mut config);
            apply_cli_overrides(&mut config, overrides);
            Ok(config)
        }
    }
}
