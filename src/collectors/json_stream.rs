//! Newline-delimited JSON feed.
//!
//! The first non-blank line carries the inventory:
//!
//! ```json
//! {"disks": [{"endpoint": "http://node1:9000/mnt/d1", "pool_index": 0, "total_space": 1000, "used_space": 10}]}
//! ```
//!
//! every later line one sample:
//!
//! ```json
//! {"endpoint": "http://node1:9000/mnt/d1", "stats": {"read_ios": 12, "total_ticks": 80}, "final": false}
//! ```

use crate::event::Event;
use crate::models::disk::{DiskDescriptor, IoCounters};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::io::BufRead;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct InventoryRecord {
    disks: Vec<DiskDescriptor>,
}

#[derive(Debug, Deserialize)]
struct SampleRecord {
    endpoint: String,
    #[serde(default)]
    stats:    IoCounters,
    #[serde(default, rename = "final")]
    is_final: bool,
}

/// Read up to and including the inventory line.
pub fn read_inventory<R: BufRead>(reader: &mut R) -> Result<Vec<DiskDescriptor>> {
    let mut line = String::new();
    loop {
        line.clear();
        let n = reader.read_line(&mut line).context("reading feed inventory")?;
        if n == 0 {
            bail!("feed closed before sending the disk inventory");
        }
        if line.trim().is_empty() {
            continue;
        }
        let record: InventoryRecord =
            serde_json::from_str(line.trim()).context("parsing feed inventory")?;
        return Ok(record.disks);
    }
}

/// Turn one feed line into a sample event. Blank lines yield `None`.
pub fn parse_sample(line: &str) -> Result<Option<Event>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let record: SampleRecord = serde_json::from_str(line)?;
    Ok(Some(Event::Sample {
        endpoint: record.endpoint,
        counters: record.stats,
        is_final: record.is_final,
    }))
}

/// Forward samples until end of stream, which is reported as `FeedEnded`.
pub fn spawn<R: BufRead + Send + 'static>(reader: R, tx: Sender<Event>) -> JoinHandle<()> {
    thread::spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(l)  => l,
                Err(e) => {
                    warn!("feed read error: {e}");
                    break;
                }
            };
            match parse_sample(&line) {
                Ok(Some(event)) => {
                    let is_final = matches!(event, Event::Sample { is_final: true, .. });
                    if tx.send(event).is_err() || is_final {
                        return;
                    }
                }
                Ok(None) => {}
                Err(e) => warn!("skipping malformed sample: {e}"),
            }
        }
        debug!("feed reached end of stream");
        let _ = tx.send(Event::FeedEnded);
    })
}
