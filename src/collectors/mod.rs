pub mod diskstats;
pub mod filesystem;
pub mod json_stream;
pub mod local;
pub mod lsblk;

use crate::event::Event;
use crate::models::disk::Inventory;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::Duration;
use tracing::info;

/// Where samples come from.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedSource {
    /// This host's block devices, `rounds` sample rounds (0 = until quit).
    Local { rounds: u64 },
    /// Newline-delimited JSON from a file, or stdin for `-`.
    Json(PathBuf),
}

impl FeedSource {
    pub fn parse(source: &str, rounds: u64) -> Self {
        match source {
            "" | "local" => FeedSource::Local { rounds },
            path         => FeedSource::Json(PathBuf::from(path)),
        }
    }
}

/// Load the inventory synchronously, then start the feed thread on `tx`.
pub fn start(source: &FeedSource, interval: Duration, tx: Sender<Event>) -> Result<Inventory> {
    let inventory = match source {
        FeedSource::Local { rounds } => {
            let disks = local::inventory().context("reading local disk inventory")?;
            let endpoints = disks.iter().map(|d| d.endpoint.clone()).collect();
            local::spawn(endpoints, interval, *rounds, tx);
            Inventory::new(disks)
        }
        FeedSource::Json(path) if path.as_os_str() == "-" => {
            let mut reader = BufReader::new(io::stdin());
            let disks = json_stream::read_inventory(&mut reader)?;
            json_stream::spawn(reader, tx);
            Inventory::new(disks)
        }
        FeedSource::Json(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening feed {}", path.display()))?;
            let mut reader = BufReader::new(file);
            let disks = json_stream::read_inventory(&mut reader)?;
            json_stream::spawn(reader, tx);
            Inventory::new(disks)
        }
    };
    info!(disks = inventory.len(), pools = inventory.max_pool() + 1, "inventory loaded");
    Ok(inventory)
}
