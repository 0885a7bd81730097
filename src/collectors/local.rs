//! Feed built from this host's block devices.

use crate::collectors::{diskstats, filesystem, lsblk::{self, LsblkDisk}};
use crate::event::Event;
use crate::models::disk::DiskDescriptor;
use crate::models::filesystem::Filesystem;
use anyhow::{bail, Result};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Local disks as a single pool, endpoint `/dev/<name>`.
pub fn inventory() -> Result<Vec<DiskDescriptor>> {
    let disks = lsblk::run_lsblk()?;
    let stats = diskstats::read_diskstats()?;
    let mounted = filesystem::read_filesystems().unwrap_or_else(|e| {
        warn!("filesystem usage unavailable: {e:#}");
        Vec::new()
    });

    let out: Vec<DiskDescriptor> = disks
        .iter()
        .filter(|d| stats.contains_key(&d.name))
        .map(|d| describe(d, &mounted))
        .collect();
    if out.is_empty() {
        bail!("no local block devices found");
    }
    Ok(out)
}

fn describe(disk: &LsblkDisk, mounted: &[Filesystem]) -> DiskDescriptor {
    let on_disk: Vec<&Filesystem> = mounted
        .iter()
        .filter(|fs| {
            let dev = fs.short_device();
            dev == disk.name || disk.partitions.iter().any(|p| p.name == dev)
        })
        .collect();
    for fs in &on_disk {
        debug!(disk = %disk.name, mount = %fs.mount, used = fs.used_bytes, "filesystem on disk");
    }

    let used_space = on_disk.iter().map(|fs| fs.used_bytes).sum();
    let total_space = if disk.size > 0 {
        disk.size
    } else {
        on_disk.iter().map(|fs| fs.total_bytes).sum()
    };

    DiskDescriptor {
        endpoint: endpoint(&disk.name),
        pool_index: 0,
        total_space,
        used_space,
        healing: false,
        scanning: false,
    }
}

fn endpoint(name: &str) -> String {
    format!("/dev/{}", name)
}

/// Sample `/proc/diskstats` every `interval` for each endpoint. With
/// `rounds > 0` the last sample of the last round is marked final.
pub fn spawn(
    endpoints: Vec<String>,
    interval: Duration,
    rounds: u64,
    tx: Sender<Event>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut round = 0u64;
        loop {
            round += 1;
            let stats = match diskstats::read_diskstats() {
                Ok(s)  => s,
                Err(e) => {
                    warn!("stopping local feed: {e:#}");
                    let _ = tx.send(Event::FeedEnded);
                    return;
                }
            };

            let last_round = rounds > 0 && round >= rounds;
            let count = endpoints.len();
            for (i, ep) in endpoints.iter().enumerate() {
                let name = ep.trim_start_matches("/dev/");
                let Some(counters) = stats.get(name).copied() else {
                    debug!(endpoint = %ep, "device vanished from diskstats");
                    continue;
                };
                let event = Event::Sample {
                    endpoint: ep.clone(),
                    counters,
                    is_final: last_round && i + 1 == count,
                };
                if tx.send(event).is_err() {
                    return;
                }
            }

            if last_round {
                // Covers the case where the last endpoint vanished mid-round.
                let _ = tx.send(Event::FeedEnded);
                return;
            }
            thread::sleep(interval);
        }
    })
}
