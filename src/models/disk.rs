use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static description of one disk in the cluster, loaded once per session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskDescriptor {
    pub endpoint:    String,
    #[serde(default)]
    pub pool_index:  usize,
    #[serde(default)]
    pub total_space: u64,
    #[serde(default)]
    pub used_space:  u64,
    #[serde(default)]
    pub healing:     bool,
    #[serde(default)]
    pub scanning:    bool,
}

/// Cumulative I/O counters for one disk at one instant.
///
/// Ticks are milliseconds, sectors are 512 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoCounters {
    pub read_ios:        u64,
    pub write_ios:       u64,
    pub discard_ios:     u64,
    pub read_sectors:    u64,
    pub write_sectors:   u64,
    pub discard_sectors: u64,
    pub read_ticks:      u64,
    pub write_ticks:     u64,
    pub discard_ticks:   u64,
    pub total_ticks:     u64,
}

impl IoCounters {
    pub fn total_ios(&self) -> u64 {
        self.read_ios
            .saturating_add(self.write_ios)
            .saturating_add(self.discard_ios)
    }
}

/// The fixed set of disks for a session, keyed by endpoint.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    disks:    BTreeMap<String, DiskDescriptor>,
    max_pool: usize,
}

impl Inventory {
    pub fn new(disks: Vec<DiskDescriptor>) -> Self {
        let max_pool = disks.iter().map(|d| d.pool_index).max().unwrap_or(0);
        let disks = disks
            .into_iter()
            .map(|d| (d.endpoint.clone(), d))
            .collect();
        Self { disks, max_pool }
    }

    pub fn get(&self, endpoint: &str) -> Option<&DiskDescriptor> {
        self.disks.get(endpoint)
    }

    pub fn contains(&self, endpoint: &str) -> bool {
        self.disks.contains_key(endpoint)
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.disks.keys().map(String::as_str)
    }

    pub fn max_pool(&self) -> usize { self.max_pool }
    pub fn len(&self) -> usize { self.disks.len() }
    pub fn is_empty(&self) -> bool { self.disks.is_empty() }

    /// Number of disks assigned to `pool`.
    pub fn pool_size(&self, pool: usize) -> usize {
        self.disks.values().filter(|d| d.pool_index == pool).count()
    }
}
