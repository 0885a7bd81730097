use crate::models::disk::{DiskDescriptor, IoCounters};

/// 2048 sectors of 512 bytes = 1 MiB.
const SECTORS_PER_MIB: f64 = 2048.0;

/// Rates derived for one disk over one nominal interval.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskIoStat {
    pub endpoint:    String,
    pub used_pct:    u64,
    pub util_pct:    f64,
    pub tps:         u64,
    pub await_ms:    f64,
    pub read_mibs:   f64,
    pub write_mibs:  f64,
    pub discard_mibs: f64,
}

/// Turn two counter snapshots into rates.
///
/// A missing `prev` is a first observation: every delta is zero. Counters that
/// went backwards (device reset or wrap) clamp to zero instead of wrapping.
pub fn derive(
    disk: &DiskDescriptor,
    curr: &IoCounters,
    prev: Option<&IoCounters>,
    interval_ms: u64,
) -> DiskIoStat {
    let prev = prev.copied().unwrap_or(*curr);

    let mut stat = DiskIoStat {
        endpoint: disk.endpoint.clone(),
        used_pct: used_pct(disk.used_space, disk.total_space),
        ..Default::default()
    };

    let curr_ios = curr.total_ios();
    let prev_ios = prev.total_ios();
    if curr_ios > prev_ios {
        let tps = curr_ios - prev_ios;
        let d_ticks = delta(curr.read_ticks, prev.read_ticks)
            .saturating_add(delta(curr.write_ticks, prev.write_ticks))
            .saturating_add(delta(curr.discard_ticks, prev.discard_ticks));
        stat.tps = tps;
        stat.await_ms = d_ticks as f64 / tps as f64;
    }

    if interval_ms == 0 {
        return stat;
    }

    let interval_sec = interval_ms as f64 / 1000.0;
    stat.util_pct     = 100.0 * delta(curr.total_ticks, prev.total_ticks) as f64 / interval_ms as f64;
    stat.read_mibs    = mibs(delta(curr.read_sectors, prev.read_sectors), interval_sec);
    stat.write_mibs   = mibs(delta(curr.write_sectors, prev.write_sectors), interval_sec);
    stat.discard_mibs = mibs(delta(curr.discard_sectors, prev.discard_sectors), interval_sec);
    stat
}

/// Whole-number percentage of capacity in use, 0 for an unknown capacity.
pub fn used_pct(used: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (used as u128 * 100 / total as u128) as u64
}

fn delta(curr: u64, prev: u64) -> u64 {
    curr.saturating_sub(prev)
}

fn mibs(sectors: u64, interval_sec: f64) -> f64 {
    sectors as f64 / (SECTORS_PER_MIB * interval_sec)
}
