use crate::models::disk::IoCounters;
use anyhow::{Context, Result};
use std::collections::HashMap;

const DISKSTATS: &str = "/proc/diskstats";

/// Read /proc/diskstats and return a map of device-name → cumulative counters.
pub fn read_diskstats() -> Result<HashMap<String, IoCounters>> {
    let content = std::fs::read_to_string(DISKSTATS).context("reading /proc/diskstats")?;
    Ok(parse_diskstats(&content))
}

/// Parse whole-disk lines. Kernels before 4.18 have no discard columns; those
/// counters stay zero.
pub fn parse_diskstats(content: &str) -> HashMap<String, IoCounters> {
    let mut map = HashMap::new();

    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 14 { continue; }

        let name = fields[2];
        if name.starts_with("loop")
            || name.starts_with("ram")
            || name.starts_with("zram")
        {
            continue;
        }
        if is_partition(name) {
            continue;
        }

        let field = |i: usize| fields.get(i).map(|s| parse(s)).unwrap_or(0);
        let entry = IoCounters {
            read_ios:        field(3),
            read_sectors:    field(5),
            read_ticks:      field(6),
            write_ios:       field(7),
            write_sectors:   field(9),
            write_ticks:     field(10),
            total_ticks:     field(12),   // ms spent doing I/O
            discard_ios:     field(14),
            discard_sectors: field(16),
            discard_ticks:   field(17),
        };
        map.insert(name.to_string(), entry);
    }
    map
}

fn parse(s: &str) -> u64 {
    s.parse().unwrap_or(0)
}

/// Returns true for partition entries like sda1, nvme0n1p1, sdb3.
fn is_partition(name: &str) -> bool {
    if name.starts_with("nvme") {
        return match name.rfind('p') {
            Some(i) => {
                let tail = &name[i + 1..];
                !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit())
            }
            None => false,
        };
    }
    if name.starts_with("md") || name.starts_with("dm-") {
        return false;
    }
    let rest: String = name.chars().skip_while(|c| c.is_alphabetic()).collect();
    rest.len() < name.len() && !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
   8       0 sda 12345 100 987654 5000 6789 50 456789 3000 0 4000 8000 0 0 0 0
   8       1 sda1 10000 80 800000 4000 5000 40 400000 2500 0 3500 6500 0 0 0 0
 259       0 nvme0n1 50000 200 2000000 10000 30000 150 1500000 8000 5 15000 18000 12 0 96 7 0 0
 259       1 nvme0n1p1 1 2 3 4 5 6 7 8 9 10 11 0 0 0 0
   7       0 loop0 1 2 3 4 5 6 7 8 9 10 11
   9       0 md0 1 0 8 1 2 0 16 3 0 4 5
";

    #[test]
    fn parses_whole_disks_only() {
        let map = parse_diskstats(SAMPLE);
        let mut names: Vec<&String> = map.keys().collect();
        names.sort();
        assert_eq!(names, vec!["md0", "nvme0n1", "sda"]);
    }

    #[test]
    fn maps_counter_columns() {
        let map = parse_diskstats(SAMPLE);
        let sda = &map["sda"];
        assert_eq!(sda.read_ios, 12345);
        assert_eq!(sda.read_sectors, 987654);
        assert_eq!(sda.read_ticks, 5000);
        assert_eq!(sda.write_ios, 6789);
        assert_eq!(sda.write_sectors, 456789);
        assert_eq!(sda.write_ticks, 3000);
        assert_eq!(sda.total_ticks, 4000);

        let nvme = &map["nvme0n1"];
        assert_eq!(nvme.discard_ios, 12);
        assert_eq!(nvme.discard_sectors, 96);
        assert_eq!(nvme.discard_ticks, 7);
    }

    #[test]
    fn old_kernels_have_no_discard() {
        let map = parse_diskstats(SAMPLE);
        assert_eq!(map["md0"].discard_ios, 0);
        assert_eq!(map["md0"].total_ticks, 4);
    }

    #[test]
    fn partition_names() {
        assert!(is_partition("sda1"));
        assert!(is_partition("nvme0n1p2"));
        assert!(!is_partition("sda"));
        assert!(!is_partition("nvme0n1"));
        assert!(!is_partition("md127"));
        assert!(!is_partition("dm-0"));
    }
}
