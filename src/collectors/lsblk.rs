use anyhow::{Context, Result};
use serde_json::Value;
use std::process::Command;

/// A partition/child device as reported by lsblk.
#[derive(Debug, Clone)]
pub struct Partition {
    pub name: String,
}

/// Metadata for one top-level disk device from lsblk.
#[derive(Debug, Clone)]
pub struct LsblkDisk {
    pub name:       String,
    pub size:       u64,
    pub partitions: Vec<Partition>,
}

/// Run `lsblk --json --bytes` and return top-level disk devices with their partitions.
pub fn run_lsblk() -> Result<Vec<LsblkDisk>> {
    let out = Command::new("lsblk")
        .args(["--json", "--bytes", "-o", "NAME,TYPE,SIZE"])
        .output()
        .context("lsblk not found")?;
    parse_lsblk(&out.stdout)
}

pub fn parse_lsblk(json: &[u8]) -> Result<Vec<LsblkDisk>> {
    let v: Value = serde_json::from_slice(json).context("parsing lsblk output")?;
    let devices = v["blockdevices"]
        .as_array()
        .cloned()
        .unwrap_or_default();

    let mut disks = Vec::new();
    for dev in &devices {
        let name     = str_opt(&dev["name"]).unwrap_or_default();
        let dev_type = dev["type"].as_str().unwrap_or("");
        if name.is_empty() { continue; }
        if dev_type != "disk" { continue; }

        disks.push(LsblkDisk {
            name,
            size:       size_of(&dev["size"]),
            partitions: parse_children(dev),
        });
    }
    Ok(disks)
}

fn parse_children(dev: &Value) -> Vec<Partition> {
    let children = match dev["children"].as_array() {
        Some(c) => c,
        None    => return Vec::new(),
    };

    children.iter().filter_map(|child| {
        let name = str_opt(&child["name"])?;
        Some(Partition { name })
    }).collect()
}

// Older util-linux prints sizes as strings even with --bytes.
fn size_of(v: &Value) -> u64 {
    v.as_u64()
        .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
        .unwrap_or(0)
}

fn str_opt(v: &Value) -> Option<String> {
    v.as_str()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
