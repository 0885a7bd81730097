use crate::models::filesystem::Filesystem;
use anyhow::Result;

/// Pseudo filesystems never backed by a local disk.
const SKIP_FS: &[&str] = &[
    "proc", "sysfs", "devpts", "tmpfs", "devtmpfs", "cgroup", "cgroup2",
    "pstore", "efivarfs", "securityfs", "debugfs", "tracefs", "bpf",
    "hugetlbfs", "mqueue", "fusectl", "configfs", "binfmt_misc",
    "overlay", "nsfs", "rpc_pipefs", "autofs", "squashfs",
];

pub fn read_filesystems() -> Result<Vec<Filesystem>> {
    let content = std::fs::read_to_string("/proc/mounts")?;
    let mut out = Vec::new();

    for (device, mount) in parse_mounts(&content) {
        if let Ok(fs) = statvfs_for(&device, &mount) {
            out.push(fs);
        }
    }
    Ok(out)
}

/// (device, mountpoint) pairs for block-device backed mounts.
fn parse_mounts(content: &str) -> Vec<(String, String)> {
    let mut v = Vec::new();
    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 { continue; }
        if SKIP_FS.contains(&fields[2]) { continue; }
        if !fields[0].starts_with("/dev/") || fields[0].starts_with("/dev/loop") { continue; }
        v.push((fields[0].to_string(), fields[1].to_string()));
    }
    v
}

fn statvfs_for(device: &str, mount: &str) -> Result<Filesystem> {
    use nix::sys::statvfs::statvfs;
    let stat = statvfs(mount)?;

    let frsize = stat.fragment_size() as u64;
    let total_bytes = stat.blocks() as u64 * frsize;
    let free_bytes  = stat.blocks_free() as u64 * frsize;

    Ok(Filesystem {
        device:      device.to_string(),
        mount:       mount.to_string(),
        total_bytes,
        used_bytes:  total_bytes.saturating_sub(free_bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_block_device_mounts() {
        let mounts = "\
proc /proc proc rw 0 0
/dev/sda2 / ext4 rw,relatime 0 0
tmpfs /run tmpfs rw 0 0
/dev/loop3 /snap/core squashfs ro 0 0
/dev/nvme0n1p1 /data xfs rw 0 0
";
        let v = parse_mounts(mounts);
        assert_eq!(v, vec![
            ("/dev/sda2".to_string(), "/".to_string()),
            ("/dev/nvme0n1p1".to_string(), "/data".to_string()),
        ]);
    }
}
