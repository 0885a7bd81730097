/// One mounted filesystem with its space usage.
#[derive(Debug, Clone)]
pub struct Filesystem {
    pub device:      String,
    pub mount:       String,
    pub total_bytes: u64,
    pub used_bytes:  u64,
}

impl Filesystem {
    /// Returns the short device name ("sda1" from "/dev/sda1").
    pub fn short_device(&self) -> &str {
        self.device.trim_start_matches("/dev/").trim_start_matches("mapper/")
    }
}
