use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Nominal sampling period in milliseconds; all rates are computed against it
    pub interval_ms: u64,
    /// Maximum number of disks shown
    pub count: usize,
    /// Color theme: default, dracula, gruvbox, nord
    pub theme: String,
    /// Animation pulse period in milliseconds
    pub pulse_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// "local" for this host's disks, a path to a JSON lines file, or "-" for stdin
    pub source: String,
    /// Local feed: stop after this many sample rounds (0 = run until quit)
    pub rounds: u64,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { interval_ms: 1000, count: 10, theme: "default".into(), pulse_ms: 120 }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { source: "local".into(), rounds: 0 }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        match load_from(&path) {
            Ok(c)  => c,
            Err(e) => {
                if path.exists() {
                    warn!("ignoring unreadable config {}: {e:#}", path.display());
                } else if let Err(e) = write_defaults(&path) {
                    debug!("could not write default config: {e:#}");
                }
                Config::default()
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pooltop").join("pooltop.toml"))
    }

    /// Row limit, never below one.
    pub fn row_limit(&self) -> usize {
        self.general.count.max(1)
    }
}

pub fn load_from(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&text)?;
    Ok(cfg)
}

pub fn write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# pooltop configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pooltop.toml");
        fs::write(&path, "[general]\ncount = 25\n").unwrap();
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.general.count, 25);
        assert_eq!(cfg.general.interval_ms, 1000);
        assert_eq!(cfg.feed.source, "local");
    }

    #[test]
    fn defaults_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pooltop.toml");
        write_defaults(&path).unwrap();
        assert_eq!(load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn zero_count_still_shows_a_row() {
        let mut cfg = Config::default();
        cfg.general.count = 0;
        assert_eq!(cfg.row_limit(), 1);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[general\ncount = ").unwrap();
        assert!(load_from(&path).is_err());
    }
}
