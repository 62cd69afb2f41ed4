//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use duel_core::{Felt, parse_felt};

/// Configuration required to bootstrap the commit store and client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding per-duel commit files
    pub data_dir: Option<PathBuf>,
    /// Keep commitments in memory only
    pub in_memory: bool,
    /// Event bus capacity per topic
    pub event_capacity: usize,
    /// Directory for log files
    pub log_dir: Option<PathBuf>,
    /// Local duelist address
    pub duelist: Option<Felt>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            in_memory: false,
            event_capacity: 100,
            log_dir: None,
            duelist: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PISTOLS_DATA_DIR` - Commit store directory (default: platform-specific)
    /// - `PISTOLS_IN_MEMORY` - Keep commitments in memory only (default: false)
    /// - `PISTOLS_EVENT_CAPACITY` - Event bus capacity per topic (default: 100)
    /// - `PISTOLS_LOG_DIR` - Log directory (default: platform-specific)
    /// - `PISTOLS_DUELIST` - Local duelist address, hex or decimal
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("PISTOLS_DATA_DIR").ok().map(PathBuf::from);

        if let Some(enable) = read_env::<bool>("PISTOLS_IN_MEMORY") {
            config.in_memory = enable;
        } else if env::var("PISTOLS_IN_MEMORY").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.in_memory = true;
        }

        if let Some(capacity) = read_env::<usize>("PISTOLS_EVENT_CAPACITY") {
            config.event_capacity = capacity.max(1);
        }

        config.log_dir = env::var("PISTOLS_LOG_DIR").ok().map(PathBuf::from);

        if let Ok(raw) = env::var("PISTOLS_DUELIST") {
            match parse_felt(&raw) {
                Ok(address) => config.duelist = Some(address),
                Err(e) => eprintln!("ignoring PISTOLS_DUELIST: {e}"),
            }
        }

        config
    }

    /// Commit store directory, falling back to the platform data directory.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|dirs| dirs.data_dir().join("commits"))
                .unwrap_or_else(|| PathBuf::from(".pistols/commits"))
        })
    }

    /// Log directory, falling back to the platform cache directory.
    pub fn resolved_log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|dirs| dirs.cache_dir().join("logs"))
                .unwrap_or_else(|| env::temp_dir().join("pistols").join("logs"))
        })
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "underware", "pistols")
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
