use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::Config;

pub const DATA_FILE: &str = "tick.json";
pub const CONFIG_FILE: &str = "tick.toml";

/// Find the data file: the nearest existing `tick.json` walking up from
/// `start`, else the default location.
pub fn find_data_file(start: &Path) -> PathBuf {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(DATA_FILE);
        if candidate.is_file() {
            return candidate;
        }
        if !current.pop() {
            return default_data_file();
        }
    }
}

/// Fallback location when no existing file is found: `$TICK_HOME/tick.json`
/// if set, else `~/.tick/tick.json`. Created on first save, not here.
pub fn default_data_file() -> PathBuf {
    if let Ok(home) = env::var("TICK_HOME") {
        return PathBuf::from(home).join(DATA_FILE);
    }
    match env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".tick").join(DATA_FILE),
        Err(_) => PathBuf::from(DATA_FILE),
    }
}

/// Load `tick.toml` from next to the data file. A missing file means
/// defaults; a malformed one is reported to stderr and ignored.
pub fn load_config(data_file: &Path) -> Config {
    let dir = data_file.parent().unwrap_or(Path::new("."));
    let path = dir.join(CONFIG_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return Config::default(),
    };
    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("warning: ignoring malformed {}: {}", path.display(), e);
            Config::default()
        }
    }
}
