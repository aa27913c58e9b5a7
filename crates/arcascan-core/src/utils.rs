//! Utility helpers — data directory and date formatting.

use std::path::PathBuf;

/// Get the ARCA SCAN data directory (e.g. `~/.arcascan/`).
pub fn get_data_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".arcascan")
}

/// Today's date in the `dd/mm/yyyy` form used in report footers.
pub fn today_br() -> String {
    chrono::Local::now().format("%d/%m/%Y").to_string()
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}
