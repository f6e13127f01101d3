use std::fs;
use std::fs::OpenOptions;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Modification time of `path`, or the Unix epoch when it cannot be stat'ed.
pub fn last_modified<P: AsRef<Path>>(path: P) -> SystemTime {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(UNIX_EPOCH)
}

pub(crate) fn open_file_for_read<P>(path: P) -> std::io::Result<fs::File> where P: AsRef<Path> {
    OpenOptions::new()
        .read(true)
        .open(path)
}

// truncates: every persist rewrites the whole file
pub(crate) fn open_file_for_write<P>(path: P) -> std::io::Result<fs::File> where P: AsRef<Path> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

// never truncates an existing file
pub(crate) fn create_if_missing<P>(path: P) -> std::io::Result<fs::File> where P: AsRef<Path> {
    OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
}
