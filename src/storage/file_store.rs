use std::fs;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;

use crossbeam::atomic::AtomicCell;
use log::{debug, warn};

use crate::error::{Result, StoreError};
use crate::storage::config::Config;
use crate::storage::context::State;
use crate::storage::utils::{create_if_missing, last_modified, open_file_for_read};
use crate::storage::{parser, writer};

/// Key-value cache over a single text file.
///
/// Reads reload the whole file when its modification time is newer than the
/// cached one. Writes rewrite the whole file when a value actually changes.
/// Share it between threads through an `Arc`.
#[derive(Debug)]
pub struct FileStore {
    conf: Config,
    state: RwLock<State>,
    persists: AtomicCell<u64>,
}

impl FileStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_config(Config::new(path.as_ref()))
    }

    /// Opens `conf.path`, creating an empty file when it is missing, and
    /// loads it.
    pub fn with_config(conf: Config) -> Result<Self> {
        let seed = match fs::metadata(&conf.path) {
            Ok(_) => last_modified(&conf.path),
            Err(_) => {
                create_if_missing(&conf.path).map_err(|source| StoreError::Create {
                    path: conf.path.clone(),
                    source,
                })?;
                debug!("created store file {}", conf.path.display());
                // corrected by the initial load
                SystemTime::now()
            }
        };

        let store = FileStore {
            state: RwLock::new(State::new(seed)),
            conf,
            persists: AtomicCell::new(0),
        };

        {
            let mut state = store.write_state();
            store.reload(&mut state);
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.conf.path
    }

    /// Value stored under `key`, reloading first if the file changed on
    /// disk. Missing and empty values yield `fallback`, or `""` without one.
    pub fn read(&self, key: &str, fallback: Option<&str>) -> String {
        let on_disk = {
            let state = self.read_state();
            let on_disk = last_modified(&self.conf.path);
            if !state.is_stale(on_disk) {
                return state.lookup(key, fallback);
            }
            on_disk
        };

        // std RwLock cannot upgrade, so the read guard is released first
        let mut state = self.write_state();
        if state.is_stale(on_disk) {
            self.reload(&mut state);
        }
        state.lookup(key, fallback)
    }

    /// Argument-list form of [`FileStore::read`]: `[key]` or
    /// `[key, fallback]`. An empty list returns `""` without touching the
    /// file; arguments past the fallback are ignored.
    pub fn read_args(&self, args: &[&str]) -> String {
        match args {
            [] => String::new(),
            [key] => self.read(key, None),
            [key, fallback, ..] => self.read(key, Some(fallback)),
        }
    }

    /// Stores `val` under `key` and rewrites the file. Writing the value
    /// already held is a no-op.
    ///
    /// On failure the new value stays in memory, so reads see it even though
    /// the file does not.
    pub fn write(&self, key: &str, val: &str) -> Result<()> {
        let mut state = self.write_state();
        if state.holds(key, val) {
            return Ok(());
        }

        state.values.insert(key.to_string(), val.to_string());
        self.persist(&mut state)
    }

    /// Header comment lines, in file order. Bytes that are not UTF-8 are
    /// shown as U+FFFD here but kept as-is on disk.
    pub fn comments(&self) -> Vec<String> {
        self.read_state()
            .comments
            .iter()
            .map(|c| String::from_utf8_lossy(c).into_owned())
            .collect()
    }

    /// Number of cached keys. Does not check the file.
    pub fn len(&self) -> usize {
        self.read_state().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Successful file rewrites since construction.
    pub fn persist_count(&self) -> u64 {
        self.persists.load()
    }

    fn persist(&self, state: &mut State) -> Result<()> {
        writer::persist(&self.conf.path, &state.comments, &state.values, self.conf.sync_on_write)
            .map_err(|source| StoreError::Persist {
                path: self.conf.path.clone(),
                source,
            })?;

        state.last_modified = SystemTime::now();
        self.persists.fetch_add(1);
        debug!("persisted {} keys to {}", state.values.len(), self.conf.path.display());
        Ok(())
    }

    /// Unreadable file keeps the current state.
    fn reload(&self, state: &mut State) {
        let file = match open_file_for_read(&self.conf.path) {
            Ok(f) => f,
            Err(e) => {
                warn!("cannot open {} for reload: {}", self.conf.path.display(), e);
                return;
            }
        };

        match parser::read_snapshot(file) {
            Ok(snapshot) => {
                state.replace(snapshot, last_modified(&self.conf.path));
                debug!("loaded {} keys from {}", state.values.len(), self.conf.path.display());
            }
            Err(e) => warn!("cannot read {}: {}", self.conf.path.display(), e),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
