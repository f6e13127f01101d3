//! A small key-value store kept in a single flat text file.
//!
//! Values are cached in memory and reloaded lazily whenever the backing
//! file's modification time moves past the cached one. Header comment lines
//! (`# ...`) survive every rewrite.
//!
//! ```no_run
//! use filestore::FileStore;
//!
//! let store = FileStore::open("/tmp/settings.conf").unwrap();
//! store.write("theme", "dark").unwrap();
//! assert_eq!(store.read("theme", None), "dark");
//! assert_eq!(store.read("font", Some("mono")), "mono");
//! ```

mod storage;
mod error;

pub use storage::{Config, FileStore, last_modified};
pub use error::{Result, StoreError};
