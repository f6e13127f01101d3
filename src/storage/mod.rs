use std::collections::HashMap;

pub use config::Config;
pub use file_store::FileStore;
pub use utils::last_modified;

mod config;
mod context;
mod file_store;
mod parser;
mod utils;
mod writer;

// insertion order is irrelevant, entries are only ever addressed by key
type Values = HashMap<String, String>;
