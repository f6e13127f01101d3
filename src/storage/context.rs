use std::time::SystemTime;

use crate::storage::parser::Snapshot;
use crate::storage::Values;

/// Everything guarded by the store lock.
#[derive(Debug)]
pub struct State {
    pub values: Values,
    pub comments: Vec<Vec<u8>>,
    pub last_modified: SystemTime,
}

impl State {
    pub fn new(last_modified: SystemTime) -> Self {
        Self {
            values: Values::new(),
            comments: Vec::new(),
            last_modified,
        }
    }

    #[inline]
    pub fn is_stale(&self, on_disk: SystemTime) -> bool {
        on_disk > self.last_modified
    }

    /// Full replace, never a merge.
    pub fn replace(&mut self, snapshot: Snapshot, last_modified: SystemTime) {
        self.values = snapshot.values;
        self.comments = snapshot.comments;
        self.last_modified = last_modified;
    }

    /// Absent and empty values both fall through to `fallback`.
    pub fn lookup(&self, key: &str, fallback: Option<&str>) -> String {
        match self.values.get(key) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => fallback.unwrap_or_default().to_string(),
        }
    }

    pub fn holds(&self, key: &str, val: &str) -> bool {
        self.values.get(key).map(String::as_str).unwrap_or_default() == val
    }
}

#[cfg(test)]
mod test {
    use std::time::{Duration, UNIX_EPOCH};

    use super::State;

    #[test]
    fn it_should_detect_newer_mtime_only() {
        let state = State::new(UNIX_EPOCH + Duration::from_secs(100));

        assert!(state.is_stale(UNIX_EPOCH + Duration::from_secs(101)));
        assert!(!state.is_stale(UNIX_EPOCH + Duration::from_secs(100)));
        assert!(!state.is_stale(UNIX_EPOCH));
    }

    #[test]
    fn it_should_treat_empty_value_as_absent() {
        let mut state = State::new(UNIX_EPOCH);
        state.values.insert("empty".into(), "".into());
        state.values.insert("set".into(), "v".into());

        assert_eq!(state.lookup("set", Some("fb")), "v");
        assert_eq!(state.lookup("empty", Some("fb")), "fb");
        assert_eq!(state.lookup("missing", Some("fb")), "fb");
        assert_eq!(state.lookup("missing", None), "");
        assert!(state.holds("missing", ""));
        assert!(state.holds("set", "v"));
        assert!(!state.holds("set", "w"));
    }
}
