// # comment
// key=value
// key

use std::fs;
use std::io::{self, BufRead, BufReader};

use crate::storage::Values;

pub(crate) const COMMENT_MARKER: u8 = b'#';
pub(crate) const SEPARATOR: char = '=';

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Line {
    /// Raw bytes, written back untouched even when not valid UTF-8.
    Comment(Vec<u8>),
    Entry(String, String),
}

/// Classifies one raw line. Empty lines carry nothing and are skipped.
pub(crate) fn parse_line(raw: &[u8]) -> Option<Line> {
    if raw.is_empty() {
        return None;
    }

    if raw[0] == COMMENT_MARKER {
        return Some(Line::Comment(raw.to_vec()));
    }

    let raw = String::from_utf8_lossy(raw);
    // split on the first separator only, the value may contain more
    let line = match raw.split_once(SEPARATOR) {
        Some((key, val)) => Line::Entry(key.to_string(), val.to_string()),
        None => Line::Entry(raw.into_owned(), String::new()),
    };

    Some(line)
}

pub(crate) struct LineIterator<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineIterator<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self { reader, buf: Vec::new() }
    }
}

impl<R: BufRead> Iterator for LineIterator<R> {
    type Item = io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }

            if self.buf.last() == Some(&b'\n') {
                self.buf.pop();
            }
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }

            if let Some(line) = parse_line(&self.buf) {
                return Some(Ok(line));
            }
        }
    }
}

/// Parsed content of a store file.
#[derive(Debug, Default)]
pub(crate) struct Snapshot {
    pub values: Values,
    pub comments: Vec<Vec<u8>>,
}

pub(crate) fn read_snapshot(file: fs::File) -> io::Result<Snapshot> {
    read_snapshot_from(BufReader::new(file))
}

pub(crate) fn read_snapshot_from<R: BufRead>(reader: R) -> io::Result<Snapshot> {
    let mut snapshot = Snapshot::default();
    LineIterator::new(reader).try_for_each(|result| -> io::Result<()> {
        match result? {
            Line::Comment(c) => snapshot.comments.push(c),
            // later duplicates win
            Line::Entry(k, v) => {
                snapshot.values.insert(k, v);
            }
        }
        Ok(())
    })?;

    Ok(snapshot)
}
