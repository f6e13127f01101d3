use std::io::{BufWriter, Write};
use std::path::Path;

use crate::storage::parser::SEPARATOR;
use crate::storage::utils::open_file_for_write;
use crate::storage::Values;

/// Rewrites the whole file: header comments first, then every entry.
pub(crate) fn persist(path: &Path, comments: &[Vec<u8>], values: &Values, sync: bool) -> std::io::Result<()> {
    let file = open_file_for_write(path)?;
    let mut out = BufWriter::new(file);

    write_entries(&mut out, comments, values)?;

    out.flush()?;
    if sync {
        out.get_ref().sync_all()?;
    }
    Ok(())
}

fn write_entries<W: Write>(out: &mut W, comments: &[Vec<u8>], values: &Values) -> std::io::Result<()> {
    for comment in comments {
        out.write_all(comment)?;
        out.write_all(b"\n")?;
    }
    for (key, val) in values {
        writeln!(out, "{key}{SEPARATOR}{val}")?;
    }
    Ok(())
}
