//! Materialize entries as individual text files.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use stampy_core::Entry;

/// Longest sanitized title we will put in a file name. Generous, but keeps
/// `({status})_{title}.txt` under common filesystem limits.
const MAX_TITLE_CHARS: usize = 160;

/// Linux ENAMETOOLONG, the most common per-file failure with article titles.
const ENAMETOOLONG: i32 = 36;

/// Write one text file per entry into `dir`, clearing it first.
///
/// Each file holds the title, the extracted URL list, and the plain-text
/// body. A single file that the OS rejects (name too long, permission) is
/// skipped with a diagnostic; the rest of the dump proceeds. Returns the
/// number of files written.
pub fn dump_entries(entries: &[Entry], dir: &Path) -> Result<usize> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)
            .with_context(|| format!("failed to clear dump directory {}", dir.display()))?;
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create dump directory {}", dir.display()))?;

    let mut written = 0usize;
    for entry in entries {
        let filename = format!("({})_{}.txt", entry.status, sanitize_title(&entry.title));
        let path = dir.join(filename);
        match write_entry_file(&path, entry) {
            Ok(()) => written += 1,
            Err(e) if e.raw_os_error() == Some(ENAMETOOLONG) => {
                tracing::warn!(title = %snippet(&entry.title), "file name too long, skipping entry");
            }
            Err(e) => {
                tracing::warn!(title = %snippet(&entry.title), error = %e, "failed to write entry, skipping");
            }
        }
    }
    Ok(written)
}

fn write_entry_file(path: &Path, entry: &Entry) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "Title: {}", entry.title)?;
    writeln!(file)?;
    writeln!(file, "URLs:")?;
    for url in &entry.urls {
        writeln!(file, "- {url}")?;
    }
    writeln!(file)?;
    file.write_all(entry.text.as_bytes())?;
    Ok(())
}

/// Filesystem-safe, length-bounded rendition of a title. Path separators and
/// other hostile characters become underscores; the result is trimmed and
/// capped at [`MAX_TITLE_CHARS`].
fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    cleaned.trim().chars().take(MAX_TITLE_CHARS).collect()
}

fn snippet(title: &str) -> String {
    if title.chars().count() > 50 {
        let cut: String = title.chars().take(50).collect();
        format!("{cut}...")
    } else {
        title.to_string()
    }
}
