//! Filter list sources
//!
//! The list file names one filter list per line, either a URL or a local path.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListSource {
    Url(String),
    Path(String),
}

impl ListSource {
    pub fn from_entry(entry: &str) -> Self {
        let lower = entry.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ListSource::Url(entry.to_string())
        } else {
            ListSource::Path(entry.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ListSource::Url(s) | ListSource::Path(s) => s,
        }
    }
}

impl std::fmt::Display for ListSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sources named in a list file, in order, without duplicates.
///
/// Blank lines and lines starting with `#` or `!` are ignored.
pub fn read_list_file(text: &str) -> Vec<ListSource> {
    let mut seen = HashSet::new();
    let mut sources = Vec::new();

    for line in text.lines() {
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') || entry.starts_with('!') {
            continue;
        }
        if seen.insert(entry.to_string()) {
            sources.push(ListSource::from_entry(entry));
        } else {
            log::debug!("ignoring duplicate list entry {}", entry);
        }
    }

    sources
}
