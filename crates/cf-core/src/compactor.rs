//! Compactor
//!
//! Turns a lookup table into the four compiled tables consumed by the script.
//!
//! Every non-empty category of every entry is reduced to a canonical payload
//! (sorted, joined, escaped where needed). Payloads used by more than one
//! (domain key, category) slot are stored once in a sorted dedup list and
//! referenced by index; all other payloads stay inline.
//!
//! The dedup list is shared by all four categories: an index found in the
//! selector table and one found in the injection exception table point into
//! the same list.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::error::Error;
use crate::types::{Category, LookupTable};

/// A compiled slot: either the payload itself or its dedup list index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CompiledValue {
    Inline(String),
    Shared(usize),
}

/// Domain key → compiled value, ordered by key.
pub type CompiledTable = BTreeMap<String, CompiledValue>;

/// Canonical payload of one category: sorted, escaped if the category
/// requires it, then joined with the category separator.
pub fn canonicalize(values: &[String], category: Category) -> String {
    let mut sorted: Vec<&str> = values.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    if category.escapes_items() {
        sorted
            .into_iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(category.separator())
    } else {
        sorted.join(category.separator())
    }
}

/// Compile `table` into per-category tables and a shared dedup list.
pub fn compact(table: LookupTable) -> Compiled {
    let mut slots: Vec<(Category, String, String)> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for (key, entry) in &table {
        for category in Category::ALL {
            let values = entry.category(category);
            if values.is_empty() {
                continue;
            }
            let payload = canonicalize(values, category);
            *counts.entry(payload.clone()).or_insert(0) += 1;
            slots.push((category, key.clone(), payload));
        }
    }

    let mut dedup: Vec<String> = counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(payload, _)| payload)
        .collect();
    dedup.sort_unstable();

    let index: HashMap<&str, usize> = dedup
        .iter()
        .enumerate()
        .map(|(i, payload)| (payload.as_str(), i))
        .collect();

    let mut tables: [CompiledTable; 4] = Default::default();
    for (category, key, payload) in slots {
        let value = match index.get(payload.as_str()) {
            Some(&i) => CompiledValue::Shared(i),
            None => CompiledValue::Inline(payload),
        };
        tables[category as usize].insert(key, value);
    }

    let compiled = Compiled { tables, dedup };
    let stats = compiled.stats();
    log::info!(
        "Compiled {} domain entries: {} shared payloads, {} inline",
        table.len(),
        stats.shared,
        stats.inline
    );
    compiled
}

// =============================================================================
// Compiled Output
// =============================================================================

/// Output of [`compact`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    tables: [CompiledTable; 4],
    dedup: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompileStats {
    pub selectors: usize,
    pub exceptions: usize,
    pub injected_css: usize,
    pub injection_exceptions: usize,
    pub shared: usize,
    pub inline: usize,
}

impl CompileStats {
    /// Human readable summary embedded into the script header.
    pub fn summary(&self) -> String {
        format!(
            "blockers for {} domains, exceptions for {} domains, injected CSS rules for {} domains, exception for CSS injection for {} domains",
            self.selectors, self.exceptions, self.injected_css, self.injection_exceptions
        )
    }
}

impl Compiled {
    pub fn table(&self, category: Category) -> &CompiledTable {
        &self.tables[category as usize]
    }

    /// Payloads shared by two or more slots, sorted.
    pub fn dedup(&self) -> &[String] {
        &self.dedup
    }

    /// Payload of `category` for `key`, following dedup references.
    pub fn resolve(&self, category: Category, key: &str) -> Option<&str> {
        match self.table(category).get(key)? {
            CompiledValue::Inline(payload) => Some(payload),
            CompiledValue::Shared(i) => self.dedup.get(*i).map(String::as_str),
        }
    }

    pub fn stats(&self) -> CompileStats {
        let inline = self
            .tables
            .iter()
            .flat_map(|t| t.values())
            .filter(|v| matches!(v, CompiledValue::Inline(_)))
            .count();
        CompileStats {
            selectors: self.table(Category::Selectors).len(),
            exceptions: self.table(Category::Exceptions).len(),
            injected_css: self.table(Category::InjectedCss).len(),
            injection_exceptions: self.table(Category::InjectionExceptions).len(),
            shared: self.dedup.len(),
            inline,
        }
    }

    /// JSON object for one table, keys in lexicographic order.
    pub fn table_json(&self, category: Category) -> Result<String, Error> {
        Ok(serde_json::to_string(self.table(category))?)
    }

    /// JSON array for the dedup list.
    pub fn dedup_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(&self.dedup)?)
    }
}
