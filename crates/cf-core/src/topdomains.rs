//! Top-domain filter
//!
//! Narrows a lookup table to the entries that target at least one popular
//! domain. Used for the reduced ("lite") build of the script.

use std::collections::HashMap;

use crate::types::{is_excluded, LookupTable};

// =============================================================================
// Oracle
// =============================================================================

/// Ranked domain membership test.
pub trait TopDomainOracle {
    /// Whether `domain` is ranked within the first `rank_bound` domains.
    fn contains(&self, domain: &str, rank_bound: usize) -> bool;
}

/// Domain → 1-based popularity rank.
#[derive(Debug, Clone, Default)]
pub struct TopDomains {
    ranks: HashMap<String, usize>,
}

impl TopDomains {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from domains listed most popular first.
    pub fn from_ranked<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (index, domain) in domains.into_iter().enumerate() {
            table.insert(domain, index + 1);
        }
        table
    }

    /// Record `domain` at `rank`. A domain listed twice keeps its best rank.
    pub fn insert(&mut self, domain: impl Into<String>, rank: usize) {
        let slot = self.ranks.entry(domain.into()).or_insert(rank);
        if rank < *slot {
            *slot = rank;
        }
    }

    pub fn rank(&self, domain: &str) -> Option<usize> {
        self.ranks.get(domain).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

impl TopDomainOracle for TopDomains {
    fn contains(&self, domain: &str, rank_bound: usize) -> bool {
        matches!(self.rank(domain), Some(rank) if rank <= rank_bound)
    }
}

// =============================================================================
// Filter
// =============================================================================

#[derive(Debug, Clone)]
pub struct FilterStats {
    pub considered: usize,
    pub kept: usize,
    /// Kept entries other than the generic one
    pub selected: usize,
}

/// Keep the generic entry plus every entry with a non-excluded fragment
/// ranked within `rank_bound`.
///
/// Entries whose fragments are all exclusions are dropped.
pub fn filter_top_domains<O>(
    table: LookupTable,
    oracle: &O,
    rank_bound: usize,
) -> (LookupTable, FilterStats)
where
    O: TopDomainOracle + ?Sized,
{
    let considered = table.len();

    let filtered: LookupTable = table
        .into_iter()
        .filter(|(key, entry)| {
            key.is_empty()
                || entry
                    .domains
                    .iter()
                    .filter(|fragment| !is_excluded(fragment))
                    .any(|fragment| oracle.contains(fragment, rank_bound))
        })
        .collect();

    let stats = FilterStats {
        considered,
        kept: filtered.len(),
        selected: filtered.len() - usize::from(filtered.contains_key("")),
    };
    log::info!(
        "Selected {} top domains from {} domains with available filters",
        stats.selected,
        stats.considered
    );

    (filtered, stats)
}
