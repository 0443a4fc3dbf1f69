//! Cosmetic Filter Core Library
//!
//! This crate turns a stream of parsed cosmetic rules into the compact lookup
//! tables embedded into the generated userscript.
//!
//! # Architecture
//!
//! Rules flow through three owned stages. Each stage consumes its input and
//! hands a fresh value to the next one:
//!
//! 1. [`combine`] groups rules by their verbatim domain list.
//! 2. [`filter_top_domains`] optionally narrows the table to popular domains.
//! 3. [`compact`] canonicalizes every category payload and factors payloads
//!    shared by several domains into one sorted dedup list.
//!
//! # Modules
//!
//! - `types`: Rules, per-domain entries and categories
//! - `combine`: Domain combiner
//! - `topdomains`: Ranked top-domain table and filter
//! - `compactor`: Canonicalization, dedup and table assembly
//! - `error`: Error type

pub mod combine;
pub mod compactor;
pub mod error;
pub mod topdomains;
pub mod types;

// Re-export commonly used types
pub use combine::{combine, combine_with_stats, CombineStats};
pub use compactor::{canonicalize, compact, CompileStats, Compiled, CompiledTable, CompiledValue};
pub use error::Error;
pub use topdomains::{filter_top_domains, FilterStats, TopDomainOracle, TopDomains};
pub use types::{Category, DomainEntry, LookupTable, Rule};
