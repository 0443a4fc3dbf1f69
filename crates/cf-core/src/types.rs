//! Core type definitions for the cosmetic filter compiler
//!
//! A [`Rule`] is one parsed filter directive. Rules sharing the same domain
//! list are merged into a [`DomainEntry`], keyed by the verbatim
//! comma-joined domain list in a [`LookupTable`].

use std::collections::HashMap;

/// Prefix marking a domain fragment as excluded (`~example.com`).
pub const EXCLUSION_MARKER: char = '~';

/// Domain key → merged entry.
pub type LookupTable = HashMap<String, DomainEntry>;

// =============================================================================
// Rules
// =============================================================================

/// One parsed cosmetic filter directive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rule {
    /// Domain fragments in source order. Excluded fragments keep their `~`.
    pub domains: Vec<String>,
    /// Element hiding selector
    pub selector: Option<String>,
    /// CSS text to inject
    pub injected_css: Option<String>,
    pub is_exception: bool,
}

impl Rule {
    /// Element hiding rule.
    pub fn hide(domains: &[&str], selector: &str) -> Self {
        Self {
            domains: domains.iter().map(|d| d.to_string()).collect(),
            selector: Some(selector.to_string()),
            ..Self::default()
        }
    }

    /// CSS injection rule.
    pub fn inject(domains: &[&str], css: &str) -> Self {
        Self {
            domains: domains.iter().map(|d| d.to_string()).collect(),
            injected_css: Some(css.to_string()),
            ..Self::default()
        }
    }

    /// Turn this rule into its exception counterpart.
    pub fn exception(mut self) -> Self {
        self.is_exception = true;
        self
    }

    /// The grouping key: fragments joined with `,` in their original order.
    ///
    /// Two rules listing the same domains in a different order get different
    /// keys.
    pub fn domain_key(&self) -> String {
        self.domains.join(",")
    }
}

/// Whether a domain fragment carries the exclusion marker.
#[inline]
pub fn is_excluded(fragment: &str) -> bool {
    fragment.starts_with(EXCLUSION_MARKER)
}

// =============================================================================
// Categories
// =============================================================================

/// The four string categories kept per domain entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Selectors to hide
    Selectors,
    /// Selectors that must stay visible
    Exceptions,
    /// CSS to inject
    InjectedCss,
    /// Injected CSS to suppress. Joined into a regex alternation by the script.
    InjectionExceptions,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Selectors,
        Category::Exceptions,
        Category::InjectedCss,
        Category::InjectionExceptions,
    ];

    /// Separator used to join a sorted payload.
    pub const fn separator(self) -> &'static str {
        match self {
            Category::Selectors | Category::Exceptions => ",",
            Category::InjectedCss => "",
            Category::InjectionExceptions => "|",
        }
    }

    /// Whether payload items are escaped to literal regex text before joining.
    pub const fn escapes_items(self) -> bool {
        matches!(self, Category::InjectionExceptions)
    }

    /// Name of the table in the rendered script.
    pub const fn script_name(self) -> &'static str {
        match self {
            Category::Selectors => "rules",
            Category::Exceptions => "exceptions",
            Category::InjectedCss => "injectionRules",
            Category::InjectionExceptions => "injectionExceptions",
        }
    }
}

// =============================================================================
// Domain Entries
// =============================================================================

/// All rules targeting one verbatim domain list.
///
/// Every category is an insertion-ordered list without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DomainEntry {
    pub domains: Vec<String>,
    pub selectors: Vec<String>,
    pub exceptions: Vec<String>,
    pub injected_css: Vec<String>,
    pub injection_exceptions: Vec<String>,
}

impl DomainEntry {
    pub fn category(&self, category: Category) -> &[String] {
        match category {
            Category::Selectors => &self.selectors,
            Category::Exceptions => &self.exceptions,
            Category::InjectedCss => &self.injected_css,
            Category::InjectionExceptions => &self.injection_exceptions,
        }
    }

    fn category_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Selectors => &mut self.selectors,
            Category::Exceptions => &mut self.exceptions,
            Category::InjectedCss => &mut self.injected_css,
            Category::InjectionExceptions => &mut self.injection_exceptions,
        }
    }

    /// Append `value` to `category` unless it is already there.
    /// Returns whether the value was new.
    pub fn insert(&mut self, category: Category, value: &str) -> bool {
        let list = self.category_mut(category);
        if list.iter().any(|v| v == value) {
            return false;
        }
        list.push(value.to_string());
        true
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|&c| self.category(c).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_key_keeps_source_order() {
        let a = Rule::hide(&["a.com", "b.com"], ".ad");
        let b = Rule::hide(&["b.com", "a.com"], ".ad");
        assert_eq!(a.domain_key(), "a.com,b.com");
        assert_eq!(b.domain_key(), "b.com,a.com");
        assert_eq!(Rule::hide(&[], ".ad").domain_key(), "");
    }

    #[test]
    fn insert_ignores_duplicates_per_category() {
        let mut entry = DomainEntry::default();
        assert!(entry.insert(Category::Selectors, ".ad"));
        assert!(!entry.insert(Category::Selectors, ".ad"));
        assert!(entry.insert(Category::Exceptions, ".ad"));
        assert_eq!(entry.selectors, vec![".ad"]);
        assert_eq!(entry.exceptions, vec![".ad"]);
        assert!(entry.injected_css.is_empty());
    }

    #[test]
    fn category_separators() {
        assert_eq!(Category::Selectors.separator(), ",");
        assert_eq!(Category::Exceptions.separator(), ",");
        assert_eq!(Category::InjectedCss.separator(), "");
        assert_eq!(Category::InjectionExceptions.separator(), "|");
        assert!(Category::InjectionExceptions.escapes_items());
        assert!(!Category::InjectedCss.escapes_items());
    }
}
