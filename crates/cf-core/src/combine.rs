//! Domain combiner
//!
//! Groups rules by their verbatim domain list and merges them into one
//! [`DomainEntry`] per key.

use crate::types::{Category, DomainEntry, LookupTable, Rule};

#[derive(Debug, Clone)]
pub struct CombineStats {
    pub rules: usize,
    pub duplicates: usize,
    pub domains: usize,
}

/// Merge `rules` into a lookup table keyed by [`Rule::domain_key`].
pub fn combine<I>(rules: I) -> LookupTable
where
    I: IntoIterator<Item = Rule>,
{
    combine_with_stats(rules).0
}

pub fn combine_with_stats<I>(rules: I) -> (LookupTable, CombineStats)
where
    I: IntoIterator<Item = Rule>,
{
    let mut table = LookupTable::new();
    let mut total = 0usize;
    let mut duplicates = 0usize;

    for rule in rules {
        total += 1;
        let key = rule.domain_key();
        let entry = table.entry(key).or_insert_with(DomainEntry::default);

        // Identical keys imply identical fragment lists.
        if entry.domains != rule.domains {
            entry.domains = rule.domains;
        }

        let mut added = false;
        if let Some(selector) = rule.selector.as_deref().filter(|s| !s.is_empty()) {
            let category = if rule.is_exception {
                Category::Exceptions
            } else {
                Category::Selectors
            };
            added |= entry.insert(category, selector);
        }
        if let Some(css) = rule.injected_css.as_deref().filter(|s| !s.is_empty()) {
            let category = if rule.is_exception {
                Category::InjectionExceptions
            } else {
                Category::InjectedCss
            };
            added |= entry.insert(category, css);
        }

        if !added {
            duplicates += 1;
        }
    }

    let stats = CombineStats {
        rules: total,
        duplicates,
        domains: table.len(),
    };
    log::debug!(
        "combined {} rules into {} domain entries ({} added nothing)",
        stats.rules,
        stats.domains,
        stats.duplicates
    );

    (table, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_rules_sharing_a_domain_list() {
        let table = combine(vec![
            Rule::hide(&["example.com"], ".ad"),
            Rule::hide(&["example.com"], ".ad"),
            Rule::hide(&["example.com"], ".banner").exception(),
            Rule::hide(&["other.com"], ".ad"),
        ]);

        assert_eq!(table.len(), 2);
        let example = &table["example.com"];
        assert_eq!(example.domains, vec!["example.com"]);
        assert_eq!(example.selectors, vec![".ad"]);
        assert_eq!(example.exceptions, vec![".banner"]);
        assert!(example.injected_css.is_empty());
        assert_eq!(table["other.com"].selectors, vec![".ad"]);
    }

    #[test]
    fn keeps_insertion_order() {
        let table = combine(vec![
            Rule::hide(&[], ".z"),
            Rule::hide(&[], ".a"),
            Rule::hide(&[], ".m"),
            Rule::hide(&[], ".a"),
        ]);
        assert_eq!(table[""].selectors, vec![".z", ".a", ".m"]);
    }

    #[test]
    fn routes_injections_to_their_own_categories() {
        let table = combine(vec![
            Rule::inject(&["a.com"], "body { overflow: auto }"),
            Rule::inject(&["a.com"], ".x { display: block }").exception(),
            Rule::inject(&["a.com"], "body { overflow: auto }"),
        ]);
        let entry = &table["a.com"];
        assert_eq!(entry.injected_css, vec!["body { overflow: auto }"]);
        assert_eq!(entry.injection_exceptions, vec![".x { display: block }"]);
        assert!(entry.selectors.is_empty());
        assert!(entry.exceptions.is_empty());
    }

    #[test]
    fn same_value_may_be_rule_and_exception() {
        let table = combine(vec![
            Rule::hide(&["a.com"], ".ad"),
            Rule::hide(&["a.com"], ".ad").exception(),
        ]);
        assert_eq!(table["a.com"].selectors, vec![".ad"]);
        assert_eq!(table["a.com"].exceptions, vec![".ad"]);
    }

    #[test]
    fn repeated_exception_never_becomes_a_hide_rule() {
        let table = combine(vec![
            Rule::hide(&["a.com"], ".keep").exception(),
            Rule::hide(&["a.com"], ".keep").exception(),
        ]);
        assert_eq!(table["a.com"].exceptions, vec![".keep"]);
        assert!(table["a.com"].selectors.is_empty());
    }

    #[test]
    fn different_fragment_order_gives_different_entries() {
        let table = combine(vec![
            Rule::hide(&["a.com", "b.com"], ".ad"),
            Rule::hide(&["b.com", "a.com"], ".ad"),
        ]);
        assert_eq!(table.len(), 2);
        assert!(table.contains_key("a.com,b.com"));
        assert!(table.contains_key("b.com,a.com"));
    }

    #[test]
    fn empty_values_are_ignored() {
        let rule = Rule {
            domains: vec!["a.com".into()],
            selector: Some(String::new()),
            injected_css: None,
            is_exception: false,
        };
        let table = combine(vec![rule]);
        assert!(table["a.com"].is_empty());
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let (table, stats) = combine_with_stats(Vec::new());
        assert!(table.is_empty());
        assert_eq!(stats.rules, 0);
        assert_eq!(stats.domains, 0);
    }

    #[test]
    fn counts_rules_that_added_nothing() {
        let (_, stats) = combine_with_stats(vec![
            Rule::hide(&["a.com"], ".ad"),
            Rule::hide(&["a.com"], ".ad"),
            Rule::hide(&["b.com"], ".ad"),
        ]);
        assert_eq!(stats.rules, 3);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stats.domains, 2);
    }

    #[test]
    fn categories_never_hold_duplicates() {
        let mut rules = Vec::new();
        for i in 0..50 {
            let domain = format!("d{}.com", i % 7);
            let value = format!(".c{}", i % 5);
            rules.push(Rule::hide(&[domain.as_str()], &value));
            rules.push(Rule::hide(&[domain.as_str()], &value).exception());
            rules.push(Rule::inject(&[domain.as_str()], &value));
            rules.push(Rule::inject(&[domain.as_str()], &value).exception());
        }
        let table = combine(rules);
        for entry in table.values() {
            for category in Category::ALL {
                let values = entry.category(category);
                let mut sorted = values.to_vec();
                sorted.sort();
                sorted.dedup();
                assert_eq!(sorted.len(), values.len());
            }
        }
    }
}
