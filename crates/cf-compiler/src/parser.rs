//! Cosmetic filter line parser
//!
//! Only element hiding and CSS injection lines are turned into rules. Network
//! rules are skipped silently. Cosmetic lines we cannot express (procedural
//! selectors, scriptlets, HTML filters) are dropped with a warning.

use cf_core::types::{Rule, EXCLUSION_MARKER};

/// Error for a single cosmetic line. The line is dropped, parsing goes on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty selector")]
    EmptySelector,
    #[error("invalid domain fragment '{0}'")]
    InvalidDomain(String),
    #[error("unbalanced style declaration")]
    UnbalancedStyle,
    #[error("unsupported {0} filter")]
    Unsupported(&'static str),
}

/// Rules of one filter list plus the numbers reported for it.
#[derive(Debug, Clone, Default)]
pub struct ParsedList {
    pub rules: Vec<Rule>,
    pub lines: usize,
    /// Cosmetic lines dropped with a warning
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Separator {
    Hide { exception: bool },
    Inject { exception: bool },
    Unsupported(&'static str),
}

// Longest first so that `#@$#` is never read as `#@#`.
const SEPARATORS: &[(&str, Separator)] = &[
    ("#@$?#", Separator::Unsupported("procedural injection")),
    ("#$?#", Separator::Unsupported("procedural injection")),
    ("#@?#", Separator::Unsupported("procedural")),
    ("#?#", Separator::Unsupported("procedural")),
    ("#@$#", Separator::Inject { exception: true }),
    ("#$#", Separator::Inject { exception: false }),
    ("#@%#", Separator::Unsupported("script")),
    ("#%#", Separator::Unsupported("script")),
    ("#@#", Separator::Hide { exception: true }),
    ("##", Separator::Hide { exception: false }),
];

const PROCEDURAL_OPERATORS: &[&str] = &[
    ":-abp-",
    ":contains(",
    ":has-text(",
    ":matches-attr(",
    ":matches-css",
    ":matches-media(",
    ":matches-path(",
    ":min-text-length(",
    ":nth-ancestor(",
    ":others(",
    ":remove(",
    ":remove-attr(",
    ":remove-class(",
    ":upward(",
    ":watch-attr(",
    ":xpath(",
];

const STYLE_OPERATOR: &str = ":style(";

pub fn parse_filter_list(text: &str) -> ParsedList {
    let mut parsed = ParsedList::default();

    for (index, raw_line) in text.lines().enumerate() {
        parsed.lines += 1;
        match parse_line(raw_line) {
            Ok(Some(rule)) => parsed.rules.push(rule),
            Ok(None) => {}
            Err(e) => {
                parsed.skipped += 1;
                log::warn!("line {}: {}: {}", index + 1, e, raw_line.trim());
            }
        }
    }

    parsed
}

/// Parse one line. `Ok(None)` for blank lines, comments and non-cosmetic
/// rules.
pub fn parse_line(raw_line: &str) -> Result<Option<Rule>, ParseError> {
    let line = raw_line.trim();
    if line.is_empty() || is_comment_line(line) {
        return Ok(None);
    }

    let Some((pos, marker, separator)) = find_separator(line) else {
        return Ok(None);
    };

    let body = line[pos + marker.len()..].trim();
    let domains = parse_domains(&line[..pos])?;

    match separator {
        Separator::Unsupported(kind) => Err(ParseError::Unsupported(kind)),
        Separator::Hide { exception } => {
            let mut rule = parse_hide_body(body)?;
            rule.domains = domains;
            rule.is_exception = exception;
            Ok(Some(rule))
        }
        Separator::Inject { exception } => {
            let css = parse_injection_body(body)?;
            Ok(Some(Rule {
                domains,
                selector: None,
                injected_css: Some(css),
                is_exception: exception,
            }))
        }
    }
}

fn is_comment_line(line: &str) -> bool {
    line.starts_with('!') || line.starts_with('[') || line == "#" || line.starts_with("# ")
}

fn find_separator(line: &str) -> Option<(usize, &'static str, Separator)> {
    for (pos, _) in line.match_indices('#') {
        let rest = &line[pos..];
        for &(marker, separator) in SEPARATORS {
            if rest.starts_with(marker) {
                return Some((pos, marker, separator));
            }
        }
    }
    None
}

fn parse_domains(text: &str) -> Result<Vec<String>, ParseError> {
    let mut domains = Vec::new();

    for raw in text.split(',') {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        let name = raw.strip_prefix(EXCLUSION_MARKER).unwrap_or(raw);
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == '_' || c == '*')
        {
            return Err(ParseError::InvalidDomain(raw.to_string()));
        }

        domains.push(raw.to_lowercase());
    }

    // `*##.ad` is the explicit spelling of a generic rule.
    if domains.len() == 1 && domains[0] == "*" {
        domains.clear();
    }

    Ok(domains)
}

fn parse_hide_body(body: &str) -> Result<Rule, ParseError> {
    if body.is_empty() {
        return Err(ParseError::EmptySelector);
    }
    if body.starts_with("+js(") {
        return Err(ParseError::Unsupported("scriptlet"));
    }
    if body.starts_with('^') {
        return Err(ParseError::Unsupported("html"));
    }
    if PROCEDURAL_OPERATORS.iter().any(|op| body.contains(op)) {
        return Err(ParseError::Unsupported("procedural"));
    }

    match body.rfind(STYLE_OPERATOR) {
        Some(pos) => {
            let selector = body[..pos].trim();
            let declaration = body[pos + STYLE_OPERATOR.len()..]
                .strip_suffix(')')
                .ok_or(ParseError::UnbalancedStyle)?
                .trim();
            if selector.is_empty() {
                return Err(ParseError::EmptySelector);
            }
            Ok(Rule {
                injected_css: Some(format!("{} {{{}}}", selector, declaration)),
                ..Rule::default()
            })
        }
        None => Ok(Rule {
            selector: Some(body.to_string()),
            ..Rule::default()
        }),
    }
}

fn parse_injection_body(body: &str) -> Result<String, ParseError> {
    let open = body.find('{').ok_or(ParseError::UnbalancedStyle)?;
    if !body.ends_with('}') {
        return Err(ParseError::UnbalancedStyle);
    }
    if body[..open].trim().is_empty() {
        return Err(ParseError::EmptySelector);
    }
    Ok(body.to_string())
}
