//! Userscript renderer
//!
//! Substitutes `{{name}}` placeholders in the script template with the
//! compiled tables (as JSON) and build metadata.

use cf_core::{Category, Compiled};

/// Template shipped with the crate.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/script-template.js");

pub const BANNER: &str =
    "// THIS FILE IS AUTO-GENERATED. DO NOT EDIT. Rebuild it with `cf-cli compile`.\n";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Template error: {0}")]
    Template(String),
    #[error(transparent)]
    Core(#[from] cf_core::Error),
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Version stamp, usually the build date as `YYYY.MM.DD`
    pub version: String,
    /// Rank bound of the top-domain filter, `None` for the full build
    pub top_domain_count: Option<usize>,
}

impl RenderOptions {
    pub fn is_lite(&self) -> bool {
        self.top_domain_count.is_some()
    }
}

pub fn render(
    template: &str,
    compiled: &Compiled,
    options: &RenderOptions,
) -> Result<String, Error> {
    let values = placeholder_values(compiled, options)?;

    let values_len: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(BANNER.len() + template.len() + values_len);
    out.push_str(BANNER);

    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| Error::Template("unterminated placeholder".to_string()))?;
        let name = after[..end].trim();
        let value = values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
            .ok_or_else(|| Error::Template(format!("unknown placeholder '{}'", name)))?;
        out.push_str(value);
        rest = &after[end + 2..];
    }
    out.push_str(rest);

    Ok(out)
}

fn placeholder_values(
    compiled: &Compiled,
    options: &RenderOptions,
) -> Result<Vec<(&'static str, String)>, Error> {
    let mut values = vec![
        ("version", options.version.clone()),
        ("statistics", compiled.stats().summary()),
        ("deduplicatedStrings", compiled.dedup_json()?),
    ];
    for category in Category::ALL {
        values.push((category.script_name(), compiled.table_json(category)?));
    }

    let (variant, name_suffix, file_suffix, scope, count) = match options.top_domain_count {
        Some(count) => (
            "lite",
            " (Lite)",
            "-lite",
            format!("top {} domains", count),
            count.to_string(),
        ),
        None => ("full", "", "", "pages".to_string(), String::new()),
    };
    values.push(("variant", variant.to_string()));
    values.push(("nameSuffix", name_suffix.to_string()));
    values.push(("fileSuffix", file_suffix.to_string()));
    values.push(("scope", scope));
    values.push(("topDomainCount", count));

    Ok(values)
}
