use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use cf_compiler::{parse_filter_list, parse_top_domains, read_list_file, ListSource};
use cf_core::{combine_with_stats, compact, filter_top_domains, Compiled, CompileStats, Rule};

use crate::fetch;

pub struct PipelineOptions {
    pub list_file: Option<String>,
    pub local: Vec<String>,
    pub top_domains: Option<String>,
    pub top_count: usize,
    pub concurrency: usize,
}

#[derive(Debug, Clone)]
pub struct PipelineStats {
    pub lists: usize,
    pub lines: usize,
    pub rules: usize,
    pub skipped_lines: usize,
    pub domain_entries: usize,
    pub kept_entries: usize,
    pub compiled: CompileStats,
    pub total_ms: f64,
}

pub fn collect_sources(opts: &PipelineOptions) -> Result<Vec<ListSource>, String> {
    let mut sources = Vec::new();

    if let Some(path) = &opts.list_file {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read list file '{}': {}", path, e))?;
        sources.extend(read_list_file(&text));
    }
    sources.extend(opts.local.iter().map(|p| ListSource::Path(p.clone())));

    if sources.is_empty() {
        return Err("No filter lists specified".to_string());
    }
    Ok(sources)
}

pub async fn run(opts: &PipelineOptions) -> Result<(Compiled, PipelineStats), String> {
    let start = Instant::now();
    let sources = collect_sources(opts)?;

    let lists = fetch::fetch_all(&sources, opts.concurrency).await?;
    info!("Fetched {} filter lists", lists.len());

    let mut all_rules: Vec<Rule> = Vec::new();
    let mut lines = 0usize;
    let mut skipped_lines = 0usize;
    for list in &lists {
        let parsed = parse_filter_list(&list.text);
        if parsed.rules.is_empty() {
            warn!("No rules found in {}", list.source);
        }
        info!(
            "{} - {} lines, {} rules, {} skipped",
            list.source,
            parsed.lines,
            parsed.rules.len(),
            parsed.skipped
        );
        lines += parsed.lines;
        skipped_lines += parsed.skipped;
        all_rules.extend(parsed.rules);
    }
    let rules = all_rules.len();
    info!("Found {} cosmetic rules", rules);

    let (mut table, combine_stats) = combine_with_stats(all_rules);

    if let Some(path) = &opts.top_domains {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read top domains '{}': {}", path, e))?;
        let top = parse_top_domains(&text, opts.top_count);
        info!("Read {} top domains", top.len());
        let (filtered, _) = filter_top_domains(table, &top, opts.top_count);
        table = filtered;
    }
    let kept_entries = table.len();

    let compiled = compact(table);

    let stats = PipelineStats {
        lists: lists.len(),
        lines,
        rules,
        skipped_lines,
        domain_entries: combine_stats.domains,
        kept_entries,
        compiled: compiled.stats(),
        total_ms: start.elapsed().as_secs_f64() * 1000.0,
    };

    Ok((compiled, stats))
}

pub fn write_output(path: &Path, text: &str) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create '{}': {}", parent.display(), e))?;
    }
    fs::write(path, text)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
    Ok(())
}

pub fn print_stats(stats: &PipelineStats) {
    println!("  Lists:    {}", stats.lists);
    println!("  Lines:    {} ({} cosmetic lines skipped)", stats.lines, stats.skipped_lines);
    println!("  Rules:    {}", stats.rules);
    println!("  Domains:  {} -> {} kept", stats.domain_entries, stats.kept_entries);
    println!(
        "  Payloads: {} shared, {} inline",
        stats.compiled.shared, stats.compiled.inline
    );
    println!("  Summary:  {}", stats.compiled.summary());
    println!("  Time:     {:.1}ms", stats.total_ms);
}
