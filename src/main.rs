// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! sifter CLI: run browser-identical searches against a corpus from the
//! terminal, and inspect what a corpus turns into once indexed.
//!
//! # Usage
//!
//! ```bash
//! sifter search public/ "getting started"
//! sifter search public/search-index.json build --limit 3 --json
//! sifter inspect public/ --top 20
//! SIFTER_LOG=sifter::loader=debug sifter inspect public/
//! ```

mod cli;

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::display::{
    format_size, markup_to_terminal, paint, pad_right, row, score_badge, section_bot,
    section_mid, section_top, use_colors, wrap, Role, BOLD, BOX_WIDTH, DIM,
};
use cli::{Cli, Commands, LogFormat};
use sifter::{search_scored, FileSource, IndexLoader, LoadedCorpus, SearchConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format)?;

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SearchConfig::default(),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("failed to start runtime")?;

    match cli.command {
        Commands::Search {
            corpus,
            query,
            limit,
            excerpt_length,
            json,
        } => {
            if let Some(limit) = limit {
                config.limit = limit;
            }
            if let Some(length) = excerpt_length {
                config.excerpt_length = length;
            }
            config.validate()?;
            let loaded = runtime.block_on(load(&corpus, &config))?;
            run_search(&loaded, &config, &query, json)
        }
        Commands::Inspect { corpus, top } => {
            config.validate()?;
            let loaded = runtime.block_on(load(&corpus, &config))?;
            run_inspect(&loaded, top)
        }
    }
}

fn init_tracing(filter: &str, format: LogFormat) -> Result<()> {
    let filter =
        EnvFilter::try_new(filter).with_context(|| format!("invalid log filter {:?}", filter))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Simple => builder.with_target(false).without_time().try_init(),
        LogFormat::Detailed => builder
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| anyhow!("failed to install logger: {}", e))
}

fn load_config(path: &Path) -> Result<SearchConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    SearchConfig::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))
}

/// Load from a corpus file, or from a site root via the configured locations.
async fn load(path: &Path, config: &SearchConfig) -> Result<LoadedCorpus> {
    let loader = if path.is_dir() {
        IndexLoader::new(FileSource::new(path), config.corpus_paths.iter().cloned())
    } else {
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        let name = path
            .file_name()
            .with_context(|| format!("not a corpus file: {}", path.display()))?
            .to_string_lossy()
            .into_owned();
        IndexLoader::new(FileSource::new(root), [name])
    }
    .with_tokenizer(config.tokenizer());

    match loader.load_corpus().await {
        Ok(loaded) => Ok(loaded),
        Err(failures) => {
            let details: Vec<String> = failures.iter().map(|e| format!("  - {}", e)).collect();
            bail!(
                "no usable corpus under {}:\n{}",
                path.display(),
                details.join("\n")
            )
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonHit<'a> {
    score: u32,
    title: &'a str,
    url: &'a str,
    title_html: String,
    excerpt_html: String,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    query: &'a str,
    results: Vec<JsonHit<'a>>,
}

fn run_search(loaded: &LoadedCorpus, config: &SearchConfig, query: &str, json: bool) -> Result<()> {
    let index = &loaded.index;
    let renderer = config.renderer();
    let hits = search_scored(index, query, config.limit);

    if json {
        let results = hits
            .iter()
            .filter_map(|hit| index.doc(hit.doc_id).map(|doc| (hit, doc)))
            .map(|(hit, doc)| {
                let rendered = renderer.render(doc, query);
                JsonHit {
                    score: hit.score,
                    title: &doc.title,
                    url: &doc.url,
                    title_html: rendered.title_html,
                    excerpt_html: rendered.excerpt_html,
                }
            })
            .collect();
        let out = serde_json::to_string_pretty(&JsonOutput { query, results })?;
        writeln!(std::io::stdout(), "{}", out)?;
        return Ok(());
    }

    let colors = use_colors();
    section_top("SEARCH");
    row(&format!(
        " {} {}   {}",
        paint(Role::Muted, &[DIM], "query"),
        paint(Role::Heading, &[BOLD], query),
        paint(
            Role::Muted,
            &[DIM],
            &format!("{} of {} documents", hits.len(), index.doc_count())
        ),
    ));

    if hits.is_empty() {
        section_mid("NO RESULTS");
        let message = renderer.empty_state(&config.empty_message, query);
        row(&format!(" {}", markup_to_terminal(&message, colors)));
        section_bot();
        return Ok(());
    }

    for (rank, hit) in hits.iter().enumerate() {
        let Some(doc) = index.doc(hit.doc_id) else {
            continue;
        };
        let rendered = renderer.render(doc, query);
        section_mid(&format!("#{}", rank + 1));
        row(&format!(
            " {}  {}",
            score_badge(hit.score),
            markup_to_terminal(&rendered.title_html, colors)
        ));
        for line in wrap(&markup_to_terminal(&rendered.excerpt_html, colors), BOX_WIDTH - 8) {
            row(&format!("       {}", line));
        }
        row(&format!("       {}", paint(Role::Link, &[], &doc.url)));
    }
    section_bot();
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

fn brotli_size(data: &[u8]) -> Result<usize> {
    let mut compressed = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(&mut compressed, 4096, 11, 22);
        encoder.write_all(data)?;
    }
    Ok(compressed.len())
}

fn stat_row(label: &str, value: &str) {
    row(&format!(
        " {}{}",
        pad_right(&paint(Role::Muted, &[], label), 24),
        value
    ));
}

fn run_inspect(loaded: &LoadedCorpus, top: usize) -> Result<()> {
    let index = &loaded.index;
    let stats = index.stats();

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&loaded.bytes);
    let fingerprint = hasher.finalize();

    section_top("CORPUS");
    stat_row("location", &loaded.location);
    stat_row("size", &format_size(loaded.bytes.len()));
    stat_row("brotli", &format_size(brotli_size(&loaded.bytes)?));
    stat_row("crc32", &format!("{:08x}", fingerprint));

    section_mid("INDEX");
    stat_row("documents", &stats.documents.to_string());
    stat_row("terms", &stats.terms.to_string());
    stat_row("postings", &stats.postings.to_string());
    let skipped = if stats.skipped > 0 {
        paint(Role::Weak, &[BOLD], &stats.skipped.to_string())
    } else {
        stats.skipped.to_string()
    };
    stat_row("skipped entries", &skipped);

    if top > 0 && stats.terms > 0 {
        section_mid("TOP TERMS");
        let mut terms: Vec<(&str, usize)> = index
            .terms()
            .iter()
            .map(|(term, ids)| (term, ids.len()))
            .collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        for (term, count) in terms.into_iter().take(top) {
            stat_row(term, &format!("{} docs", count));
        }
    }
    section_bot();
    Ok(())
}
