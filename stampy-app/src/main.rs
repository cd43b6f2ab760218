use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use stampy_common::observability::{init_logging, LogConfig};
use stampy_core::{normalize, search};
use stampy_http::QuestionsClient;

mod cache;
mod cli;
mod dump;
mod report;

use cli::Cli;

const BASE_URL: &str = "https://aisafety.info";
const DUMP_DIR: &str = "entries";

/// Entries in these states are working artifacts of the editors, not
/// articles, and never reach search or dump output.
const EXCLUDED_STATUSES: [&str; 3] = ["Marked for deletion", "Subsection", "Duplicate"];

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LogConfig {
        emit_stderr: true,
        ..Default::default()
    })?;

    let cache_path = Path::new(cache::CACHE_FILE);
    let doc = if cli.refresh || !cache_path.exists() {
        let password = cli
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .context("no password: pass --password or set STAMPY_PASSWORD")?;
        let client = QuestionsClient::new(BASE_URL)?;
        let doc = client.fetch_all(cli.status, password).await?;
        cache::store(cache_path, &doc)?;
        tracing::info!(path = %cache_path.display(), "export downloaded and cached");
        doc
    } else {
        tracing::debug!(path = %cache_path.display(), "using cached export");
        cache::load(cache_path)?
    };

    let records = doc
        .as_array()
        .context("export document is not a JSON array of records")?;
    let excluded: HashSet<String> = EXCLUDED_STATUSES.iter().map(|s| s.to_string()).collect();
    let (entries, skips) = normalize(records, &excluded);
    tracing::info!(kept = entries.len(), skipped = skips.len(), "normalized export");

    if let Some(term) = &cli.search {
        let results = search(&entries, term, cli.case_sensitive, cli.whole_word);
        print!("{}", report::render(&results));
    }

    if cli.dump {
        let written = dump::dump_entries(&entries, Path::new(DUMP_DIR))?;
        println!("Dumped {written} entries to the '{DUMP_DIR}' directory.");
    }

    Ok(())
}
