use clap::Parser;
use stampy_http::StatusFilter;

/// Download, dump, and search the aisafety.info question export.
#[derive(Debug, Parser)]
#[command(name = "stampy", version, about)]
pub struct Cli {
    /// Force refresh of the local JSON cache.
    #[arg(long)]
    pub refresh: bool,

    /// Dump each entry to an individual text file under `entries/`.
    #[arg(long)]
    pub dump: bool,

    /// Which question statuses to request from the endpoint.
    #[arg(long, default_value_t = StatusFilter::All)]
    pub status: StatusFilter,

    /// Basic-auth password for the export endpoint.
    #[arg(long, env = "STAMPY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Search for a term in titles, body text, and extracted URLs.
    #[arg(long)]
    pub search: Option<String>,

    /// Make the search case-sensitive.
    #[arg(long, requires = "search")]
    pub case_sensitive: bool,

    /// Match whole words only.
    #[arg(long, requires = "search")]
    pub whole_word: bool,
}
