use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENSEMBL_URL: &str = "http://193.62.52.232:8081/{path}?{query}";

#[derive(Debug, Clone, Parser)]
#[command(name = "genoproxy")]
#[command(about = "Browser-facing proxy for GA4GH genomics backends and SNPedia")]
pub struct Config {
    /// Host address to bind to
    #[arg(long, env = "GENOPROXY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "GENOPROXY_PORT", default_value = "8080")]
    pub port: u16,

    /// Enable CORS for all origins
    #[arg(long, env = "GENOPROXY_CORS", default_value = "true", action = ArgAction::Set)]
    pub cors: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// File whose first line is a Google Genomics API key; enables the GOOGLE backend
    #[arg(long, env = "GENOPROXY_API_KEY_FILE", default_value = "google_api_key.txt")]
    pub api_key_file: PathBuf,

    /// URL template of the Ensembl backend ({path} and {query} are substituted)
    #[arg(long, env = "GENOPROXY_ENSEMBL_URL", default_value = DEFAULT_ENSEMBL_URL)]
    pub ensembl_url: String,

    /// Timeout for each outbound request, in seconds
    #[arg(long, env = "GENOPROXY_BACKEND_TIMEOUT", default_value = "60")]
    pub backend_timeout: u64,

    /// SNPedia MediaWiki API endpoint
    #[arg(
        long,
        env = "GENOPROXY_SNPEDIA_API_URL",
        default_value = "http://bots.snpedia.com/api.php"
    )]
    pub snpedia_api_url: String,

    /// Base URL of human-readable SNPedia pages
    #[arg(
        long,
        env = "GENOPROXY_SNPEDIA_PAGE_URL",
        default_value = "http://www.snpedia.com/index.php"
    )]
    pub snpedia_page_url: String,

    /// Directory of static assets served for unmatched paths
    #[arg(long, env = "GENOPROXY_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout)
    }
}
