use anyhow::Result;
use clap::Parser;
use gutenfetch_acquire::{BookDownloader, Catalog, GutenbergDownloader};
use gutenfetch_model::BookId;
use tracing_subscriber::fmt::time::{ChronoLocal, ChronoUtc};
use tracing_subscriber::EnvFilter;

/// Log timestamps, e.g. 2026-02-14 19:44:09.123 -08:00
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f %:z";

#[derive(Parser)]
#[command(name = "gutenfetch")]
#[command(about = "Download the plain-text edition of a Project Gutenberg book")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,

    /// Gutenberg book ID (e.g., 1342 for Pride and Prejudice)
    #[arg(allow_negative_numbers = true)]
    id: BookId,

    /// Directory the book is saved to as {id}.txt (created if missing)
    #[arg(short = 'O', long, default_value = ".")]
    output_dir: String,

    /// Print the outcome as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Catalog base URL
    #[arg(long, hide = true, default_value = gutenfetch_acquire::catalog::BASE_URL)]
    catalog_url: String,
}

#[derive(Clone, Debug, PartialEq, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// EnvFilter directives; html5ever and selectors stay at warn since
    /// their debug output drowns everything else.
    fn directives(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug,selectors=warn,html5ever=warn",
            Self::Trace => "trace,selectors=warn,html5ever=warn",
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--log-level`.
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.directives()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if cli.utc {
        builder.with_timer(ChronoUtc::new(TIME_FORMAT.to_string())).init();
    } else {
        builder.with_timer(ChronoLocal::new(TIME_FORMAT.to_string())).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let downloader =
        GutenbergDownloader::with_catalog(Catalog::with_base_url(cli.catalog_url), cli.output_dir);
    tracing::debug!(
        id = %cli.id,
        output_dir = %downloader.save_dir().display(),
        catalog = %downloader.catalog().base_url,
        "Starting download"
    );

    let outcome = downloader.download_book(cli.id).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["gutenfetch", "1342"]).unwrap();
        assert_eq!(cli.id, BookId(1342));
        assert_eq!(cli.output_dir, ".");
        assert_eq!(cli.log_level, LogLevel::Info);
        assert_eq!(cli.catalog_url, "https://www.gutenberg.org");
        assert!(!cli.json);
        assert!(!cli.utc);
    }

    #[test]
    fn test_parse_negative_id() {
        let cli = Cli::try_parse_from(["gutenfetch", "-1", "-O", "books"]).unwrap();
        assert_eq!(cli.id, BookId(-1));
        assert_eq!(cli.output_dir, "books");
    }

    #[test]
    fn test_parse_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["gutenfetch", "pride"]).is_err());
    }

    #[test]
    fn test_debug_levels_quiet_html_parsers() {
        assert_eq!(LogLevel::Warn.directives(), "warn");
        assert!(LogLevel::Debug.directives().contains("html5ever=warn"));
        assert!(LogLevel::Trace.directives().contains("selectors=warn"));
    }
}
