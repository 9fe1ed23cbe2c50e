use clap::Parser;
use localeats::core::config::{self, CliOverrides, SourceKind};
use localeats::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "localeats", about = "Browse local restaurants in the terminal")]
struct Args {
    /// Where restaurant data comes from
    #[arg(short, long, value_enum)]
    source: Option<SourceKind>,

    /// Base URL of the JSON endpoints (http source)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Ignore and clear the cached restaurant list
    #[arg(long)]
    no_cache: bool,

    /// Directory for favorites and the restaurant cache
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to localeats.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("localeats.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            log::warn!("Falling back to default config: {}", e);
            config::LocalEatsConfig::default()
        }
    };
    let cli = CliOverrides {
        source: args.source,
        base_url: args.base_url,
        data_dir: args.data_dir,
        no_cache: args.no_cache,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("LocalEats starting up with source: {:?}", resolved.source);

    tui::run(resolved)
}
