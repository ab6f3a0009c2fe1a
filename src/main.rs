// Entrypoint for the console client.
// - Keeps `main` small: parse flags, set up logging, build the API client
//   and hand it to the menu loop.
// - The loop's outcome decides the exit status.

use anyhow::Result;
use clap::Parser;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use vintage_cars::api::ApiClient;
use vintage_cars::commands::Session;
use vintage_cars::config::{Config, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use vintage_cars::ui::{main_menu, Terminal};

#[derive(Parser, Debug)]
#[clap(name = "vintage-cars", version, about = "Vintage Cars Database console")]
struct Cli {
    /// Base URL of the car store
    #[clap(long, env = "VINTAGE_CARS_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Request timeout in seconds
    #[clap(long, env = "VINTAGE_CARS_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Log filter, e.g. `warn` or `vintage_cars=debug`
    #[clap(long, short, default_value = "warn")]
    log_level: String,

    /// Log file; defaults to vintage-cars.log in the user cache directory
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vintage-cars")
        .join("vintage-cars.log")
}

/// Logs go to a file so they never interleave with the menu. If the file
/// cannot be opened they fall back to stderr.
fn init_logging(cli: &Cli) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&cli.log_level);

    let path = cli.log_file.clone().unwrap_or_else(default_log_file);
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("Cannot open log file {}: {}", path.display(), e),
    }
    builder.init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = Config::new(&cli.url, Duration::from_secs(cli.timeout));
    log::info!("using car store at {}", config.base_url());
    let api = ApiClient::new(&config)?;

    // Blocks until the operator exits or the store stops answering.
    let mut session = Session::new(api, Terminal);
    let end = main_menu(&mut session)?;
    log::info!("session ended: {:?}", end);
    Ok(end.exit_code())
}
