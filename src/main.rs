//! weathercache - print the current weather for a city
//!
//! Looks the city up through the cached OpenWeatherMap client and prints the
//! raw JSON payload. Failures are logged to stderr.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use weathercache::cli::{Cli, StartupConfig};
use weathercache::WeatherClient;

/// Sets up one-line log output on stderr, `warn` and above unless `RUST_LOG`
/// says otherwise
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let startup = match StartupConfig::from_cli(&cli) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    let client = match WeatherClient::new(startup.client) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let country_code = startup.country_code.as_deref();

    let Some(payload) = client.get_current_weather(&startup.city, country_code).await else {
        return ExitCode::FAILURE;
    };

    let output = if startup.compact {
        serde_json::to_string(&payload)
    } else {
        serde_json::to_string_pretty(&payload)
    };

    match output {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to format payload: {}", e);
            ExitCode::FAILURE
        }
    }
}
