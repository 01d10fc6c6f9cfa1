pub mod structs;
pub mod api;
pub mod io;
pub mod config;
pub mod notify;
pub mod scheduler;

use api::*;
use config::*;
use io::*;
use notify::DesktopNotifier;
use scheduler::*;
use structs::*;

use clap::Parser;
use std::error::Error;

/// Pops up a desktop notification shortly before your daily commute,
/// with live data for the next connection.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Keywords about your current location
    #[arg(long = "your_location", alias = "your-location")]
    your_location: Option<String>,

    /// Keywords about the location you want to reach
    #[arg(long = "address_to_go", alias = "address-to-go")]
    address_to_go: Option<String>,

    /// Time to make the daily commute (hh:mm)
    #[arg(long = "time_to_go", alias = "time-to-go")]
    time_to_go: Option<String>,

    /// Advance notice time in minutes
    #[arg(long = "time_before", alias = "time-before")]
    time_before: Option<i64>,

    /// How long the notification stays visible, in seconds
    #[arg(
        long = "notification_timeout",
        alias = "notification-timeout",
        default_value_t = NOTIFICATION_TIMEOUT_SECS
    )]
    notification_timeout: u32,

    /// Base URL of the transport.rest API
    #[arg(long = "api_base", alias = "api-base", default_value = URL_BASE)]
    api_base: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let origin: String = value_or_prompt(
        cli.your_location,
        "Keywords about your current location",
        DEFAULT_LOCATION,
    )?;
    let destination: String = value_or_prompt(
        cli.address_to_go,
        "Keywords about the location you want to reach",
        DEFAULT_ADDRESS_TO_GO,
    )?;
    let time_to_go: String = value_or_prompt(
        cli.time_to_go,
        "Time to make the daily commute (hh:mm)",
        DEFAULT_TIME_TO_GO,
    )?;
    let time_before: i64 = value_or_prompt(
        cli.time_before,
        "Advance notice time (number)",
        &DEFAULT_TIME_BEFORE.to_string(),
    )?;

    let config = CommuteConfig::new(origin, destination, &time_to_go, time_before)?;
    log::info!(
        "Tracking commute '{}' -> '{}' at {}, {} minute(s) in advance",
        config.origin,
        config.destination,
        config.target.format("%H:%M"),
        config.lead_minutes
    );

    let api = TransportApi::new(&cli.api_base);
    log::debug!("Using API at {}", api.base_url());
    let tracker = JourneyTracker::new(api, &config.origin, &config.destination).await?;

    Scheduler::new(tracker, DesktopNotifier, config)
        .with_notification_timeout(cli.notification_timeout)
        .run()
        .await
}
