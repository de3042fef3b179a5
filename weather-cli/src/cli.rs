use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_core::{Config, RefreshTarget, WeatherService};

use crate::render::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key in the config file.
    Configure,

    /// Show weather for a location, or for the network origin when none is given.
    Show {
        /// Location name, e.g. "London".
        location: Option<String>,

        /// Network origin to geolocate when no location is given.
        #[arg(long)]
        ip: Option<String>,
    },

    /// Interactive session sharing one cache across lookups.
    Session {
        /// Network origin used for empty lookups.
        #[arg(long)]
        ip: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, ip } => {
                let service = WeatherService::from_config(&Config::load()?)?;
                let lookup = service.lookup(ip.as_deref(), location.as_deref()).await;
                println!("{}", render(&lookup));
                Ok(())
            }
            Command::Session { ip } => {
                let service = WeatherService::from_config(&Config::load()?)?;
                session(&service, ip.as_deref()).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(key);
    if config.api_key.is_none() {
        anyhow::bail!("API key must not be empty");
    }
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum SessionInput {
    Lookup(Option<String>),
    Refresh(Option<String>),
    ClearAll,
    Quit,
}

fn parse_session_input(line: &str) -> SessionInput {
    let line = line.trim();
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let arg = Some(rest.trim().to_string()).filter(|s| !s.is_empty());

    match command {
        ":quit" | ":q" => SessionInput::Quit,
        ":clear" => SessionInput::ClearAll,
        ":refresh" => SessionInput::Refresh(arg),
        _ if line.is_empty() => SessionInput::Lookup(None),
        _ => SessionInput::Lookup(Some(line.to_string())),
    }
}

async fn session(service: &WeatherService, ip: Option<&str>) -> anyhow::Result<()> {
    println!("Enter a location (blank for your own), :refresh [location], :clear or :quit.");

    loop {
        let line = match Text::new("location>").prompt() {
            Ok(line) => line,
            Err(
                inquire::InquireError::OperationCanceled
                | inquire::InquireError::OperationInterrupted,
            ) => break,
            Err(e) => return Err(e).context("Failed to read input"),
        };

        match parse_session_input(&line) {
            SessionInput::Quit => break,
            SessionInput::ClearAll => {
                let removed = service.refresh(RefreshTarget::All);
                tracing::info!(removed, "session cleared all cached weather");
                println!("All weather cache cleared successfully! ({removed} entries)");
            }
            SessionInput::Refresh(location) => {
                let target = match location {
                    Some(location) => RefreshTarget::Location(location),
                    None => RefreshTarget::Origin(ip.unwrap_or_default().to_string()),
                };
                let removed = service.refresh(target);
                tracing::info!(removed, "session refreshed cached weather");
                println!("Weather data refreshed!");
            }
            SessionInput::Lookup(location) => {
                tracing::debug!(?location, "session lookup");
                let lookup = service.lookup(ip, location.as_deref()).await;
                println!("{}", render(&lookup));
            }
        }
    }

    Ok(())
}
