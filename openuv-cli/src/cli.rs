use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, Password, PasswordDisplayMode};
use openuv_core::{Config, Endpoint, OpenUvClient, ProtectionParams, UvParams, resolve::QueryParams};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "openuv", version, about = "UV index from OpenUV.io")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and an optional default location.
    Configure,

    /// Show the current UV index.
    Uv {
        #[command(flatten)]
        coords: CoordArgs,
    },

    /// Show the hourly UV forecast.
    Forecast {
        #[command(flatten)]
        coords: CoordArgs,
    },

    /// Show when sun protection is needed today.
    Protection {
        #[command(flatten)]
        coords: CoordArgs,

        /// UV index where protection starts (service default 3.5).
        #[arg(long)]
        from: Option<f64>,

        /// UV index where protection ends (service default 3.5).
        #[arg(long)]
        to: Option<f64>,
    },
}

/// Location flags shared by every query command. Omitted coordinates fall back
/// to the configured location.
#[derive(Debug, Clone, Args)]
pub struct CoordArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Altitude in meters.
    #[arg(long)]
    pub alt: Option<f64>,

    /// Ozone in Dobson units.
    #[arg(long)]
    pub ozone: Option<f64>,

    /// UTC datetime (RFC 3339), e.g. 2024-06-01T12:00:00Z.
    #[arg(long)]
    pub dt: Option<DateTime<Utc>>,

    /// Print the raw JSON response.
    #[arg(long)]
    pub json: bool,
}

impl CoordArgs {
    fn params(&self) -> UvParams {
        UvParams {
            lat: self.lat,
            lng: self.lng,
            alt: self.alt,
            ozone: self.ozone,
            dt: self.dt,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Uv { coords } => {
                let client = load_client()?;
                let params = coords.params();
                if coords.json {
                    let query = client.api().coordinate_query(Some(&params)).await?;
                    print_raw(&client, Endpoint::Uv, &query).await?;
                } else {
                    let res = client.get_real_time_uv(Some(&params)).await?;
                    print!("{}", output::real_time(&res));
                }
            }
            Command::Forecast { coords } => {
                let client = load_client()?;
                let params = coords.params();
                if coords.json {
                    let query = client.api().coordinate_query(Some(&params)).await?;
                    print_raw(&client, Endpoint::Forecast, &query).await?;
                } else {
                    let res = client.get_forecast(Some(&params)).await?;
                    print!("{}", output::forecast(&res));
                }
            }
            Command::Protection { coords, from, to } => {
                let client = load_client()?;
                let params = ProtectionParams {
                    from,
                    to,
                    coords: coords.params(),
                };
                if coords.json {
                    let query = client.api().protection_query(Some(&params)).await?;
                    print_raw(&client, Endpoint::Protection, &query).await?;
                } else {
                    let res = client.get_daily_protection_time(Some(&params)).await?;
                    print!("{}", output::protection(&res));
                }
            }
        }

        Ok(())
    }
}

/// Print the response body exactly as the service sent it.
async fn print_raw(
    client: &OpenUvClient,
    endpoint: Endpoint,
    query: &QueryParams,
) -> anyhow::Result<()> {
    let value: serde_json::Value = client.request(endpoint, query).await?;
    println!("{}", output::json(&value)?);
    Ok(())
}

fn load_client() -> anyhow::Result<OpenUvClient> {
    let cfg = Config::load()?;
    tracing::debug!(
        base_url = cfg.base_url(),
        has_location = cfg.location.is_some(),
        "loaded configuration"
    );
    cfg.client()
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("OpenUV API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    cfg.set_api_key(api_key.trim().to_string());

    let set_location = inquire::Confirm::new("Store a default location?")
        .with_default(cfg.location.is_some())
        .prompt()
        .context("Failed to read answer")?;

    if set_location {
        let lat = CustomType::<f64>::new("Latitude (-90..90):")
            .with_validator(range_validator(-90.0, 90.0))
            .prompt()?;
        let lng = CustomType::<f64>::new("Longitude (-180..180):")
            .with_validator(range_validator(-180.0, 180.0))
            .prompt()?;
        let alt = CustomType::<f64>::new("Altitude in meters (optional):")
            .with_validator(range_validator(0.0, 10_000.0))
            .prompt_skippable()?;
        cfg.set_location(lat, lng, alt);
    } else {
        cfg.location = None;
    }

    let path = cfg.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

fn range_validator(
    min: f64,
    max: f64,
) -> impl Fn(&f64) -> Result<inquire::validator::Validation, inquire::CustomUserError> + Clone {
    move |v: &f64| {
        if (min..=max).contains(v) {
            Ok(inquire::validator::Validation::Valid)
        } else {
            Ok(inquire::validator::Validation::Invalid(
                format!("must be between {min} and {max}").into(),
            ))
        }
    }
}
