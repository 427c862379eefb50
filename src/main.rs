use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use clap::Parser;

use sentinel_mosaic::acquisitions::dates_by_orbit;
use sentinel_mosaic::calendar::filter_dates;
use sentinel_mosaic::catalog::{BoundingBox, CatalogClient, SceneSearch};
use sentinel_mosaic::config::Config;
use sentinel_mosaic::evalscript;

#[derive(Parser)]
#[command(name = "sentinel-mosaic")]
#[command(about = "Find cloud-free Sentinel-2 acquisition dates by relative orbit")]
struct Cli {
    /// Sentinel Hub credentials file (TOML)
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Bounding box as west,south,east,north in WGS84 degrees
    #[arg(long)]
    bbox: BoundingBox,

    /// First acquisition date to consider (yyyy-mm-dd)
    #[arg(long)]
    start: NaiveDate,

    /// Last acquisition date to consider (yyyy-mm-dd, inclusive)
    #[arg(long)]
    end: NaiveDate,

    /// Maximum allowed cloud cover as a fraction, 0-1 scale
    #[arg(long, default_value_t = 1.0)]
    max_cloud_cover: f64,

    /// Relative orbit numbers to keep
    #[arg(long, value_delimiter = ',', required = true)]
    orbits: Vec<u32>,

    /// Calendar months (1-12) to keep; all months when omitted
    #[arg(long, value_delimiter = ',')]
    months: Vec<u32>,

    /// Calendar years to keep; all years when omitted
    #[arg(long, value_delimiter = ',')]
    years: Vec<i32>,

    /// Write the rendered cloud-free mosaic evalscript to this path
    #[arg(long)]
    evalscript_out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config::read(&cli.config)?;
    let catalog = CatalogClient::authenticate(&config).await?;

    let search = SceneSearch {
        bbox: cli.bbox,
        from: cli.start,
        to: cli.end,
        max_cloud_cover: cli.max_cloud_cover,
    };
    let dates = dates_by_orbit(&catalog, &search, &cli.orbits).await?;

    let months = if cli.months.is_empty() {
        (1..=12).collect()
    } else {
        cli.months
    };
    let years = if cli.years.is_empty() {
        dates.iter().map(|date| date.year()).collect()
    } else {
        cli.years
    };
    let dates = filter_dates(&dates, &months, &years)?;

    for date in &dates {
        println!("{}", date);
    }

    if let Some(path) = cli.evalscript_out {
        let script = evalscript::cloudless_mosaic(&dates);
        fs::write(&path, script)?;
        log::info!("wrote evalscript to {}", path.display());
    }

    Ok(())
}
