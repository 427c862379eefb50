use anyhow::Result;
use std::fs;
use std::path::PathBuf;

extern crate sentinel_mosaic;
use sentinel_mosaic::acquisitions::dates_by_orbit;
use sentinel_mosaic::calendar::filter_dates;
use sentinel_mosaic::catalog::{BoundingBox, CatalogClient, SceneSearch};
use sentinel_mosaic::config::Config;
use sentinel_mosaic::evalscript;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let output_dir = PathBuf::from("./outputs");

    let config = Config::read("./inputs/sentinel_hub.toml")?;
    let catalog = CatalogClient::authenticate(&config).await?;

    // Boulder, Colorado and the foothills to its west
    let search = SceneSearch {
        bbox: BoundingBox::new(-105.38, 39.93, -105.13, 40.11),
        from: "2021-03-01".parse()?,
        to: "2021-05-31".parse()?,
        max_cloud_cover: 0.3,
    };
    let dates = dates_by_orbit(&catalog, &search, &[13, 56]).await?;
    let dates = filter_dates(&dates, &[3], &[2021])?;

    let script = evalscript::cloudless_mosaic(&dates);
    fs::create_dir_all(&output_dir)?;
    fs::write(output_dir.join("evalscript.js"), script)?;

    Ok(())
}
