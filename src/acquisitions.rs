//! Selection of acquisition dates by relative orbit.

use anyhow::Result;
use chrono::NaiveDate;
use stac::Item;

use crate::catalog::{CatalogSearch, SceneSearch};
use crate::error::MosaicError;
use crate::granule::GranuleId;

/// Query the catalog and return the distinct acquisition dates whose scenes
/// lie on one of the wanted relative orbits, in first-seen order.
pub async fn dates_by_orbit(
    catalog: &impl CatalogSearch,
    search: &SceneSearch,
    wanted_orbits: &[u32],
) -> Result<Vec<NaiveDate>> {
    if wanted_orbits.is_empty() {
        return Err(MosaicError::NoOrbitsRequested.into());
    }

    let scenes = catalog.search(search).await?;
    let dates = collect_orbit_dates(&scenes, wanted_orbits)?;

    if dates.is_empty() {
        return Err(MosaicError::NoDatesForOrbits(wanted_orbits.to_vec()).into());
    }
    log::info!(
        "{} distinct dates on relative orbits {:?}",
        dates.len(),
        wanted_orbits
    );
    Ok(dates)
}

fn collect_orbit_dates(scenes: &[Item], wanted_orbits: &[u32]) -> Result<Vec<NaiveDate>> {
    // ordered set: a date with several qualifying scenes contributes once
    let mut dates: Vec<NaiveDate> = vec![];
    for scene in scenes {
        let granule: GranuleId = scene.id.parse()?;
        if !wanted_orbits.contains(&granule.relative_orbit()) {
            continue;
        }

        let date = acquisition_date(scene)?;
        if !dates.contains(&date) {
            dates.push(date);
        }
    }
    Ok(dates)
}

fn acquisition_date(scene: &Item) -> Result<NaiveDate> {
    let acquired = scene
        .properties
        .datetime
        .ok_or_else(|| MosaicError::MissingAcquisitionDate(scene.id.clone()))?;
    Ok(acquired.date_naive())
}
