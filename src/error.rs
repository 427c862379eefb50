use thiserror::Error;

#[derive(Error, Debug)]
pub enum MosaicError {
    #[error("at least one relative orbit must be requested")]
    NoOrbitsRequested,
    #[error("unrecognized satellite variant: {0}")]
    UnknownSatellite(String),
    #[error("product id does not match the Sentinel-2 granule format: {0}")]
    MalformedGranuleId(String),
    #[error("scene {0} has no acquisition datetime")]
    MissingAcquisitionDate(String),
    #[error("no acquisition dates found for relative orbits {0:?}")]
    NoDatesForOrbits(Vec<u32>),
    #[error("none of the dates fall within the requested months and years")]
    NoDatesInCalendar,
    #[error("bounding box must be west,south,east,north: {0}")]
    MalformedBoundingBox(String),
}
