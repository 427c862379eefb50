//! Destructuring of Sentinel-2 granule identifiers.

use std::str::FromStr;

use regex::Regex;

use crate::error::MosaicError;
use crate::orbit::{relative_orbit, Satellite};

/// Anchored pattern for granule ids such as
/// `S2A_OPER_MSI_L2A_TL_SGS__20191001T103022_A022250_T32TQM_N02.13`.
const GRANULE_ID_PATTERN: &str = r"^S(?<sat>\d[A-Z])_(?<file_class>[A-Z0-9_]{4})_(?<file_category>[A-Z0-9_]{3})_(?<level>[A-Z0-9_]{3})_(?<descriptor>[A-Z0-9_]{2})_(?<site_centre>[A-Z0-9_]{4})_(?<creation_date>\d{8}T\d{6})_A(?<absolute_orbit>\d{6})_T(?<tile>[A-Z0-9]{5})_(?<processing_baseline>[A-Z0-9.]+)$";

/// A parsed granule identifier. Only the satellite variant and the absolute
/// orbit drive the orbit filtering; the remaining fields are carried as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GranuleId {
    pub satellite: Satellite,
    pub file_class: String,
    pub file_category: String,
    pub level: String,
    pub descriptor: String,
    pub site_centre: String,
    pub creation_date: String,
    pub absolute_orbit: u32,
    pub tile: String,
    pub processing_baseline: String,
}

impl GranuleId {
    /// The repeating ground-track path this granule was acquired on.
    pub fn relative_orbit(&self) -> u32 {
        relative_orbit(self.absolute_orbit, self.satellite)
    }
}

impl FromStr for GranuleId {
    type Err = MosaicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = Regex::new(GRANULE_ID_PATTERN).expect("Regex pattern should always compile");

        let captures = re
            .captures(s)
            .ok_or_else(|| MosaicError::MalformedGranuleId(s.to_string()))?;

        let satellite: Satellite = captures["sat"].parse()?;
        let absolute_orbit: u32 = captures["absolute_orbit"]
            .parse()
            .map_err(|_| MosaicError::MalformedGranuleId(s.to_string()))?;

        Ok(Self {
            satellite,
            file_class: captures["file_class"].to_string(),
            file_category: captures["file_category"].to_string(),
            level: captures["level"].to_string(),
            descriptor: captures["descriptor"].to_string(),
            site_centre: captures["site_centre"].to_string(),
            creation_date: captures["creation_date"].to_string(),
            absolute_orbit,
            tile: captures["tile"].to_string(),
            processing_baseline: captures["processing_baseline"].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const L2A_GRANULE_ID: &str = "S2A_OPER_MSI_L2A_TL_SGS__20191001T103022_A022250_T32TQM_N02.13";

    #[test]
    fn test_parse_granule_id() {
        let granule: GranuleId = L2A_GRANULE_ID.parse().unwrap();
        assert_eq!(
            granule,
            GranuleId {
                satellite: Satellite::S2A,
                file_class: "OPER".to_string(),
                file_category: "MSI".to_string(),
                level: "L2A".to_string(),
                descriptor: "TL".to_string(),
                site_centre: "SGS_".to_string(),
                creation_date: "20191001T103022".to_string(),
                absolute_orbit: 22250,
                tile: "32TQM".to_string(),
                processing_baseline: "N02.13".to_string(),
            }
        );
    }

    #[test]
    fn test_relative_orbit_from_granule() {
        let granule: GranuleId = L2A_GRANULE_ID.parse().unwrap();
        // (22250 - 140) % 143
        assert_eq!(granule.relative_orbit(), 88);
    }

    #[test]
    fn test_parse_2b_granule_id() {
        let granule: GranuleId = "S2B_OPER_MSI_L2A_TL_VGS2_20200401T120000_A016001_T33UVP_N02.14"
            .parse()
            .unwrap();
        assert_eq!(granule.satellite, Satellite::S2B);
        assert_eq!(granule.absolute_orbit, 16001);
    }

    #[test]
    fn test_malformed_id_is_rejected() {
        let err = "S2A_MSIL2A_20240504T195901_N0510_R128_T08VPH"
            .parse::<GranuleId>()
            .unwrap_err();
        assert!(matches!(err, MosaicError::MalformedGranuleId(_)));
    }

    #[test]
    fn test_unknown_satellite_is_rejected() {
        let err = "S2C_OPER_MSI_L2A_TL_SGS__20191001T103022_A022250_T32TQM_N02.13"
            .parse::<GranuleId>()
            .unwrap_err();
        assert!(matches!(err, MosaicError::UnknownSatellite(_)));
    }
}
