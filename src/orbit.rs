use std::fmt;
use std::str::FromStr;

use crate::error::MosaicError;

/// Number of repeating ground-track paths in the Sentinel-2 orbit cycle.
pub const RELATIVE_ORBITS: i64 = 143;

/// The two units of the Sentinel-2 constellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Satellite {
    S2A,
    S2B,
}

impl Satellite {
    /// Offset between a unit's absolute orbit counter and the shared
    /// relative orbit numbering.
    fn orbit_offset(self) -> i64 {
        match self {
            Satellite::S2A => -140,
            Satellite::S2B => -26,
        }
    }
}

impl FromStr for Satellite {
    type Err = MosaicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2A" => Ok(Satellite::S2A),
            "2B" => Ok(Satellite::S2B),
            other => Err(MosaicError::UnknownSatellite(other.to_string())),
        }
    }
}

impl fmt::Display for Satellite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Satellite::S2A => write!(f, "2A"),
            Satellite::S2B => write!(f, "2B"),
        }
    }
}

/// Translate a Sentinel-2 absolute orbit number to a relative orbit number.
///
/// There are 143 relative orbits, similar to Landsat paths. Some product ids
/// only carry the absolute orbit (orbits flown since launch), so it has to be
/// reduced to the repeating path number. `rem_euclid` keeps the result in
/// [0, 143) even when the offset takes the intermediate value negative.
pub fn relative_orbit(absolute_orbit: u32, satellite: Satellite) -> u32 {
    (absolute_orbit as i64 + satellite.orbit_offset()).rem_euclid(RELATIVE_ORBITS) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_cycle_origins() {
        assert_eq!(relative_orbit(140, Satellite::S2A), 0);
        assert_eq!(relative_orbit(26, Satellite::S2B), 0);
    }

    #[test]
    fn test_negative_intermediate_wraps_forward() {
        // 0 - 140 = -140, which must wrap to 3 rather than truncate toward zero
        assert_eq!(relative_orbit(0, Satellite::S2A), 3);
        assert_eq!(relative_orbit(0, Satellite::S2B), 117);
    }

    #[test]
    fn test_result_always_in_range() {
        for absolute in [0, 1, 26, 140, 143, 1000, 22250, 46000] {
            assert!(relative_orbit(absolute, Satellite::S2A) < RELATIVE_ORBITS as u32);
            assert!(relative_orbit(absolute, Satellite::S2B) < RELATIVE_ORBITS as u32);
        }
    }

    #[test]
    fn test_parse_satellite() {
        assert_eq!("2A".parse::<Satellite>().unwrap(), Satellite::S2A);
        assert_eq!("2B".parse::<Satellite>().unwrap(), Satellite::S2B);
        assert!("2C".parse::<Satellite>().is_err());
        assert!("1A".parse::<Satellite>().is_err());
    }
}
