/*
This file is part of the TA Boundary Download Tool
Copyright (C) 2022 Novel-T

The TA Boundary Download Tool is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/
use anyhow::{bail, Result};

//geographic (angular unit) systems the boundary data is published in
const GEOGRAPHIC_EPSG: &[i32] = &[
    4167, //NZGD2000
    4272, //NZGD49
    4326, //WGS84
    4269, //NAD83
    4258, //ETRS89
];

const PROJECTED_EPSG: &[i32] = &[
    2193,  //NZTM2000
    27200, //NZMG
    3857,  //web mercator
    3851,  //NZCS2000
];

/// Output spatial reference for the boundary table.
///
/// Only EPSG codes this dataset is plausibly published in are known; anything
/// else is rejected before any remote or database work starts.  The longitude
/// shift is only valid for the geographic ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpatialRef {
    epsg: i32,
    geographic: bool,
}

impl SpatialRef {
    pub fn from_epsg(epsg: i32) -> Result<Self> {
        let geographic = if GEOGRAPHIC_EPSG.contains(&epsg) {
            true
        } else if PROJECTED_EPSG.contains(&epsg)
            || (32601..=32660).contains(&epsg)
            || (32701..=32760).contains(&epsg)
        {
            //UTM north/south zones are in the projected ranges
            false
        } else {
            bail!("Output SRID {} is not valid", epsg);
        };

        Ok(Self { epsg, geographic })
    }

    pub fn epsg(&self) -> i32 {
        self.epsg
    }

    pub fn is_geographic(&self) -> bool {
        self.geographic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geographic_codes() {
        assert!(SpatialRef::from_epsg(4167).unwrap().is_geographic());
        assert!(SpatialRef::from_epsg(4326).unwrap().is_geographic());
    }

    #[test]
    fn test_projected_codes() {
        assert!(!SpatialRef::from_epsg(2193).unwrap().is_geographic());
        assert!(!SpatialRef::from_epsg(3857).unwrap().is_geographic());
        assert!(!SpatialRef::from_epsg(32760).unwrap().is_geographic());
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!(SpatialRef::from_epsg(0).is_err());
        assert!(SpatialRef::from_epsg(99999).is_err());
    }

    #[test]
    fn test_epsg_round_trip() {
        assert_eq!(SpatialRef::from_epsg(4167).unwrap().epsg(), 4167);
    }
}
