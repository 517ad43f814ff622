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
use geo::{LineString, MultiPolygon};
use itertools::Itertools;
use postgis::ewkb;

use crate::convert::traits::ToPostgis;

impl ToPostgis for MultiPolygon<f64> {
    type Output = ewkb::MultiPolygon;

    /// Builds the ewkb structure used as the geometry insert parameter.
    fn to_postgis(&self, srid: i32) -> ewkb::MultiPolygon {
        let polygons = self
            .0
            .iter()
            .map(|polygon| {
                let rings = std::iter::once(polygon.exterior())
                    .chain(polygon.interiors().iter())
                    .map(|ring| ring_to_postgis(ring, srid))
                    .collect_vec();

                ewkb::Polygon {
                    rings,
                    srid: Some(srid),
                }
            })
            .collect_vec();

        ewkb::MultiPolygon {
            polygons,
            srid: Some(srid),
        }
    }
}

fn ring_to_postgis(ring: &LineString<f64>, srid: i32) -> ewkb::LineString {
    ewkb::LineString {
        points: ring
            .0
            .iter()
            .map(|c| ewkb::Point {
                x: c.x,
                y: c.y,
                srid: Some(srid),
            })
            .collect_vec(),
        srid: Some(srid),
    }
}
