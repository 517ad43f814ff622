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
use geo::{Geometry, LineString, MultiPolygon, Polygon};

/// Rewrites longitudes into the 0-360 space.
///
/// Single wraparound only: inputs are lat/lon coordinates near the antimeridian,
/// not arbitrary angles.  Only meaningful for geographic spatial references;
/// the caller decides whether to apply it.
pub fn shift_geometry(geom: &mut Geometry<f64>) {
    match geom {
        Geometry::Polygon(p) => shift_polygon(p),
        Geometry::MultiPolygon(mp) => shift_multi_polygon(mp),
        Geometry::LineString(ls) => shift_ring(ls),
        _ => {}
    }
}

pub fn shift_multi_polygon(multi_polygon: &mut MultiPolygon<f64>) {
    for polygon in multi_polygon.0.iter_mut() {
        shift_polygon(polygon);
    }
}

pub fn shift_polygon(polygon: &mut Polygon<f64>) {
    polygon.exterior_mut(|ring| shift_ring(ring));
    polygon.interiors_mut(|rings| {
        for ring in rings {
            shift_ring(ring);
        }
    });
}

pub fn shift_ring(ring: &mut LineString<f64>) {
    for point in ring.0.iter_mut() {
        if point.x < 0. {
            point.x += 360.;
        } else if point.x > 360. {
            point.x -= 360.;
        }
    }
}
