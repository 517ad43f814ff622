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
use geo::{Geometry, LineString, MultiPolygon, Polygon};
use itertools::Itertools;
use log::debug;

use crate::vector::{ring_winding, Winding};

/// Regroups a flat ring list into polygons.
///
/// The map service can return a multi part TA boundary as a single polygon
/// whose ring list is the ungrouped concatenation of every outer boundary and
/// hole.  Winding carries the lost structure: a clockwise ring opens a new
/// polygon, each counter-clockwise ring is a hole of the last opened polygon.
///
/// A geometry that is already a multi polygon is returned as is.
pub fn rebuild_rings(geom: Geometry<f64>) -> Result<Geometry<f64>> {
    let polygon = match geom {
        Geometry::MultiPolygon(_) => return Ok(geom),
        Geometry::Polygon(p) => p,
        _ => bail!("TA geometry must be a polygon or multi polygon"),
    };

    let (exterior, interiors) = polygon.into_inner();

    let mut assembled: Vec<(LineString<f64>, Vec<LineString<f64>>)> = Vec::new();

    for ring in std::iter::once(exterior).chain(interiors.into_iter()) {
        match ring_winding(&ring) {
            Winding::Clockwise => {
                assembled.push((ring, Vec::new()));
            }
            Winding::CounterClockwise => match assembled.last_mut() {
                Some((_outer, holes)) => holes.push(ring),
                None => bail!("Hole ring appears before any outer ring"),
            },
        }
    }

    let mut polygons = assembled
        .into_iter()
        .map(|(outer, holes)| Polygon::new(outer, holes))
        .collect_vec();

    if polygons.len() > 1 {
        debug!("Regrouped flat rings into {} polygons", polygons.len());
    }

    if polygons.len() == 1 {
        Ok(Geometry::Polygon(polygons.remove(0)))
    } else {
        Ok(Geometry::MultiPolygon(MultiPolygon(polygons)))
    }
}

/// The output table stores multi polygons only; single polygons get wrapped.
pub fn to_multi_polygon(geom: Geometry<f64>) -> Result<MultiPolygon<f64>> {
    match geom {
        Geometry::Polygon(p) => Ok(MultiPolygon(vec![p])),
        Geometry::MultiPolygon(mp) => Ok(mp),
        _ => bail!("TA geometry must be a polygon or multi polygon"),
    }
}
