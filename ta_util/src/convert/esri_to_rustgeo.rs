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
use std::collections::HashMap;

use anyhow::{bail, Result};
use geo::{Coordinate, Geometry, LineString, Polygon};
use serde::Deserialize;
use serde_json::Value;

use crate::convert::traits::ToRustGeo;

/// Feature set returned by a MapServer layer query with f=json.
///
/// `fields` describes the attribute schema even when `features` is empty.
#[derive(Deserialize, Debug)]
pub struct EsriFeatureSet {
    #[serde(default)]
    pub fields: Vec<EsriField>,
    #[serde(default)]
    pub features: Vec<EsriFeature>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EsriField {
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct EsriFeature {
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
    pub geometry: Option<EsriGeometry>,
}

/// Polygonal geometry as the service serializes it: a bare ring list.
///
/// The ring grouping is not trustworthy (see `rebuild_rings`), so conversion
/// keeps all rings in one flat polygon and leaves the regrouping to the caller.
#[derive(Deserialize, Debug)]
pub struct EsriGeometry {
    #[serde(default)]
    pub rings: Vec<Vec<Vec<f64>>>,
}

impl ToRustGeo for EsriGeometry {
    fn to_rust_geo(&self) -> Result<Geometry<f64>> {
        if self.rings.is_empty() {
            bail!("Geometry has no rings");
        }

        let mut rings = self
            .rings
            .iter()
            .map(|ring| ring_to_line_string(ring))
            .collect::<Result<Vec<_>>>()?;

        let exterior = rings.remove(0);

        Ok(Geometry::Polygon(Polygon::new(exterior, rings)))
    }
}

fn ring_to_line_string(ring: &[Vec<f64>]) -> Result<LineString<f64>> {
    if ring.len() < 3 {
        bail!("Ring has only {} points", ring.len());
    }

    let coords = ring
        .iter()
        .map(|point| match point.len() {
            //points come as [x, y] or [x, y, z]; z is unused downstream
            2 | 3 => Ok(Coordinate {
                x: point[0],
                y: point[1],
            }),
            n => bail!("Point has {} ordinates", n),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LineString(coords))
}
