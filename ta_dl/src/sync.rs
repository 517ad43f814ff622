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
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use postgis::ewkb;
use regex::Regex;

use ta_util::convert::{EsriFeatureSet, EsriField, ToPostgis, ToRustGeo};
use ta_util::srs::SpatialRef;
use ta_util::util::format_duration;
use ta_util::vector::{rebuild_rings, shift_multi_polygon, to_multi_polygon};

use crate::config::Config;
use crate::db::TaDatabase;
use crate::rest::{find_ta_layer, latest_geographies_service, RestClient};

/// One full synchronization run: resolve the newest dataset year, compare it
/// to the year stamped on the output table, and reload the table when stale.
pub fn run_sync(config: &Config) -> Result<()> {
    let start = Instant::now();

    info!("Starting download TA boundaries");

    let output_srs = config.output_srs()?;

    let rest = RestClient::new(&config.source.base_uri)?;

    let service_catalog = rest
        .service_catalog()
        .context("Could not read the service catalog")?;
    let (latest_service, latest_year) = latest_geographies_service(&service_catalog)
        .with_context(|| format!("No TA source service under {}", config.source.base_uri))?;

    debug!("Latest service {} year {}", latest_service, latest_year);

    let layer_catalog = rest.layer_catalog(&latest_service)?;
    let ta_layer = find_ta_layer(&layer_catalog)
        .with_context(|| format!("No TA layer in {}", config.source.base_uri))?;

    let mut db = TaDatabase::connect(config)?;

    let table_exists = db.table_exists()?;

    if table_exists {
        let stored_version = db.stored_version()?;

        if !needs_update(stored_version, latest_year) {
            info!(
                "TA layer does not need to be updated (current version {})",
                stored_version.unwrap_or(latest_year)
            );
            return Ok(());
        }
    }

    let feature_set = rest
        .query_features(&latest_service, ta_layer.id, output_srs.epsg())
        .context("Could not fetch the TA features")?;

    if table_exists {
        db.truncate()?;
    } else {
        db.create_table(output_srs.epsg())?;
    }

    let name_field = find_ta_name_field(&feature_set.fields)?;
    debug!("TA name field is {}", name_field);

    let rows = build_rows(
        &feature_set,
        name_field,
        &output_srs,
        config.layer.shift_geometry,
    )?;

    let count = db.copy_features(&rows)?;

    db.analyze()?;
    db.set_version(latest_year)?;

    if config.layer.create_grid {
        db.create_grid(config.layer.grid_res)?;
    }

    info!(
        "TA layer has been updated to version {} ({} features in {})",
        latest_year,
        count,
        format_duration(start.elapsed())
    );

    Ok(())
}

/// A stored year at or past the service year means nothing to do.
pub fn needs_update(stored_version: Option<i32>, latest_year: i32) -> bool {
    match stored_version {
        Some(stored) => stored < latest_year,
        None => true,
    }
}

/// The authoritative name attribute, e.g. TA2021_V1_00_NAME.  The suffix
/// changes with every dataset year, so it is matched by shape rather than
/// configured.  With several matching fields the last one in schema order
/// wins.
pub fn find_ta_name_field(fields: &[EsriField]) -> Result<&str> {
    let pattern = Regex::new(r"^TA\d{4}_.+_NAME$")?;

    fields
        .iter()
        .map(|field| field.name.as_str())
        .filter(|name| pattern.is_match(name))
        .last()
        .ok_or_else(|| anyhow!("Can not find TA name field"))
}

fn build_rows(
    feature_set: &EsriFeatureSet,
    name_field: &str,
    output_srs: &SpatialRef,
    shift_geometry: bool,
) -> Result<Vec<(String, ewkb::MultiPolygon)>> {
    //longitudes only exist in the geographic reference systems
    let shift = shift_geometry && output_srs.is_geographic();

    let mut rows = Vec::with_capacity(feature_set.features.len());

    for feature in &feature_set.features {
        let name = feature
            .attributes
            .get(name_field)
            .and_then(|value| value.as_str())
            .ok_or_else(|| anyhow!("Feature is missing the {} attribute", name_field))?;

        let geometry = feature
            .geometry
            .as_ref()
            .ok_or_else(|| anyhow!("Feature {} has no geometry", name))?;

        let geometry = geometry
            .to_rust_geo()
            .with_context(|| format!("Bad geometry for {}", name))?;

        let geometry =
            rebuild_rings(geometry).with_context(|| format!("Broken rings for {}", name))?;

        let mut multi_polygon = to_multi_polygon(geometry)?;

        if shift {
            shift_multi_polygon(&mut multi_polygon);
        }

        rows.push((
            name.to_string(),
            multi_polygon.to_postgis(output_srs.epsg()),
        ));
    }

    Ok(rows)
}
