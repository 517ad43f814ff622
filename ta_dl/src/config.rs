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
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use ta_util::srs::SpatialRef;

/// Tool configuration, a TOML file with [source], [database] and [layer]
/// sections.  Validation happens at load time, before any remote or database
/// contact.
#[derive(Deserialize, Debug)]
pub struct Config {
    pub source: SourceConfig,
    pub database: DatabaseConfig,
    pub layer: LayerConfig,
}

#[derive(Deserialize, Debug)]
pub struct SourceConfig {
    /// MapServer directory the dated geography services live under
    pub base_uri: String,
}

#[derive(Deserialize, Debug)]
pub struct DatabaseConfig {
    pub name: String,

    #[serde(default = "default_schema")]
    pub schema: String,

    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub rolename: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct LayerConfig {
    pub name: String,
    pub geom_column: String,

    #[serde(default = "default_output_srid")]
    pub output_srid: i32,

    #[serde(default)]
    pub create_grid: bool,

    #[serde(default = "default_grid_res")]
    pub grid_res: f64,

    #[serde(default)]
    pub shift_geometry: bool,
}

fn default_schema() -> String {
    "public".to_string()
}

fn default_output_srid() -> i32 {
    //NZGD2000 lat/lon
    4167
}

fn default_grid_res() -> f64 {
    0.05
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not load config {:?}", path))?;

        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).context("Could not parse config")?;

        SpatialRef::from_epsg(config.layer.output_srid)?;

        ensure!(
            !config.layer.create_grid || config.layer.grid_res > 0.,
            "Grid resolution must be greater than 0"
        );

        Ok(config)
    }

    pub fn output_srs(&self) -> Result<SpatialRef> {
        SpatialRef::from_epsg(self.layer.output_srid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
        [source]
        base_uri = "https://maps.example.govt.nz/arcgis/rest/services"

        [database]
        name = "bde"
        schema = "topo"
        host = "db.example"
        port = 5433
        user = "loader"
        password = "secret"
        rolename = "bde_dba"

        [layer]
        name = "territorial_authority"
        geom_column = "shape"
        output_srid = 4326
        create_grid = true
        grid_res = 0.1
        shift_geometry = true
    "#;

    const MINIMAL: &str = r#"
        [source]
        base_uri = "https://maps.example.govt.nz/arcgis/rest/services"

        [database]
        name = "bde"

        [layer]
        name = "territorial_authority"
        geom_column = "shape"
    "#;

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(FULL).unwrap();

        assert_eq!(config.database.schema, "topo");
        assert_eq!(config.database.port, Some(5433));
        assert_eq!(config.database.rolename.as_deref(), Some("bde_dba"));
        assert_eq!(config.layer.output_srid, 4326);
        assert!(config.layer.create_grid);
        assert!(config.layer.shift_geometry);
        assert!(config.output_srs().unwrap().is_geographic());
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config = Config::from_toml(MINIMAL).unwrap();

        assert_eq!(config.database.schema, "public");
        assert_eq!(config.database.host, None);
        assert_eq!(config.layer.output_srid, 4167);
        assert!(!config.layer.create_grid);
        assert_eq!(config.layer.grid_res, 0.05);
        assert!(!config.layer.shift_geometry);
    }

    #[test]
    fn test_missing_section_rejected() {
        assert!(Config::from_toml("[source]\nbase_uri = \"x\"").is_err());
    }

    #[test]
    fn test_bad_srid_rejected() {
        let text = MINIMAL.replace("geom_column = \"shape\"", "geom_column = \"shape\"\noutput_srid = 12345");
        assert!(Config::from_toml(&text).is_err());
    }

    #[test]
    fn test_bad_grid_res_rejected() {
        let text = MINIMAL.replace(
            "geom_column = \"shape\"",
            "geom_column = \"shape\"\ncreate_grid = true\ngrid_res = 0.0",
        );
        assert!(Config::from_toml(&text).is_err());
    }
}
