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
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use ta_util::convert::EsriFeatureSet;

//the service intermittently answers HTTP 500 under load; retry with a delay
const HTTP_MAX_RETRY: u32 = 5;
const HTTP_RETRY_DELAY: Duration = Duration::from_secs(10);
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Top level service directory listing
#[derive(Deserialize, Debug)]
pub struct ServiceCatalog {
    #[serde(default)]
    pub services: Vec<ServiceEntry>,
}

#[derive(Deserialize, Debug)]
pub struct ServiceEntry {
    pub name: String,
}

/// Layer listing of one MapServer service
#[derive(Deserialize, Debug)]
pub struct LayerCatalog {
    #[serde(default)]
    pub layers: Vec<LayerEntry>,
}

#[derive(Deserialize, Debug)]
pub struct LayerEntry {
    pub id: i64,
    pub name: String,
}

/// Picks the newest dated geography service, e.g. "2021_Geographies".
///
/// The service name ends with the dataset year, which doubles as the version
/// stamp on the output table.
pub fn latest_geographies_service(catalog: &ServiceCatalog) -> Result<(String, i32)> {
    let pattern = Regex::new(r"(\d{4})_Geographies$")?;

    let mut latest: Option<(String, i32)> = None;

    for service in &catalog.services {
        if let Some(captures) = pattern.captures(&service.name) {
            let year: i32 = captures[1].parse()?;

            if latest.as_ref().map_or(true, |&(_, latest_year)| year > latest_year) {
                latest = Some((captures[0].to_string(), year));
            }
        }
    }

    latest.ok_or_else(|| anyhow!("No dated geographies service in the catalog"))
}

/// First layer named "Territorial Authorities <year>", in catalog order
pub fn find_ta_layer(catalog: &LayerCatalog) -> Result<&LayerEntry> {
    let pattern = Regex::new(r"^Territorial\sAuthorities\s\d{4}$")?;

    catalog
        .layers
        .iter()
        .find(|layer| pattern.is_match(&layer.name))
        .ok_or_else(|| anyhow!("Could not find the TA layer"))
}

pub struct RestClient {
    base_uri: String,
    client: reqwest::blocking::Client,
}

impl RestClient {
    pub fn new(base_uri: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(HTTP_TIMEOUT)
            .timeout(HTTP_TIMEOUT)
            .build()?;

        Ok(Self {
            base_uri: base_uri.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn service_catalog(&self) -> Result<ServiceCatalog> {
        self.get_json(&format!("{}?f=json", self.base_uri))
    }

    pub fn layer_catalog(&self, service: &str) -> Result<LayerCatalog> {
        self.get_json(&format!("{}/{}/MapServer?f=json", self.base_uri, service))
    }

    pub fn feature_query_url(&self, service: &str, layer_id: i64, out_srid: i32) -> String {
        format!(
            "{}/{}/MapServer/{}/query?f=json&where=1=1&returnGeometry=true&outSR={}",
            self.base_uri, service, layer_id, out_srid
        )
    }

    pub fn query_features(
        &self,
        service: &str,
        layer_id: i64,
        out_srid: i32,
    ) -> Result<EsriFeatureSet> {
        self.get_json(&self.feature_query_url(service, layer_id, out_srid))
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("{}", url);

        let mut attempt = 0;
        loop {
            attempt += 1;

            match self.try_get_json(url) {
                Ok(value) => return Ok(value),
                Err(e) if attempt < HTTP_MAX_RETRY => {
                    warn!(
                        "Request failed ({:#}), retrying in {}s",
                        e,
                        HTTP_RETRY_DELAY.as_secs()
                    );
                    thread::sleep(HTTP_RETRY_DELAY);
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Could not fetch {}", url));
                }
            }
        }
    }

    fn try_get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send()?.error_for_status()?;

        Ok(response.json()?)
    }
}
