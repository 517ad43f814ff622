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
use geo::{Coordinate, Geometry, LineString, MultiPolygon, Polygon};
use postgis::ewkb;

use crate::convert::{EsriFeatureSet, EsriGeometry, ToPostgis, ToRustGeo};

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> LineString<f64> {
    LineString(vec![
        Coordinate { x: x0, y: y0 },
        Coordinate { x: x0, y: y1 },
        Coordinate { x: x1, y: y1 },
        Coordinate { x: x1, y: y0 },
        Coordinate { x: x0, y: y0 },
    ])
}

#[test]
fn test_import_rings() {
    let json = r#"{
        "rings": [
            [[0, 0], [0, 5], [5, 5], [5, 0], [0, 0]],
            [[1, 1], [1, 2], [2, 2], [2, 1], [1, 1]]
        ]
    }"#;

    let esri: EsriGeometry = serde_json::from_str(json).unwrap();

    //all rings land in a single flat polygon, grouping happens later
    assert_eq!(
        esri.to_rust_geo().unwrap(),
        Geometry::Polygon(Polygon::new(
            square(0., 0., 5., 5.),
            vec![square(1., 1., 2., 2.)]
        ))
    );
}

#[test]
fn test_import_rings_with_z() {
    let json = r#"{ "rings": [[[0, 0, 7.5], [0, 5, 7.5], [5, 5, 7.5], [5, 0, 7.5], [0, 0, 7.5]]] }"#;

    let esri: EsriGeometry = serde_json::from_str(json).unwrap();

    assert_eq!(
        esri.to_rust_geo().unwrap(),
        Geometry::Polygon(Polygon::new(square(0., 0., 5., 5.), vec![]))
    );
}

#[test]
fn test_import_degenerate_rings() {
    let no_rings: EsriGeometry = serde_json::from_str(r#"{ "rings": [] }"#).unwrap();
    assert!(no_rings.to_rust_geo().is_err());

    let short_ring: EsriGeometry =
        serde_json::from_str(r#"{ "rings": [[[0, 0], [1, 1]]] }"#).unwrap();
    assert!(short_ring.to_rust_geo().is_err());
}

#[test]
fn test_import_feature_set() {
    let json = r#"{
        "fields": [
            { "name": "OBJECTID", "type": "esriFieldTypeOID" },
            { "name": "TA2021_V1_00_NAME", "type": "esriFieldTypeString" }
        ],
        "features": [
            {
                "attributes": { "OBJECTID": 1, "TA2021_V1_00_NAME": "Far North District" },
                "geometry": { "rings": [[[0, 0], [0, 5], [5, 5], [5, 0], [0, 0]]] }
            },
            {
                "attributes": { "OBJECTID": 2, "TA2021_V1_00_NAME": "Area Outside" },
                "geometry": null
            }
        ]
    }"#;

    let feature_set: EsriFeatureSet = serde_json::from_str(json).unwrap();

    assert_eq!(feature_set.fields.len(), 2);
    assert_eq!(feature_set.fields[1].name, "TA2021_V1_00_NAME");
    assert_eq!(feature_set.features.len(), 2);

    assert_eq!(
        feature_set.features[0].attributes["TA2021_V1_00_NAME"],
        serde_json::json!("Far North District")
    );
    assert!(feature_set.features[0].geometry.is_some());
    assert!(feature_set.features[1].geometry.is_none());
}

#[test]
fn test_export_multi_polygon() {
    let multi_polygon = MultiPolygon(vec![
        Polygon::new(square(0., 0., 5., 5.), vec![square(1., 1., 2., 2.)]),
        Polygon::new(square(20., 20., 25., 25.), vec![]),
    ]);

    let ewkb_mp: ewkb::MultiPolygon = multi_polygon.to_postgis(4167);

    assert_eq!(ewkb_mp.srid, Some(4167));
    assert_eq!(ewkb_mp.polygons.len(), 2);
    assert_eq!(ewkb_mp.polygons[0].rings.len(), 2);
    assert_eq!(ewkb_mp.polygons[1].rings.len(), 1);

    let outer = &ewkb_mp.polygons[0].rings[0];
    assert_eq!(outer.points.len(), 5);
    assert_eq!(outer.points[1].x, 0.);
    assert_eq!(outer.points[1].y, 5.);
}
