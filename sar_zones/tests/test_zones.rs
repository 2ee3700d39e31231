/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

#![allow(unused)]

use geo::Contains;
use geo_types::Point;
use ::geojson::FeatureCollection;
use sar_common::geodesy::LonLat;
use sar_zones::{
    *, geojson::{export_zones, merge_feature_collections, zones_from_features, validate_feature_collection, collection_property, risk_level, RiskLevel},
    interpolate::rasterize_zones
};

/// deterministic bivariate normal cloud of `n` points (sunflower spiral with Gaussian radii)
fn gaussian_cloud (n: usize, lon0: f64, lat0: f64, slon: f64, slat: f64)->Vec<LonLat> {
    (0..n).map( |i| {
        let u = (i as f64 + 0.5) / n as f64;
        let r = (-2.0 * (1.0 - u).ln()).sqrt();
        let a = i as f64 * 2.399963;
        ( lon0 + slon * r * a.cos(), lat0 + slat * r * a.sin() )
    }).collect()
}

fn assert_ranked (zones: &[Zone]) {
    for z in zones {
        assert!( PROBABILITY_LEVELS.contains( &z.probability), "unexpected level {}", z.probability);
        assert!( z.area_km2.is_finite() && z.area_km2 >= 0.0);
        assert_eq!( z.ring().first(), z.ring().last());
    }
    for w in zones.windows(2) {
        assert!( w[0].probability >= w[1].probability);
    }
}

#[test]
fn test_kde_grid_normalized() {
    let pts = gaussian_cloud( 300, 89.7, 25.1, 0.1, 0.05);
    let kde = GaussianKde::new( &pts).unwrap();
    let bounds = kde.grid_bounds( 0.2, 3.0, 0.01).unwrap();
    let grid = kde.evaluate_grid( bounds, 100).unwrap();

    println!("grid bounds: {:?}, sum: {}", grid.bounds(), grid.sum());
    assert!( (grid.sum() - 1.0).abs() < 1e-9);
    assert!( grid.is_normalized( 1e-9));
    assert!( grid.values().iter().all( |v| *v >= 0.0));

    // density is higher at the center than at the rim
    assert!( kde.evaluate( 89.7, 25.1) > kde.evaluate( 89.9, 25.1));
}

#[test]
fn test_kde_degenerate() {
    assert!( matches!( GaussianKde::new( &[(1.0,1.0)]), Err(ZoneError::DegenerateField(_))));
    assert!( GaussianKde::new( &[(1.0,1.0), (1.0,1.0), (1.0,1.0)]).is_err());
    assert!( GaussianKde::new( &[(0.0,0.0), (1.0,1.0), (2.0,2.0)]).is_err()); // collinear
}

#[test]
fn test_ensemble_zones() {
    let pts = gaussian_cloud( 500, 89.7, 25.1, 0.1, 0.05);
    let (field, zones) = zones_from_ensemble( &pts, &ZoneConfig::default());

    println!("{} zones:", zones.len());
    for z in &zones { println!("  {} {:?} area={:.1} mass={:?}", z.probability, z.method, z.area_km2, z.mass) }

    assert!( field.grid.is_some());
    assert!( !zones.is_empty());
    assert_ranked( &zones);
    assert_eq!( zones[0].probability, 0.95);
    assert_eq!( zones[0].method, ExtractionMethod::Contour);

    // lower levels enclose more
    let core = &zones[0];
    let outer = zones.iter().find( |z| z.probability == 0.25).unwrap();
    assert!( outer.area_km2 > core.area_km2);
    assert!( outer.mass.unwrap() > core.mass.unwrap());

    let (clon,clat) = core.centroid().unwrap();
    assert!( (clon - 89.7).abs() < 0.05 && (clat - 25.1).abs() < 0.05);
}

#[test]
fn test_identical_points() {
    let pts = vec![ (87.6, 25.4); 50 ];
    let (field, zones) = zones_from_ensemble( &pts, &ZoneConfig::default());
    assert!( field.grid.is_none());
    assert_eq!( zones.len(), 4);
    assert_ranked( &zones);
    assert!( zones.iter().all( |z| z.method == ExtractionMethod::Rectangle && z.area_km2 > 0.0));
}

#[test]
fn test_single_point() {
    let (_, zones) = zones_from_ensemble( &[(10.0, -5.0)], &ZoneConfig::default());
    assert!( !zones.is_empty());
    assert_ranked( &zones);
}

#[test]
fn test_two_points_ellipse() {
    let (_, zones) = zones_from_ensemble( &[(10.0, 10.0), (10.2, 10.1)], &ZoneConfig::default());
    assert_eq!( zones.len(), 4);
    assert!( zones.iter().all( |z| z.method == ExtractionMethod::Ellipse));
    assert_ranked( &zones);
    // radius grows as the level drops
    assert!( zones[3].area_km2 > zones[0].area_km2);
}

#[test]
fn test_empty_ensemble() {
    let (field, zones) = zones_from_ensemble( &[], &ZoneConfig::default());
    assert!( field.is_empty());
    assert!( zones.is_empty());
}

#[test]
fn test_rectangle_clamped() {
    let (_, zones) = zones_from_ensemble( &[(179.95, 89.95)], &ZoneConfig::default());
    assert!( !zones.is_empty());
    for z in &zones {
        assert!( z.ring().iter().all( |(lon,lat)| *lon <= 180.0 && *lat <= 90.0));
    }
}

#[test]
fn test_geojson_export() {
    let pts = gaussian_cloud( 300, -40.0, 10.0, 0.3, 0.3);
    let (_, zones) = zones_from_ensemble( &pts, &ZoneConfig::default());
    let fc = export_zones( &zones, Some( serde_json::json!({"n_simulations": 300})));

    assert_eq!( fc.features.len(), zones.len());
    assert_eq!( collection_property( &fc, "total_zones").and_then( |v| v.as_u64()), Some(zones.len() as u64));
    assert_eq!( collection_property( &fc, "coordinate_system").and_then( |v| v.as_str()), Some("WGS84"));
    assert_eq!( collection_property( &fc, "simulation_metadata").and_then( |v| v.get("n_simulations")).and_then( |v| v.as_u64()), Some(300));

    let crs = fc.foreign_members.as_ref().unwrap().get("crs").unwrap();
    assert_eq!( crs["properties"]["name"], "EPSG:4326");

    for (i,f) in fc.features.iter().enumerate() {
        assert_eq!( f.property("zone_rank").and_then( |v| v.as_u64()), Some(i as u64 + 1));
        let p = f.property("probability").and_then( |v| v.as_f64()).unwrap();
        assert_eq!( f.property("risk_level").and_then( |v| v.as_str()), Some( risk_level(p).as_ref()));
        assert!( f.property("perimeter_km").and_then( |v| v.as_f64()).unwrap() > 0.0);
        assert_eq!( f.property("updated_with_evidence").and_then( |v| v.as_bool()), Some(false));
    }
    assert!( validate_feature_collection( &fc).is_empty());

    // wire round trip through JSON text
    let text = serde_json::to_string( &fc).unwrap();
    let parsed = sar_zones::geojson::parse_feature_collection( &text).unwrap();
    let reparsed = zones_from_features( &parsed.features).unwrap();
    assert_eq!( reparsed.len(), zones.len());
    assert!( reparsed.iter().all( |z| z.method == ExtractionMethod::Imported));
}

#[test]
fn test_geojson_empty() {
    let fc = export_zones( &[], None);
    assert!( fc.features.is_empty());
    assert_eq!( collection_property( &fc, "status").and_then( |v| v.as_str()), Some("no_zones_generated"));
    assert_eq!( collection_property( &fc, "total_zones").and_then( |v| v.as_u64()), Some(0));
}

#[test]
fn test_invalid_zone_dropped() {
    let good = Zone::new( vec![ (0.0,0.0), (1.0,0.0), (1.0,1.0) ], 0.75, ExtractionMethod::Contour).unwrap();
    let mut bad = good.clone();
    bad.probability = 1.7;

    let fc = export_zones( &[good, bad], None);
    assert_eq!( fc.features.len(), 1);
    assert_eq!( fc.features[0].property("probability").and_then( |v| v.as_f64()), Some(0.75));
}

#[test]
fn test_risk_levels() {
    assert_eq!( risk_level( 0.95), RiskLevel::Critical);
    assert_eq!( risk_level( 0.75), RiskLevel::High);
    assert_eq!( risk_level( 0.5), RiskLevel::Medium);
    assert_eq!( risk_level( 0.25), RiskLevel::Low);
    assert_eq!( risk_level( 0.1), RiskLevel::Minimal);
    assert_eq!( RiskLevel::Critical.as_ref(), "critical");
}

#[test]
fn test_feature_parsing() {
    let text = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","geometry":{"type":"Polygon","coordinates":[[[87.0,25.0],[88.0,25.0],[88.0,26.0],[87.0,25.0]]]},"properties":{"probability":0.95}},
        {"type":"Feature","geometry":{"type":"Polygon","coordinates":[[[86.0,24.0],[89.0,24.0],[89.0,27.0],[86.0,27.0]]]},"properties":{}},
        {"type":"Feature","geometry":{"type":"Point","coordinates":[87.5,25.5]},"properties":{"probability":0.3}}
    ]}"#;
    let fc = sar_zones::geojson::parse_feature_collection( text).unwrap();
    let zones = zones_from_features( &fc.features).unwrap();
    assert_eq!( zones.len(), 2);
    assert_eq!( zones[0].probability, 0.95);
    assert_eq!( zones[1].probability, 0.5); // default
    assert_eq!( zones[1].ring().len(), 5);  // closed on parse

    let problems = validate_feature_collection( &fc);
    println!("{:?}", problems);
    assert_eq!( problems.len(), 2); // missing probability, point geometry

    let bad = r#"{"type":"Feature","geometry":{"type":"Polygon","coordinates":[[[87.0,95.0],[88.0,25.0],[88.0,26.0],[87.0,95.0]]]},"properties":{"probability":0.5}}"#;
    let f: ::geojson::Feature = bad.parse().unwrap();
    assert!( matches!( zones_from_features( &[f]), Err(ZoneError::InvalidGeometry(_))));
}

#[test]
fn test_rasterize_zones() {
    let bounds = GridBounds::new( 0.0, 0.0, 4.0, 4.0);

    let uniform = rasterize_zones( &[], bounds, 20, 0.1).unwrap();
    assert!( (uniform.sum() - 1.0).abs() < 1e-9);

    // concentric squares share a centroid - rasterized by containment
    let inner = Zone::new( vec![ (1.5,1.5), (2.5,1.5), (2.5,2.5), (1.5,2.5) ], 0.95, ExtractionMethod::Imported).unwrap();
    let outer = Zone::new( vec![ (1.0,1.0), (3.0,1.0), (3.0,3.0), (1.0,3.0) ], 0.5, ExtractionMethod::Imported).unwrap();
    let grid = rasterize_zones( &[inner, outer], bounds, 41, 0.1).unwrap();
    assert!( (grid.sum() - 1.0).abs() < 1e-9);
    assert!( grid.is_normalized( 1e-9));
    let c = grid.value_at( 2.0, 2.0).unwrap();
    let m = grid.value_at( 1.2, 2.0).unwrap();
    let o = grid.value_at( 0.2, 0.2).unwrap();
    assert!( c > m && m > o);
    assert!( (c / o - 9.5).abs() < 1e-9);
}

#[test]
fn test_merge_collections() {
    let (_, a) = zones_from_ensemble( &gaussian_cloud( 200, -40.0, 10.0, 0.3, 0.3), &ZoneConfig::default());
    let (_, b) = zones_from_ensemble( &gaussian_cloud( 200, -30.0, 12.0, 0.2, 0.2), &ZoneConfig::default());
    let merged = merge_feature_collections( &[ export_zones( &a, None), export_zones( &b, None) ]);

    assert_eq!( merged.features.len(), a.len() + b.len());
    assert_eq!( collection_property( &merged, "total_zones").and_then( |v| v.as_f64()), Some((a.len() + b.len()) as f64));
    assert_eq!( collection_property( &merged, "coordinate_system").and_then( |v| v.as_str()), Some("WGS84"));

    // maxima are not added up, totals are
    let prop = |fc: &FeatureCollection, key: &str| collection_property( fc, key).and_then( |v| v.as_f64()).unwrap();
    let (fa, fb) = (export_zones( &a, None), export_zones( &b, None));
    assert_eq!( prop( &merged, "max_probability"), prop( &fa, "max_probability").max( prop( &fb, "max_probability")));
    assert!( prop( &merged, "max_probability") <= 1.0);
    assert!( (prop( &merged, "total_area_km2") - (prop( &fa, "total_area_km2") + prop( &fb, "total_area_km2"))).abs() < 1e-6);

    let crs = merged.foreign_members.as_ref().unwrap().get("crs").unwrap();
    assert_eq!( crs["properties"]["name"], "EPSG:4326");
}

#[test]
fn test_extractor_strategies() {
    let extractor = ZoneExtractor::for_ensemble( &ZoneConfig::default());
    assert_eq!( extractor.strategy_names(), vec!["contour", "convex_hull", "ellipse", "rectangle"]);
}

#[test]
fn test_local_minimum_becomes_hole() {
    // plateau with a dip in the middle, like a searched spot inside a prior zone
    let bounds = GridBounds::new( 0.0, 0.0, 2.0, 2.0);
    let grid = ProbabilityGrid::from_fn( bounds, 81, |lon,lat| {
        let d2 = (lon - 1.0).powi(2) + (lat - 1.0).powi(2);
        let plateau = if (lon - 1.0).abs() < 0.8 && (lat - 1.0).abs() < 0.8 { 1.0 } else { 0.0 };
        plateau * (1.0 - 0.9 * (-d2 / 0.02).exp())
    }).unwrap().normalized().unwrap();

    let zones = ZoneExtractor::for_grid( &ZoneConfig::default()).extract( &DensityField::from_grid( grid));
    assert_eq!( zones.len(), 4);
    assert_ranked( &zones);
    for z in &zones {
        println!("  {} area={:.0} holes={} peak={:?}", z.probability, z.area_km2, z.holes().len(), z.peak);
        assert_eq!( z.method, ExtractionMethod::Contour);
        assert_eq!( z.holes().len(), 1);
        assert!( !z.to_polygon().contains( &Point::new( 1.0, 1.0)));
        assert!( z.peak.unwrap() >= z.probability);
    }

    // holes survive the GeoJSON round trip
    let fc = export_zones( &zones, None);
    match &fc.features[0].geometry.as_ref().unwrap().value {
        ::geojson::Value::Polygon(rings) => assert_eq!( rings.len(), 2),
        other => panic!("unexpected geometry {:?}", other)
    }
    let parsed = zones_from_features( &fc.features).unwrap();
    assert!( parsed.iter().all( |z| z.holes().len() == 1));
    assert!( (parsed[0].area_km2 - zones[0].area_km2).abs() < 1e-6 * zones[0].area_km2);
}
