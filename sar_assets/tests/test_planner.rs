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

use geojson::{Feature, Value};
use sar_zones::{Zone, ExtractionMethod, geojson::export_zones};
use sar_assets::{
    AssetPlanner, AssetError, AssetType, OperationalStatus, Position, SearchAsset, PlannerConfig
};

fn square (lat: f64, lon: f64, probability: f64)->Zone {
    let d = 0.05;
    Zone::new( vec![ (lon-d, lat-d), (lon+d, lat-d), (lon+d, lat+d), (lon-d, lat+d) ], probability, ExtractionMethod::Imported).unwrap()
}

/// two nearby targets, one far away and one low probability zone that is no target
fn zone_features ()->Vec<Feature> {
    let zones = vec![
        square( 25.1, 89.7, 0.9),
        square( 25.6, 90.2, 0.6),
        square( 20.0, 80.0, 0.8),
        square( 25.0, 89.6, 0.2),
    ];
    export_zones( &zones, None).features
}

fn helicopter (id: &str, lat: f64, lon: f64, fuel: f64)->SearchAsset {
    SearchAsset {
        id: id.into(),
        name: format!("helicopter {id}"),
        asset_type: AssetType { name: "helicopter".into(), speed_knots: 120.0, range_nm: 300.0, search_width_nm: 2.0, endurance_hours: 4.0 },
        current_location: Position::new( lat, lon),
        fuel_remaining: fuel,
        operational_status: OperationalStatus::Available,
    }
}

fn vessel (id: &str, lat: f64, lon: f64)->SearchAsset {
    SearchAsset {
        id: id.into(),
        name: format!("vessel {id}"),
        asset_type: AssetType { name: "vessel".into(), speed_knots: 20.0, range_nm: 100.0, search_width_nm: 1.0, endurance_hours: 10.0 },
        current_location: Position::new( lat, lon),
        fuel_remaining: 50.0,
        operational_status: OperationalStatus::Available,
    }
}

#[test]
fn test_targets() {
    let planner = AssetPlanner::default();
    let targets = planner.target_positions( &zone_features());
    assert_eq!( targets.len(), 3);
    assert!( (targets[0].lat - 25.1).abs() < 1e-9 && (targets[0].lon - 89.7).abs() < 1e-9);
}

#[test]
fn test_max_search_time() {
    let planner = AssetPlanner::default();
    assert!( (planner.max_search_time( &helicopter( "h1", 25.0, 89.5, 100.0)) - 3.2).abs() < 1e-9);
    assert!( (planner.max_search_time( &helicopter( "h1", 25.0, 89.5, 50.0)) - 2.0).abs() < 1e-9);
}

#[test]
fn test_plan() {
    let planner = AssetPlanner::default();
    let mut parked = helicopter( "h2", 25.0, 89.5, 100.0);
    parked.operational_status = OperationalStatus::Maintenance;
    let assets = vec![ helicopter( "h1", 25.0, 89.5, 100.0), parked, vessel( "v1", 20.1, 80.1) ];

    let plan = planner.plan( &assets, &zone_features()).unwrap();
    assert_eq!( plan.routes.len(), 2);

    // the helicopter takes the two nearby targets, nearest first
    let r = &plan.routes[0];
    assert_eq!( r.asset_id, "h1");
    assert_eq!( r.waypoints.len(), 3);
    assert!( (r.waypoints[1].lat - 25.1).abs() < 1e-9);
    assert!( (r.waypoints[2].lat - 25.6).abs() < 1e-9);
    assert!( (r.estimated_time_hours - 0.4407).abs() < 1e-3);
    assert!( (r.coverage_area_km2 - 362.81).abs() < 0.1);
    assert!( (r.probability_covered - 2.0/3.0).abs() < 1e-9);
    assert_eq!( r.search_pattern, "expanding_square");

    // the vessel gets the remaining far target
    let r = &plan.routes[1];
    assert_eq!( r.asset_id, "v1");
    assert_eq!( r.waypoints.len(), 2);
    assert!( (r.waypoints[1].lon - 80.0).abs() < 1e-9);

    assert_eq!( plan.total_coverage, 1.0);
    assert!( plan.uncovered.is_empty());
    assert_eq!( plan.summary.assets_deployed, 2);
    assert_eq!( plan.summary.coverage_percentage, 100.0);
    assert!( plan.summary.message.is_none());
}

#[test]
fn test_fuel_limited_plan() {
    let planner = AssetPlanner::default();
    // 1% fuel gives 2.4 minutes, not enough for the 12nm leg to the nearest target
    let plan = planner.plan( &[ helicopter( "h1", 25.0, 89.5, 1.0)], &zone_features()).unwrap();
    assert!( plan.routes.is_empty());
    assert_eq!( plan.total_coverage, 0.0);
    assert_eq!( plan.uncovered.len(), 3);

    let f = &plan.uncovered[0];
    assert_eq!( f.property("reason").unwrap(), "insufficient_asset_coverage");
    match &f.geometry.as_ref().unwrap().value {
        Value::Point(p) => assert!( (p[0] - 89.7).abs() < 1e-9 && (p[1] - 25.1).abs() < 1e-9),
        v => panic!("unexpected geometry {v:?}")
    }
}

#[test]
fn test_degenerate_inputs() {
    let planner = AssetPlanner::default();

    assert!( matches!( planner.plan( &[], &zone_features()), Err(AssetError::InvalidInput(_))));

    let plan = planner.plan( &[ helicopter( "h1", 25.0, 89.5, 100.0)], &[]).unwrap();
    assert!( plan.routes.is_empty());
    assert_eq!( plan.summary.message.as_deref(), Some("no search zones to cover"));

    let mut busy = helicopter( "h1", 25.0, 89.5, 100.0);
    busy.operational_status = OperationalStatus::Deployed;
    let plan = planner.plan( &[busy], &zone_features()).unwrap();
    assert!( plan.routes.is_empty());
    assert_eq!( plan.uncovered.len(), 3);
    assert_eq!( plan.summary.message.as_deref(), Some("no available assets for deployment"));

    let mut broken = helicopter( "h1", 25.0, 89.5, 100.0);
    broken.fuel_remaining = 120.0;
    assert!( planner.plan( &[broken], &zone_features()).is_err());
}

#[test]
fn test_asset_from_json() {
    let s = r#"{
        "id": "cg-1", "name": "Coast Guard 1",
        "asset_type": { "name": "fixed_wing", "speed_knots": 180, "range_nm": 1200, "search_width_nm": 3, "endurance_hours": 8 },
        "current_location": { "lat": 22.5, "lon": 88.3 },
        "fuel_remaining": 75
    }"#;
    let asset: SearchAsset = serde_json::from_str( s).unwrap();
    assert_eq!( asset.operational_status, OperationalStatus::Available);
    assert!( asset.validate().is_ok());
}
