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

//! greedy route planning. Each available asset in turn flies nearest-neighbour legs between the
//! not yet covered target centroids it can reach, until its search time is used up

use ::geojson::{Feature, Geometry, JsonObject, Value};
use serde::{Serialize,Deserialize};
use serde_json::json;
use tracing::{debug,info,warn};

use sar_common::units::KM2_PER_NM2;
use sar_zones::geojson::zone_from_feature;
use crate::{
    Position, SearchAsset,
    errors::{Result, invalid_asset_input}
};

pub const PLANNING_METHOD: &str = "greedy_nearest_neighbor";

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub min_target_probability: f64, // zones above this probability become targets
    pub range_fraction: f64,         // part of the asset range usable for the outbound leg
    pub endurance_margin: f64,       // max usable fraction of the endurance
    pub covered_radius_nm: f64,      // targets this close to an assigned waypoint are skipped
    pub coverage_radius_nm: f64,     // targets this close to a waypoint count as covered
    pub search_pattern: String,
}

impl Default for PlannerConfig {
    fn default()->Self {
        PlannerConfig {
            min_target_probability: 0.3,
            range_fraction: 0.4,
            endurance_margin: 0.8,
            covered_radius_nm: 5.0,
            coverage_radius_nm: 10.0,
            search_pattern: "expanding_square".into(),
        }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct OptimizedRoute {
    pub asset_id: String,
    pub waypoints: Vec<Position>,   // starting with the asset location
    pub search_pattern: String,
    pub estimated_time_hours: f64,
    pub coverage_area_km2: f64,
    pub probability_covered: f64,   // fraction of all targets covered by this route
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct DeploymentSummary {
    pub assets_deployed: usize,
    pub coverage_percentage: f64,
    pub method: String,
    pub message: Option<String>,
}

#[derive(Debug,Clone)]
pub struct DeploymentPlan {
    pub routes: Vec<OptimizedRoute>,
    pub total_coverage: f64,
    pub uncovered: Vec<Feature>,    // Point features of targets without coverage
    pub summary: DeploymentSummary,
}

impl DeploymentPlan {
    fn without_routes (uncovered: Vec<Feature>, message: &str)->Self {
        DeploymentPlan {
            routes: Vec::new(),
            total_coverage: 0.0,
            uncovered,
            summary: DeploymentSummary {
                assets_deployed: 0,
                coverage_percentage: 0.0,
                method: PLANNING_METHOD.into(),
                message: Some( message.into())
            }
        }
    }
}

fn path_length_nm (waypoints: &[Position])->f64 {
    waypoints.windows(2).map( |w| w[0].distance_nm( &w[1])).sum()
}

pub struct AssetPlanner {
    config: PlannerConfig,
}

impl AssetPlanner {
    pub fn new (config: PlannerConfig)->Self { AssetPlanner { config } }

    pub fn config (&self)->&PlannerConfig { &self.config }

    /// centroids of the zone features with a probability above the target threshold. Features
    /// without probability or polygon geometry are no targets, invalid polygons are skipped
    pub fn target_positions (&self, features: &[Feature])->Vec<Position> {
        let mut targets = Vec::new();
        for (i,f) in features.iter().enumerate() {
            let p = f.property("probability").and_then( |v| v.as_f64()).unwrap_or(0.0);
            if !(p > self.config.min_target_probability) { continue }

            match zone_from_feature( f) {
                Ok(Some(zone)) => match zone.centroid() {
                    Some((lon,lat)) if lat.is_finite() && lon.is_finite() => targets.push( Position::new( lat, lon)),
                    _ => warn!("no centroid for feature {}", i)
                }
                Ok(None) => debug!("feature {} is not a polygon", i),
                Err(e) => warn!("skipping target feature {}: {}", i, e)
            }
        }
        targets
    }

    /// hours the asset can spend on its route
    pub fn max_search_time (&self, asset: &SearchAsset)->f64 {
        let endurance = asset.asset_type.endurance_hours;
        (asset.fuel_remaining / 100.0 * endurance).min( endurance * self.config.endurance_margin)
    }

    /// targets within the usable range that are not close to an already assigned waypoint
    pub fn reachable_targets (&self, asset: &SearchAsset, targets: &[Position], assigned: &[Position])->Vec<Position> {
        let max_range = asset.asset_type.range_nm * self.config.range_fraction;
        targets.iter()
            .filter( |t| !assigned.iter().any( |a| t.distance_nm(a) < self.config.covered_radius_nm))
            .filter( |t| asset.current_location.distance_nm(t) <= max_range)
            .copied()
            .collect()
    }

    /// nearest-neighbour tour from the asset location, cut off when the next leg would exceed the time budget
    pub fn search_waypoints (&self, asset: &SearchAsset, targets: &[Position], max_time_hours: f64)->Vec<Position> {
        let speed = asset.asset_type.speed_knots;
        let mut waypoints = vec![ asset.current_location ];
        let mut remaining = targets.to_vec();
        let mut pos = asset.current_location;
        let mut time = 0.0;

        while !remaining.is_empty() && time < max_time_hours {
            let mut nearest = 0;
            for i in 1..remaining.len() {
                if pos.distance_nm( &remaining[i]) < pos.distance_nm( &remaining[nearest]) { nearest = i }
            }
            let leg_time = pos.distance_nm( &remaining[nearest]) / speed;
            if time + leg_time > max_time_hours { break }

            pos = remaining.remove( nearest);
            waypoints.push( pos);
            time += leg_time;
        }
        waypoints
    }

    /// fraction of targets within the coverage radius of any waypoint
    pub fn probability_covered (&self, waypoints: &[Position], targets: &[Position])->f64 {
        if targets.is_empty() { return 0.0 }
        let n = targets.iter().filter( |t| self.is_covered( t, waypoints)).count();
        n as f64 / targets.len() as f64
    }

    fn is_covered (&self, target: &Position, waypoints: &[Position])->bool {
        waypoints.iter().any( |w| w.distance_nm( target) < self.config.coverage_radius_nm)
    }

    fn route (&self, asset: &SearchAsset, targets: &[Position], assigned: &[Position])->Option<OptimizedRoute> {
        let reachable = self.reachable_targets( asset, targets, assigned);
        if reachable.is_empty() {
            debug!("no reachable targets for {}", asset.id);
            return None
        }

        let waypoints = self.search_waypoints( asset, &reachable, self.max_search_time( asset));
        if waypoints.len() < 2 {
            debug!("{} cannot reach any target within its search time", asset.id);
            return None
        }

        let length = path_length_nm( &waypoints);
        Some( OptimizedRoute {
            asset_id: asset.id.clone(),
            search_pattern: self.config.search_pattern.clone(),
            estimated_time_hours: length / asset.asset_type.speed_knots,
            coverage_area_km2: length * asset.asset_type.search_width_nm * KM2_PER_NM2,
            probability_covered: self.probability_covered( &waypoints, targets),
            waypoints,
        })
    }

    fn uncovered_features (&self, targets: &[Position], waypoints: &[Position])->Vec<Feature> {
        targets.iter().filter( |t| !self.is_covered( t, waypoints)).map( |t| {
            let mut props = JsonObject::new();
            props.insert( "priority".into(), json!("high"));
            props.insert( "reason".into(), json!("insufficient_asset_coverage"));
            Feature {
                bbox: None,
                geometry: Some( Geometry::new( Value::Point( vec![t.lon, t.lat]))),
                id: None,
                properties: Some(props),
                foreign_members: None,
            }
        }).collect()
    }

    /// plan routes for all available assets over the given zone features
    pub fn plan (&self, assets: &[SearchAsset], zones: &[Feature])->Result<DeploymentPlan> {
        if assets.is_empty() {
            return Err( invalid_asset_input!("no assets provided"))
        }
        for asset in assets { asset.validate()? }

        if zones.is_empty() {
            return Ok( DeploymentPlan::without_routes( Vec::new(), "no search zones to cover"))
        }

        let targets = self.target_positions( zones);
        let available: Vec<&SearchAsset> = assets.iter().filter( |a| a.is_available()).collect();
        if available.is_empty() {
            return Ok( DeploymentPlan::without_routes( self.uncovered_features( &targets, &[]), "no available assets for deployment"))
        }

        let mut routes = Vec::new();
        let mut assigned: Vec<Position> = Vec::new();
        for asset in available {
            if let Some(route) = self.route( asset, &targets, &assigned) {
                assigned.extend( route.waypoints.iter().copied());
                routes.push( route);
            }
        }

        let total_coverage = if targets.is_empty() { 1.0 } else { self.probability_covered( &assigned, &targets) };
        let uncovered = self.uncovered_features( &targets, &assigned);
        info!("{} routes cover {:.0}% of {} targets", routes.len(), total_coverage * 100.0, targets.len());

        Ok( DeploymentPlan {
            summary: DeploymentSummary {
                assets_deployed: routes.len(),
                coverage_percentage: total_coverage * 100.0,
                method: PLANNING_METHOD.into(),
                message: None
            },
            routes,
            total_coverage,
            uncovered,
        })
    }
}

impl Default for AssetPlanner {
    fn default()->Self { AssetPlanner::new( PlannerConfig::default()) }
}
