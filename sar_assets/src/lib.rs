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

//! deployment of search assets (aircraft, helicopters, vessels) to the high probability parts of
//! a set of search zones

use serde::{Serialize,Deserialize};
use strum::{Display,EnumString,AsRefStr};

use sar_common::angle::{is_valid_latitude,is_valid_longitude};

pub mod errors;
pub mod planner;

pub use errors::{AssetError,Result};
pub use planner::{AssetPlanner,PlannerConfig,OptimizedRoute,DeploymentPlan,DeploymentSummary};
use errors::invalid_asset_input;

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    pub fn new (lat: f64, lon: f64)->Self { Position { lat, lon } }

    pub fn distance_nm (&self, other: &Position)->f64 {
        sar_common::geodesy::haversine_nm( self.lat, self.lon, other.lat, other.lon)
    }
}

/// performance envelope of an asset class
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct AssetType {
    pub name: String,
    pub speed_knots: f64,
    pub range_nm: f64,
    pub search_width_nm: f64,
    pub endurance_hours: f64,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize,Display,EnumString,AsRefStr)]
#[serde(rename_all="snake_case")]
#[strum(serialize_all="snake_case")]
pub enum OperationalStatus {
    #[default]
    Available,
    Deployed,
    Maintenance
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct SearchAsset {
    pub id: String,
    pub name: String,
    pub asset_type: AssetType,
    pub current_location: Position,
    pub fuel_remaining: f64,   // percent

    #[serde(default)]
    pub operational_status: OperationalStatus,
}

impl SearchAsset {
    pub fn validate (&self)->Result<()> {
        let t = &self.asset_type;
        if !(t.speed_knots.is_finite() && t.speed_knots > 0.0) {
            return Err( invalid_asset_input!("{}: speed has to be positive: {}", self.id, t.speed_knots))
        }
        for (what,v) in [("range", t.range_nm), ("search width", t.search_width_nm), ("endurance", t.endurance_hours)] {
            if !(v.is_finite() && v >= 0.0) {
                return Err( invalid_asset_input!("{}: negative or invalid {}: {}", self.id, what, v))
            }
        }
        if !(self.fuel_remaining.is_finite() && (0.0..=100.0).contains(&self.fuel_remaining)) {
            return Err( invalid_asset_input!("{}: fuel remaining outside [0,100]%: {}", self.id, self.fuel_remaining))
        }
        let p = &self.current_location;
        if !is_valid_latitude(p.lat) || !is_valid_longitude(p.lon) {
            return Err( invalid_asset_input!("{}: invalid location {},{}", self.id, p.lat, p.lon))
        }
        Ok(())
    }

    pub fn is_available (&self)->bool { self.operational_status == OperationalStatus::Available }
}
