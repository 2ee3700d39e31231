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

//! wind drift of falling and floating objects. An object released at altitude descends through
//! a layered atmosphere where wind strengthens and backs with height, and once it reaches the
//! surface it keeps drifting with the wind driven current, deflected by Coriolis.

use serde::{Serialize,Deserialize};
use strum::{Display,EnumString,AsRefStr};

pub mod errors;
pub mod layers;
pub mod model;

pub use errors::{DriftError,Result};
pub use layers::{WindLayer,default_wind_layers};
pub use model::{WindDriftModel,DriftTrajectory,DriftPoint,DriftPhase};

/// what is drifting. This determines descent rate and how strongly wind displaces the object
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,Display,EnumString,AsRefStr)]
#[serde(rename_all="snake_case")]
#[strum(serialize_all="snake_case")]
pub enum ObjectType {
    Debris,
    Fuselage,
    SurvivalRaft,
    Cargo,
    FuelTank
}

impl ObjectType {
    /// sea level descent rate in ft/s
    pub fn base_descent_rate (&self)->f64 {
        match self {
            ObjectType::Debris => 50.0,
            ObjectType::Fuselage => 200.0,
            ObjectType::SurvivalRaft => 15.0,
            ObjectType::Cargo => 100.0,
            ObjectType::FuelTank => 150.0,
        }
    }

    /// scales wind driven displacement
    pub fn drag_coefficient (&self)->f64 {
        match self {
            ObjectType::Debris => 1.2,
            ObjectType::Fuselage => 0.8,
            ObjectType::SurvivalRaft => 2.5,
            ObjectType::Cargo => 1.0,
            ObjectType::FuelTank => 0.9,
        }
    }
}

/// default upper bound for drift time budgets (30 days)
pub const MAX_ELAPSED_SECONDS: f64 = 30.0 * 86400.0;

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    pub airborne_step: f64,              // seconds
    pub surface_step: f64,               // seconds
    pub surface_current_factor: f64,     // fraction of surface wind speed
    pub raft_surface_current_factor: f64,
    pub max_elapsed: f64,                // seconds, longest time budget we accept

    // descent rate grows by `descent_altitude_gain` at `descent_reference_altitude` (thinner air)
    pub descent_altitude_gain: f64,
    pub descent_reference_altitude: f64, // feet

    pub layers: Vec<WindLayer>,          // ordered by floor altitude
}

impl Default for DriftConfig {
    fn default()->Self {
        DriftConfig {
            airborne_step: 60.0,
            surface_step: 3600.0,
            surface_current_factor: 0.03,
            raft_surface_current_factor: 0.05,
            max_elapsed: MAX_ELAPSED_SECONDS,
            descent_altitude_gain: 0.3,
            descent_reference_altitude: 40000.0,
            layers: default_wind_layers(),
        }
    }
}
