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

//! straight line flight legs. An aircraft keeps its heading and airspeed until either the time
//! since last contact elapsed or its fuel is exhausted, and is displaced by the wind on the way

use sar_common::{
    geodesy::{north_east, offset_by_meters},
    units::{knots_to_mps, GALLONS_PER_LITER},
};
use serde::{Serialize,Deserialize};

/// the inputs of one Monte Carlo trial, after perturbation
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct FlightLeg {
    pub lat: f64,
    pub lon: f64,
    pub heading: f64,         // degrees
    pub airspeed: f64,        // knots
    pub wind_speed: f64,      // knots
    pub wind_direction: f64,  // degrees, direction the air moves towards
    pub fuel: f64,            // liters
    pub time_since_contact: f64, // seconds
}

/// seconds until the fuel is exhausted
#[inline]
pub fn fuel_time (fuel_liters: f64, fuel_density: f64, fuel_flow_rate: f64)->f64 {
    if fuel_flow_rate > 0.0 { fuel_liters * fuel_density / fuel_flow_rate } else { f64::INFINITY }
}

/// rough endurance in hours assuming a fixed 300 gal/h burn
pub fn fuel_endurance_hours (fuel_liters: f64)->f64 {
    fuel_liters * GALLONS_PER_LITER / 300.0
}

impl FlightLeg {

    /// (north,east) ground velocity in m/s
    pub fn ground_velocity (&self)->(f64,f64) {
        let (an, ae) = north_east( knots_to_mps( self.airspeed), self.heading);
        let (wn, we) = north_east( knots_to_mps( self.wind_speed), self.wind_direction);
        (an + wn, ae + we)
    }

    pub fn flight_time (&self, fuel_density: f64, fuel_flow_rate: f64)->f64 {
        self.time_since_contact.min( fuel_time( self.fuel, fuel_density, fuel_flow_rate)).max(0.0)
    }

    /// terminal (lat,lon) of the leg (spherical approximation, longitude scaled at the start latitude)
    pub fn terminal_position (&self, fuel_density: f64, fuel_flow_rate: f64)->(f64,f64) {
        let t = self.flight_time( fuel_density, fuel_flow_rate);
        let (gn, ge) = self.ground_velocity();
        offset_by_meters( self.lat, self.lon, gn * t, ge * t)
    }
}
