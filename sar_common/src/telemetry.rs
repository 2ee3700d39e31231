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

//! the telemetry snapshot that drives a simulation. Snapshots are immutable - variants with
//! substituted live data are separate copies created through `with_wind(..)`

use serde::{Serialize,Deserialize};
use crate::{angle::{is_valid_latitude,is_valid_longitude,is_valid_compass_angle}, errors::Result, invalid_input};

pub const MAX_WIND_SPEED: f64 = 200.0;   // knots
pub const MAX_ALTITUDE: f64 = 60000.0;   // feet
pub const MAX_SPEED: f64 = 1000.0;       // knots

/// surface wind as reported with the telemetry
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Wind {
    pub speed: f64,     // knots
    pub direction: f64  // degrees [0..360), direction the air moves towards
}

impl Wind {
    pub fn new (speed: f64, direction: f64)->Self { Wind { speed, direction } }

    pub fn validate (&self)->Result<()> {
        if !(self.speed.is_finite() && self.speed >= 0.0 && self.speed <= MAX_WIND_SPEED) {
            return Err( invalid_input!("wind speed out of range [0..{}]: {}", MAX_WIND_SPEED, self.speed))
        }
        if !is_valid_compass_angle(self.direction) {
            return Err( invalid_input!("wind direction out of range [0..360): {}", self.direction))
        }
        Ok(())
    }
}

fn default_uncertainty_radius()->f64 { 1.0 }

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Telemetry {
    pub lat: f64,                   // degrees
    pub lon: f64,                   // degrees
    pub altitude: f64,              // feet
    pub speed: f64,                 // ground speed in knots
    pub heading: f64,               // degrees [0..360)
    pub fuel: f64,                  // liters remaining
    pub wind: Wind,
    pub time_since_contact: f64,    // seconds

    #[serde(default="default_uncertainty_radius")]
    pub uncertainty_radius: f64,    // nautical miles
}

impl Telemetry {
    /// create and validate a telemetry snapshot
    pub fn new (lat: f64, lon: f64, altitude: f64, speed: f64, heading: f64, fuel: f64, wind: Wind, time_since_contact: f64)->Result<Self> {
        let t = Telemetry { lat, lon, altitude, speed, heading, fuel, wind, time_since_contact, uncertainty_radius: default_uncertainty_radius() };
        t.validate()?;
        Ok(t)
    }

    /// parse and validate a JSON telemetry record
    pub fn from_json (s: &str)->Result<Self> {
        let t: Telemetry = serde_json::from_str(s)?;
        t.validate()?;
        Ok(t)
    }

    /// check all fields against their domain ranges. We never clamp here - out of range input is rejected
    pub fn validate (&self)->Result<()> {
        if !is_valid_latitude(self.lat) { return Err( invalid_input!("latitude out of range: {}", self.lat)) }
        if !is_valid_longitude(self.lon) { return Err( invalid_input!("longitude out of range: {}", self.lon)) }
        if !(self.altitude.is_finite() && self.altitude >= 0.0 && self.altitude <= MAX_ALTITUDE) {
            return Err( invalid_input!("altitude out of range [0..{}]: {}", MAX_ALTITUDE, self.altitude))
        }
        if !(self.speed.is_finite() && self.speed >= 0.0 && self.speed <= MAX_SPEED) {
            return Err( invalid_input!("speed out of range [0..{}]: {}", MAX_SPEED, self.speed))
        }
        if !is_valid_compass_angle(self.heading) { return Err( invalid_input!("heading out of range [0..360): {}", self.heading)) }
        if !(self.fuel.is_finite() && self.fuel >= 0.0) { return Err( invalid_input!("negative or invalid fuel: {}", self.fuel)) }
        if !(self.time_since_contact.is_finite() && self.time_since_contact >= 0.0) {
            return Err( invalid_input!("negative or invalid time since contact: {}", self.time_since_contact))
        }
        if !(self.uncertainty_radius.is_finite() && self.uncertainty_radius >= 0.0) {
            return Err( invalid_input!("negative or invalid uncertainty radius: {}", self.uncertainty_radius))
        }
        self.wind.validate()
    }

    /// a copy of this snapshot with substituted wind (e.g. from a live weather source)
    pub fn with_wind (&self, wind: Wind)->Self {
        Telemetry { wind, ..self.clone() }
    }
}
