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

//! unit conversions for the quantities that cross the telemetry boundary. Telemetry uses aviation
//! units (knots, feet, nautical miles, liters) while all computations are done in SI units

use uom::si::{
    f64::{Length,Velocity},
    length::{foot,meter,kilometer,nautical_mile},
    velocity::{knot,meter_per_second},
};

#[inline]
pub fn meters (len: f64)-> Length { Length::new::<meter>(len) }

#[inline]
pub fn feet (len: f64)-> Length { Length::new::<foot>(len) }

#[inline]
pub fn nautical_miles (len: f64)-> Length { Length::new::<nautical_mile>(len) }

#[inline]
pub fn knots (v: f64)-> Velocity { Velocity::new::<knot>(v) }

#[inline]
pub fn knots_to_mps (v: f64)->f64 { knots(v).get::<meter_per_second>() }

#[inline]
pub fn feet_to_meters (len: f64)->f64 { feet(len).get::<meter>() }

#[inline]
pub fn meters_to_feet (len: f64)->f64 { meters(len).get::<foot>() }

#[inline]
pub fn nm_to_km (len: f64)->f64 { nautical_miles(len).get::<kilometer>() }

/// approximate km² per nm² as used for search coverage areas
pub const KM2_PER_NM2: f64 = 3.43;

/// liters to gallons (US)
pub const GALLONS_PER_LITER: f64 = 0.264172;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert!( (knots_to_mps(1.0) - 0.514444).abs() < 1e-5);
        assert!( (feet_to_meters(1000.0) - 304.8).abs() < 1e-9);
        assert!( (nm_to_km(1.0) - 1.852).abs() < 1e-9);
        assert!( (meters_to_feet( feet_to_meters(35000.0)) - 35000.0).abs() < 1e-6);
    }
}
