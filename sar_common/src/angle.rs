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

//! angle normalization and range checks for geographic degrees

#[inline]
pub fn normalize_90 (d:f64) -> f64 {
    let x = d % 360.0;

    if x < -90.0 { -180.0 - x }
    else if x > 90.0 { 180.0 - x }
    else { x }
}

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d % 360.0;
    let x = if x < 0.0 { 360.0 + x } else { x };
    if x >= 360.0 { 0.0 } else { x } // tiny negative remainders round up to 360
}

#[inline] pub fn is_valid_latitude (lat: f64)->bool { lat.is_finite() && (-90.0..=90.0).contains(&lat) }
#[inline] pub fn is_valid_longitude (lon: f64)->bool { lon.is_finite() && (-180.0..=180.0).contains(&lon) }

/// compass angles (heading, wind direction) have an exclusive upper bound
#[inline] pub fn is_valid_compass_angle (deg: f64)->bool { deg.is_finite() && deg >= 0.0 && deg < 360.0 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!( normalize_360(-10.0), 350.0);
        assert_eq!( normalize_360(370.0), 10.0);
        assert_eq!( normalize_180(190.0), -170.0);
        assert_eq!( normalize_90(100.0), 80.0);
        assert!( !is_valid_compass_angle(360.0));
        assert!( is_valid_compass_angle(0.0));
    }
}
