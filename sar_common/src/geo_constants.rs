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

/// common geodetic constants that should be consistent through all sar crates

/// mean earth radius in meters
pub const MEAN_EARTH_RADIUS: f64 = 6371000.0;

/// mean earth radius in kilometers (haversine distances)
pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

/// mean earth radius in nautical miles
pub const MEAN_EARTH_RADIUS_NM: f64 = 3440.065;

/// meters per degree of arc on the mean sphere
pub const METERS_PER_DEGREE: f64 = MEAN_EARTH_RADIUS * std::f64::consts::PI / 180.0;

/// km per degree at the equator, used for the planar deg² -> km² area approximation
pub const KM_PER_DEGREE_EQUATOR: f64 = 111.32;

/// earth rotation rate in rad/s
pub const EARTH_ROTATION_RATE: f64 = 7.2921e-5;

/// e-folding height of atmospheric density in meters
pub const ATMOSPHERE_SCALE_HEIGHT: f64 = 8400.0;
