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

//! spherical-earth coordinate math used throughout the estimator.
//! Positions are plain degrees; polygon rings are sequences of (lon,lat) pairs (GeoJSON order)
//! which are mapped onto `geo_types` geometries for the metric computations

use geo::{Area, Centroid, Contains, Distance, Euclidean, HaversineMeasure, Length};
use geo_types::{Coord, LineString, Point, Polygon};

use crate::{geo_constants::*, sin, cos, rad};

/// (lon,lat) in degrees - GeoJSON coordinate order
pub type LonLat = (f64,f64);

#[inline]
pub fn meters_to_lat_degrees (m: f64)->f64 {
    m / METERS_PER_DEGREE
}

/// note this degenerates towards the poles (cos(lat) -> 0)
#[inline]
pub fn meters_to_lon_degrees (m: f64, lat_deg: f64)->f64 {
    m / (METERS_PER_DEGREE * cos(rad(lat_deg)))
}

/// move a position by north/east displacements in meters using the local spherical approximation
/// (arc length / earth radius, longitude scaled by cos of the reference latitude).
/// The result is *not* normalized - extreme inputs can leave the valid lat/lon range
#[inline]
pub fn offset_by_meters (lat: f64, lon: f64, north_m: f64, east_m: f64)->(f64,f64) {
    ( lat + meters_to_lat_degrees(north_m), lon + meters_to_lon_degrees(east_m, lat) )
}

/// split a speed along a compass direction (degrees clockwise from north) into (north,east) components
#[inline]
pub fn north_east (speed: f64, direction_deg: f64)->(f64,f64) {
    let a = rad(direction_deg);
    ( speed * cos(a), speed * sin(a) )
}

/// rotate a (north,east) vector by `angle` radians
#[inline]
pub fn rotate_north_east (north: f64, east: f64, angle: f64)->(f64,f64) {
    let (s,c) = angle.sin_cos();
    ( north * c - east * s, north * s + east * c )
}

const HAVERSINE_KM: HaversineMeasure = HaversineMeasure::new( MEAN_EARTH_RADIUS_KM);
const HAVERSINE_NM: HaversineMeasure = HaversineMeasure::new( MEAN_EARTH_RADIUS_NM);

/// great circle distance in km
pub fn haversine_km (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    HAVERSINE_KM.distance( Point::new( lon1, lat1), Point::new( lon2, lat2))
}

/// great circle distance in nautical miles
pub fn haversine_nm (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    HAVERSINE_NM.distance( Point::new( lon1, lat1), Point::new( lon2, lat2))
}

/// planar distance in degree space (used by the grid likelihood models)
#[inline]
pub fn planar_distance_deg (lon1: f64, lat1: f64, lon2: f64, lat2: f64)->f64 {
    Euclidean.distance( Point::new( lon1, lat1), Point::new( lon2, lat2))
}

/// closed `LineString` of a (lon,lat) ring
pub fn ring_line_string (ring: &[LonLat])->LineString<f64> {
    let mut ls: LineString<f64> = ring.iter().map( |(lon,lat)| Coord { x: *lon, y: *lat }).collect();
    ls.close();
    ls
}

/// polygon from an exterior ring and optional hole rings
pub fn ring_polygon (exterior: &[LonLat], holes: &[Vec<LonLat>])->Polygon<f64> {
    Polygon::new( ring_line_string( exterior), holes.iter().map( |h| ring_line_string( h)).collect())
}

/// planar polygon area (holes subtracted) converted to km² with the equatorial 111.32 km/deg factor.
/// This is an approximation that overestimates areas at high latitudes and for large polygons
pub fn polygon_area_km2 (polygon: &Polygon<f64>)->f64 {
    polygon.unsigned_area() * KM_PER_DEGREE_EQUATOR * KM_PER_DEGREE_EQUATOR
}

pub fn ring_area_km2 (ring: &[LonLat])->f64 {
    polygon_area_km2( &ring_polygon( ring, &[]))
}

/// haversine length of the exterior ring in km, including the closing segment
pub fn ring_perimeter_km (ring: &[LonLat])->f64 {
    if ring.len() < 2 { return 0.0 }
    HAVERSINE_KM.length( &ring_line_string( ring))
}

/// area weighted centroid of a ring. Zero area rings use the length weighted centroid of their segments
pub fn ring_centroid (ring: &[LonLat])->Option<LonLat> {
    ring_polygon( ring, &[]).centroid().map( |p| (p.x(), p.y()))
}

/// point in ring test in degree space (boundary points are outside)
pub fn ring_contains (ring: &[LonLat], lon: f64, lat: f64)->bool {
    ring.len() >= 3 && ring_polygon( ring, &[]).contains( &Point::new( lon, lat))
}
