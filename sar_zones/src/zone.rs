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

use chrono::{DateTime,Utc};
use geo::Centroid;
use geo_types::Polygon;
use serde::{Serialize,Deserialize};
use strum::{Display,AsRefStr,EnumString};

use sar_common::{
    angle::{is_valid_latitude,is_valid_longitude},
    evidence::EvidenceType,
    geodesy::{LonLat, ring_area_km2, ring_perimeter_km, ring_polygon, polygon_area_km2}
};
use crate::errors::{ZoneError, Result, invalid_geometry};

/// the fixed, descending set of zone levels. These are iso-density thresholds relative to the
/// peak of the field (0.95 is the tightest core), not credible mass fractions
pub const PROBABILITY_LEVELS: [f64;4] = [0.95, 0.75, 0.50, 0.25];

/// how a zone polygon was obtained
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,Display,AsRefStr,EnumString)]
#[serde(rename_all="snake_case")]
#[strum(serialize_all="snake_case")]
pub enum ExtractionMethod {
    Contour,
    ConvexHull,
    Ellipse,
    Rectangle,
    Imported,   // parsed from an external feature
}

/// evidence that was used to derive a zone
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct EvidenceTag {
    pub evidence_type: EvidenceType,
    pub confidence: f64,
}

/// a ranked search zone - a closed (lon,lat) exterior ring with optional holes, tagged with its
/// probability level. Zones can only be created through `Zone::new`, which validates and closes the ring
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Zone {
    ring: Vec<LonLat>,
    #[serde(default)]
    holes: Vec<Vec<LonLat>>,  // closed interior rings (excluded areas)
    pub probability: f64,
    pub area_km2: f64,
    pub method: ExtractionMethod,
    pub mass: Option<f64>,   // enclosed probability mass if the zone came from a normalized field
    pub peak: Option<f64>,   // max peak-normalized density inside the zone
    pub evidence: Option<EvidenceTag>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Zone {
    pub fn new (ring: Vec<LonLat>, probability: f64, method: ExtractionMethod)->Result<Self> {
        if !(probability.is_finite() && (0.0..=1.0).contains(&probability)) {
            return Err( invalid_geometry!("zone probability outside [0,1]: {}", probability))
        }
        if let Some((lon,lat)) = ring.iter().find( |(lon,lat)| !is_valid_longitude(*lon) || !is_valid_latitude(*lat)) {
            return Err( invalid_geometry!("invalid zone vertex {},{}", lon, lat))
        }

        let ring = close_ring( ring);
        let n_distinct = count_distinct( &ring[..ring.len()-1]);
        if n_distinct < 3 {
            return Err( invalid_geometry!("zone ring needs at least 3 distinct vertices, got {}", n_distinct))
        }

        let area_km2 = ring_area_km2( &ring);
        Ok( Zone { ring, holes: Vec::new(), probability, area_km2, method, mass: None, peak: None, evidence: None, created_at: None } )
    }

    /// cut interior rings out of the zone. Rings with less than 3 distinct vertices are ignored
    pub fn with_holes (mut self, holes: Vec<Vec<LonLat>>)->Self {
        self.holes = holes.into_iter()
            .map( close_ring)
            .filter( |h| h.len() >= 4 && count_distinct( &h[..h.len()-1]) >= 3)
            .collect();
        self.area_km2 = polygon_area_km2( &self.to_polygon());
        self
    }

    pub fn with_mass (mut self, mass: f64)->Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_peak (mut self, peak: f64)->Self {
        self.peak = Some(peak);
        self
    }

    pub fn with_evidence (mut self, evidence_type: EvidenceType, confidence: f64)->Self {
        self.evidence = Some( EvidenceTag { evidence_type, confidence });
        self
    }

    pub fn with_created_at (mut self, created_at: DateTime<Utc>)->Self {
        self.created_at = Some(created_at);
        self
    }

    /// the closed exterior ring (first == last)
    pub fn ring (&self)->&[LonLat] { &self.ring }

    pub fn holes (&self)->&[Vec<LonLat>] { &self.holes }

    pub fn updated_with_evidence (&self)->bool { self.evidence.is_some() }

    pub fn to_polygon (&self)->Polygon<f64> {
        ring_polygon( &self.ring, &self.holes)
    }

    /// area weighted centroid as (lon,lat)
    pub fn centroid (&self)->Option<LonLat> {
        self.to_polygon().centroid().map( |p| (p.x(), p.y()))
    }

    /// length of the exterior ring
    pub fn perimeter_km (&self)->f64 {
        ring_perimeter_km( &self.ring)
    }
}

/// append the first vertex if the ring is not closed yet
pub fn close_ring (mut ring: Vec<LonLat>)->Vec<LonLat> {
    if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
        if first != last { ring.push( first) }
    }
    ring
}

fn count_distinct (pts: &[LonLat])->usize {
    let mut distinct: Vec<LonLat> = Vec::with_capacity( pts.len());
    for p in pts {
        if !distinct.iter().any( |d| d == p) { distinct.push( *p) }
    }
    distinct.len()
}

/// rank zones: probability level descending, ties broken by the density peak they contain and then by
/// enclosed mass (both descending). This puts the zone that holds the field maximum first
pub fn sort_zones (zones: &mut [Zone]) {
    zones.sort_by( |a,b| {
        b.probability.total_cmp( &a.probability)
            .then_with( || b.peak.unwrap_or(0.0).total_cmp( &a.peak.unwrap_or(0.0)))
            .then_with( || b.mass.unwrap_or(0.0).total_cmp( &a.mass.unwrap_or(0.0)))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_validation() {
        let z = Zone::new( vec![ (0.0,0.0), (1.0,0.0), (1.0,1.0) ], 0.5, ExtractionMethod::Contour).unwrap();
        assert_eq!( z.ring().len(), 4);
        assert_eq!( z.ring().first(), z.ring().last());

        assert!( Zone::new( vec![ (0.0,0.0), (1.0,0.0), (0.0,0.0), (1.0,0.0) ], 0.5, ExtractionMethod::Contour).is_err());
        assert!( Zone::new( vec![ (0.0,0.0), (1.0,0.0), (1.0,1.0) ], 1.5, ExtractionMethod::Contour).is_err());
        assert!( Zone::new( vec![ (0.0,0.0), (181.0,0.0), (1.0,1.0) ], 0.5, ExtractionMethod::Contour).is_err());
    }

    #[test]
    fn test_zone_holes() {
        let z = Zone::new( vec![ (0.0,0.0), (2.0,0.0), (2.0,2.0), (0.0,2.0) ], 0.5, ExtractionMethod::Contour).unwrap();
        let full = z.area_km2;
        let z = z.with_holes( vec![
            vec![ (0.5,0.5), (1.5,0.5), (1.5,1.5), (0.5,1.5) ],
            vec![ (0.1,0.1), (0.2,0.1) ]  // degenerate, dropped
        ]);
        assert_eq!( z.holes().len(), 1);
        assert_eq!( z.holes()[0].first(), z.holes()[0].last());
        assert!( (z.area_km2 - 0.75 * full).abs() < 1e-6);
    }
}
