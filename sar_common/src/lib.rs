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

use std::f64::consts::{PI as STD_PI};

use serde::{Serialize,Deserialize};
use num::{Num,ToPrimitive};

pub mod errors;
pub mod angle;
pub mod geo_constants;
pub mod geodesy;
pub mod units;
pub mod config;
pub mod telemetry;
pub mod evidence;

pub use errors::{SarCommonError,Result};

// syntactic sugar - this is just more readable in many cases
#[inline(always)] pub fn sin(x:f64) -> f64 { x.sin() }
#[inline(always)] pub fn cos(x:f64) -> f64 { x.cos() }
#[inline(always)] pub fn sqrt(x:f64) -> f64 { x.sqrt() }
#[inline(always)] pub fn pow2(x:f64) -> f64 { x*x }
#[inline(always)] pub fn rad(x:f64)->f64 { x.to_radians() }

pub const PI: f64 = STD_PI;
pub const TWO_PI: f64 = PI * 2.0;

/// a generic bounding box without semantics for the coordinate type
/// (for geographic boxes west/east are longitudes and south/north are latitudes in degrees)
#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct BoundingBox <T: Num> {
    pub west: T,
    pub south: T,
    pub east: T,
    pub north: T
}

impl <T: Num + Copy + ToPrimitive> BoundingBox<T> {
    pub fn new(west: T, south: T, east: T, north: T)->Self {
        BoundingBox{ west, south, east, north}
    }

    pub fn center (&self) -> (f64,f64) {
        let c = |a: T, b: T| (a.to_f64().unwrap_or(f64::NAN) + b.to_f64().unwrap_or(f64::NAN)) / 2.0;
        ( c(self.west, self.east), c(self.south, self.north) )
    }
}

/// geographic bounding box in degrees
pub type GeoBounds = BoundingBox<f64>;

impl BoundingBox<f64> {
    /// the whole valid lon/lat range
    pub fn globe ()->Self {
        BoundingBox::new( -180.0, -90.0, 180.0, 90.0)
    }

    /// smallest box containing all (lon,lat) coordinates, None if there are none
    pub fn from_lon_lats<I> (coords: I)->Option<Self> where I: IntoIterator<Item=(f64,f64)> {
        let mut bbox: Option<Self> = None;
        for (lon,lat) in coords {
            bbox = Some( match bbox {
                Some(b) => b.expanded_to( lon, lat),
                None => BoundingBox::new( lon, lat, lon, lat)
            })
        }
        bbox
    }

    #[inline] pub fn width (&self)->f64 { self.east - self.west }
    #[inline] pub fn height (&self)->f64 { self.north - self.south }

    pub fn contains (&self, lon: f64, lat: f64)->bool {
        lon >= self.west && lon <= self.east && lat >= self.south && lat <= self.north
    }

    pub fn expanded_to (&self, lon: f64, lat: f64)->Self {
        BoundingBox::new( self.west.min(lon), self.south.min(lat), self.east.max(lon), self.north.max(lat))
    }

    /// pad each dimension by `frac` of its extent on both sides
    pub fn padded (&self, frac: f64)->Self {
        let dx = self.width() * frac;
        let dy = self.height() * frac;
        BoundingBox::new( self.west - dx, self.south - dy, self.east + dx, self.north + dy)
    }

    /// pad by absolute degree amounts
    pub fn padded_by (&self, dlon: f64, dlat: f64)->Self {
        BoundingBox::new( self.west - dlon, self.south - dlat, self.east + dlon, self.north + dlat)
    }

    /// make sure each dimension spans at least `min_extent` degrees (centered on the current box)
    pub fn with_min_extent (&self, min_extent: f64)->Self {
        let (cx,cy) = self.center();
        let hw = self.width().max(min_extent) / 2.0;
        let hh = self.height().max(min_extent) / 2.0;
        BoundingBox::new( cx - hw, cy - hh, cx + hw, cy + hh)
    }

    pub fn clamped_to_globe (&self)->Self {
        BoundingBox::new(
            self.west.max(-180.0), self.south.max(-90.0),
            self.east.min(180.0), self.north.min(90.0)
        )
    }

    pub fn is_finite (&self)->bool {
        self.west.is_finite() && self.south.is_finite() && self.east.is_finite() && self.north.is_finite()
    }
}
