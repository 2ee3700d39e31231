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

use geo::{BoundingRect, Contains};
use geo_types::{Point, Polygon};
use ndarray::Array2;
use rayon::prelude::*;

use sar_common::{GeoBounds, geodesy::LonLat};
use crate::errors::{ZoneError, Result, invalid_zone_input, degenerate_field};

/// explicit geographic bounds of a grid. Grid nodes lie on the bounds (inclusive axes)
pub type GridBounds = GeoBounds;

/// a rectangular lat/lon raster of non-negative values. Rows run south to north, columns west to east.
/// Node (r,c) sits at (lon_axis[c], lat_axis[r]) - this is a node grid (numpy.linspace-like), not a cell grid
#[derive(Debug,Clone,PartialEq)]
pub struct ProbabilityGrid {
    bounds: GridBounds,
    values: Array2<f64>,
}

/// `n` evenly spaced values from `min` to `max` (both inclusive)
pub fn linspace (min: f64, max: f64, n: usize)->Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let d = (max - min) / (n - 1) as f64;
            (0..n).map( |i| if i == n-1 { max } else { min + i as f64 * d }).collect()
        }
    }
}

impl ProbabilityGrid {

    pub fn new (bounds: GridBounds, values: Array2<f64>)->Result<Self> {
        check_bounds( &bounds)?;
        let (nrows, ncols) = values.dim();
        if nrows < 2 || ncols < 2 {
            return Err( invalid_zone_input!("grid too small: {}x{}", nrows, ncols))
        }
        if values.iter().any( |v| !v.is_finite() || *v < 0.0) {
            return Err( invalid_zone_input!("grid values have to be finite and non-negative"))
        }
        Ok( ProbabilityGrid { bounds, values } )
    }

    /// normalized grid with the same value at every node
    pub fn uniform (bounds: GridBounds, resolution: usize)->Result<Self> {
        let n = resolution * resolution;
        Self::new( bounds, Array2::from_elem( (resolution,resolution), 1.0 / n as f64))
    }

    /// evaluate `f(lon,lat)` at each node. Rows are computed in parallel.
    /// Negative or non-finite results are stored as 0
    pub fn from_fn<F> (bounds: GridBounds, resolution: usize, f: F)->Result<Self> where F: Fn(f64,f64)->f64 + Sync {
        check_bounds( &bounds)?;
        if resolution < 2 {
            return Err( invalid_zone_input!("grid resolution has to be at least 2: {}", resolution))
        }

        let lons = linspace( bounds.west, bounds.east, resolution);
        let lats = linspace( bounds.south, bounds.north, resolution);

        let rows: Vec<Vec<f64>> = lats.par_iter().map( |lat| {
            lons.iter().map( |lon| {
                let v = f( *lon, *lat);
                if v.is_finite() && v > 0.0 { v } else { 0.0 }
            }).collect()
        }).collect();

        let data: Vec<f64> = rows.into_iter().flatten().collect();
        let values = Array2::from_shape_vec( (resolution,resolution), data).map_err( |e| invalid_zone_input!("{}", e))?;
        Ok( ProbabilityGrid { bounds, values } )
    }

    pub fn bounds (&self)->&GridBounds { &self.bounds }
    pub fn values (&self)->&Array2<f64> { &self.values }

    pub fn nrows (&self)->usize { self.values.nrows() }
    pub fn ncols (&self)->usize { self.values.ncols() }

    pub fn lon_axis (&self)->Vec<f64> { linspace( self.bounds.west, self.bounds.east, self.ncols()) }
    pub fn lat_axis (&self)->Vec<f64> { linspace( self.bounds.south, self.bounds.north, self.nrows()) }

    /// node spacing in degrees (dlon,dlat)
    pub fn spacing (&self)->(f64,f64) {
        ( self.bounds.width() / (self.ncols() - 1) as f64, self.bounds.height() / (self.nrows() - 1) as f64 )
    }

    /// (lon,lat) of node (row,col)
    pub fn node_position (&self, row: usize, col: usize)->LonLat {
        let (dlon,dlat) = self.spacing();
        ( self.bounds.west + col as f64 * dlon, self.bounds.south + row as f64 * dlat )
    }

    pub fn sum (&self)->f64 { self.values.sum() }

    pub fn is_normalized (&self, eps: f64)->bool {
        (self.sum() - 1.0).abs() <= eps
    }

    /// scale values so that they sum to 1. Fails for all-zero or non-finite sums
    pub fn normalize (&mut self)->Result<()> {
        let sum = self.sum();
        if !(sum.is_finite() && sum > 0.0) {
            return Err( degenerate_field!("cannot normalize grid with sum {}", sum))
        }
        self.values.mapv_inplace( |v| v / sum);
        Ok(())
    }

    pub fn normalized (mut self)->Result<Self> {
        self.normalize()?;
        Ok(self)
    }

    /// (row,col,value) of the first maximum
    pub fn peak (&self)->Option<(usize,usize,f64)> {
        let mut peak: Option<(usize,usize,f64)> = None;
        for ((r,c), v) in self.values.indexed_iter() {
            if peak.map_or( true, |(_,_,pv)| *v > pv) {
                peak = Some((r,c,*v));
            }
        }
        peak
    }

    pub fn peak_position (&self)->Option<LonLat> {
        self.peak().map( |(r,c,_)| self.node_position(r,c))
    }

    /// values scaled so that the peak is 1 (all zero if the grid has no positive value)
    pub fn peak_normalized (&self)->Array2<f64> {
        match self.peak() {
            Some((_,_,max)) if max > 0.0 => self.values.mapv( |v| v / max),
            _ => Array2::zeros( self.values.dim())
        }
    }

    /// value of the node nearest to (lon,lat), None if the position is outside the grid bounds
    pub fn value_at (&self, lon: f64, lat: f64)->Option<f64> {
        if !self.bounds.contains( lon, lat) { return None }
        let (dlon,dlat) = self.spacing();
        let c = ((lon - self.bounds.west) / dlon).round() as usize;
        let r = ((lat - self.bounds.south) / dlat).round() as usize;
        self.values.get( (r.min(self.nrows()-1), c.min(self.ncols()-1))).copied()
    }

    /// element-wise product with another grid of the same shape
    pub fn product (&self, other: &ProbabilityGrid)->Result<Array2<f64>> {
        if self.values.dim() != other.values.dim() {
            return Err( invalid_zone_input!("grid shape mismatch {:?} vs {:?}", self.values.dim(), other.values.dim()))
        }
        Ok( &self.values * &other.values )
    }

    /// sum of node values inside a (lon,lat) polygon. Nodes inside holes do not count
    pub fn mass_inside (&self, polygon: &Polygon<f64>)->f64 {
        self.fold_inside( polygon, 0.0, |acc,v| acc + v)
    }

    /// max node value inside a (lon,lat) polygon
    pub fn max_inside (&self, polygon: &Polygon<f64>)->Option<f64> {
        let m = self.fold_inside( polygon, f64::NEG_INFINITY, f64::max);
        if m.is_finite() { Some(m) } else { None }
    }

    fn fold_inside<F> (&self, polygon: &Polygon<f64>, init: f64, f: F)->f64 where F: Fn(f64,f64)->f64 {
        let Some(rect) = polygon.bounding_rect() else { return init };
        let (min, max) = (rect.min(), rect.max());
        let lons = self.lon_axis();
        let lats = self.lat_axis();

        let mut acc = init;
        for (r, lat) in lats.iter().enumerate() {
            if *lat < min.y || *lat > max.y { continue }
            for (c, lon) in lons.iter().enumerate() {
                if *lon < min.x || *lon > max.x { continue }
                if polygon.contains( &Point::new( *lon, *lat)) {
                    acc = f( acc, self.values[[r,c]]);
                }
            }
        }
        acc
    }

    /// all nodes with a positive value as (lon,lat,value)
    pub fn positive_nodes (&self)->Vec<(f64,f64,f64)> {
        let lons = self.lon_axis();
        let lats = self.lat_axis();
        self.values.indexed_iter()
            .filter( |(_,v)| **v > 0.0)
            .map( |((r,c),v)| (lons[c], lats[r], *v))
            .collect()
    }
}

fn check_bounds (bounds: &GridBounds)->Result<()> {
    if !bounds.is_finite() || !(bounds.width() > 0.0) || !(bounds.height() > 0.0) {
        Err( invalid_zone_input!("degenerate grid bounds {:?}", bounds))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace() {
        let v = linspace( 0.0, 1.0, 5);
        assert_eq!( v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!( linspace( 3.0, 4.0, 1), vec![3.0]);
    }

    #[test]
    fn test_value_at() {
        let bounds = GridBounds::new( 0.0, 0.0, 1.0, 1.0);
        let grid = ProbabilityGrid::from_fn( bounds, 11, |lon,lat| lon + 10.0*lat).unwrap();
        assert!( (grid.value_at( 0.31, 0.49).unwrap() - 5.3).abs() < 1e-12);
        assert_eq!( grid.value_at( 1.5, 0.5), None);
    }
}
