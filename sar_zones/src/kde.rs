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

//! bivariate Gaussian kernel density estimate over (lon,lat) degrees

use nalgebra::{Matrix2, Vector2};
use rayon::prelude::*;

use sar_common::{GeoBounds, geodesy::LonLat, PI, sqrt};
use crate::{grid::{GridBounds, ProbabilityGrid}, errors::{ZoneError, Result, degenerate_field, invalid_zone_input}};

/// Gaussian KDE with Scott's rule bandwidth (factor n^(-1/6) for 2 dimensions) applied to the
/// unbiased sample covariance
#[derive(Debug,Clone)]
pub struct GaussianKde {
    points: Vec<Vector2<f64>>,
    covariance: Matrix2<f64>,     // kernel covariance (already scaled by the bandwidth factor)
    inv_covariance: Matrix2<f64>,
    norm: f64,                    // 1 / (n * 2π * sqrt(det))
}

impl GaussianKde {
    pub fn new (points: &[LonLat])->Result<Self> {
        let n = points.len();
        if n < 2 {
            return Err( degenerate_field!("need at least 2 points for density estimate, got {}", n))
        }
        if points.iter().any( |(x,y)| !x.is_finite() || !y.is_finite()) {
            return Err( invalid_zone_input!("non-finite ensemble point"))
        }

        let pts: Vec<Vector2<f64>> = points.iter().map( |(x,y)| Vector2::new( *x, *y)).collect();
        let mean = pts.iter().fold( Vector2::zeros(), |acc,p| acc + p) / n as f64;
        let data_cov = pts.iter().fold( Matrix2::zeros(), |acc,p| {
            let d = p - mean;
            acc + d * d.transpose()
        }) / (n - 1) as f64;

        let factor = (n as f64).powf( -1.0/6.0);
        let covariance = data_cov * (factor * factor);

        let det = covariance.determinant();
        let scale = covariance[(0,0)] * covariance[(1,1)];
        if !(det.is_finite() && scale > 0.0 && det > 1e-12 * scale) {
            return Err( degenerate_field!("singular ensemble covariance (det={})", det))
        }
        let inv_covariance = covariance.try_inverse().ok_or_else( || degenerate_field!("ensemble covariance not invertible"))?;
        let norm = 1.0 / (n as f64 * 2.0 * PI * sqrt(det));

        Ok( GaussianKde { points: pts, covariance, inv_covariance, norm } )
    }

    pub fn len (&self)->usize { self.points.len() }

    pub fn covariance (&self)->&Matrix2<f64> { &self.covariance }

    /// kernel standard deviations (lon,lat) in degrees
    pub fn kernel_sigma (&self)->(f64,f64) {
        ( sqrt(self.covariance[(0,0)]), sqrt(self.covariance[(1,1)]) )
    }

    /// density at (lon,lat)
    pub fn evaluate (&self, lon: f64, lat: f64)->f64 {
        let q = Vector2::new( lon, lat);
        let sum: f64 = self.points.iter().map( |p| {
            let d = q - p;
            (-0.5 * d.dot( &(self.inv_covariance * d))).exp()
        }).sum();
        sum * self.norm
    }

    /// densities at each of the given points, computed in parallel
    pub fn evaluate_points (&self, points: &[LonLat])->Vec<f64> {
        points.par_iter().map( |(lon,lat)| self.evaluate( *lon, *lat)).collect()
    }

    /// density sampled on a `resolution`x`resolution` node grid, normalized to sum 1
    pub fn evaluate_grid (&self, bounds: GridBounds, resolution: usize)->Result<ProbabilityGrid> {
        ProbabilityGrid::from_fn( bounds, resolution, |lon,lat| self.evaluate( lon, lat))?.normalized()
    }

    /// grid bounds that cover the points plus max(`pad_fraction` of their extent, `n_sigma` kernel sigmas),
    /// at least `min_extent` degrees wide/high and clamped to the globe
    pub fn grid_bounds (&self, pad_fraction: f64, n_sigma: f64, min_extent: f64)->Option<GridBounds> {
        let (sx,sy) = self.kernel_sigma();
        ensemble_bounds( self.points.iter().map( |p| (p.x, p.y)), pad_fraction, (n_sigma*sx, n_sigma*sy), min_extent)
    }
}

/// padded, non-degenerate bounds of a point set. `min_pad` is the minimum (lon,lat) padding in degrees
pub fn ensemble_bounds<I> (points: I, pad_fraction: f64, min_pad: (f64,f64), min_extent: f64)->Option<GridBounds> where I: IntoIterator<Item=LonLat> {
    let bbox = GeoBounds::from_lon_lats( points)?;
    let dlon = (bbox.width() * pad_fraction).max( min_pad.0);
    let dlat = (bbox.height() * pad_fraction).max( min_pad.1);
    Some( bbox.padded_by( dlon, dlat).with_min_extent( min_extent).clamped_to_globe())
}
