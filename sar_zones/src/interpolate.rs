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

//! piecewise-linear scattered data interpolation over a Delaunay triangulation (`spade`), used to
//! turn prior zones back into a probability grid

use geo::Contains;
use geo_types::{Point, Polygon};
use spade::{DelaunayTriangulation, FloatTriangulation, HasPosition, Point2, Triangulation as _};
use tracing::{debug,warn};

use crate::{grid::{GridBounds, ProbabilityGrid}, zone::Zone, errors::{ZoneError, Result}};

#[derive(Debug,Clone,Copy)]
struct Sample {
    position: Point2<f64>,
    value: f64,
}

impl HasPosition for Sample {
    type Scalar = f64;
    fn position (&self)->Point2<f64> { self.position }
}

/// Delaunay triangulation of scattered (lon,lat) samples with associated values
pub struct Triangulation {
    delaunay: DelaunayTriangulation<Sample>,
}

impl Triangulation {

    /// triangulate (lon,lat,value) samples. Non-finite samples are ignored, duplicate positions are merged.
    /// Returns None if the positions do not span a triangle (less than 3 distinct or collinear positions)
    pub fn new (samples: &[(f64,f64,f64)])->Option<Self> {
        let vertices: Vec<Sample> = samples.iter()
            .filter( |(x,y,v)| x.is_finite() && y.is_finite() && v.is_finite())
            .map( |(x,y,v)| Sample { position: Point2::new( *x, *y), value: *v })
            .collect();

        let delaunay = match DelaunayTriangulation::<Sample>::bulk_load( vertices) {
            Ok(delaunay) => delaunay,
            Err(e) => {
                warn!("triangulation failed: {:?}", e);
                return None
            }
        };

        if delaunay.num_inner_faces() == 0 { None } else { Some( Triangulation { delaunay }) }
    }

    pub fn n_triangles (&self)->usize { self.delaunay.num_inner_faces() }

    /// linear interpolation inside the triangle that contains (x,y), None outside of the convex hull
    pub fn interpolate (&self, x: f64, y: f64)->Option<f64> {
        self.delaunay.barycentric().interpolate( |v| v.data().value, Point2::new( x, y))
    }
}

/// rasterize zones onto a normalized grid. Zone centroids carry the zone probability and are linearly
/// interpolated over their triangulation, nodes outside of the centroid hull get `background_fill`.
/// If the centroids cannot be triangulated (e.g. concentric zones) each node gets the max probability
/// of the zones that contain it. No zones yield a uniform grid
pub fn rasterize_zones (zones: &[Zone], bounds: GridBounds, resolution: usize, background_fill: f64)->Result<ProbabilityGrid> {
    if zones.is_empty() {
        return ProbabilityGrid::uniform( bounds, resolution)
    }

    let samples: Vec<(f64,f64,f64)> = zones.iter()
        .filter_map( |z| z.centroid().map( |(lon,lat)| (lon, lat, z.probability)))
        .collect();

    let grid = match Triangulation::new( &samples) {
        Some(tri) => {
            debug!("rasterizing {} zone centroids over {} triangles", samples.len(), tri.n_triangles());
            ProbabilityGrid::from_fn( bounds, resolution, |lon,lat| tri.interpolate( lon, lat).unwrap_or( background_fill))?
        }
        None => {
            debug!("zone centroids not triangulable, rasterizing {} zones by containment", zones.len());
            let polygons: Vec<(Polygon<f64>,f64)> = zones.iter().map( |z| (z.to_polygon(), z.probability)).collect();
            ProbabilityGrid::from_fn( bounds, resolution, |lon,lat| {
                let p = Point::new( lon, lat);
                polygons.iter()
                    .filter( |(poly,_)| poly.contains( &p))
                    .map( |(_,prob)| *prob)
                    .fold( background_fill, f64::max)
            })?
        }
    };

    grid.normalized()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_interpolation() {
        // a linear function is reproduced exactly inside the hull
        let f = |x: f64, y: f64| 2.0*x + 3.0*y + 1.0;
        let samples: Vec<(f64,f64,f64)> = [ (0.0,0.0), (1.0,0.0), (0.0,1.0), (1.0,1.0), (0.4,0.6) ]
            .iter().map( |(x,y)| (*x, *y, f(*x,*y))).collect();

        let tri = Triangulation::new( &samples).unwrap();
        assert!( tri.n_triangles() >= 4);

        let v = tri.interpolate( 0.25, 0.5).unwrap();
        assert!( (v - f(0.25,0.5)).abs() < 1e-9);
        assert!( tri.interpolate( 1.5, 0.5).is_none());
    }

    #[test]
    fn test_degenerate_input() {
        assert!( Triangulation::new( &[(0.0,0.0,1.0), (1.0,1.0,1.0)]).is_none());
        assert!( Triangulation::new( &[(0.0,0.0,1.0), (1.0,1.0,1.0), (2.0,2.0,1.0)]).is_none());
        assert!( Triangulation::new( &[(0.0,0.0,1.0), (0.0,0.0,0.5), (1.0,0.0,1.0)]).is_none());
    }
}
