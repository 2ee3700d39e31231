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

//! turning probability fields into ranked zone polygons. Extraction is an ordered list of
//! `ZoneStrategy` objects - the first strategy that produces zones wins

use geo::ConvexHull;
use geo_types::{LineString, MultiPoint, Point};
use serde::{Serialize,Deserialize};
use tracing::{debug,warn};

use sar_common::{GeoBounds, geodesy::LonLat, sqrt, TWO_PI};
use crate::{
    grid::{GridBounds, ProbabilityGrid},
    kde::GaussianKde,
    contour::contour_polygons,
    zone::{Zone, ExtractionMethod, PROBABILITY_LEVELS, sort_zones},
};

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    pub levels: Vec<f64>,                 // descending
    pub grid_resolution: usize,           // nodes per dimension
    pub pad_fraction: f64,                // ensemble bbox padding (fraction of extent)
    pub kernel_sigma_padding: f64,        // minimum ensemble padding in kernel sigmas
    pub min_extent: f64,                  // degrees
    pub rectangle_half_sizes: Vec<f64>,   // degrees, one per level
    pub ellipse_vertices: usize,
}

impl Default for ZoneConfig {
    fn default()->Self {
        ZoneConfig {
            levels: PROBABILITY_LEVELS.to_vec(),
            grid_resolution: 100,
            pad_fraction: 0.2,
            kernel_sigma_padding: 3.0,
            min_extent: 0.01,
            rectangle_half_sizes: vec![0.1, 0.2, 0.4, 0.8],
            ellipse_vertices: 20,
        }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct WeightedPoint {
    pub lon: f64,
    pub lat: f64,
    pub weight: f64,
}

/// what strategies extract zones from: an optional normalized grid plus weighted sample points
/// (ensemble points weighted by their density, or grid nodes weighted by their value)
#[derive(Debug,Clone,Default)]
pub struct DensityField {
    pub grid: Option<ProbabilityGrid>,
    pub samples: Vec<WeightedPoint>,
}

impl DensityField {

    /// density field of a point ensemble. If the ensemble does not support a density estimate
    /// (less than 2 points, zero spread) there is no grid and all points get unit weight
    pub fn from_ensemble (points: &[LonLat], config: &ZoneConfig)->Self {
        if points.is_empty() { return DensityField::default() }

        let kde = match GaussianKde::new( points) {
            Ok(kde) => kde,
            Err(e) => {
                warn!("no density estimate for {} points: {}", points.len(), e);
                return DensityField::unweighted( points)
            }
        };

        let grid = kde.grid_bounds( config.pad_fraction, config.kernel_sigma_padding, config.min_extent)
            .and_then( |bounds| match kde.evaluate_grid( bounds, config.grid_resolution) {
                Ok(grid) => Some(grid),
                Err(e) => { warn!("density grid evaluation failed: {}", e); None }
            });

        let weights = kde.evaluate_points( points);
        let samples = points.iter().zip( weights.iter())
            .map( |((lon,lat),w)| WeightedPoint { lon: *lon, lat: *lat, weight: *w })
            .collect();

        DensityField { grid, samples }
    }

    pub fn unweighted (points: &[LonLat])->Self {
        let samples = points.iter().map( |(lon,lat)| WeightedPoint { lon: *lon, lat: *lat, weight: 1.0 }).collect();
        DensityField { grid: None, samples }
    }

    /// a grid field - samples are the positive grid nodes
    pub fn from_grid (grid: ProbabilityGrid)->Self {
        let samples = grid.positive_nodes().into_iter()
            .map( |(lon,lat,weight)| WeightedPoint { lon, lat, weight })
            .collect();
        DensityField { grid: Some(grid), samples }
    }

    pub fn is_empty (&self)->bool {
        self.grid.is_none() && self.samples.is_empty()
    }

    pub fn max_weight (&self)->f64 {
        self.samples.iter().map( |p| p.weight).fold( 0.0, f64::max)
    }

    /// location of the field maximum (grid peak if there is a grid)
    pub fn peak (&self)->Option<LonLat> {
        if let Some(pos) = self.grid.as_ref().and_then( |g| g.peak_position()) {
            return Some(pos)
        }
        self.samples.iter()
            .fold( None, |acc: Option<&WeightedPoint>, p| match acc {
                Some(best) if best.weight >= p.weight => Some(best),
                _ => Some(p)
            })
            .map( |p| (p.lon, p.lat))
    }
}

/// one way of turning a density field into zones. Returns None if the strategy is not applicable
/// to the field or did not produce any valid zone
pub trait ZoneStrategy: Send + Sync {
    fn name (&self)->&'static str;
    fn extract (&self, field: &DensityField, levels: &[f64])->Option<Vec<Zone>>;
}

fn non_empty (zones: Vec<Zone>)->Option<Vec<Zone>> {
    if zones.is_empty() { None } else { Some(zones) }
}

fn lon_lats (ls: &LineString<f64>)->Vec<LonLat> {
    ls.coords().map( |c| (c.x, c.y)).collect()
}

fn clamp_to_bounds (ring: &[LonLat], bounds: &GeoBounds)->Vec<LonLat> {
    let mut clamped: Vec<LonLat> = Vec::with_capacity( ring.len());
    for (lon,lat) in ring {
        let p = ( lon.clamp( bounds.west, bounds.east), lat.clamp( bounds.south, bounds.north) );
        if clamped.last() != Some(&p) { clamped.push(p) }
    }
    clamped
}

/* #region contour ******************************************************************************/

/// iso-density polygons of the peak-normalized grid. Regions below a level that are enclosed by
/// a region above it become holes of the enclosing zone
pub struct ContourStrategy;

impl ZoneStrategy for ContourStrategy {
    fn name (&self)->&'static str { "contour" }

    fn extract (&self, field: &DensityField, levels: &[f64])->Option<Vec<Zone>> {
        let grid = field.grid.as_ref()?;
        let relative = grid.peak_normalized();
        let rel_grid = ProbabilityGrid::new( *grid.bounds(), relative.clone()).ok()?;

        let contours = match contour_polygons( &relative, grid.bounds(), levels) {
            Ok(contours) => contours,
            Err(e) => {
                warn!("contouring failed: {}", e);
                return None
            }
        };

        let mut zones = Vec::new();
        for (level, polygons) in contours {
            for polygon in polygons {
                // mass and peak are computed on the unclamped polygon so that boundary nodes count as inside
                let mass = grid.mass_inside( &polygon);
                let peak = rel_grid.max_inside( &polygon);
                if let Some(p) = peak.filter( |p| *p < level) {
                    debug!("skipping contour polygon with peak {} below level {}", p, level);
                    continue
                }

                let exterior = clamp_to_bounds( &lon_lats( polygon.exterior()), grid.bounds());
                let holes: Vec<Vec<LonLat>> = polygon.interiors().iter()
                    .map( |h| clamp_to_bounds( &lon_lats( h), grid.bounds()))
                    .collect();

                match Zone::new( exterior, level, ExtractionMethod::Contour) {
                    Ok(zone) => {
                        let zone = zone.with_holes( holes).with_mass( mass);
                        zones.push( if let Some(peak) = peak { zone.with_peak( peak) } else { zone });
                    }
                    Err(e) => debug!("skipping contour polygon at level {}: {}", level, e)
                }
            }
        }
        non_empty( zones)
    }
}

/* #endregion contour */

/* #region hull *********************************************************************************/

/// convex hull of all sample points whose weight is at least `level` times the max weight
pub struct HullStrategy;

impl ZoneStrategy for HullStrategy {
    fn name (&self)->&'static str { "convex_hull" }

    fn extract (&self, field: &DensityField, levels: &[f64])->Option<Vec<Zone>> {
        let max_weight = field.max_weight();
        if !(max_weight > 0.0) { return None }
        let total_weight: f64 = field.samples.iter().map( |p| p.weight).sum();

        let mut zones = Vec::new();
        for level in levels {
            let threshold = level * max_weight;
            let selected: Vec<&WeightedPoint> = field.samples.iter().filter( |p| p.weight >= threshold).collect();
            if selected.len() < 3 { continue }

            let mp: MultiPoint<f64> = selected.iter().map( |p| Point::new( p.lon, p.lat)).collect();
            let hull = mp.convex_hull();
            let ring: Vec<LonLat> = hull.exterior().coords().map( |c| (c.x, c.y)).collect();

            match Zone::new( ring, *level, ExtractionMethod::ConvexHull) {
                Ok(zone) if !(zone.area_km2 > 0.0) => debug!("collinear hull at level {}", level),
                Ok(zone) => {
                    let mass = selected.iter().map( |p| p.weight).sum::<f64>() / total_weight;
                    let peak = selected.iter().map( |p| p.weight).fold( 0.0, f64::max) / max_weight;
                    zones.push( zone.with_mass( mass).with_peak( peak));
                }
                Err(e) => debug!("no hull zone at level {}: {}", level, e)
            }
        }
        non_empty( zones)
    }
}

/* #endregion hull */

/* #region ellipse ******************************************************************************/

/// axis aligned ellipses around the weighted sample mean with radii std/level
pub struct EllipseStrategy {
    pub n_vertices: usize,
}

impl ZoneStrategy for EllipseStrategy {
    fn name (&self)->&'static str { "ellipse" }

    fn extract (&self, field: &DensityField, levels: &[f64])->Option<Vec<Zone>> {
        let wsum: f64 = field.samples.iter().map( |p| p.weight).sum();
        if !(wsum > 0.0) || self.n_vertices < 3 { return None }

        let mlon = field.samples.iter().map( |p| p.weight * p.lon).sum::<f64>() / wsum;
        let mlat = field.samples.iter().map( |p| p.weight * p.lat).sum::<f64>() / wsum;
        let slon = sqrt( field.samples.iter().map( |p| p.weight * (p.lon - mlon).powi(2)).sum::<f64>() / wsum);
        let slat = sqrt( field.samples.iter().map( |p| p.weight * (p.lat - mlat).powi(2)).sum::<f64>() / wsum);

        if !(slon > 1e-12 && slat > 1e-12) {
            debug!("zero spread ensemble, no ellipse zones");
            return None
        }

        let globe = GeoBounds::globe();
        let mut zones = Vec::new();
        for level in levels {
            let f = 1.0 / level;
            let ring: Vec<LonLat> = (0..self.n_vertices).map( |i| {
                let a = TWO_PI * i as f64 / self.n_vertices as f64;
                ( mlon + f * slon * a.cos(), mlat + f * slat * a.sin() )
            }).collect();

            match Zone::new( clamp_to_bounds( &ring, &globe), *level, ExtractionMethod::Ellipse) {
                Ok(zone) => zones.push( zone),
                Err(e) => debug!("no ellipse zone at level {}: {}", level, e)
            }
        }
        non_empty( zones)
    }
}

/* #endregion ellipse */

/* #region rectangle ****************************************************************************/

/// concentric squares around the field peak - the last resort that only needs a peak location
pub struct RectangleStrategy {
    pub half_sizes: Vec<f64>,  // degrees, matched with levels
}

impl ZoneStrategy for RectangleStrategy {
    fn name (&self)->&'static str { "rectangle" }

    fn extract (&self, field: &DensityField, levels: &[f64])->Option<Vec<Zone>> {
        let (lon,lat) = field.peak()?;
        let globe = GeoBounds::globe();

        let zones: Vec<Zone> = levels.iter().zip( self.half_sizes.iter()).filter_map( |(level,d)| {
            let ring = vec![ (lon - d, lat - d), (lon + d, lat - d), (lon + d, lat + d), (lon - d, lat + d) ];
            Zone::new( clamp_to_bounds( &ring, &globe), *level, ExtractionMethod::Rectangle)
                .map( |z| z.with_peak( 1.0))
                .map_err( |e| debug!("no rectangle zone at level {}: {}", level, e))
                .ok()
        }).collect();

        non_empty( zones)
    }
}

/* #endregion rectangle */

/// runs strategies in order until one produces zones, returns the zones ranked
pub struct ZoneExtractor {
    levels: Vec<f64>,
    strategies: Vec<Box<dyn ZoneStrategy>>,
}

impl ZoneExtractor {
    pub fn new (levels: Vec<f64>, strategies: Vec<Box<dyn ZoneStrategy>>)->Self {
        ZoneExtractor { levels, strategies }
    }

    /// contour -> hull -> ellipse -> rectangle, for point ensembles
    pub fn for_ensemble (config: &ZoneConfig)->Self {
        ZoneExtractor::new( config.levels.clone(), vec![
            Box::new( ContourStrategy),
            Box::new( HullStrategy),
            Box::new( EllipseStrategy { n_vertices: config.ellipse_vertices }),
            Box::new( RectangleStrategy { half_sizes: config.rectangle_half_sizes.clone() }),
        ])
    }

    /// contour -> hull over grid nodes -> rectangle, for posterior grids
    pub fn for_grid (config: &ZoneConfig)->Self {
        ZoneExtractor::new( config.levels.clone(), vec![
            Box::new( ContourStrategy),
            Box::new( HullStrategy),
            Box::new( RectangleStrategy { half_sizes: config.rectangle_half_sizes.clone() }),
        ])
    }

    pub fn strategy_names (&self)->Vec<&'static str> {
        self.strategies.iter().map( |s| s.name()).collect()
    }

    pub fn extract (&self, field: &DensityField)->Vec<Zone> {
        if field.is_empty() { return Vec::new() }

        for strategy in &self.strategies {
            match strategy.extract( field, &self.levels) {
                Some(mut zones) => {
                    debug!("{} strategy produced {} zones", strategy.name(), zones.len());
                    sort_zones( &mut zones);
                    return zones
                }
                None => warn!("{} zone extraction failed, trying next strategy", strategy.name())
            }
        }

        warn!("no zone extraction strategy succeeded");
        Vec::new()
    }
}

/// density field and zones of a point ensemble
pub fn zones_from_ensemble (points: &[LonLat], config: &ZoneConfig)->(DensityField, Vec<Zone>) {
    let field = DensityField::from_ensemble( points, config);
    let zones = ZoneExtractor::for_ensemble( config).extract( &field);
    (field, zones)
}
