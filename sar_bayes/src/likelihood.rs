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

//! spatial likelihood of evidence observations. Distances are planar degrees between the
//! evidence position and the grid node. Likelihoods are evaluated in log space and shifted by
//! their grid maximum before exponentiation, so sharp evidence far from every grid node still
//! yields a grid that peaks at the nodes closest to the evidence

use rayon::prelude::*;
use tracing::warn;

use sar_common::{evidence::{Evidence, EvidenceType}, geodesy::planar_distance_deg, pow2};
use sar_zones::{GridBounds, ProbabilityGrid, grid::linspace};
use crate::errors::Result;

/// Gaussian spread in degrees at full confidence (lower confidence widens it as sigma/confidence)
pub const DEBRIS_SIGMA: f64 = 0.05;
pub const SIGNAL_SIGMA: f64 = 0.10;
pub const SIGHTING_SIGMA: f64 = 0.20;

/// negative evidence (area searched without findings) suppresses up to this fraction around the location
pub const NEGATIVE_SIGMA: f64 = 0.10;
pub const NEGATIVE_SUPPRESSION: f64 = 0.8;

fn log_gaussian (d: f64, sigma: f64)->f64 {
    -0.5 * pow2(d / sigma)
}

/// true if the evidence carries no spatial information
pub fn is_flat (evidence: &Evidence)->bool {
    evidence.evidence_type == EvidenceType::Unknown || evidence.confidence <= 0.0
}

/// log of the raw (unblended, unnormalized) likelihood of the evidence at (lon,lat)
pub fn log_likelihood_at (evidence: &Evidence, lon: f64, lat: f64)->f64 {
    if is_flat( evidence) { return 0.0 }

    let d = planar_distance_deg( lon, lat, evidence.lon, evidence.lat);
    let c = evidence.confidence;

    match evidence.evidence_type {
        EvidenceType::Debris => log_gaussian( d, DEBRIS_SIGMA / c),
        EvidenceType::Signal => log_gaussian( d, SIGNAL_SIGMA / c),
        EvidenceType::Sighting => log_gaussian( d, SIGHTING_SIGMA / c),
        EvidenceType::Negative => (1.0 - NEGATIVE_SUPPRESSION * log_gaussian( d, NEGATIVE_SIGMA).exp()).ln(),
        EvidenceType::Unknown => 0.0,
    }
}

/// raw likelihood of the evidence at (lon,lat). Underflows to 0 far away from sharp evidence
pub fn likelihood_at (evidence: &Evidence, lon: f64, lat: f64)->f64 {
    log_likelihood_at( evidence, lon, lat).exp()
}

/// reliability blend: an unreliable observation pulls the likelihood towards 1 (no information)
#[inline]
pub fn blend_reliability (l: f64, reliability: f64)->f64 {
    reliability * l + (1.0 - reliability)
}

/// `ln( blend_reliability( exp(log_l), reliability))` without underflow of `exp(log_l)`
pub fn log_blend_reliability (log_l: f64, reliability: f64)->f64 {
    if reliability >= 1.0 { return log_l }
    if reliability <= 0.0 { return 0.0 }

    let a = reliability.ln() + log_l;
    let b = (1.0 - reliability).ln();
    let m = a.max(b);
    m + ((a - m).exp() + (b - m).exp()).ln()
}

/// normalized likelihood grid. Log likelihoods are shifted by their maximum over all nodes, i.e. the
/// node(s) closest to the evidence get 1 before normalization. Only a grid without any finite log
/// likelihood is replaced by a flat one
pub fn likelihood_grid (evidence: &Evidence, bounds: GridBounds, resolution: usize)->Result<ProbabilityGrid> {
    let r = evidence.reliability;
    let log_l = |lon: f64, lat: f64| log_blend_reliability( log_likelihood_at( evidence, lon, lat), r);

    let lons = linspace( bounds.west, bounds.east, resolution);
    let lats = linspace( bounds.south, bounds.north, resolution);
    let max_log = lats.par_iter()
        .map( |lat| lons.iter().map( |lon| log_l( *lon, *lat)).fold( f64::NEG_INFINITY, f64::max))
        .reduce( || f64::NEG_INFINITY, f64::max);

    if !max_log.is_finite() {
        warn!("{} likelihood is not finite on grid, using flat likelihood", evidence.evidence_type);
        return Ok( ProbabilityGrid::uniform( bounds, resolution)? )
    }

    let grid = ProbabilityGrid::from_fn( bounds, resolution, |lon,lat| (log_l( lon, lat) - max_log).exp())?;
    match grid.normalized() {
        Ok(grid) => Ok(grid),
        Err(e) => {
            warn!("{} likelihood vanishes on grid, using flat likelihood", evidence.evidence_type);
            Ok( ProbabilityGrid::uniform( bounds, resolution)? )
        }
    }
}
