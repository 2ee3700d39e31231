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

//! grid based Bayesian refinement of search zones. Prior zones are rasterized onto a grid,
//! multiplied with the likelihood of a new evidence observation and the normalized posterior
//! is turned back into ranked zones

use chrono::Utc;
use serde::{Serialize,Deserialize};
use tracing::{debug,info,warn};

use sar_common::{GeoBounds, evidence::Evidence};
use sar_zones::{
    DensityField, GridBounds, ProbabilityGrid, Zone, ZoneConfig, ZoneExtractor,
    interpolate::rasterize_zones
};

pub mod errors;
pub mod likelihood;

pub use errors::{BayesError,Result};
use errors::invalid_bayes_input;
use likelihood::likelihood_grid;

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct BayesConfig {
    pub grid_resolution: usize,   // nodes per dimension
    pub pad_fraction: f64,        // padding of the prior zone bounds
    pub background_fill: f64,     // prior value outside of the zone centroid hull
    pub min_extent: f64,          // degrees
}

impl Default for BayesConfig {
    fn default()->Self {
        BayesConfig {
            grid_resolution: 100,
            pad_fraction: 0.2,
            background_fill: 0.1,
            min_extent: 0.01,
        }
    }
}

/// all intermediate grids of an update, plus the resulting zones
#[derive(Debug,Clone)]
pub struct BayesUpdate {
    pub bounds: GridBounds,
    pub prior: ProbabilityGrid,
    pub likelihood: ProbabilityGrid,
    pub posterior: ProbabilityGrid,
    pub zones: Vec<Zone>,
}

/// posterior = normalize(likelihood * prior). If the evidence has zero probability under the prior
/// (product sums to zero or is not finite) the normalized prior is returned
pub fn posterior_grid (prior: &ProbabilityGrid, likelihood: &ProbabilityGrid)->Result<ProbabilityGrid> {
    let product = prior.product( likelihood)?;
    let evidence_probability = product.sum();

    if evidence_probability.is_finite() && evidence_probability > 0.0 {
        Ok( ProbabilityGrid::new( *prior.bounds(), product)?.normalized()? )
    } else {
        warn!("evidence probability is {}, keeping prior", evidence_probability);
        Ok( prior.clone().normalized()? )
    }
}

pub struct BayesianUpdateEngine {
    config: BayesConfig,
    extractor: ZoneExtractor,
}

impl BayesianUpdateEngine {
    pub fn new (config: BayesConfig, zone_config: &ZoneConfig)->Self {
        BayesianUpdateEngine { config, extractor: ZoneExtractor::for_grid( zone_config) }
    }

    pub fn config (&self)->&BayesConfig { &self.config }

    /// bounds of all prior ring vertices (grown to include the evidence location), padded per dimension
    /// and clamped to the valid range. Without prior zones this is the whole globe
    pub fn update_bounds (&self, prior_zones: &[Zone], evidence: &Evidence)->GridBounds {
        let vertices = prior_zones.iter().flat_map( |z| z.ring().iter().copied());
        match GeoBounds::from_lon_lats( vertices) {
            Some(bbox) => {
                bbox.expanded_to( evidence.lon, evidence.lat)
                    .padded( self.config.pad_fraction)
                    .with_min_extent( self.config.min_extent)
                    .clamped_to_globe()
            }
            None => GeoBounds::globe()
        }
    }

    /// run a full update. Errors are returned for invalid evidence or numerically unusable grids
    pub fn update (&self, prior_zones: &[Zone], evidence: &Evidence)->Result<BayesUpdate> {
        evidence.validate()?;
        let res = self.config.grid_resolution;
        if res < 2 {
            return Err( invalid_bayes_input!("grid resolution too small: {}", res))
        }

        let bounds = self.update_bounds( prior_zones, evidence);
        debug!("update bounds {:?} for {} prior zones", bounds, prior_zones.len());

        let prior = rasterize_zones( prior_zones, bounds, res, self.config.background_fill)?;
        let likelihood = likelihood_grid( evidence, bounds, res)?;
        let posterior = posterior_grid( &prior, &likelihood)?;

        let created_at = evidence.timestamp.unwrap_or_else( Utc::now);
        let zones: Vec<Zone> = self.extractor.extract( &DensityField::from_grid( posterior.clone())).into_iter()
            .map( |z| z.with_evidence( evidence.evidence_type, evidence.confidence).with_created_at( created_at))
            .collect();

        info!("Bayesian update with {} evidence produced {} zones", evidence.evidence_type, zones.len());
        Ok( BayesUpdate { bounds, prior, likelihood, posterior, zones } )
    }

    /// never failing update - if anything goes wrong (or no zone can be extracted) the prior zones are returned
    pub fn update_zones (&self, prior_zones: &[Zone], evidence: &Evidence)->Vec<Zone> {
        match self.update( prior_zones, evidence) {
            Ok(update) if !update.zones.is_empty() => update.zones,
            Ok(_) => {
                warn!("Bayesian update produced no zones, keeping prior");
                prior_zones.to_vec()
            }
            Err(e) => {
                warn!("Bayesian update failed: {}, keeping prior", e);
                prior_zones.to_vec()
            }
        }
    }
}

impl Default for BayesianUpdateEngine {
    fn default()->Self {
        BayesianUpdateEngine::new( BayesConfig::default(), &ZoneConfig::default())
    }
}
