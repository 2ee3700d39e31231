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

//! the search engine facade. It wires the flight simulator, the drift ensemble, zone extraction,
//! Bayesian refinement and GeoJSON export together. External data (live weather) is provided by an
//! injected `EnvironmentSource`

use std::path::Path;

use ::geojson::{Feature, FeatureCollection, JsonValue};
use serde::{Serialize,Deserialize};
use serde_json::json;
use tracing::{debug,info,warn};

use sar_common::{
    config::load_ron_config,
    evidence::Evidence,
    telemetry::{Telemetry, Wind}
};
use sar_drift::{DriftConfig, WindDriftModel};
use sar_zones::{Zone, ZoneConfig, geojson::{export_zones, zones_from_features}};
use sar_bayes::{BayesConfig, BayesianUpdateEngine};
use crate::{
    simulation::{MonteCarloSimulator, SimConfig, SimulationSummary, resolve_seed},
    drift_ensemble::{DriftSample, drift_probability},
    errors::{SimError, Result, invalid_sim_input}
};

pub const SIMULATION_METHOD: &str = "monte_carlo_kde";

#[derive(Debug,Clone,Default,Serialize,Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub simulation: SimConfig,
    pub drift: DriftConfig,
    pub zones: ZoneConfig,
    pub bayes: BayesConfig,
}

impl EngineConfig {
    pub fn load<P: AsRef<Path>> (path: P)->Result<Self> {
        Ok( load_ron_config( path)? )
    }
}

/// source of live environmental data
pub trait EnvironmentSource: Send + Sync {
    /// current surface wind at the given position, None if not available
    fn surface_wind (&self, lat: f64, lon: f64)->Option<Wind>;
}

/// no live data - the telemetry wind is used as reported
pub struct NoEnvironment;

impl EnvironmentSource for NoEnvironment {
    fn surface_wind (&self, _lat: f64, _lon: f64)->Option<Wind> { None }
}

/// the same wind everywhere (replay or test data)
pub struct FixedWind(pub Wind);

impl EnvironmentSource for FixedWind {
    fn surface_wind (&self, _lat: f64, _lon: f64)->Option<Wind> { Some(self.0) }
}

#[derive(Debug,Clone)]
pub struct SimulationReport {
    pub summary: SimulationSummary,
    pub drift: Vec<DriftSample>,
    pub geojson: FeatureCollection,
    pub real_time_wind_used: bool,
    pub telemetry: Telemetry,       // as simulated (with substituted wind)
}

#[derive(Debug,Clone)]
pub struct UpdateReport {
    pub zones: Vec<Zone>,
    pub geojson: FeatureCollection,
}

pub struct SearchEngine {
    config: EngineConfig,
    simulator: MonteCarloSimulator,
    drift_model: WindDriftModel,
    bayes: BayesianUpdateEngine,
}

impl SearchEngine {
    pub fn new (config: EngineConfig)->Self {
        let simulator = MonteCarloSimulator::new( config.simulation.clone(), config.zones.clone());
        let drift_model = WindDriftModel::new( config.drift.clone());
        let bayes = BayesianUpdateEngine::new( config.bayes.clone(), &config.zones);
        SearchEngine { config, simulator, drift_model, bayes }
    }

    pub fn from_config_file<P: AsRef<Path>> (path: P)->Result<Self> {
        Ok( SearchEngine::new( EngineConfig::load( path)?))
    }

    pub fn config (&self)->&EngineConfig { &self.config }

    /// telemetry with live surface wind substituted if the source has a valid one
    pub fn effective_telemetry (&self, telemetry: &Telemetry, env: &dyn EnvironmentSource)->(Telemetry,bool) {
        match env.surface_wind( telemetry.lat, telemetry.lon) {
            Some(wind) => match wind.validate() {
                Ok(()) => {
                    debug!("using live surface wind {:.1}kn @ {:.0}", wind.speed, wind.direction);
                    (telemetry.with_wind( wind), true)
                }
                Err(e) => {
                    warn!("ignoring invalid live wind: {}", e);
                    (telemetry.clone(), false)
                }
            }
            None => (telemetry.clone(), false)
        }
    }

    /// simulate with the configured number of flight trials
    pub fn simulate (&self, telemetry: &Telemetry, env: &dyn EnvironmentSource, seed: Option<u64>)->Result<SimulationReport> {
        self.simulate_n( telemetry, env, self.config.simulation.n_simulations, seed)
    }

    pub fn simulate_n (&self, telemetry: &Telemetry, env: &dyn EnvironmentSource, n_simulations: usize, seed: Option<u64>)->Result<SimulationReport> {
        telemetry.validate()?;
        let (telemetry, real_time_wind_used) = self.effective_telemetry( telemetry, env);
        let seed = resolve_seed( seed);

        let summary = self.simulator.run_simulation( &telemetry, n_simulations, Some(seed))?;

        // drift streams start after the flight streams so that both ensembles stay independent
        let n_drift = self.config.simulation.drift_simulations;
        let drift = match drift_probability( &self.drift_model, &telemetry, n_drift, seed.wrapping_add( n_simulations as u64), &self.config.simulation) {
            Ok(drift) => drift,
            Err(e) => {
                warn!("drift ensemble failed: {}", e);
                Vec::new()
            }
        };

        let metadata = json!({
            "method": SIMULATION_METHOD,
            "iterations": n_simulations,
            "drift_simulations": n_drift,
            "input_parameters": serde_json::to_value( &telemetry).unwrap_or(JsonValue::Null),
            "real_time_data_used": real_time_wind_used,
            "seed": seed,
        });
        let geojson = export_zones( &summary.zones, Some(metadata));

        info!("simulation produced {} zones, {} drift samples", summary.zone_count, drift.len());
        Ok( SimulationReport { summary, drift, geojson, real_time_wind_used, telemetry } )
    }

    /// refine prior zones (GeoJSON Polygon features) with a new evidence observation. Invalid
    /// evidence or priors are errors, numerical problems during the update keep the prior zones
    pub fn update (&self, features: &[Feature], evidence: &Evidence, metadata: Option<JsonValue>)->Result<UpdateReport> {
        evidence.validate()?;
        let prior = zones_from_features( features)?;
        let zones = self.bayes.update_zones( &prior, evidence);

        let metadata = metadata.unwrap_or_else( || json!({
            "method": "bayesian_update",
            "evidence_type": evidence.evidence_type.to_string(),
            "confidence": evidence.confidence,
            "reliability": evidence.reliability,
            "prior_zones": prior.len(),
        }));
        let geojson = export_zones( &zones, Some(metadata));

        Ok( UpdateReport { zones, geojson } )
    }
}

impl Default for SearchEngine {
    fn default()->Self { SearchEngine::new( EngineConfig::default()) }
}
