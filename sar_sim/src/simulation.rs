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

use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use serde::{Serialize,Deserialize};
use tracing::{debug,info,warn};

use sar_common::{
    angle::normalize_360,
    geo_constants::METERS_PER_DEGREE,
    telemetry::Telemetry,
    cos, rad
};
use sar_zones::{Zone, ZoneConfig, zones_from_ensemble};
use crate::{
    flight::{FlightLeg, fuel_endurance_hours},
    errors::{SimError, Result, invalid_sim_input}
};

/// standard deviations of the per-trial perturbations. All zero reproduces the plain leg model
/// where only the start position is uncertain
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct Perturbation {
    pub heading: f64,         // degrees
    pub airspeed: f64,        // fraction of airspeed
    pub fuel: f64,            // fraction of fuel
    pub wind_speed: f64,      // fraction of wind speed
    pub wind_direction: f64,  // degrees
}

impl Default for Perturbation {
    fn default()->Self {
        Perturbation { heading: 2.0, airspeed: 0.05, fuel: 0.05, wind_speed: 0.2, wind_direction: 10.0 }
    }
}

impl Perturbation {
    pub fn none ()->Self {
        Perturbation { heading: 0.0, airspeed: 0.0, fuel: 0.0, wind_speed: 0.0, wind_direction: 0.0 }
    }
}

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub n_simulations: usize,
    pub drift_simulations: usize,

    pub min_position_sigma: f64,        // meters
    pub position_sigma_per_foot: f64,   // start position sigma grows with altitude (meters per foot)

    pub fuel_density: f64,              // kg/l
    pub fuel_flow_rate: f64,            // kg/s

    pub perturbation: Perturbation,
    pub drift_perturbation: Perturbation, // only the wind components are used

    pub primary_zone_threshold: f64,    // zones above this probability count as primary search zones
}

impl Default for SimConfig {
    fn default()->Self {
        SimConfig {
            n_simulations: 2000,
            drift_simulations: 500,
            min_position_sigma: 100.0,
            position_sigma_per_foot: 0.01,
            fuel_density: 0.8,
            fuel_flow_rate: 0.8,
            perturbation: Perturbation::default(),
            drift_perturbation: Perturbation { heading: 0.0, airspeed: 0.0, fuel: 0.0, wind_speed: 0.2, wind_direction: 10.0 },
            primary_zone_threshold: 0.7,
        }
    }
}

/// one ensemble member
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoSample {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct SimulationSummary {
    pub zones: Vec<Zone>,
    pub points: Vec<GeoSample>,
    pub zone_count: usize,
    pub max_probability: f64,
    pub total_area_km2: f64,
    pub primary_search_zones: usize,
    pub fuel_endurance_hours: f64,
    pub position_uncertainty_nm: f64,
    pub n_simulations: usize,
    pub seed: u64,
}

/// Gaussian noise sources of one simulation run. Zero sigmas yield exact zeros
struct Noise {
    lat: Normal<f64>,
    lon: Normal<f64>,
    heading: Normal<f64>,
    airspeed: Normal<f64>,
    fuel: Normal<f64>,
    wind_speed: Normal<f64>,
    wind_direction: Normal<f64>,
}

fn normal (sigma: f64, what: &str)->Result<Normal<f64>> {
    Normal::new( 0.0, sigma).map_err( |e| invalid_sim_input!("invalid {} sigma {}: {}", what, sigma, e))
}

impl Noise {
    fn new (sigma_lat: f64, sigma_lon: f64, p: &Perturbation)->Result<Self> {
        Ok( Noise {
            lat: normal( sigma_lat, "latitude")?,
            lon: normal( sigma_lon, "longitude")?,
            heading: normal( p.heading, "heading")?,
            airspeed: normal( p.airspeed, "airspeed")?,
            fuel: normal( p.fuel, "fuel")?,
            wind_speed: normal( p.wind_speed, "wind speed")?,
            wind_direction: normal( p.wind_direction, "wind direction")?,
        })
    }

    fn sample_leg (&self, t: &Telemetry, rng: &mut StdRng)->FlightLeg {
        FlightLeg {
            lat: t.lat + self.lat.sample(rng),
            lon: t.lon + self.lon.sample(rng),
            heading: normalize_360( t.heading + self.heading.sample(rng)),
            airspeed: (t.speed * (1.0 + self.airspeed.sample(rng))).max(0.0),
            wind_speed: (t.wind.speed * (1.0 + self.wind_speed.sample(rng))).max(0.0),
            wind_direction: normalize_360( t.wind.direction + self.wind_direction.sample(rng)),
            fuel: (t.fuel * (1.0 + self.fuel.sample(rng))).max(0.0),
            time_since_contact: t.time_since_contact,
        }
    }
}

/// draw a fresh seed if none was given
pub fn resolve_seed (seed: Option<u64>)->u64 {
    seed.unwrap_or_else( || rand::rng().random())
}

pub struct MonteCarloSimulator {
    config: SimConfig,
    zone_config: ZoneConfig,
}

impl MonteCarloSimulator {
    pub fn new (config: SimConfig, zone_config: ZoneConfig)->Self {
        MonteCarloSimulator { config, zone_config }
    }

    pub fn config (&self)->&SimConfig { &self.config }

    /// start position sigma in meters
    pub fn position_sigma (&self, altitude_ft: f64)->f64 {
        self.config.min_position_sigma.max( altitude_ft * self.config.position_sigma_per_foot)
    }

    /// terminal positions of `n` independent flight legs. Trial `i` uses its own `StdRng` seeded with
    /// `seed + i`, hence the result does not depend on how trials are scheduled
    pub fn simulate_terminal_points (&self, telemetry: &Telemetry, n: usize, seed: u64)->Result<Vec<GeoSample>> {
        let sigma_lat = self.position_sigma( telemetry.altitude) / METERS_PER_DEGREE;
        let sigma_lon = sigma_lat / cos( rad( telemetry.lat)).abs().max(1e-6);
        let noise = Noise::new( sigma_lat, sigma_lon, &self.config.perturbation)?;
        let (density, flow) = (self.config.fuel_density, self.config.fuel_flow_rate);

        let points: Vec<GeoSample> = (0..n).into_par_iter().map( |i| {
            let mut rng = StdRng::seed_from_u64( seed.wrapping_add( i as u64));
            let leg = noise.sample_leg( telemetry, &mut rng);
            let (lat, lon) = leg.terminal_position( density, flow);
            GeoSample { lat, lon }
        }).collect();

        let n_valid = points.iter().filter( |p| p.lat.is_finite() && p.lon.is_finite()).count();
        if n_valid < n {
            warn!("dropping {} non-finite terminal points", n - n_valid);
            Ok( points.into_iter().filter( |p| p.lat.is_finite() && p.lon.is_finite()).collect() )
        } else {
            Ok( points )
        }
    }

    /// run the Monte Carlo ensemble and extract ranked zones from its density
    pub fn run_simulation (&self, telemetry: &Telemetry, n_simulations: usize, seed: Option<u64>)->Result<SimulationSummary> {
        telemetry.validate()?;
        if n_simulations == 0 {
            return Err( invalid_sim_input!("number of simulations has to be positive"))
        }
        if !(self.config.fuel_density > 0.0 && self.config.fuel_flow_rate > 0.0) {
            return Err( invalid_sim_input!("fuel density and flow rate have to be positive"))
        }

        let seed = resolve_seed( seed);
        info!("running {} flight simulations (seed {}) from {:.4},{:.4}", n_simulations, seed, telemetry.lat, telemetry.lon);

        let points = self.simulate_terminal_points( telemetry, n_simulations, seed)?;
        let lon_lats: Vec<(f64,f64)> = points.iter().map( |p| (p.lon, p.lat)).collect();
        let (_, zones) = zones_from_ensemble( &lon_lats, &self.zone_config);
        debug!("{} zones from {} terminal points", zones.len(), points.len());

        let max_probability = zones.iter().map( |z| z.probability).fold( 0.0, f64::max);
        let total_area_km2 = zones.iter().map( |z| z.area_km2).sum();
        let primary_search_zones = zones.iter().filter( |z| z.probability > self.config.primary_zone_threshold).count();

        Ok( SimulationSummary {
            zone_count: zones.len(),
            max_probability,
            total_area_km2,
            primary_search_zones,
            fuel_endurance_hours: (fuel_endurance_hours( telemetry.fuel) * 100.0).round() / 100.0,
            position_uncertainty_nm: telemetry.uncertainty_radius,
            n_simulations,
            seed,
            zones,
            points,
        })
    }
}

impl Default for MonteCarloSimulator {
    fn default()->Self {
        MonteCarloSimulator::new( SimConfig::default(), ZoneConfig::default())
    }
}
