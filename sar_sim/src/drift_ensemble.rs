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

//! where floating debris ends up. An ensemble of debris trajectories with perturbed surface wind is
//! released at the last known position and the density of their final positions is estimated

use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use serde::{Serialize,Deserialize};
use tracing::{debug,warn};

use sar_common::{angle::normalize_360, telemetry::{Telemetry, Wind}};
use sar_drift::{ObjectType, WindDriftModel};
use sar_zones::GaussianKde;
use crate::{
    simulation::SimConfig,
    errors::{SimError, Result, invalid_sim_input}
};

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct DriftSample {
    pub lat: f64,
    pub lon: f64,
    pub density: f64, // KDE density of all final positions at this one
}

/// run `n` perturbed debris trajectories for `time_since_contact` and estimate the density of their
/// final positions. Trajectory `i` draws from its own `StdRng` seeded with `seed + i`
pub fn drift_probability (model: &WindDriftModel, telemetry: &Telemetry, n: usize, seed: u64, config: &SimConfig)->Result<Vec<DriftSample>> {
    telemetry.validate()?;
    if n == 0 {
        return Ok( Vec::new())
    }

    let p = &config.drift_perturbation;
    let speed_noise = Normal::new( 0.0, p.wind_speed).map_err( |e| invalid_sim_input!("invalid wind speed sigma: {}", e))?;
    let dir_noise = Normal::new( 0.0, p.wind_direction).map_err( |e| invalid_sim_input!("invalid wind direction sigma: {}", e))?;

    let finals: Vec<(f64,f64)> = (0..n).into_par_iter().map( |i| -> Result<(f64,f64)> {
        let mut rng = StdRng::seed_from_u64( seed.wrapping_add( i as u64));
        let wind = Wind::new(
            (telemetry.wind.speed * (1.0 + speed_noise.sample( &mut rng))).max(0.0),
            normalize_360( telemetry.wind.direction + dir_noise.sample( &mut rng))
        );
        let trajectory = model.calculate_drift_vectors( telemetry.lat, telemetry.lon, telemetry.altitude, &wind,
                                                        telemetry.time_since_contact, ObjectType::Debris)?;
        trajectory.final_position().ok_or_else( || invalid_sim_input!("empty drift trajectory"))
    }).collect::<Result<Vec<_>>>()?;

    // trajectory positions are (lat,lon), the KDE works in (lon,lat)
    let lon_lats: Vec<(f64,f64)> = finals.iter().map( |(lat,lon)| (*lon,*lat)).collect();
    let densities = match GaussianKde::new( &lon_lats) {
        Ok(kde) => kde.evaluate_points( &lon_lats),
        Err(e) => {
            warn!("no drift density for {} final positions: {}", finals.len(), e);
            vec![0.0; finals.len()]
        }
    };
    debug!("{} drift samples", finals.len());

    Ok( finals.iter().zip( densities).map( |((lat,lon),density)| DriftSample { lat: *lat, lon: *lon, density }).collect() )
}
