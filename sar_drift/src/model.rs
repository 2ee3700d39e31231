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

use serde::{Serialize,Deserialize};
use tracing::{debug,trace};

use sar_common::{
    angle::{is_valid_latitude,is_valid_longitude,normalize_360},
    geo_constants::{ATMOSPHERE_SCALE_HEIGHT,EARTH_ROTATION_RATE},
    geodesy::{north_east,offset_by_meters,rotate_north_east},
    telemetry::Wind,
    units::{feet_to_meters,knots_to_mps},
    rad, sin
};
use crate::{DriftConfig, ObjectType, layers::layer_at, errors::{DriftError,Result,invalid_drift_input}};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all="snake_case")]
pub enum DriftPhase {
    Airborne,
    Surface
}

/// one sample of a drift trajectory
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct DriftPoint {
    pub lat: f64,
    pub lon: f64,
    pub altitude_ft: f64,  // 0 once on the surface
    pub elapsed_s: f64,    // since release
    pub phase: DriftPhase
}

/// ordered drift positions starting with the release point
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct DriftTrajectory {
    pub object_type: ObjectType,
    pub points: Vec<DriftPoint>
}

impl DriftTrajectory {
    /// the plain (lat,lon) sequence
    pub fn positions (&self)->Vec<(f64,f64)> {
        self.points.iter().map( |p| (p.lat, p.lon)).collect()
    }

    pub fn final_position (&self)->Option<(f64,f64)> {
        self.points.last().map( |p| (p.lat, p.lon))
    }

    /// index of the first surface point, if the object reached the surface
    pub fn surface_index (&self)->Option<usize> {
        self.points.iter().position( |p| p.phase == DriftPhase::Surface)
    }

    pub fn len (&self)->usize { self.points.len() }
    pub fn is_empty (&self)->bool { self.points.is_empty() }
}

/// stateless drift integrator. All behavior is a function of the config and the call arguments
#[derive(Debug,Clone,Default)]
pub struct WindDriftModel {
    config: DriftConfig
}

impl WindDriftModel {
    pub fn new (config: DriftConfig)->Self {
        WindDriftModel { config }
    }

    pub fn config (&self)->&DriftConfig { &self.config }

    /// descent rate in ft/s for the release altitude - terminal velocity is higher in thin air
    pub fn descent_rate (&self, object_type: ObjectType, altitude_ft: f64)->f64 {
        let cfg = &self.config;
        object_type.base_descent_rate() * (1.0 + (altitude_ft / cfg.descent_reference_altitude) * cfg.descent_altitude_gain)
    }

    /// (speed knots, direction degrees) of the layer wind at the given altitude
    pub fn wind_at_altitude (&self, altitude_ft: f64, surface_wind: &Wind)->(f64,f64) {
        let altitude_m = feet_to_meters( altitude_ft);
        match layer_at( &self.config.layers, altitude_m) {
            Some(layer) => (
                surface_wind.speed * layer.speed_factor( altitude_m),
                normalize_360( surface_wind.direction + layer.backing)
            ),
            None => (surface_wind.speed, surface_wind.direction)
        }
    }

    /// compute the drift path of an object released at (lat,lon,altitude_ft) for `elapsed` seconds.
    /// The object descends in `airborne_step` increments and, if it reaches the surface within the
    /// time budget, continues to drift in `surface_step` increments.
    /// Positions are neither wrapped nor clamped - extreme inputs can leave the valid lat/lon range
    pub fn calculate_drift_vectors (&self, lat: f64, lon: f64, altitude_ft: f64, wind: &Wind, elapsed: f64, object_type: ObjectType)->Result<DriftTrajectory> {
        self.check_input( lat, lon, altitude_ft, wind, elapsed)?;

        let cfg = &self.config;
        let dt = cfg.airborne_step;
        let descent_rate = self.descent_rate( object_type, altitude_ft);
        let drag = object_type.drag_coefficient();

        let start_phase = if altitude_ft > 0.0 { DriftPhase::Airborne } else { DriftPhase::Surface };
        let mut points = vec![ DriftPoint { lat, lon, altitude_ft, elapsed_s: 0.0, phase: start_phase } ];

        let mut lat = lat;
        let mut lon = lon;
        let mut alt = altitude_ft;
        let mut t = 0.0;

        while alt > 0.0 && t < elapsed {
            let (speed_kn, dir) = self.wind_at_altitude( alt, wind);
            let density_factor = (-feet_to_meters(alt) / ATMOSPHERE_SCALE_HEIGHT).exp();
            let (wn, we) = north_east( knots_to_mps(speed_kn) * drag * density_factor, dir);

            (lat, lon) = offset_by_meters( lat, lon, wn * dt, we * dt);
            alt -= descent_rate * dt;
            t += dt;

            points.push( DriftPoint { lat, lon, altitude_ft: alt.max(0.0), elapsed_s: t, phase: DriftPhase::Airborne });
        }

        if alt <= 0.0 && t < elapsed {
            debug!("{} reached surface after {}s at {:.4},{:.4}", object_type, t, lat, lon);
            self.surface_drift( &mut points, lat, lon, wind, t, elapsed - t, object_type);
        }

        Ok( DriftTrajectory { object_type, points } )
    }

    /// wind driven surface current with Coriolis deflection, appended in whole `surface_step` increments
    fn surface_drift (&self, points: &mut Vec<DriftPoint>, lat: f64, lon: f64, wind: &Wind, t0: f64, remaining: f64, object_type: ObjectType) {
        let cfg = &self.config;
        let dt = cfg.surface_step;
        if dt <= 0.0 { return }

        let factor = if object_type == ObjectType::SurvivalRaft { cfg.raft_surface_current_factor } else { cfg.surface_current_factor };
        let current = knots_to_mps( wind.speed) * factor;
        let coriolis = 2.0 * EARTH_ROTATION_RATE * sin( rad(lat));
        let n_steps = (remaining / dt).floor() as usize;

        let mut lat = lat;
        let mut lon = lon;

        for step in 0..n_steps {
            let (mut cn, mut ce) = north_east( current, wind.direction);
            if step > 0 { // no deflection in the first surface step
                (cn, ce) = rotate_north_east( cn, ce, coriolis * dt);
            }

            (lat, lon) = offset_by_meters( lat, lon, cn * dt, ce * dt);
            points.push( DriftPoint { lat, lon, altitude_ft: 0.0, elapsed_s: t0 + (step+1) as f64 * dt, phase: DriftPhase::Surface });
        }
        trace!("added {} surface drift steps", n_steps);
    }

    fn check_input (&self, lat: f64, lon: f64, altitude_ft: f64, wind: &Wind, elapsed: f64)->Result<()> {
        if !is_valid_latitude(lat) || !is_valid_longitude(lon) {
            return Err( invalid_drift_input!("invalid release position {},{}", lat, lon))
        }
        if !(altitude_ft.is_finite() && altitude_ft >= 0.0) {
            return Err( invalid_drift_input!("invalid release altitude {}", altitude_ft))
        }
        if !(elapsed.is_finite() && elapsed >= 0.0) {
            return Err( invalid_drift_input!("invalid time budget {}", elapsed))
        }
        if elapsed > self.config.max_elapsed {
            return Err( invalid_drift_input!("time budget {}s exceeds maximum of {}s", elapsed, self.config.max_elapsed))
        }
        if !(self.config.airborne_step > 0.0) {
            return Err( invalid_drift_input!("non-positive airborne step {}", self.config.airborne_step))
        }
        Ok( wind.validate()? )
    }
}
