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

//! Monte Carlo estimation of where a missing aircraft went down. Perturbed straight flight legs from
//! the last telemetry give a terminal point ensemble, whose density is turned into ranked search zones.
//! A debris drift ensemble complements the flight zones, and evidence refines them later on

pub mod errors;
pub mod flight;
pub mod simulation;
pub mod drift_ensemble;
pub mod engine;

pub use errors::{SimError,Result};
pub use flight::FlightLeg;
pub use simulation::{MonteCarloSimulator,SimConfig,Perturbation,SimulationSummary,GeoSample};
pub use drift_ensemble::{DriftSample,drift_probability};
pub use engine::{SearchEngine,EngineConfig,EnvironmentSource,NoEnvironment,FixedWind,SimulationReport,UpdateReport};
