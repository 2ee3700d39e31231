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

use std::{fs, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sar_common::telemetry::{Telemetry, Wind};
use sar_sim::{SearchEngine, EngineConfig, EnvironmentSource, NoEnvironment, FixedWind};

/// compute search zones for a missing aircraft from its last telemetry (JSON file)
#[derive(Parser, Debug)]
#[command(version, about, long_about = "Monte Carlo search zone estimation from last known telemetry")]
pub struct Args {
    /// RON engine config (defaults are used if not given)
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// number of flight simulations (overrides config)
    #[arg(short,long)]
    pub n_simulations: Option<usize>,

    /// random seed for reproducible runs
    #[arg(short,long)]
    pub seed: Option<u64>,

    /// live surface wind as "speed_kn,direction_deg"
    #[arg(long)]
    pub wind: Option<String>,

    /// output GeoJSON file (stdout if not set)
    #[arg(short,long)]
    pub output: Option<PathBuf>,

    /// telemetry JSON file
    pub telemetry: PathBuf,
}

fn parse_wind (s: &str)->Result<Wind> {
    let (speed, direction) = s.split_once(',').ok_or_else( || anyhow::anyhow!("wind has to be given as speed,direction"))?;
    Ok( Wind::new( speed.trim().parse()?, direction.trim().parse()?) )
}

fn main()->Result<()> {
    tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load( path)?,
        None => EngineConfig::default()
    };
    let n_simulations = args.n_simulations.unwrap_or( config.simulation.n_simulations);
    let engine = SearchEngine::new( config);

    let telemetry = Telemetry::from_json( &fs::read_to_string( &args.telemetry)?)?;
    let env: Box<dyn EnvironmentSource> = match &args.wind {
        Some(s) => Box::new( FixedWind( parse_wind( s)?)),
        None => Box::new( NoEnvironment)
    };

    let report = engine.simulate_n( &telemetry, env.as_ref(), n_simulations, args.seed)?;
    let s = &report.summary;
    eprintln!("zones: {}, max probability: {:.2}, total area: {:.1} km², primary zones: {}, endurance: {:.2}h, seed: {}",
              s.zone_count, s.max_probability, s.total_area_km2, s.primary_search_zones, s.fuel_endurance_hours, s.seed);

    let json = serde_json::to_string_pretty( &report.geojson)?;
    match &args.output {
        Some(path) => fs::write( path, json)?,
        None => println!("{json}")
    }
    Ok(())
}
