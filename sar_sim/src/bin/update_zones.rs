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

use sar_common::evidence::Evidence;
use sar_zones::geojson::{parse_feature_collection, validate_feature_collection};
use sar_sim::{SearchEngine, EngineConfig};

/// refine search zones (GeoJSON file) with an evidence observation (JSON file)
#[derive(Parser, Debug)]
#[command(version, about, long_about = "Bayesian update of search zones with new evidence")]
pub struct Args {
    /// RON engine config (defaults are used if not given)
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// output GeoJSON file (stdout if not set)
    #[arg(short,long)]
    pub output: Option<PathBuf>,

    /// prior zones as GeoJSON FeatureCollection
    pub zones: PathBuf,

    /// evidence JSON file
    pub evidence: PathBuf,
}

fn main()->Result<()> {
    tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let engine = match &args.config {
        Some(path) => SearchEngine::from_config_file( path)?,
        None => SearchEngine::new( EngineConfig::default())
    };

    let fc = parse_feature_collection( &fs::read_to_string( &args.zones)?)?;
    for problem in validate_feature_collection( &fc) {
        eprintln!("warning: {problem}");
    }
    let evidence = Evidence::from_json( &fs::read_to_string( &args.evidence)?)?;

    let report = engine.update( &fc.features, &evidence, None)?;
    eprintln!("{} zones after {} evidence", report.zones.len(), evidence.evidence_type);

    let json = serde_json::to_string_pretty( &report.geojson)?;
    match &args.output {
        Some(path) => fs::write( path, json)?,
        None => println!("{json}")
    }
    Ok(())
}
