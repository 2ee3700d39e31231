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

use geo::Contains;
use geo_types::Point;
use ndarray::Array2;
use sar_common::{evidence::{Evidence, EvidenceType}, geodesy::haversine_km};
use sar_zones::{Zone, ExtractionMethod, GridBounds, ProbabilityGrid, PROBABILITY_LEVELS};
use sar_bayes::{BayesianUpdateEngine, BayesConfig, BayesError, posterior_grid, likelihood::likelihood_grid};

fn square (lon: f64, lat: f64, d: f64, probability: f64)->Zone {
    Zone::new( vec![ (lon-d, lat-d), (lon+d, lat-d), (lon+d, lat+d), (lon-d, lat+d) ], probability, ExtractionMethod::Imported).unwrap()
}

/// concentric prior zones around (89.7,25.1)
fn prior_zones ()->Vec<Zone> {
    vec![ square( 89.7, 25.1, 0.1, 0.95), square( 89.7, 25.1, 0.2, 0.75), square( 89.7, 25.1, 0.3, 0.5) ]
}

fn distance_to (zone: &Zone, lat: f64, lon: f64)->f64 {
    let (clon,clat) = zone.centroid().unwrap();
    haversine_km( clat, clon, lat, lon)
}

#[test]
fn test_debris_pulls_top_zone() {
    let engine = BayesianUpdateEngine::default();
    let prior = prior_zones();
    let evidence = Evidence::new( 25.5, 87.7, EvidenceType::Debris, 0.8, 0.9).unwrap();

    let update = engine.update( &prior, &evidence).unwrap();
    println!("bounds: {:?}", update.bounds);
    for z in &update.zones { println!("  {} {:?} centroid={:?} peak={:?}", z.probability, z.method, z.centroid(), z.peak) }

    assert!( update.bounds.contains( 87.7, 25.5));
    assert!( (update.posterior.sum() - 1.0).abs() < 1e-9);
    assert!( (update.prior.sum() - 1.0).abs() < 1e-9);
    assert!( (update.likelihood.sum() - 1.0).abs() < 1e-9);

    let top = &update.zones[0];
    assert_eq!( top.probability, 0.95);
    assert!( distance_to( top, 25.5, 87.7) < distance_to( &prior[0], 25.5, 87.7));
    assert!( distance_to( top, 25.5, 87.7) < 20.0);

    for z in &update.zones {
        assert!( PROBABILITY_LEVELS.contains( &z.probability));
        assert!( z.updated_with_evidence());
        let tag = z.evidence.unwrap();
        assert_eq!( tag.evidence_type, EvidenceType::Debris);
        assert_eq!( tag.confidence, 0.8);
    }
}

#[test]
fn test_negative_evidence_lowers_density() {
    let engine = BayesianUpdateEngine::default();
    let prior = vec![ square( 87.5, 25.5, 0.5, 0.5) ];
    let evidence = Evidence::new( 25.5, 87.5, EvidenceType::Negative, 0.9, 1.0).unwrap();

    let update = engine.update( &prior, &evidence).unwrap();
    let p_prior = update.prior.value_at( 87.5, 25.5).unwrap();
    let p_post = update.posterior.value_at( 87.5, 25.5).unwrap();
    println!("density at evidence: prior={p_prior}, posterior={p_post}");
    assert!( p_post < p_prior);

    // far away from the searched spot the posterior gains
    let q_prior = update.prior.value_at( 87.1, 25.1).unwrap();
    let q_post = update.posterior.value_at( 87.1, 25.1).unwrap();
    assert!( q_post > q_prior);
}

#[test]
fn test_negative_evidence_cuts_hole() {
    let engine = BayesianUpdateEngine::default();
    let prior = vec![ square( 87.5, 25.5, 0.5, 0.5) ];
    let evidence = Evidence::new( 25.5, 87.5, EvidenceType::Negative, 1.0, 1.0).unwrap();

    let update = engine.update( &prior, &evidence).unwrap();
    for z in &update.zones {
        println!("  {} area={:.0} holes={} peak={:?}", z.probability, z.area_km2, z.holes().len(), z.peak);
    }
    assert!( !update.zones.is_empty());

    // the searched spot is below every level - it is a hole, never a zone of its own
    let searched = Point::new( 87.5, 25.5);
    for z in &update.zones {
        assert!( !z.to_polygon().contains( &searched), "zone {} contains the searched spot", z.probability);
        assert!( z.peak.map_or( true, |p| p >= z.probability), "zone {} peak {:?}", z.probability, z.peak);
    }
    assert!( update.zones.iter().any( |z| !z.holes().is_empty()));
}

#[test]
fn test_sharp_evidence_between_grid_nodes() {
    // no prior: a globe grid with 100 nodes per axis, evidence half way between the four nodes of a corner cell
    let engine = BayesianUpdateEngine::default();
    let lon = -180.0 + 0.5 * 360.0 / 99.0;
    let lat = -90.0 + 0.5 * 180.0 / 99.0;
    let evidence = Evidence::new( lat, lon, EvidenceType::Debris, 1.0, 1.0).unwrap();

    let update = engine.update( &[], &evidence).unwrap();
    assert!( (update.likelihood.sum() - 1.0).abs() < 1e-9);
    assert!( update.likelihood.value_at( 0.0, 0.0).unwrap() < 1e-12); // not flat

    let top = &update.zones[0];
    let (clon,clat) = top.centroid().unwrap();
    println!("top zone {} centroid=({clon},{clat}) area={}", top.probability, top.area_km2);
    assert!( (clon - lon).abs() < 3.0 && (clat - lat).abs() < 3.0);
    assert!( update.zones.iter().all( |z| z.area_km2 < 1.0e6));
}

#[test]
fn test_evidence_outside_prior_support_keeps_prior() {
    // without background fill the prior is zero outside of its zone, the debris likelihood vanishes inside it
    let config = BayesConfig { background_fill: 0.0, ..BayesConfig::default() };
    let engine = BayesianUpdateEngine::new( config, &sar_zones::ZoneConfig::default());
    let prior = vec![ square( 87.5, 25.5, 0.5, 0.5) ];
    let evidence = Evidence::new( 30.0, 95.0, EvidenceType::Debris, 1.0, 1.0).unwrap();

    let update = engine.update( &prior, &evidence).unwrap();
    for (a,b) in update.posterior.values().iter().zip( update.prior.values().iter()) {
        assert!( (a - b).abs() < 1e-12);
    }

    let top = &update.zones[0];
    assert!( distance_to( top, 25.5, 87.5) < 20.0);
    assert!( update.zones.iter().all( |z| !z.to_polygon().contains( &Point::new( 95.0, 30.0))));
}

#[test]
fn test_empty_prior() {
    let engine = BayesianUpdateEngine::default();
    let evidence = Evidence::new( 10.0, -30.0, EvidenceType::Sighting, 0.7, 0.8).unwrap();

    let update = engine.update( &[], &evidence).unwrap();
    assert_eq!( update.bounds, GridBounds::new( -180.0, -90.0, 180.0, 90.0));
    assert!( !update.zones.is_empty());
    assert!( update.zones.iter().all( |z| z.updated_with_evidence()));

    assert!( !engine.update_zones( &[], &evidence).is_empty());
}

#[test]
fn test_zero_evidence_probability_keeps_prior() {
    let bounds = GridBounds::new( 0.0, 0.0, 1.0, 1.0);
    let prior = ProbabilityGrid::from_fn( bounds, 10, |lon,lat| 1.0 + lon + lat).unwrap().normalized().unwrap();
    let likelihood = ProbabilityGrid::new( bounds, Array2::zeros( (10,10))).unwrap();

    let posterior = posterior_grid( &prior, &likelihood).unwrap();
    assert!( (posterior.sum() - 1.0).abs() < 1e-9);
    for (a,b) in posterior.values().iter().zip( prior.values().iter()) {
        assert!( (a - b).abs() < 1e-12);
    }
}

#[test]
fn test_flat_likelihood() {
    let bounds = GridBounds::new( 87.0, 25.0, 88.0, 26.0);
    let unknown: Evidence = Evidence::from_json( r#"{"lat":25.5,"lon":87.5,"type":"radar_echo","confidence":0.9}"#).unwrap();
    assert_eq!( unknown.evidence_type, EvidenceType::Unknown);

    let grid = likelihood_grid( &unknown, bounds, 20).unwrap();
    let v0 = grid.values()[[0,0]];
    assert!( grid.values().iter().all( |v| (v - v0).abs() < 1e-15));

    // an unknown observation does not move zones
    let engine = BayesianUpdateEngine::default();
    let prior = prior_zones();
    let update = engine.update( &prior, &unknown).unwrap();
    let top = &update.zones[0];
    assert!( distance_to( top, 25.1, 89.7) < 15.0);
}

#[test]
fn test_invalid_evidence_keeps_prior() {
    let engine = BayesianUpdateEngine::default();
    let prior = prior_zones();
    let mut evidence = Evidence::new( 25.5, 87.7, EvidenceType::Signal, 0.5, 1.0).unwrap();
    evidence.lat = 123.0;

    assert!( matches!( engine.update( &prior, &evidence), Err(BayesError::CommonError(_))));
    assert_eq!( engine.update_zones( &prior, &evidence), prior);
}
