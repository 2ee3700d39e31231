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

//! GeoJSON wire format of zones. Outgoing zones become Polygon features of a FeatureCollection
//! with collection level summary properties, incoming features are parsed back into validated zones

use ::geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;
use strum::{Display, AsRefStr};
use tracing::{debug, warn};

use sar_common::{
    angle::{is_valid_latitude, is_valid_longitude},
    geodesy::LonLat
};
use crate::{
    zone::{Zone, ExtractionMethod},
    errors::{ZoneError, Result, invalid_geometry}
};

pub const CRS_NAME: &str = "EPSG:4326";
pub const COORDINATE_SYSTEM: &str = "WGS84";

/// probability used for imported features without a `probability` property
pub const DEFAULT_FEATURE_PROBABILITY: f64 = 0.5;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Display,AsRefStr)]
#[strum(serialize_all="snake_case")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
    Minimal
}

pub fn risk_level (probability: f64)->RiskLevel {
    if probability >= 0.8 { RiskLevel::Critical }
    else if probability >= 0.6 { RiskLevel::High }
    else if probability >= 0.4 { RiskLevel::Medium }
    else if probability >= 0.2 { RiskLevel::Low }
    else { RiskLevel::Minimal }
}

fn round2 (x: f64)->f64 { (x * 100.0).round() / 100.0 }

fn timestamp (t: &DateTime<Utc>)->String { t.to_rfc3339_opts( SecondsFormat::Millis, true) }

fn positions (ring: &[LonLat])->Vec<Vec<f64>> {
    ring.iter().map( |(lon,lat)| vec![*lon, *lat]).collect()
}

/// GeoJSON polygon coordinates of a zone - the exterior ring followed by its holes
pub fn zone_polygon (zone: &Zone)->Value {
    let mut rings = vec![ positions( zone.ring()) ];
    rings.extend( zone.holes().iter().map( |h| positions( h)));
    Value::Polygon( rings)
}

/// re-check a zone before it goes out. Zone fields are public, so this does not trust construction time validation
fn check_zone (zone: &Zone)->Result<()> {
    if !(zone.probability.is_finite() && (0.0..=1.0).contains(&zone.probability)) {
        return Err( invalid_geometry!("probability outside [0,1]: {}", zone.probability))
    }
    let ring = zone.ring();
    if ring.iter().chain( zone.holes().iter().flatten()).any( |(lon,lat)| !is_valid_longitude(*lon) || !is_valid_latitude(*lat)) {
        return Err( invalid_geometry!("invalid coordinates"))
    }
    if ring.len() < 4 {
        return Err( invalid_geometry!("degenerate ring with {} vertices", ring.len()))
    }
    Ok(())
}

fn zone_feature (zone: &Zone, rank: usize, now: &DateTime<Utc>)->Feature {
    let mut props = JsonObject::new();
    props.insert( "probability".into(), json!(zone.probability));
    props.insert( "risk_level".into(), json!(risk_level(zone.probability).to_string()));
    props.insert( "zone_rank".into(), json!(rank));
    props.insert( "area_km2".into(), json!( round2( zone.area_km2)));
    props.insert( "perimeter_km".into(), json!( round2( zone.perimeter_km())));
    props.insert( "calculated_area_km2".into(), json!(zone.area_km2));
    props.insert( "method".into(), json!(zone.method.to_string()));
    if let Some(mass) = zone.mass {
        props.insert( "mass".into(), json!(mass));
    }
    if let Some(ev) = &zone.evidence {
        props.insert( "evidence_type".into(), json!(ev.evidence_type.to_string()));
        props.insert( "confidence".into(), json!(ev.confidence));
    }
    props.insert( "updated_with_evidence".into(), json!(zone.updated_with_evidence()));
    props.insert( "created_at".into(), json!( timestamp( zone.created_at.as_ref().unwrap_or(now))));

    Feature {
        bbox: None,
        geometry: Some( Geometry::new( zone_polygon( zone))),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

/// package zones as a FeatureCollection ranked by probability. Invalid zones are dropped (logged).
/// `metadata` is embedded verbatim as `simulation_metadata`
pub fn export_zones (zones: &[Zone], metadata: Option<JsonValue>)->FeatureCollection {
    let now = Utc::now();

    if zones.is_empty() {
        warn!("no zones to export");
        return empty_collection( &now)
    }

    let mut sorted: Vec<&Zone> = zones.iter().collect();
    sorted.sort_by( |a,b| b.probability.total_cmp( &a.probability)); // stable, keeps tie order

    let mut features = Vec::with_capacity( sorted.len());
    for (i,zone) in sorted.iter().enumerate() {
        match check_zone( zone) {
            Ok(()) => features.push( zone_feature( zone, features.len() + 1, &now)),
            Err(e) => warn!("skipping zone {}: {}", i, e)
        }
    }

    let max_probability = features.iter().filter_map( |f| f.property("probability").and_then( |v| v.as_f64())).fold( 0.0, f64::max);
    let total_area_km2: f64 = features.iter().filter_map( |f| f.property("area_km2").and_then( |v| v.as_f64())).sum();

    let mut foreign = JsonObject::new();
    foreign.insert( "properties".into(), json!({
        "total_zones": features.len(),
        "max_probability": max_probability,
        "total_area_km2": total_area_km2,
        "generated_at": timestamp(&now),
        "coordinate_system": COORDINATE_SYSTEM,
        "simulation_metadata": metadata.unwrap_or_else( || json!({}))
    }));
    foreign.insert( "crs".into(), json!({
        "type": "name",
        "properties": { "name": CRS_NAME }
    }));

    FeatureCollection { bbox: None, features, foreign_members: Some(foreign) }
}

fn empty_collection (now: &DateTime<Utc>)->FeatureCollection {
    let mut foreign = JsonObject::new();
    foreign.insert( "properties".into(), json!({
        "total_zones": 0,
        "max_probability": 0.0,
        "total_area_km2": 0.0,
        "generated_at": timestamp(now),
        "status": "no_zones_generated"
    }));
    FeatureCollection { bbox: None, features: Vec::new(), foreign_members: Some(foreign) }
}

/// collection level summary property (e.g. "total_zones")
pub fn collection_property<'a> (fc: &'a FeatureCollection, key: &str)->Option<&'a JsonValue> {
    fc.foreign_members.as_ref()?.get("properties")?.get(key)
}

/* #region parsing ******************************************************************************/

fn ring_from_positions (positions: &[Vec<f64>])->Result<Vec<LonLat>> {
    let mut ring: Vec<LonLat> = Vec::with_capacity( positions.len());
    for pos in positions {
        if pos.len() < 2 {
            return Err( invalid_geometry!("polygon position with {} coordinates", pos.len()))
        }
        ring.push( (pos[0], pos[1]));
    }
    Ok(ring)
}

/// parse a Polygon feature into a zone. The exterior ring is `coordinates[0]`, further rings are holes.
/// The probability is taken from `properties.probability` (0.5 if missing). Returns Ok(None) for
/// non-polygon features
pub fn zone_from_feature (feature: &Feature)->Result<Option<Zone>> {
    let Some(geometry) = &feature.geometry else { return Ok(None) };
    let Value::Polygon(rings) = &geometry.value else { return Ok(None) };

    let exterior = rings.first().ok_or_else( || invalid_geometry!("polygon without exterior ring"))?;
    let ring = ring_from_positions( exterior)?;
    let holes = rings[1..].iter().map( |r| ring_from_positions( r)).collect::<Result<Vec<_>>>()?;

    let probability = match feature.property("probability") {
        Some(v) => v.as_f64().ok_or_else( || invalid_geometry!("non-numeric probability {}", v))?,
        None => DEFAULT_FEATURE_PROBABILITY
    };

    let zone = Zone::new( ring, probability, ExtractionMethod::Imported)?;
    Ok( Some( if holes.is_empty() { zone } else { zone.with_holes( holes) }))
}

/// typed boundary parsing of prior zones. Non-polygon features are ignored, invalid polygons are an error
pub fn zones_from_features (features: &[Feature])->Result<Vec<Zone>> {
    let mut zones = Vec::with_capacity( features.len());
    for (i,f) in features.iter().enumerate() {
        match zone_from_feature( f)? {
            Some(zone) => zones.push( zone),
            None => debug!("ignoring non-polygon feature {}", i)
        }
    }
    Ok(zones)
}

/// parse a FeatureCollection from its JSON text
pub fn parse_feature_collection (s: &str)->Result<FeatureCollection> {
    Ok( s.parse::<FeatureCollection>()? )
}

/// structural check of a zone collection - returns the list of problems (empty if valid)
pub fn validate_feature_collection (fc: &FeatureCollection)->Vec<String> {
    let mut errors = Vec::new();

    for (i,f) in fc.features.iter().enumerate() {
        match &f.geometry {
            None => errors.push( format!("feature {} has no geometry", i)),
            Some(g) => match &g.value {
                Value::Polygon(rings) => {
                    if rings.first().map_or( true, |r| r.is_empty()) {
                        errors.push( format!("feature {} has no coordinates", i));
                    }
                }
                _ => errors.push( format!("feature {} geometry type must be Polygon", i))
            }
        }
        match f.property("probability").and_then( |v| v.as_f64()) {
            Some(p) if (0.0..=1.0).contains(&p) => {}
            Some(p) => errors.push( format!("feature {} probability outside [0,1]: {}", i, p)),
            None => errors.push( format!("feature {} has no numeric probability", i))
        }
    }
    errors
}

/// concatenate the features of several collections. Numeric collection properties are combined
/// (`max_` properties by maximum, all others summed), non-numeric ones keep their first value.
/// Other foreign members (e.g. `crs`) are taken from the first collection that has them
pub fn merge_feature_collections (collections: &[FeatureCollection])->FeatureCollection {
    let mut features = Vec::new();
    let mut merged = JsonObject::new();
    let mut foreign = JsonObject::new();

    for fc in collections {
        features.extend( fc.features.iter().cloned());
        let Some(fm) = fc.foreign_members.as_ref() else { continue };

        if let Some(JsonValue::Object(props)) = fm.get("properties") {
            for (k,v) in props {
                if let Some(acc) = merged.get_mut(k) {
                    if let (Some(a), Some(x)) = (acc.as_f64(), v.as_f64()) {
                        *acc = if k.starts_with("max_") { json!( a.max(x)) } else { json!( a + x) };
                    }
                } else {
                    merged.insert( k.clone(), v.clone());
                }
            }
        }
        for (k,v) in fm.iter().filter( |(k,_)| *k != "properties") {
            if !foreign.contains_key(k) { foreign.insert( k.clone(), v.clone()); }
        }
    }

    foreign.insert( "properties".into(), JsonValue::Object(merged));
    FeatureCollection { bbox: None, features, foreign_members: Some(foreign) }
}

/* #endregion parsing */
