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

use sar_common::{telemetry::{Telemetry,Wind}, evidence::{Evidence,EvidenceType}, SarCommonError};

const LAST_CONTACT: &str = r#"{
    "lat": 25.4, "lon": 87.6, "altitude": 35000, "speed": 460, "heading": 98, "fuel": 4000,
    "wind": { "speed": 15, "direction": 110 },
    "time_since_contact": 900
}"#;

#[test]
fn test_parse_telemetry() {
    let t = Telemetry::from_json( LAST_CONTACT).unwrap();
    assert_eq!( t.lat, 25.4);
    assert_eq!( t.wind, Wind::new( 15.0, 110.0));
    assert_eq!( t.uncertainty_radius, 1.0); // default

    let e = t.with_wind( Wind::new( 20.0, 90.0));
    assert_eq!( e.wind.speed, 20.0);
    assert_eq!( t.wind.speed, 15.0); // original untouched
}

#[test]
fn test_reject_invalid_telemetry() {
    let wind = Wind::new( 15.0, 110.0);
    assert!( matches!( Telemetry::new( 91.0, 0.0, 0.0, 0.0, 0.0, 0.0, wind, 0.0), Err(SarCommonError::InvalidInput(_))));
    assert!( Telemetry::new( f64::NAN, 0.0, 0.0, 0.0, 0.0, 0.0, wind, 0.0).is_err());
    assert!( Telemetry::new( 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, wind, 0.0).is_err());
    assert!( Telemetry::new( 0.0, 0.0, 0.0, 0.0, 360.0, 0.0, wind, 0.0).is_err());
    assert!( Telemetry::new( 0.0, 0.0, 0.0, 0.0, 0.0, -5.0, wind, 0.0).is_err());
    assert!( Telemetry::new( 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, Wind::new( 10.0, 360.0), 0.0).is_err());
    assert!( Telemetry::new( 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, wind, 0.0).is_ok());
}

#[test]
fn test_parse_evidence() {
    let e = Evidence::from_json( r#"{"lat":25.5,"lon":87.7,"type":"debris","confidence":0.8,"reliability":0.9,"timestamp":"2025-06-27T12:00:00Z"}"#).unwrap();
    assert_eq!( e.evidence_type, EvidenceType::Debris);
    assert!( e.timestamp.is_some());

    // unknown types carry no information but are not an error
    let e = Evidence::from_json( r#"{"lat":25.5,"lon":87.7,"type":"rumour","confidence":0.5}"#).unwrap();
    assert_eq!( e.evidence_type, EvidenceType::Unknown);
    assert_eq!( e.reliability, 1.0);
    assert_eq!( e.evidence_type.to_string(), "unknown");

    assert!( Evidence::from_json( r#"{"lat":25.5,"lon":87.7,"type":"debris","confidence":1.5}"#).is_err());
    assert!( Evidence::new( 95.0, 0.0, EvidenceType::Signal, 0.5, 0.5).is_err());

    let t = chrono::DateTime::parse_from_rfc3339( "2025-06-27T12:00:00Z").unwrap().with_timezone( &chrono::Utc);
    let e = Evidence::new( 25.5, 87.7, EvidenceType::Signal, 0.5, 0.5).unwrap().with_timestamp( t);
    assert_eq!( e.timestamp, Some(t));
}
