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

//! external observations that are fused into an existing probability field

use serde::{Serialize,Deserialize};
use chrono::{DateTime,Utc};
use strum::{Display,AsRefStr};
use crate::{angle::{is_valid_latitude,is_valid_longitude}, errors::Result, invalid_input};

/// evidence categories. Unrecognized type names deserialize into `Unknown`, which carries no
/// spatial information (flat likelihood)
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,Display,AsRefStr)]
#[serde(rename_all="snake_case")]
#[strum(serialize_all="snake_case")]
pub enum EvidenceType {
    Debris,
    Signal,
    Sighting,
    Negative,
    #[serde(other)]
    Unknown
}

fn default_reliability()->f64 { 1.0 }

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Evidence {
    pub lat: f64,
    pub lon: f64,

    #[serde(rename="type")]
    pub evidence_type: EvidenceType,

    pub confidence: f64,    // [0..1]

    #[serde(default="default_reliability")]
    pub reliability: f64,   // [0..1]

    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Evidence {
    pub fn new (lat: f64, lon: f64, evidence_type: EvidenceType, confidence: f64, reliability: f64)->Result<Self> {
        let e = Evidence { lat, lon, evidence_type, confidence, reliability, timestamp: None };
        e.validate()?;
        Ok(e)
    }

    pub fn with_timestamp (mut self, timestamp: DateTime<Utc>)->Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn from_json (s: &str)->Result<Self> {
        let e: Evidence = serde_json::from_str(s)?;
        e.validate()?;
        Ok(e)
    }

    pub fn validate (&self)->Result<()> {
        if !is_valid_latitude(self.lat) { return Err( invalid_input!("evidence latitude out of range: {}", self.lat)) }
        if !is_valid_longitude(self.lon) { return Err( invalid_input!("evidence longitude out of range: {}", self.lon)) }
        if !(self.confidence.is_finite() && (0.0..=1.0).contains(&self.confidence)) {
            return Err( invalid_input!("evidence confidence out of range [0..1]: {}", self.confidence))
        }
        if !(self.reliability.is_finite() && (0.0..=1.0).contains(&self.reliability)) {
            return Err( invalid_input!("evidence reliability out of range [0..1]: {}", self.reliability))
        }
        Ok(())
    }
}
