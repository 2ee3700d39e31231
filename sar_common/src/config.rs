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

//! RON based configuration loading. Every sar crate defines its own serde config struct with a
//! `Default` impl, so that missing config files or fields fall back to the documented defaults

use std::path::Path;
use serde::Deserialize;
use crate::errors::Result;

/// load a config struct from a RON file
pub fn load_ron_config<C,P> (path: P)->Result<C> where C: for<'a> Deserialize<'a>, P: AsRef<Path> {
    let s = std::fs::read_to_string( path.as_ref())?;
    Ok( ron::de::from_str( &s)? )
}

/// parse a config struct from RON text
pub fn parse_ron_config<C> (s: &str)->Result<C> where C: for<'a> Deserialize<'a> {
    Ok( ron::de::from_str( s)? )
}
