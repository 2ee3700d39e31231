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

//! probability fields and search zones. A point ensemble (or an existing grid) becomes a
//! normalized `ProbabilityGrid`, which is turned into ranked `Zone` polygons at fixed
//! iso-density levels and exported as GeoJSON

pub mod errors;
pub mod grid;
pub mod kde;
pub mod interpolate;
pub mod contour;
pub mod zone;
pub mod extract;
pub mod geojson;

pub use errors::{ZoneError,Result};
pub use grid::{GridBounds,ProbabilityGrid};
pub use kde::GaussianKde;
pub use zone::{Zone,ExtractionMethod,EvidenceTag,PROBABILITY_LEVELS,sort_zones};
pub use extract::{ZoneConfig,DensityField,WeightedPoint,ZoneStrategy,ZoneExtractor,zones_from_ensemble};
