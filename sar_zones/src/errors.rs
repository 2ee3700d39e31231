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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ZoneError>;

#[derive(Error,Debug)]
pub enum ZoneError {

    #[error("invalid zone input {0}")]
    InvalidInput(String),

    #[error("degenerate probability field {0}")]
    DegenerateField(String),

    #[error("invalid zone geometry {0}")]
    InvalidGeometry(String),

    #[error("contour error {0}")]
    ContourError( #[from] contour::Error),

    #[error("GeoJSON error {0}")]
    GeoJsonError( #[from] geojson::Error),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("common error {0}")]
    CommonError( #[from] sar_common::SarCommonError),
}

macro_rules! invalid_zone_input {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::ZoneError::InvalidInput( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use invalid_zone_input;

macro_rules! degenerate_field {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::ZoneError::DegenerateField( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use degenerate_field;

macro_rules! invalid_geometry {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::ZoneError::InvalidGeometry( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use invalid_geometry;
