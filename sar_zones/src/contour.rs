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

//! iso-density polygons of a node grid. Marching squares with linear interpolation is done by the
//! `contour` crate; polygons come back with their holes, so regions that drop below a level inside
//! an enclosing region are cut out of it

use contour::ContourBuilder;
use geo_types::MultiPolygon;
use ndarray::Array2;

use crate::{grid::GridBounds, errors::Result};

/// (level, polygons) of all nodes with `values >= level`, for each level. Rows of `values` run
/// south to north, nodes lie on `bounds`. Vertices on the grid border can extend up to half a node
/// spacing beyond `bounds` since everything outside the grid counts as below any level
pub fn contour_polygons (values: &Array2<f64>, bounds: &GridBounds, levels: &[f64])->Result<Vec<(f64,MultiPolygon<f64>)>> {
    let (nrows, ncols) = values.dim();
    let dlon = bounds.width() / (ncols.max(2) - 1) as f64;
    let dlat = bounds.height() / (nrows.max(2) - 1) as f64;

    // node i is the center of cell [i,i+1] in contour coordinates
    let builder = ContourBuilder::new( ncols, nrows, true)
        .x_origin( bounds.west - 0.5 * dlon)
        .y_origin( bounds.south - 0.5 * dlat)
        .x_step( dlon)
        .y_step( dlat);

    let data: Vec<f64> = values.iter().copied().collect(); // row major
    let contours = builder.contours( &data, levels)?;

    Ok( contours.into_iter().map( |c| {
        let (polygons, level) = c.into_inner();
        (level, polygons)
    }).collect())
}
