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

use serde::{Serialize,Deserialize};

/// one atmospheric layer of the wind shear model. Within a layer the surface wind speed is
/// multiplied by a factor that ramps linearly from `factor_floor` to `factor_top` over `ramp`
/// meters above `floor` (saturating), and the direction backs by `backing` degrees
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct WindLayer {
    pub floor: f64,        // meters
    pub ramp: f64,         // meters
    pub factor_floor: f64,
    pub factor_top: f64,
    pub backing: f64,      // degrees
}

impl WindLayer {
    pub fn speed_factor (&self, altitude_m: f64)->f64 {
        let r = if self.ramp > 0.0 { ((altitude_m - self.floor) / self.ramp).clamp( 0.0, 1.0) } else { 0.0 };
        self.factor_floor + r * (self.factor_top - self.factor_floor)
    }
}

/// surface, boundary, lower atmosphere and jet stream layers
pub fn default_wind_layers ()->Vec<WindLayer> {
    vec![
        WindLayer { floor:     0.0, ramp: 1000.0, factor_floor: 0.7, factor_top: 0.7, backing:  0.0 },
        WindLayer { floor:  1000.0, ramp: 4000.0, factor_floor: 0.7, factor_top: 1.2, backing: 15.0 },
        WindLayer { floor:  5000.0, ramp: 7000.0, factor_floor: 1.2, factor_top: 2.0, backing: 30.0 },
        WindLayer { floor: 12000.0, ramp: 8000.0, factor_floor: 2.0, factor_top: 3.5, backing: 45.0 },
    ]
}

/// the layer that contains `altitude_m` (the last layer whose floor is at or below it)
pub fn layer_at (layers: &[WindLayer], altitude_m: f64)->Option<&WindLayer> {
    layers.iter().rev().find( |l| altitude_m >= l.floor).or( layers.first())
}
