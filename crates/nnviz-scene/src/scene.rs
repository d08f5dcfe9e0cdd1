//! Scene setup - stage, ring lights, and world color

use nnviz_core::{Color, SceneBounds};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

use crate::camera::{ground_center, ring_radius, CAMERA_RIG_NAME};
use crate::types::Material;

pub const STAGE_NAME: &str = "NN_Stage";
/// Point light power in watts
pub const LIGHT_ENERGY: f64 = 1000.0;
const LIGHT_COUNT: usize = 4;

/// Filled disc on the ground plane under the network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageObject {
    pub name: String,
    pub center: [f64; 3],
    pub radius: f64,
    pub material: Material,
}

/// Point light parented to the camera rig
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightObject {
    pub name: String,
    pub location: [f64; 3],
    pub energy: f64,
    pub parent: String,
}

pub fn plan_stage(bounds: &SceneBounds, radius: f64, color: Color) -> StageObject {
    StageObject {
        name: STAGE_NAME.to_string(),
        center: ground_center(bounds),
        radius,
        material: Material::opaque("StageMat", color),
    }
}

/// Four lights on the diagonals around the scene center.
///
/// Height is derived from the bounds radius even when the ring radius is
/// overridden.
pub fn plan_lights(bounds: &SceneBounds, radius_override: f64) -> Vec<LightObject> {
    let center = ground_center(bounds);
    let radius = ring_radius(bounds, radius_override);
    let height = bounds.auto_radius() * 0.8;

    (0..LIGHT_COUNT)
        .map(|i| {
            let angle = FRAC_PI_4 * (2 * i + 1) as f64;
            LightObject {
                name: format!("NN_Light_{}", i),
                location: [
                    center[0] + radius * angle.cos(),
                    center[1] + radius * angle.sin(),
                    height,
                ],
                energy: LIGHT_ENERGY,
                parent: CAMERA_RIG_NAME.to_string(),
            }
        })
        .collect()
}
