//! Camera rig and orbit camera placement

use nnviz_core::SceneBounds;
use serde::{Deserialize, Serialize};

/// Name of the orbit circle the camera and lights hang from
pub const CAMERA_RIG_NAME: &str = "CameraRig";

/// Orbit circle on the ground plane around the network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub name: String,
    pub center: [f64; 3],
    pub radius: f64,
}

/// Where the scene camera goes and what it looks at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPlacement {
    pub location: [f64; 3],
    /// Object the camera is parented to and tracks
    pub target: String,
    pub track_axis: String,
    pub up_axis: String,
}

/// Ring radius: the explicit override when positive, else the bounds radius
pub fn ring_radius(bounds: &SceneBounds, radius_override: f64) -> f64 {
    if radius_override > 0.0 {
        radius_override
    } else {
        bounds.auto_radius()
    }
}

/// Center of the scene projected onto the ground plane
pub fn ground_center(bounds: &SceneBounds) -> [f64; 3] {
    let center = bounds.center();
    [center[0], center[1], 0.0]
}

pub fn plan_camera_rig(bounds: &SceneBounds, radius_override: f64) -> CameraRig {
    CameraRig {
        name: CAMERA_RIG_NAME.to_string(),
        center: ground_center(bounds),
        radius: ring_radius(bounds, radius_override),
    }
}

/// Camera offset from the rig center by the bounds radius, raised by half
/// of it, tracking the rig.
///
/// The offset ignores any radius override; only the rig circle uses it.
pub fn plan_camera(bounds: &SceneBounds) -> CameraPlacement {
    let center = ground_center(bounds);
    let auto_radius = bounds.auto_radius();
    CameraPlacement {
        location: [
            center[0] + auto_radius,
            center[1],
            center[2] + auto_radius * 0.5,
        ],
        target: CAMERA_RIG_NAME.to_string(),
        track_axis: "TRACK_NEGATIVE_Z".to_string(),
        up_axis: "UP_Y".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> SceneBounds {
        SceneBounds {
            min: [-0.5, -1.5, 0.0],
            max: [4.5, 1.5, 1.0],
        }
    }

    #[test]
    fn test_rig_uses_auto_radius() {
        let rig = plan_camera_rig(&bounds(), 0.0);
        assert_eq!(rig.name, "CameraRig");
        assert_eq!(rig.center, [2.0, 0.0, 0.0]);
        assert!((rig.radius - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rig_radius_override() {
        let rig = plan_camera_rig(&bounds(), 7.5);
        assert_eq!(rig.radius, 7.5);
    }

    #[test]
    fn test_camera_offset_from_center() {
        let camera = plan_camera(&bounds());
        assert!((camera.location[0] - 5.0).abs() < 1e-9);
        assert_eq!(camera.location[1], 0.0);
        assert!((camera.location[2] - 1.5).abs() < 1e-9);
        assert_eq!(camera.target, CAMERA_RIG_NAME);
    }
}
