//! Shared types for layer styles, scene options, and object geometry

use nnviz_core::{Color, ConnectionStyle, LayoutError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Collection that holds every generated object
pub const COLLECTION_NAME: &str = "NN_Vis";

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid network: {0}")]
    Layout(#[from] LayoutError),
    #[error("Expected {expected} layer styles, got {got}")]
    StyleCount { expected: usize, got: usize },
    #[error("{field} has a channel outside 0.0-1.0")]
    Color { field: String },
    #[error("{field} is {value}, expected {expected}")]
    Range {
        field: String,
        value: f64,
        expected: &'static str,
    },
    #[error("Failed to serialize scene plan: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn check_color(field: impl Into<String>, color: &Color) -> Result<(), SceneError> {
    if color.is_normalized() {
        Ok(())
    } else {
        Err(SceneError::Color {
            field: field.into(),
        })
    }
}

fn check_range(
    field: impl Into<String>,
    value: f64,
    min: f64,
    max: f64,
    expected: &'static str,
) -> Result<(), SceneError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SceneError::Range {
            field: field.into(),
            value,
            expected,
        })
    }
}

/// Appearance of one layer's neurons
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerStyle {
    pub color: Color,
    /// Jitter each neuron's color around `color`
    pub randomize_color: bool,
    pub color_variance: f32,
    /// Bevel width as a fraction of the cube edge (cubes only)
    pub cube_roundness: f32,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            color: Color::rgba(1.0, 0.5, 0.5, 1.0),
            randomize_color: false,
            color_variance: 0.3,
            cube_roundness: 0.0,
        }
    }
}

impl LayerStyle {
    pub fn validate(&self, layer: usize) -> Result<(), SceneError> {
        check_color(format!("layer {} color", layer), &self.color)?;
        check_range(
            format!("layer {} color_variance", layer),
            self.color_variance as f64,
            0.0,
            1.0,
            "0.0-1.0",
        )?;
        check_range(
            format!("layer {} cube_roundness", layer),
            self.cube_roundness as f64,
            0.0,
            1.0,
            "0.0-1.0",
        )
    }
}

/// Scene-wide options beyond the network layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneOptions {
    pub show_connections: bool,
    /// Curve bevel depth
    pub connection_thickness: f64,
    pub connection_style: ConnectionStyle,
    /// Camera and light ring radius, 0 derives it from the scene bounds
    pub camera_radius: f64,
    /// Only honoured when the network is aligned to the ground
    pub add_stage: bool,
    pub stage_radius: f64,
    pub stage_color: Color,
    pub enable_lighting: bool,
    /// Background color, `None` leaves the host's world untouched
    pub world_color: Option<Color>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            show_connections: false,
            connection_thickness: 0.02,
            connection_style: ConnectionStyle::default(),
            camera_radius: 0.0,
            add_stage: false,
            stage_radius: 5.0,
            stage_color: Color::rgba(0.2, 0.2, 0.2, 1.0),
            enable_lighting: false,
            world_color: None,
        }
    }
}

impl SceneOptions {
    pub fn validate(&self) -> Result<(), SceneError> {
        check_range(
            "connection_thickness",
            self.connection_thickness,
            0.001,
            f64::INFINITY,
            ">= 0.001",
        )?;
        check_range(
            "connection_opacity",
            self.connection_style.opacity as f64,
            0.0,
            1.0,
            "0.0-1.0",
        )?;
        check_range(
            "connection_color_variance",
            self.connection_style.variance as f64,
            0.0,
            1.0,
            "0.0-1.0",
        )?;
        check_color("connection_color", &self.connection_style.base_color)?;
        check_range("camera_radius", self.camera_radius, 0.0, f64::INFINITY, ">= 0")?;
        check_range("stage_radius", self.stage_radius, 0.1, f64::INFINITY, ">= 0.1")?;
        check_color("stage_color", &self.stage_color)?;
        if let Some(world) = &self.world_color {
            check_color("world_color", world)?;
        }
        Ok(())
    }
}

/// Bevel applied to cube edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bevel {
    pub width: f64,
    pub segments: u32,
}

/// Mesh primitive for a neuron
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Sphere { radius: f64 },
    Cube { size: f64, bevel: Option<Bevel> },
    Cylinder { radius: f64, depth: f64 },
}

/// Flat material with a diffuse color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub color: Color,
    /// Alpha-blended rather than opaque
    pub blend: bool,
}

impl Material {
    pub fn opaque(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            blend: false,
        }
    }

    pub fn blended(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            blend: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_valid() {
        assert!(SceneOptions::default().validate().is_ok());
        assert!(LayerStyle::default().validate(0).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_options() {
        let options = SceneOptions {
            connection_thickness: 0.0,
            ..Default::default()
        };
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("connection_thickness"));

        let options = SceneOptions {
            stage_radius: 0.05,
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(SceneError::Range { .. })));

        let options = SceneOptions {
            world_color: Some(Color::rgb(1.5, 0.0, 0.0)),
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(SceneError::Color { .. })));
    }

    #[test]
    fn test_rejects_bad_layer_style() {
        let style = LayerStyle {
            cube_roundness: 2.0,
            ..Default::default()
        };
        let err = style.validate(3).unwrap_err();
        assert!(err.to_string().contains("layer 3 cube_roundness"));
    }

    #[test]
    fn test_geometry_serde_tagged() {
        let json = serde_json::to_value(Geometry::Sphere { radius: 0.3 }).unwrap();
        assert_eq!(json["type"], "sphere");
        assert_eq!(json["radius"], 0.3);
    }
}
