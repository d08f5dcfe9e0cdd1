//! Network and layer specifications

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of layers in one network
pub const MAX_LAYERS: usize = 10;
/// Maximum number of neurons in one layer
pub const MAX_NEURONS_PER_LAYER: usize = 1024;
/// Largest explicit grid dimension
pub const MAX_GRID_DIMENSION: usize = MAX_NEURONS_PER_LAYER;
/// Smallest neuron size (radius for spheres/cylinders, edge for cubes)
pub const MIN_NEURON_SIZE: f64 = 0.01;
/// Smallest fixed step between layers
pub const MIN_SPACING: f64 = 0.5;
/// Smallest span for evenly spaced layers
pub const MIN_TOTAL_WIDTH: f64 = 1.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Network has no layers")]
    NoLayers,
    #[error("Network has {0} layers, at most {max} are supported", max = MAX_LAYERS)]
    TooManyLayers(usize),
    #[error("Layer {layer} has {count} neurons, expected 1..={max}", max = MAX_NEURONS_PER_LAYER)]
    NeuronCount { layer: usize, count: usize },
    #[error("Layer {layer} neuron size {size} is below {min}", min = MIN_NEURON_SIZE)]
    NeuronSize { layer: usize, size: f64 },
    #[error("Layer {layer} spacing {spacing} is negative")]
    LayerSpacing { layer: usize, spacing: f64 },
    #[error("Layer {layer} grid {rows}x{cols} exceeds {max} cells per side", max = MAX_GRID_DIMENSION)]
    GridDimension {
        layer: usize,
        rows: usize,
        cols: usize,
    },
    #[error("Layer {layer} grid {rows}x{cols} cannot hold {count} neurons")]
    GridTooSmall {
        layer: usize,
        rows: usize,
        cols: usize,
        count: usize,
    },
    #[error("Global spacing {0} is below {min}", min = MIN_SPACING)]
    Spacing(f64),
    #[error("Total width {0} is below {min}", min = MIN_TOTAL_WIDTH)]
    TotalWidth(f64),
}

/// Shape used for every neuron in the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeuronShape {
    #[default]
    Sphere,
    Cube,
    Cylinder,
}

impl NeuronShape {
    /// Half-extent of a neuron of the given size along any axis.
    ///
    /// Spheres and cylinders are sized by radius, cubes by full edge length.
    pub fn extent(self, size: f64) -> f64 {
        match self {
            NeuronShape::Sphere | NeuronShape::Cylinder => size,
            NeuronShape::Cube => size / 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NeuronShape::Sphere => "sphere",
            NeuronShape::Cube => "cube",
            NeuronShape::Cylinder => "cylinder",
        }
    }
}

impl std::fmt::Display for NeuronShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How layers are distributed along the x axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum Spacing {
    /// First and last layer are `total_width` apart
    Even { total_width: f64 },
    /// Every layer is `step` past the previous one
    Fixed { step: f64 },
}

impl Default for Spacing {
    fn default() -> Self {
        Spacing::Fixed { step: 2.0 }
    }
}

/// One layer of neurons arranged on a grid in the y/z plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub name: String,
    pub neuron_count: usize,
    /// Grid rows, 0 picks automatically
    #[serde(default)]
    pub grid_rows: usize,
    /// Grid columns, 0 picks automatically
    #[serde(default)]
    pub grid_cols: usize,
    pub neuron_size: f64,
    /// Distance from the previous layer, 0 uses the network spacing
    #[serde(default)]
    pub layer_spacing: f64,
}

impl LayerSpec {
    pub fn new(name: impl Into<String>, neuron_count: usize) -> Self {
        Self {
            name: name.into(),
            neuron_count,
            grid_rows: 0,
            grid_cols: 0,
            neuron_size: 0.3,
            layer_spacing: 0.0,
        }
    }

    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.grid_rows = rows;
        self.grid_cols = cols;
        self
    }

    pub fn with_neuron_size(mut self, size: f64) -> Self {
        self.neuron_size = size;
        self
    }

    pub fn with_layer_spacing(mut self, spacing: f64) -> Self {
        self.layer_spacing = spacing;
        self
    }
}

/// Complete, immutable input to the layout planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub layers: Vec<LayerSpec>,
    pub spacing: Spacing,
    pub align_to_ground: bool,
    pub shape: NeuronShape,
}

impl NetworkSpec {
    pub fn new(layers: Vec<LayerSpec>) -> Self {
        Self {
            layers,
            spacing: Spacing::default(),
            align_to_ground: true,
            shape: NeuronShape::default(),
        }
    }

    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_shape(mut self, shape: NeuronShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_ground_alignment(mut self, align: bool) -> Self {
        self.align_to_ground = align;
        self
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn neuron_count(&self) -> usize {
        self.layers.iter().map(|l| l.neuron_count).sum()
    }

    /// Check every field against the ranges the planner relies on.
    ///
    /// The planner itself never re-checks, so callers building a spec from
    /// user input should call this first.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.layers.is_empty() {
            return Err(LayoutError::NoLayers);
        }
        if self.layers.len() > MAX_LAYERS {
            return Err(LayoutError::TooManyLayers(self.layers.len()));
        }

        match self.spacing {
            Spacing::Even { total_width } if total_width < MIN_TOTAL_WIDTH => {
                return Err(LayoutError::TotalWidth(total_width));
            }
            Spacing::Fixed { step } if step < MIN_SPACING => {
                return Err(LayoutError::Spacing(step));
            }
            _ => {}
        }

        for (index, layer) in self.layers.iter().enumerate() {
            if layer.neuron_count == 0 || layer.neuron_count > MAX_NEURONS_PER_LAYER {
                return Err(LayoutError::NeuronCount {
                    layer: index,
                    count: layer.neuron_count,
                });
            }
            // NaN fails this comparison too
            if !(layer.neuron_size >= MIN_NEURON_SIZE) {
                return Err(LayoutError::NeuronSize {
                    layer: index,
                    size: layer.neuron_size,
                });
            }
            if !(layer.layer_spacing >= 0.0) {
                return Err(LayoutError::LayerSpacing {
                    layer: index,
                    spacing: layer.layer_spacing,
                });
            }
            if layer.grid_rows > MAX_GRID_DIMENSION || layer.grid_cols > MAX_GRID_DIMENSION {
                return Err(LayoutError::GridDimension {
                    layer: index,
                    rows: layer.grid_rows,
                    cols: layer.grid_cols,
                });
            }
            let explicit = layer.grid_rows > 0 && layer.grid_cols > 0;
            if explicit && layer.grid_rows.saturating_mul(layer.grid_cols) < layer.neuron_count {
                return Err(LayoutError::GridTooSmall {
                    layer: index,
                    rows: layer.grid_rows,
                    cols: layer.grid_cols,
                    count: layer.neuron_count,
                });
            }
        }

        Ok(())
    }
}
