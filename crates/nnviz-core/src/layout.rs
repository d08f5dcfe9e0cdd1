//! Layout planner - neuron positions, layer alignment, and scene bounds
//!
//! Layers sit on planes of constant x. Within a layer, neurons fill a grid in
//! the y/z plane row-major. Each layer's grid is shifted so its centroid
//! continues the centroid chain of the layers before it, and optionally lifted
//! so its lowest neuron rests on z = 0.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::network::{LayerSpec, NetworkSpec, Spacing};

/// Gap between neighbouring neurons as a fraction of their footprint
const GRID_MARGIN: f64 = 1.2;
/// Margin applied to the bounds radius for the camera and light rings
const RADIUS_MARGIN: f64 = 1.2;

/// Position of a single neuron in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeuronPlacement {
    pub layer_index: usize,
    pub neuron_index: usize,
    pub position: [f64; 3],
}

/// Cross-layer alignment of one layer's grid
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerAlignment {
    /// Grid centroid before alignment
    pub center_y: f64,
    pub center_z: f64,
    pub offset_y: f64,
    pub offset_z: f64,
    /// Extra lift applied when aligning to the ground, 0 otherwise
    pub ground_shift_z: f64,
}

impl LayerAlignment {
    /// Centroid of the aligned layer, which the next layer aligns to
    pub fn aligned_center(&self) -> (f64, f64) {
        (
            self.center_y + self.offset_y,
            self.center_z + self.offset_z + self.ground_shift_z,
        )
    }
}

/// Axis-aligned box around every placed neuron
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneBounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl SceneBounds {
    pub fn center(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    /// Extent along x
    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    /// Extent along y
    pub fn depth(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    /// Extent along z
    pub fn height(&self) -> f64 {
        self.max[2] - self.min[2]
    }

    /// Radius of a ground-plane circle enclosing the network with margin
    pub fn auto_radius(&self) -> f64 {
        self.width().max(self.depth()) / 2.0 * RADIUS_MARGIN
    }

    fn include(&mut self, position: [f64; 3], extent: f64) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(position[axis] - extent);
            self.max[axis] = self.max[axis].max(position[axis] + extent);
        }
    }
}

/// Raw grid of one layer, centered on the origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerGrid {
    pub rows: usize,
    pub cols: usize,
    /// Distance between neighbouring cell centers
    pub step: f64,
    /// Cell y coordinate per column
    pub y_pos: Vec<f64>,
    /// Cell z coordinate per row
    pub z_pos: Vec<f64>,
}

/// Planned layer: grid, x plane, and alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerLayout {
    pub index: usize,
    pub neuron_count: usize,
    pub x: f64,
    /// Half-extent of one neuron in this layer
    pub extent: f64,
    pub grid: LayerGrid,
    pub alignment: LayerAlignment,
}

impl LayerLayout {
    /// World position of a neuron, `None` past the end of the layer
    pub fn position(&self, neuron_index: usize) -> Option<[f64; 3]> {
        if neuron_index >= self.neuron_count || self.grid.cols == 0 {
            return None;
        }
        let row = neuron_index / self.grid.cols;
        let col = neuron_index % self.grid.cols;
        let y = self.grid.y_pos.get(col)?;
        let z = self.grid.z_pos.get(row)?;
        Some([
            self.x,
            y + self.alignment.offset_y,
            z + self.alignment.offset_z + self.alignment.ground_shift_z,
        ])
    }

    pub fn placements(&self) -> impl Iterator<Item = NeuronPlacement> + '_ {
        (0..self.neuron_count).filter_map(move |neuron_index| {
            self.position(neuron_index).map(|position| NeuronPlacement {
                layer_index: self.index,
                neuron_index,
                position,
            })
        })
    }
}

/// Complete layout of a network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkLayout {
    pub x_positions: Vec<f64>,
    pub layers: Vec<LayerLayout>,
}

impl NetworkLayout {
    /// Plan every layer of a network.
    ///
    /// Expects a spec that passed [`NetworkSpec::validate`].
    pub fn plan(spec: &NetworkSpec) -> Self {
        let x_positions = compute_x_positions(spec);
        let mut layers = Vec::with_capacity(spec.layers.len());
        let mut previous_center = (0.0, 0.0);

        for (index, (layer, &x)) in spec.layers.iter().zip(&x_positions).enumerate() {
            let extent = spec.shape.extent(layer.neuron_size);
            let grid = compute_layer_positions(layer);
            let ground_extent = spec.align_to_ground.then_some(extent);
            let alignment = align_layer(&grid, previous_center, ground_extent);
            previous_center = alignment.aligned_center();

            debug!(
                layer = %layer.name,
                index,
                x,
                rows = grid.rows,
                cols = grid.cols,
                offset_y = alignment.offset_y,
                offset_z = alignment.offset_z,
                ground_shift_z = alignment.ground_shift_z,
                "Planned layer"
            );

            layers.push(LayerLayout {
                index,
                neuron_count: layer.neuron_count,
                x,
                extent,
                grid,
                alignment,
            });
        }

        Self {
            x_positions,
            layers,
        }
    }

    pub fn position(&self, layer_index: usize, neuron_index: usize) -> Option<[f64; 3]> {
        self.layers.get(layer_index)?.position(neuron_index)
    }

    /// All placements, layer by layer, row-major within each layer
    pub fn placements(&self) -> Vec<NeuronPlacement> {
        self.layers.iter().flat_map(|l| l.placements()).collect()
    }

    pub fn neuron_count(&self) -> usize {
        self.layers.iter().map(|l| l.neuron_count).sum()
    }

    pub fn bounds(&self) -> SceneBounds {
        compute_scene_bounds(self.layers.iter().flat_map(|layer| {
            layer.placements().map(move |p| (p.position, layer.extent))
        }))
    }
}

/// X coordinate of every layer.
///
/// The first layer sits at 0. A positive per-layer spacing overrides the
/// network spacing for the gap before that layer.
pub fn compute_x_positions(spec: &NetworkSpec) -> Vec<f64> {
    let count = spec.layers.len();
    let default_step = match spec.spacing {
        Spacing::Even { total_width } if count > 1 => total_width / (count - 1) as f64,
        Spacing::Even { total_width } => total_width,
        Spacing::Fixed { step } => step,
    };

    let mut positions = Vec::with_capacity(count);
    let mut x = 0.0;
    for (index, layer) in spec.layers.iter().enumerate() {
        if index > 0 {
            x += if layer.layer_spacing > 0.0 {
                layer.layer_spacing
            } else {
                default_step
            };
        }
        positions.push(x);
    }
    positions
}

/// Grid dimensions `(rows, cols)` for a layer.
///
/// A single explicit row lays the layer out flat. Otherwise zero picks the
/// smallest square that fits. If only one dimension is explicit and the
/// square guess is too small, the automatic dimension grows to fit.
pub fn compute_grid(neuron_count: usize, grid_rows: usize, grid_cols: usize) -> (usize, usize) {
    let side = ceil_sqrt(neuron_count);
    let (mut rows, mut cols) = if grid_rows == 1 {
        (1, if grid_cols > 0 { grid_cols } else { neuron_count })
    } else {
        (
            if grid_rows > 0 { grid_rows } else { side },
            if grid_cols > 0 { grid_cols } else { side },
        )
    };

    if rows.saturating_mul(cols) < neuron_count {
        if grid_cols > 0 {
            rows = neuron_count.div_ceil(cols);
        } else {
            cols = neuron_count.div_ceil(rows);
        }
    }

    (rows, cols)
}

fn ceil_sqrt(n: usize) -> usize {
    let mut side = (n as f64).sqrt() as usize;
    while side * side < n {
        side += 1;
    }
    side
}

/// Raw grid cell coordinates for a layer, centered on (0, 0)
pub fn compute_layer_positions(layer: &LayerSpec) -> LayerGrid {
    let (rows, cols) = compute_grid(layer.neuron_count, layer.grid_rows, layer.grid_cols);
    let step = layer.neuron_size * 2.0 * GRID_MARGIN;
    LayerGrid {
        rows,
        cols,
        step,
        y_pos: centered_cells(cols, step),
        z_pos: centered_cells(rows, step),
    }
}

fn centered_cells(count: usize, step: f64) -> Vec<f64> {
    let half = count as f64 / 2.0;
    (0..count)
        .map(|i| (i as f64 - half + 0.5) * step)
        .collect()
}

fn midpoint(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min + max) / 2.0
}

/// Align a layer's grid to the centroid of the previous layer.
///
/// `ground_extent` is the neuron half-extent when the layer should rest on
/// z = 0, `None` to leave it floating.
pub fn align_layer(
    grid: &LayerGrid,
    previous_center: (f64, f64),
    ground_extent: Option<f64>,
) -> LayerAlignment {
    let center_y = midpoint(&grid.y_pos);
    let center_z = midpoint(&grid.z_pos);
    let offset_y = previous_center.0 - center_y;
    let offset_z = previous_center.1 - center_z;

    let ground_shift_z = match ground_extent {
        Some(extent) => {
            let lowest = grid.z_pos.iter().copied().fold(f64::INFINITY, f64::min);
            if lowest.is_finite() {
                extent - (lowest + offset_z)
            } else {
                0.0
            }
        }
        None => 0.0,
    };

    LayerAlignment {
        center_y,
        center_z,
        offset_y,
        offset_z,
        ground_shift_z,
    }
}

/// Bounds over `(position, half_extent)` pairs.
///
/// An empty input yields zero-sized bounds at the origin.
pub fn compute_scene_bounds<I>(neurons: I) -> SceneBounds
where
    I: IntoIterator<Item = ([f64; 3], f64)>,
{
    let mut bounds = SceneBounds {
        min: [f64::INFINITY; 3],
        max: [f64::NEG_INFINITY; 3],
    };
    let mut any = false;
    for (position, extent) in neurons {
        bounds.include(position, extent);
        any = true;
    }
    if any {
        bounds
    } else {
        SceneBounds::default()
    }
}
