//! NNviz Core - Network model, layout planning, and color selection
//!
//! This crate provides the host-independent parts of NNviz:
//! - Network and layer specifications with range validation
//! - The layout planner (layer x positions, per-layer grids, cross-layer alignment)
//! - Scene bounds used to size the camera rig and light ring
//! - Connection enumeration between adjacent layers
//! - Neuron and connection color selection

pub mod color;
pub mod connection;
pub mod layout;
pub mod network;

pub use color::{Color, ConnectionColorMode, ConnectionStyle};
pub use connection::{enumerate_connections, Connection, NeuronRef};
pub use layout::{
    align_layer, compute_grid, compute_layer_positions, compute_scene_bounds,
    compute_x_positions, LayerAlignment, LayerGrid, LayerLayout, NetworkLayout, NeuronPlacement,
    SceneBounds,
};
pub use network::{LayerSpec, LayoutError, NetworkSpec, NeuronShape, Spacing};
