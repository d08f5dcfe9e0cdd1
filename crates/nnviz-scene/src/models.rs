//! Neuron meshes and connection curves

use nnviz_core::{Color, ConnectionStyle, NetworkLayout, NetworkSpec, NeuronRef, NeuronShape};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{Bevel, Geometry, LayerStyle, Material};

/// Segments used for rounded cube edges
const BEVEL_SEGMENTS: u32 = 4;

/// One neuron mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuronObject {
    pub name: String,
    pub neuron: NeuronRef,
    pub location: [f64; 3],
    pub geometry: Geometry,
    pub material: Material,
}

/// One connection curve between two neurons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionObject {
    pub name: String,
    pub from: NeuronRef,
    pub to: NeuronRef,
    pub start: [f64; 3],
    pub end: [f64; 3],
    /// Curve bevel depth
    pub thickness: f64,
    pub material: Material,
}

/// Mesh primitive for a neuron of the given shape and size
pub fn neuron_geometry(shape: NeuronShape, size: f64, cube_roundness: f32) -> Geometry {
    match shape {
        NeuronShape::Sphere => Geometry::Sphere { radius: size },
        NeuronShape::Cube => Geometry::Cube {
            size,
            bevel: (cube_roundness > 0.0).then(|| Bevel {
                width: cube_roundness as f64 * size,
                segments: BEVEL_SEGMENTS,
            }),
        },
        NeuronShape::Cylinder => Geometry::Cylinder {
            radius: size,
            depth: size * 2.0,
        },
    }
}

/// Color assigned to one neuron of a layer
pub fn neuron_color<R: Rng + ?Sized>(style: &LayerStyle, rng: &mut R) -> Color {
    if style.randomize_color {
        style.color.jitter(style.color_variance, rng)
    } else {
        style.color
    }
}

/// One object per placed neuron, in placement order.
///
/// `styles` is indexed by layer.
pub fn plan_neurons<R: Rng + ?Sized>(
    spec: &NetworkSpec,
    layout: &NetworkLayout,
    styles: &[LayerStyle],
    rng: &mut R,
) -> Vec<NeuronObject> {
    let mut neurons = Vec::with_capacity(layout.neuron_count());

    for ((layer_spec, layer), style) in spec.layers.iter().zip(&layout.layers).zip(styles) {
        let geometry = neuron_geometry(spec.shape, layer_spec.neuron_size, style.cube_roundness);
        let material_name = format!("{}_Mat", layer_spec.name);

        for placement in layer.placements() {
            neurons.push(NeuronObject {
                name: format!("{}_{}", layer_spec.name, placement.neuron_index),
                neuron: NeuronRef {
                    layer: placement.layer_index,
                    neuron: placement.neuron_index,
                },
                location: placement.position,
                geometry,
                material: Material::opaque(material_name.clone(), neuron_color(style, rng)),
            });
        }
    }

    neurons
}

/// One curve per adjacent-layer neuron pair.
///
/// Endpoint colors for the layer-blend mode come from `neurons`, so each
/// connection blends the colors actually assigned to its two neurons.
pub fn plan_connections<R: Rng + ?Sized>(
    layout: &NetworkLayout,
    neurons: &[NeuronObject],
    thickness: f64,
    style: &ConnectionStyle,
    rng: &mut R,
) -> Vec<ConnectionObject> {
    // Layer start offsets into `neurons`, which is in placement order
    let mut offsets = Vec::with_capacity(layout.layers.len());
    let mut offset = 0;
    for layer in &layout.layers {
        offsets.push(offset);
        offset += layer.neuron_count;
    }
    let color_of = |r: &NeuronRef| {
        offsets
            .get(r.layer)
            .and_then(|start| neurons.get(start + r.neuron))
            .map(|n| n.material.color)
            .unwrap_or_default()
    };

    layout
        .connections()
        .into_iter()
        .filter_map(|connection| {
            let (start, end) = layout.connection_endpoints(&connection)?;
            let color = style.color(color_of(&connection.from), color_of(&connection.to), rng);
            Some(ConnectionObject {
                name: "Connection".to_string(),
                from: connection.from,
                to: connection.to,
                start,
                end,
                thickness,
                material: Material::blended("ConnMat", color),
            })
        })
        .collect()
}
