//! Connections between adjacent layers

use serde::{Deserialize, Serialize};

use crate::layout::NetworkLayout;

/// A single neuron, addressed by layer and position within the layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NeuronRef {
    pub layer: usize,
    pub neuron: usize,
}

/// Directed edge from a neuron in layer `i` to one in layer `i + 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: NeuronRef,
    pub to: NeuronRef,
}

/// Every pair between each two adjacent layers, given their neuron counts.
///
/// Pairs come out grouped by layer pair, then by source neuron, then by
/// target neuron.
pub fn enumerate_connections(layer_sizes: &[usize]) -> Vec<Connection> {
    let total = layer_sizes.windows(2).map(|w| w[0] * w[1]).sum();
    let mut connections = Vec::with_capacity(total);

    for (layer, pair) in layer_sizes.windows(2).enumerate() {
        for from in 0..pair[0] {
            for to in 0..pair[1] {
                connections.push(Connection {
                    from: NeuronRef {
                        layer,
                        neuron: from,
                    },
                    to: NeuronRef {
                        layer: layer + 1,
                        neuron: to,
                    },
                });
            }
        }
    }

    connections
}

impl NetworkLayout {
    pub fn connections(&self) -> Vec<Connection> {
        let sizes: Vec<usize> = self.layers.iter().map(|l| l.neuron_count).collect();
        enumerate_connections(&sizes)
    }

    /// World positions of a connection's endpoints
    pub fn connection_endpoints(&self, connection: &Connection) -> Option<([f64; 3], [f64; 3])> {
        let start = self.position(connection.from.layer, connection.from.neuron)?;
        let end = self.position(connection.to.layer, connection.to.neuron)?;
        Some((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{LayerSpec, NetworkSpec};

    #[test]
    fn test_full_bipartite_pairs() {
        let connections = enumerate_connections(&[3, 4]);
        assert_eq!(connections.len(), 12);
        assert_eq!(
            connections[0],
            Connection {
                from: NeuronRef { layer: 0, neuron: 0 },
                to: NeuronRef { layer: 1, neuron: 0 },
            }
        );
        assert_eq!(connections[5].from.neuron, 1);
        assert_eq!(connections[5].to.neuron, 1);
        assert!(connections
            .iter()
            .all(|c| c.from.layer == 0 && c.to.layer == 1));
    }

    #[test]
    fn test_only_adjacent_layers_connect() {
        let connections = enumerate_connections(&[2, 3, 1]);
        assert_eq!(connections.len(), 6 + 3);
        assert!(connections.iter().all(|c| c.to.layer == c.from.layer + 1));
    }

    #[test]
    fn test_single_layer_has_no_connections() {
        assert!(enumerate_connections(&[5]).is_empty());
        assert!(enumerate_connections(&[]).is_empty());
    }

    #[test]
    fn test_endpoints_match_positions() {
        let spec = NetworkSpec::new(vec![LayerSpec::new("In", 2), LayerSpec::new("Out", 3)]);
        let layout = NetworkLayout::plan(&spec);
        let connections = layout.connections();
        assert_eq!(connections.len(), 6);
        let (start, end) = layout.connection_endpoints(&connections[4]).unwrap();
        assert_eq!(Some(start), layout.position(0, 1));
        assert_eq!(Some(end), layout.position(1, 1));
        assert_eq!(start[0], 0.0);
        assert_eq!(end[0], 2.0);
    }
}
