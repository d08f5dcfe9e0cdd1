//! Configuration loading and conversion

use anyhow::{bail, Result};
use nnviz_core::network::MAX_LAYERS;
use nnviz_core::{Color, ConnectionColorMode, ConnectionStyle, LayerSpec, NetworkSpec, NeuronShape, Spacing};
use nnviz_scene::{LayerStyle, SceneOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default, rename = "layer")]
    pub layers: Vec<LayerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Number of layers; the layer list is padded or truncated to match
    #[serde(default)]
    pub layer_count: Option<usize>,
    #[serde(default)]
    pub neuron_shape: NeuronShape,
    /// Spread layers evenly over `total_width` instead of stepping by `spacing`
    #[serde(default)]
    pub use_even_spacing: bool,
    #[serde(default = "default_spacing")]
    pub spacing: f64,
    #[serde(default = "default_total_width")]
    pub total_width: f64,
    #[serde(default = "default_true")]
    pub align_to_ground: bool,
    #[serde(default)]
    pub add_stage: bool,
    #[serde(default = "default_stage_radius")]
    pub stage_radius: f64,
    #[serde(default = "default_stage_color")]
    pub stage_color: [f32; 4],
    #[serde(default)]
    pub enable_lighting: bool,
    /// Camera circle radius, 0 sizes it from the network
    #[serde(default)]
    pub camera_radius: f64,
    #[serde(default)]
    pub show_connections: bool,
    #[serde(default = "default_connection_thickness")]
    pub connection_thickness: f64,
    #[serde(default = "default_connection_opacity")]
    pub connection_opacity: f32,
    #[serde(default)]
    pub connection_color_mode: ConnectionColorMode,
    #[serde(default = "default_connection_color")]
    pub connection_color: [f32; 4],
    /// Saturation/value spread for random connection colors
    #[serde(default = "default_connection_color_variance")]
    pub connection_color_variance: f32,
    #[serde(default)]
    pub use_world_color: bool,
    #[serde(default = "default_world_color")]
    pub world_color: [f32; 4],
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            layer_count: None,
            neuron_shape: NeuronShape::default(),
            use_even_spacing: false,
            spacing: default_spacing(),
            total_width: default_total_width(),
            align_to_ground: true,
            add_stage: false,
            stage_radius: default_stage_radius(),
            stage_color: default_stage_color(),
            enable_lighting: false,
            camera_radius: 0.0,
            show_connections: false,
            connection_thickness: default_connection_thickness(),
            connection_opacity: default_connection_opacity(),
            connection_color_mode: ConnectionColorMode::default(),
            connection_color: default_connection_color(),
            connection_color_variance: default_connection_color_variance(),
            use_world_color: false,
            world_color: default_world_color(),
        }
    }
}

fn default_spacing() -> f64 {
    2.0
}

fn default_total_width() -> f64 {
    5.0
}

fn default_true() -> bool {
    true
}

fn default_stage_radius() -> f64 {
    5.0
}

fn default_stage_color() -> [f32; 4] {
    [0.2, 0.2, 0.2, 1.0]
}

fn default_connection_thickness() -> f64 {
    0.02
}

fn default_connection_opacity() -> f32 {
    0.5
}

fn default_connection_color() -> [f32; 4] {
    [0.8, 0.8, 0.8, 1.0]
}

fn default_connection_color_variance() -> f32 {
    0.2
}

fn default_world_color() -> [f32; 4] {
    [0.05, 0.05, 0.05, 1.0]
}

/// Number of layers when neither `layer_count` nor `[[layer]]` is given
const DEFAULT_LAYER_COUNT: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerConfig {
    #[serde(default = "default_layer_name")]
    pub name: String,
    #[serde(default = "default_layer_color")]
    pub color: [f32; 4],
    #[serde(default = "default_neuron_count")]
    pub neuron_count: usize,
    #[serde(default)]
    pub grid_rows: usize,
    #[serde(default)]
    pub grid_cols: usize,
    #[serde(default = "default_neuron_size")]
    pub neuron_size: f64,
    /// Gap before this layer, 0 uses the network spacing
    #[serde(default)]
    pub layer_spacing: f64,
    #[serde(default)]
    pub cube_roundness: f32,
    #[serde(default)]
    pub randomize_color: bool,
    #[serde(default = "default_color_variance")]
    pub color_variance: f32,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            name: default_layer_name(),
            color: default_layer_color(),
            neuron_count: default_neuron_count(),
            grid_rows: 0,
            grid_cols: 0,
            neuron_size: default_neuron_size(),
            layer_spacing: 0.0,
            cube_roundness: 0.0,
            randomize_color: false,
            color_variance: default_color_variance(),
        }
    }
}

fn default_layer_name() -> String {
    "Layer".to_string()
}

fn default_layer_color() -> [f32; 4] {
    [1.0, 0.5, 0.5, 1.0]
}

fn default_neuron_count() -> usize {
    1
}

fn default_neuron_size() -> f64 {
    0.3
}

fn default_color_variance() -> f32 {
    0.3
}

impl Config {
    /// Layer list resized to `layer_count`
    pub fn resolved_layers(&self) -> Result<Vec<LayerConfig>> {
        let count = match self.network.layer_count {
            Some(count) => count,
            None if self.layers.is_empty() => DEFAULT_LAYER_COUNT,
            None => self.layers.len(),
        };
        if count > MAX_LAYERS {
            bail!("layer_count {} exceeds the maximum of {} layers", count, MAX_LAYERS);
        }

        let mut layers = self.layers.clone();
        if !layers.is_empty() && layers.len() != count {
            warn!(
                configured = layers.len(),
                layer_count = count,
                "Layer list does not match layer_count, padding with defaults or truncating"
            );
        }
        layers.resize_with(count, LayerConfig::default);
        Ok(layers)
    }

    pub fn to_network_spec(&self, layers: &[LayerConfig]) -> NetworkSpec {
        let network = &self.network;
        let spacing = if network.use_even_spacing {
            Spacing::Even {
                total_width: network.total_width,
            }
        } else {
            Spacing::Fixed {
                step: network.spacing,
            }
        };

        NetworkSpec {
            layers: layers
                .iter()
                .map(|l| LayerSpec {
                    name: l.name.clone(),
                    neuron_count: l.neuron_count,
                    grid_rows: l.grid_rows,
                    grid_cols: l.grid_cols,
                    neuron_size: l.neuron_size,
                    layer_spacing: l.layer_spacing,
                })
                .collect(),
            spacing,
            align_to_ground: network.align_to_ground,
            shape: network.neuron_shape,
        }
    }

    pub fn to_layer_styles(layers: &[LayerConfig]) -> Vec<LayerStyle> {
        layers
            .iter()
            .map(|l| LayerStyle {
                color: Color::from(l.color),
                randomize_color: l.randomize_color,
                color_variance: l.color_variance,
                cube_roundness: l.cube_roundness,
            })
            .collect()
    }

    pub fn to_scene_options(&self) -> SceneOptions {
        let network = &self.network;
        SceneOptions {
            show_connections: network.show_connections,
            connection_thickness: network.connection_thickness,
            connection_style: ConnectionStyle {
                mode: network.connection_color_mode,
                base_color: Color::from(network.connection_color),
                opacity: network.connection_opacity,
                variance: network.connection_color_variance,
            },
            camera_radius: network.camera_radius,
            add_stage: network.add_stage,
            stage_radius: network.stage_radius,
            stage_color: Color::from(network.stage_color),
            enable_lighting: network.enable_lighting,
            world_color: network
                .use_world_color
                .then(|| Color::from(network.world_color)),
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!(path = %path.display(), layers = config.layers.len(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(Config::default())
    }
}

/// Sample configuration: a small three-layer perceptron
pub fn sample_config() -> Config {
    Config {
        network: NetworkConfig {
            layer_count: Some(3),
            use_even_spacing: true,
            show_connections: true,
            connection_color_mode: ConnectionColorMode::Layer,
            enable_lighting: true,
            add_stage: true,
            ..Default::default()
        },
        layers: vec![
            LayerConfig {
                name: "Input".to_string(),
                color: [0.2, 0.6, 1.0, 1.0],
                neuron_count: 9,
                ..Default::default()
            },
            LayerConfig {
                name: "Hidden".to_string(),
                color: [1.0, 0.5, 0.5, 1.0],
                neuron_count: 6,
                grid_rows: 2,
                randomize_color: true,
                ..Default::default()
            },
            LayerConfig {
                name: "Output".to_string(),
                color: [0.4, 1.0, 0.4, 1.0],
                neuron_count: 2,
                grid_rows: 1,
                ..Default::default()
            },
        ],
    }
}

/// Save the sample configuration to file
pub fn save_default_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&sample_config())?;
    std::fs::write(path, content)?;
    Ok(())
}
