//! Complete scene plan for one generation run

use nnviz_core::{Color, NetworkLayout, NetworkSpec, SceneBounds};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::camera::{plan_camera, plan_camera_rig, CameraPlacement, CameraRig};
use crate::models::{plan_connections, plan_neurons, ConnectionObject, NeuronObject};
use crate::scene::{plan_lights, plan_stage, LightObject, StageObject};
use crate::types::{LayerStyle, SceneError, SceneOptions, COLLECTION_NAME};

/// Every object a host has to create for one network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePlan {
    /// Collection replaced by this plan
    pub collection: String,
    pub world_color: Option<Color>,
    pub neurons: Vec<NeuronObject>,
    pub connections: Vec<ConnectionObject>,
    pub bounds: SceneBounds,
    pub camera_rig: CameraRig,
    pub camera: CameraPlacement,
    pub stage: Option<StageObject>,
    pub lights: Vec<LightObject>,
}

impl ScenePlan {
    /// Validate the inputs and plan the scene.
    ///
    /// `styles` must hold one entry per layer. Random color choices draw
    /// from `rng`; positions never do.
    pub fn build<R: Rng + ?Sized>(
        spec: &NetworkSpec,
        styles: &[LayerStyle],
        options: &SceneOptions,
        rng: &mut R,
    ) -> Result<Self, SceneError> {
        spec.validate()?;
        options.validate()?;
        if styles.len() != spec.layers.len() {
            return Err(SceneError::StyleCount {
                expected: spec.layers.len(),
                got: styles.len(),
            });
        }
        for (index, style) in styles.iter().enumerate() {
            style.validate(index)?;
        }

        let layout = NetworkLayout::plan(spec);
        let bounds = layout.bounds();
        debug!(
            min = ?bounds.min,
            max = ?bounds.max,
            auto_radius = bounds.auto_radius(),
            "Computed scene bounds"
        );

        let neurons = plan_neurons(spec, &layout, styles, rng);
        let connections = if options.show_connections {
            plan_connections(
                &layout,
                &neurons,
                options.connection_thickness,
                &options.connection_style,
                rng,
            )
        } else {
            Vec::new()
        };

        let stage = (options.add_stage && spec.align_to_ground)
            .then(|| plan_stage(&bounds, options.stage_radius, options.stage_color));
        let lights = if options.enable_lighting {
            plan_lights(&bounds, options.camera_radius)
        } else {
            Vec::new()
        };

        let plan = Self {
            collection: COLLECTION_NAME.to_string(),
            world_color: options.world_color,
            neurons,
            connections,
            bounds,
            camera_rig: plan_camera_rig(&bounds, options.camera_radius),
            camera: plan_camera(&bounds),
            stage,
            lights,
        };

        info!(
            layers = spec.layers.len(),
            neurons = plan.neurons.len(),
            connections = plan.connections.len(),
            lights = plan.lights.len(),
            stage = plan.stage.is_some(),
            "Planned scene"
        );

        Ok(plan)
    }

    /// Plan with the thread-local RNG; colors differ between runs
    pub fn generate(
        spec: &NetworkSpec,
        styles: &[LayerStyle],
        options: &SceneOptions,
    ) -> Result<Self, SceneError> {
        Self::build(spec, styles, options, &mut rand::thread_rng())
    }

    /// Objects linked into the collection, counting the camera rig
    pub fn object_count(&self) -> usize {
        self.neurons.len()
            + self.connections.len()
            + self.lights.len()
            + usize::from(self.stage.is_some())
            + 1
    }

    pub fn to_json_pretty(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nnviz_core::{ConnectionColorMode, LayerSpec, NeuronShape, Spacing};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spec() -> NetworkSpec {
        NetworkSpec::new(vec![
            LayerSpec::new("Input", 4),
            LayerSpec::new("Hidden", 2),
            LayerSpec::new("Output", 4),
        ])
        .with_spacing(Spacing::Even { total_width: 6.0 })
    }

    fn styles() -> Vec<LayerStyle> {
        vec![LayerStyle::default(); 3]
    }

    #[test]
    fn test_minimal_plan() {
        let plan = ScenePlan::build(
            &spec(),
            &styles(),
            &SceneOptions::default(),
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();

        assert_eq!(plan.collection, "NN_Vis");
        assert_eq!(plan.neurons.len(), 10);
        assert!(plan.connections.is_empty());
        assert!(plan.lights.is_empty());
        assert!(plan.stage.is_none());
        assert!(plan.world_color.is_none());
        assert_eq!(plan.object_count(), 11);
        assert_eq!(plan.neurons[9].location[0], 6.0);
    }

    #[test]
    fn test_full_plan() {
        let options = SceneOptions {
            show_connections: true,
            add_stage: true,
            enable_lighting: true,
            world_color: Some(Color::rgb(0.05, 0.05, 0.05)),
            ..Default::default()
        };
        let plan = ScenePlan::build(&spec(), &styles(), &options, &mut StdRng::seed_from_u64(0))
            .unwrap();

        assert_eq!(plan.connections.len(), 4 * 2 + 2 * 4);
        assert_eq!(plan.lights.len(), 4);
        let stage = plan.stage.as_ref().unwrap();
        assert_eq!(stage.center[2], 0.0);
        assert_eq!(plan.camera_rig.center, stage.center);
        assert_eq!(plan.object_count(), 10 + 16 + 4 + 1 + 1);
    }

    #[test]
    fn test_stage_needs_ground_alignment() {
        let spec = spec().with_ground_alignment(false);
        let options = SceneOptions {
            add_stage: true,
            ..Default::default()
        };
        let plan = ScenePlan::generate(&spec, &styles(), &options).unwrap();
        assert!(plan.stage.is_none());
    }

    #[test]
    fn test_rejects_style_mismatch() {
        let result = ScenePlan::generate(&spec(), &styles()[..2], &SceneOptions::default());
        assert!(matches!(
            result,
            Err(SceneError::StyleCount {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn test_rejects_invalid_network() {
        let mut spec = spec();
        spec.layers[1].neuron_count = 0;
        let result = ScenePlan::generate(&spec, &styles(), &SceneOptions::default());
        assert!(matches!(result, Err(SceneError::Layout(_))));
    }

    #[test]
    fn test_seeded_plans_match() {
        let styles = vec![
            LayerStyle {
                randomize_color: true,
                ..Default::default()
            };
            3
        ];
        let options = SceneOptions {
            show_connections: true,
            connection_style: nnviz_core::ConnectionStyle {
                mode: ConnectionColorMode::Random,
                ..Default::default()
            },
            ..Default::default()
        };
        let spec = spec().with_shape(NeuronShape::Cube);
        let a = ScenePlan::build(&spec, &styles, &options, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = ScenePlan::build(&spec, &styles, &options, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_positions_ignore_randomness() {
        let options = SceneOptions::default();
        let a = ScenePlan::build(&spec(), &styles(), &options, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = ScenePlan::build(&spec(), &styles(), &options, &mut StdRng::seed_from_u64(2)).unwrap();
        let locations = |p: &ScenePlan| p.neurons.iter().map(|n| n.location).collect::<Vec<_>>();
        assert_eq!(locations(&a), locations(&b));
    }

    #[test]
    fn test_json_output() {
        let plan = ScenePlan::generate(&spec(), &styles(), &SceneOptions::default()).unwrap();
        let json = plan.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["collection"], "NN_Vis");
        assert_eq!(value["neurons"].as_array().unwrap().len(), 10);
        assert_eq!(value["camera_rig"]["name"], "CameraRig");
    }
}
