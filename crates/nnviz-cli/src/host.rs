//! Host that logs the scene instead of building it

use nnviz_core::Color;
use nnviz_scene::{
    CameraPlacement, CameraRig, ConnectionObject, LightObject, NeuronObject, SceneHost,
    StageObject,
};
use std::convert::Infallible;
use tracing::{debug, info};

/// Tally of objects a host was asked to create
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneSummary {
    pub neurons: usize,
    pub connections: usize,
    pub lights: usize,
    pub stage: bool,
    pub world_color: bool,
}

#[derive(Debug, Default)]
pub struct LogHost {
    pub summary: SceneSummary,
}

impl SceneHost for LogHost {
    type Error = Infallible;

    fn reset_collection(&mut self, name: &str) -> Result<(), Infallible> {
        info!(collection = name, "Resetting collection");
        Ok(())
    }

    fn set_world_color(&mut self, color: Color) -> Result<(), Infallible> {
        info!(color = ?color.to_array(), "World color");
        self.summary.world_color = true;
        Ok(())
    }

    fn add_neuron(&mut self, _collection: &str, neuron: &NeuronObject) -> Result<(), Infallible> {
        debug!(
            name = %neuron.name,
            location = ?neuron.location,
            geometry = ?neuron.geometry,
            "Neuron"
        );
        self.summary.neurons += 1;
        Ok(())
    }

    fn add_connection(
        &mut self,
        _collection: &str,
        connection: &ConnectionObject,
    ) -> Result<(), Infallible> {
        debug!(from = ?connection.from, to = ?connection.to, "Connection");
        self.summary.connections += 1;
        Ok(())
    }

    fn add_camera_rig(&mut self, rig: &CameraRig) -> Result<(), Infallible> {
        info!(center = ?rig.center, radius = rig.radius, "Camera rig");
        Ok(())
    }

    fn place_camera(&mut self, camera: &CameraPlacement) -> Result<(), Infallible> {
        info!(location = ?camera.location, target = %camera.target, "Camera");
        Ok(())
    }

    fn add_stage(&mut self, _collection: &str, stage: &StageObject) -> Result<(), Infallible> {
        info!(center = ?stage.center, radius = stage.radius, "Stage");
        self.summary.stage = true;
        Ok(())
    }

    fn add_light(&mut self, _collection: &str, light: &LightObject) -> Result<(), Infallible> {
        debug!(name = %light.name, location = ?light.location, "Light");
        self.summary.lights += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nnviz_core::{LayerSpec, NetworkSpec};
    use nnviz_scene::{LayerStyle, ScenePlan, SceneOptions};

    #[test]
    fn test_summary_counts() {
        let spec = NetworkSpec::new(vec![LayerSpec::new("A", 3), LayerSpec::new("B", 4)]);
        let options = SceneOptions {
            show_connections: true,
            enable_lighting: true,
            add_stage: true,
            ..Default::default()
        };
        let plan = ScenePlan::generate(&spec, &[LayerStyle::default(); 2], &options).unwrap();

        let mut host = LogHost::default();
        plan.apply(&mut host).unwrap();
        assert_eq!(
            host.summary,
            SceneSummary {
                neurons: 7,
                connections: 12,
                lights: 4,
                stage: true,
                world_color: false,
            }
        );
    }
}
