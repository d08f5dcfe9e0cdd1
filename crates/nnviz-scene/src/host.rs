//! Host application contract
//!
//! A host owns the real scene graph. [`ScenePlan::apply`] calls into it in a
//! fixed order: clear the collection, set the world color, neurons,
//! connections, camera rig, camera, stage, lights. The first host error
//! aborts the run; objects created before it are left in place.

use nnviz_core::Color;

use crate::camera::{CameraPlacement, CameraRig};
use crate::models::{ConnectionObject, NeuronObject};
use crate::plan::ScenePlan;
use crate::scene::{LightObject, StageObject};

pub trait SceneHost {
    type Error;

    /// Remove a previous run's collection and every object in it, then
    /// create it empty
    fn reset_collection(&mut self, name: &str) -> Result<(), Self::Error>;

    fn set_world_color(&mut self, color: Color) -> Result<(), Self::Error>;

    fn add_neuron(&mut self, collection: &str, neuron: &NeuronObject) -> Result<(), Self::Error>;

    fn add_connection(
        &mut self,
        collection: &str,
        connection: &ConnectionObject,
    ) -> Result<(), Self::Error>;

    fn add_camera_rig(&mut self, rig: &CameraRig) -> Result<(), Self::Error>;

    /// Reuse the host's active camera if it has one
    fn place_camera(&mut self, camera: &CameraPlacement) -> Result<(), Self::Error>;

    fn add_stage(&mut self, collection: &str, stage: &StageObject) -> Result<(), Self::Error>;

    fn add_light(&mut self, collection: &str, light: &LightObject) -> Result<(), Self::Error>;
}

impl ScenePlan {
    /// Replay this plan into a host
    pub fn apply<H: SceneHost + ?Sized>(&self, host: &mut H) -> Result<(), H::Error> {
        let collection = self.collection.as_str();
        host.reset_collection(collection)?;

        if let Some(color) = self.world_color {
            host.set_world_color(color)?;
        }
        for neuron in &self.neurons {
            host.add_neuron(collection, neuron)?;
        }
        for connection in &self.connections {
            host.add_connection(collection, connection)?;
        }

        host.add_camera_rig(&self.camera_rig)?;
        host.place_camera(&self.camera)?;

        if let Some(stage) = &self.stage {
            host.add_stage(collection, stage)?;
        }
        for light in &self.lights {
            host.add_light(collection, light)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LayerStyle, SceneOptions};
    use nnviz_core::{LayerSpec, NetworkSpec};

    /// Records call order; fails on the configured neuron name
    #[derive(Default)]
    struct RecordingHost {
        calls: Vec<String>,
        fail_on: Option<String>,
    }

    impl SceneHost for RecordingHost {
        type Error = String;

        fn reset_collection(&mut self, name: &str) -> Result<(), String> {
            self.calls.push(format!("reset {}", name));
            Ok(())
        }

        fn set_world_color(&mut self, _color: Color) -> Result<(), String> {
            self.calls.push("world".to_string());
            Ok(())
        }

        fn add_neuron(&mut self, _collection: &str, neuron: &NeuronObject) -> Result<(), String> {
            if self.fail_on.as_deref() == Some(neuron.name.as_str()) {
                return Err(format!("cannot create {}", neuron.name));
            }
            self.calls.push(format!("neuron {}", neuron.name));
            Ok(())
        }

        fn add_connection(
            &mut self,
            _collection: &str,
            _connection: &ConnectionObject,
        ) -> Result<(), String> {
            self.calls.push("connection".to_string());
            Ok(())
        }

        fn add_camera_rig(&mut self, rig: &CameraRig) -> Result<(), String> {
            self.calls.push(format!("rig {}", rig.name));
            Ok(())
        }

        fn place_camera(&mut self, _camera: &CameraPlacement) -> Result<(), String> {
            self.calls.push("camera".to_string());
            Ok(())
        }

        fn add_stage(&mut self, _collection: &str, stage: &StageObject) -> Result<(), String> {
            self.calls.push(format!("stage {}", stage.name));
            Ok(())
        }

        fn add_light(&mut self, _collection: &str, light: &LightObject) -> Result<(), String> {
            self.calls.push(format!("light {}", light.name));
            Ok(())
        }
    }

    fn plan() -> ScenePlan {
        let spec = NetworkSpec::new(vec![LayerSpec::new("A", 2), LayerSpec::new("B", 1)]);
        let options = SceneOptions {
            show_connections: true,
            add_stage: true,
            enable_lighting: true,
            world_color: Some(Color::rgb(0.0, 0.0, 0.0)),
            ..Default::default()
        };
        ScenePlan::generate(&spec, &[LayerStyle::default(); 2], &options).unwrap()
    }

    #[test]
    fn test_apply_order() {
        let mut host = RecordingHost::default();
        plan().apply(&mut host).unwrap();

        assert_eq!(
            host.calls,
            vec![
                "reset NN_Vis",
                "world",
                "neuron A_0",
                "neuron A_1",
                "neuron B_0",
                "connection",
                "connection",
                "rig CameraRig",
                "camera",
                "stage NN_Stage",
                "light NN_Light_0",
                "light NN_Light_1",
                "light NN_Light_2",
                "light NN_Light_3",
            ]
        );
    }

    #[test]
    fn test_apply_stops_at_first_error() {
        let mut host = RecordingHost {
            fail_on: Some("A_1".to_string()),
            ..Default::default()
        };
        let err = plan().apply(&mut host).unwrap_err();
        assert_eq!(err, "cannot create A_1");
        assert_eq!(host.calls, vec!["reset NN_Vis", "world", "neuron A_0"]);
    }
}
