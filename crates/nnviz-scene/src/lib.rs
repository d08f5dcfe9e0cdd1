//! NNviz Scene - Host-independent scene plan
//!
//! Turns a planned network layout into the list of objects a 3D host
//! application has to create: neuron meshes with materials, connection
//! curves, the orbit camera rig, an optional stage disc, and ring lights.
//! Hosts implement [`SceneHost`] and replay a [`ScenePlan`] into their own
//! document model.

pub mod camera;
pub mod host;
pub mod models;
pub mod plan;
pub mod scene;
pub mod types;

// Re-export commonly used types
pub use camera::{CameraPlacement, CameraRig};
pub use host::SceneHost;
pub use models::{ConnectionObject, NeuronObject};
pub use plan::ScenePlan;
pub use scene::{LightObject, StageObject};
pub use types::*;
