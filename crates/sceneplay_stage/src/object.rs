// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene objects and the scene table.

use crate::math::QUAT_IDENTITY;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for scene objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    /// Create a new random object ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// A spatial pose: position, rotation (quaternion, xyzw) and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Position (x, y, z)
    pub position: [f32; 3],
    /// Rotation quaternion
    pub rotation: [f32; 4],
    /// Scale
    pub scale: [f32; 3],
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: QUAT_IDENTITY,
            scale: [1.0, 1.0, 1.0],
        }
    }
}

impl Pose {
    /// Create a pose at a position with identity rotation and unit scale
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

/// An object in the scene
///
/// Marker objects (drop slots, reach targets, camera waypoints) are ordinary
/// scene objects; only their pose matters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    /// Object name
    pub name: String,
    /// Whether the object is active
    pub active: bool,
    /// Object pose
    pub pose: Pose,
    /// Whether the object's collider accepts pointer hits
    pub collider_enabled: bool,
}

impl Default for SceneObject {
    fn default() -> Self {
        Self {
            name: "Object".to_string(),
            active: true,
            pose: Pose::default(),
            collider_enabled: false,
        }
    }
}

impl SceneObject {
    /// Create a new object with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a new object with the given name and position
    pub fn at(name: impl Into<String>, position: [f32; 3]) -> Self {
        Self {
            name: name.into(),
            pose: Pose::at(position),
            ..Default::default()
        }
    }
}

/// All objects in the scene
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Objects keyed by ID, in insertion order
    objects: IndexMap<ObjectId, SceneObject>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the scene, returning its generated ID
    pub fn add_object(&mut self, data: SceneObject) -> ObjectId {
        let id = ObjectId::new();
        self.objects.insert(id, data);
        id
    }

    /// Insert an object under a known ID (authoring tools assign IDs up front)
    pub fn insert(&mut self, id: ObjectId, data: SceneObject) {
        self.objects.insert(id, data);
    }

    /// Get an object by ID
    pub fn get(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    /// Get a mutable reference to an object by ID
    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    /// Remove an object from the scene
    pub fn remove(&mut self, id: &ObjectId) -> Option<SceneObject> {
        self.objects.shift_remove(id)
    }

    /// Check whether an object exists
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Get the pose of an object, if it exists
    pub fn pose_of(&self, id: &ObjectId) -> Option<Pose> {
        self.objects.get(id).map(|o| o.pose)
    }

    /// Set the pose of an object; missing objects are ignored
    pub fn set_pose(&mut self, id: &ObjectId, pose: Pose) {
        if let Some(obj) = self.objects.get_mut(id) {
            obj.pose = pose;
        }
    }

    /// Enable or disable an object's collider; missing objects are ignored
    pub fn set_collider_enabled(&mut self, id: &ObjectId, enabled: bool) {
        if let Some(obj) = self.objects.get_mut(id) {
            obj.collider_enabled = enabled;
        }
    }

    /// Whether the object exists and currently accepts pointer hits
    pub fn collider_enabled(&self, id: &ObjectId) -> bool {
        self.objects.get(id).is_some_and(|o| o.collider_enabled)
    }

    /// Number of objects in the scene
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over all objects
    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &SceneObject)> {
        self.objects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_pose_roundtrip() {
        let mut scene = Scene::new();
        let id = scene.add_object(SceneObject::at("Crate", [1.0, 2.0, 3.0]));
        assert_eq!(scene.pose_of(&id).unwrap().position, [1.0, 2.0, 3.0]);

        let mut pose = scene.pose_of(&id).unwrap();
        pose.position = [4.0, 5.0, 6.0];
        scene.set_pose(&id, pose);
        assert_eq!(scene.pose_of(&id).unwrap().position, [4.0, 5.0, 6.0]);
    }

    #[test]
    fn collider_toggling() {
        let mut scene = Scene::new();
        let id = scene.add_object(SceneObject::new("Lever"));
        assert!(!scene.collider_enabled(&id));
        scene.set_collider_enabled(&id, true);
        assert!(scene.collider_enabled(&id));
        scene.remove(&id);
        assert!(!scene.collider_enabled(&id));
    }
}
