// SPDX-License-Identifier: MIT OR Apache-2.0
//! The camera rig.

use crate::object::Pose;

/// The scene camera the sequencer animates.
///
/// The rig remembers the pose it was constructed with so an aborted run can
/// force the camera back where it started.
#[derive(Debug, Clone)]
pub struct CameraRig {
    pose: Pose,
    initial: Pose,
}

impl CameraRig {
    /// Create a rig at the given pose, caching it as the initial pose
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            initial: pose,
        }
    }

    /// Current camera pose
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Move the camera
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// The pose cached at construction
    pub fn initial(&self) -> Pose {
        self.initial
    }

    /// Snap the camera back to its construction pose
    pub fn restore_initial(&mut self) {
        self.pose = self.initial;
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(Pose::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_returns_to_construction_pose() {
        let start = Pose::at([1.0, 2.0, 3.0]);
        let mut rig = CameraRig::new(start);
        rig.set_pose(Pose::at([9.0, 9.0, 9.0]));
        rig.restore_initial();
        assert_eq!(rig.pose(), start);
    }
}
