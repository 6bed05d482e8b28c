use std::sync::Arc;

use bevy_math::{Quat, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonePose {
    pub rotation: Quat,
    pub translation: Vec3,
    pub scale: Vec3,
}

impl Default for BonePose {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Local transforms of every bone of a skeleton, indexed by bone index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub bones: Vec<BonePose>,
    /// Clip time the pose was sampled at, in ticks.
    pub timestamp: f32,
}

impl Pose {
    /// A rest pose with `bone_count` identity transforms.
    pub fn identity(bone_count: usize) -> Self {
        Self {
            bones: vec![BonePose::default(); bone_count],
            timestamp: 0.,
        }
    }
}

/// Shared, possibly empty handle to a pose.
///
/// Pose endpoints carry a `PoseRef` so copying a pose along a connection does
/// not clone the bone data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseRef(Option<Arc<Pose>>);

impl PoseRef {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn new(pose: Pose) -> Self {
        Self(Some(Arc::new(pose)))
    }

    pub fn get(&self) -> Option<&Pose> {
        self.0.as_deref()
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub fn is_some(&self) -> bool {
        self.0.is_some()
    }
}

impl From<Pose> for PoseRef {
    fn from(value: Pose) -> Self {
        Self::new(value)
    }
}

impl From<Arc<Pose>> for PoseRef {
    fn from(value: Arc<Pose>) -> Self {
        Self(Some(value))
    }
}
