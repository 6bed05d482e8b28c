//! Seams to the host's skeletal math.
//!
//! The graph never touches bone transforms itself: sampling clips and
//! combining poses is delegated to an [`AnimationController`] working on an
//! opaque [`Skeleton`].

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::{edge_data::bone_mask::BoneMask, pose::Pose};

/// Identifies an animation clip known to the controller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClipId(pub String);

impl From<&str> for ClipId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

pub trait Skeleton: Send + Sync + Debug {
    fn bone_count(&self) -> usize;

    fn bone_name(&self, index: usize) -> Option<&str>;
}

/// A skeleton described only by its bone names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedSkeleton {
    pub bones: Vec<String>,
}

impl NamedSkeleton {
    pub fn new<S: Into<String>>(bones: impl IntoIterator<Item = S>) -> Self {
        Self {
            bones: bones.into_iter().map(Into::into).collect(),
        }
    }
}

impl Skeleton for NamedSkeleton {
    fn bone_count(&self) -> usize {
        self.bones.len()
    }

    fn bone_name(&self, index: usize) -> Option<&str> {
        self.bones.get(index).map(String::as_str)
    }
}

/// Clip sampling request issued by clip playback nodes.
#[derive(Debug, Clone, Copy)]
pub struct SampleRequest<'a> {
    pub clip: &'a ClipId,
    /// Play time in ticks.
    pub time: f32,
    /// Frame time in seconds.
    pub delta_time: f32,
    pub time_multiplier: f32,
}

pub trait AnimationController: Send + Sync + Debug {
    fn process_pose(&self, skeleton: &dyn Skeleton, request: &SampleRequest) -> Pose;

    /// Interpolates from `source` towards `destination` by `weight`, per bone
    /// scaled by `mask`.
    fn blend(
        &self,
        skeleton: &dyn Skeleton,
        source: &Pose,
        destination: &Pose,
        weight: f32,
        mask: &BoneMask,
    ) -> Pose;

    fn generate_additive_pose(&self, skeleton: &dyn Skeleton, reference: &Pose, base: &Pose)
    -> Pose;

    fn zero_pose(&self, skeleton: &dyn Skeleton) -> Pose;
}
