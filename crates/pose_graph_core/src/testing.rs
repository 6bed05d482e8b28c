//! Test doubles shared by the workspace tests.

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

use bevy_math::Vec3;

use crate::{
    animation_node::{NodeLike, NodeType, decode_state, encode_state},
    context::{GraphContext, NodeContext, SpecContext},
    controller::{AnimationController, NamedSkeleton, SampleRequest, Skeleton},
    edge_data::{ValueKind, bone_mask::BoneMask},
    endpoint::Direction,
    errors::{GraphLoadError, GraphResult, GraphSaveError},
    pose::{Pose, PoseRef},
    registry::NodeRegistry,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerCall {
    ProcessPose {
        clip: String,
        time: f32,
        time_multiplier: f32,
    },
    Blend {
        weight: f32,
    },
    Additive,
    ZeroPose,
}

/// Controller with trivially predictable math that records every call.
///
/// Sampled poses carry the sample time in the x translation of every bone,
/// blends interpolate translations linearly and additive poses subtract the
/// base translation.
#[derive(Debug, Default)]
pub struct RecordingController {
    calls: Mutex<Vec<ControllerCall>>,
}

impl RecordingController {
    pub fn calls(&self) -> Vec<ControllerCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, predicate: impl Fn(&ControllerCall) -> bool) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|call| predicate(call))
            .count()
    }

    pub fn clear(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn record(&self, call: ControllerCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl AnimationController for RecordingController {
    fn process_pose(&self, skeleton: &dyn Skeleton, request: &SampleRequest) -> Pose {
        self.record(ControllerCall::ProcessPose {
            clip: request.clip.0.clone(),
            time: request.time,
            time_multiplier: request.time_multiplier,
        });
        let mut pose = Pose::identity(skeleton.bone_count());
        for bone in &mut pose.bones {
            bone.translation = Vec3::new(request.time, 0., 0.);
        }
        pose.timestamp = request.time;
        pose
    }

    fn blend(
        &self,
        skeleton: &dyn Skeleton,
        source: &Pose,
        destination: &Pose,
        weight: f32,
        mask: &BoneMask,
    ) -> Pose {
        self.record(ControllerCall::Blend { weight });
        let mut pose = source.clone();
        for (index, (bone, target)) in pose.bones.iter_mut().zip(&destination.bones).enumerate() {
            let bone_weight = weight * mask.bone_weight(skeleton.bone_name(index).unwrap_or(""));
            bone.translation = bone.translation.lerp(target.translation, bone_weight);
            bone.scale = bone.scale.lerp(target.scale, bone_weight);
            bone.rotation = bone.rotation.slerp(target.rotation, bone_weight);
        }
        pose.timestamp = source.timestamp + (destination.timestamp - source.timestamp) * weight;
        pose
    }

    fn generate_additive_pose(&self, _skeleton: &dyn Skeleton, reference: &Pose, base: &Pose) -> Pose {
        self.record(ControllerCall::Additive);
        let mut pose = reference.clone();
        for (bone, base_bone) in pose.bones.iter_mut().zip(&base.bones) {
            bone.translation -= base_bone.translation;
        }
        pose
    }

    fn zero_pose(&self, skeleton: &dyn Skeleton) -> Pose {
        self.record(ControllerCall::ZeroPose);
        Pose::identity(skeleton.bone_count())
    }
}

/// Context over a skeleton with bones `bone_0..bone_n`, plus a handle to its
/// recording controller.
pub fn test_context(bone_count: usize) -> (GraphContext, Arc<RecordingController>) {
    let skeleton = NamedSkeleton::new((0..bone_count).map(|i| format!("bone_{i}")));
    let controller = Arc::new(RecordingController::default());
    let context = GraphContext::new(Arc::new(skeleton), controller.clone());
    (context, controller)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCall {
    Connect(Direction, usize),
    Disconnect(Direction, usize),
}

/// Sums its `F32` inputs into its single output, counting evaluations and
/// recording connection hooks.
#[derive(Debug, Clone, Default)]
pub struct CountingNode {
    pub input_count: usize,
    pub evaluations: Arc<AtomicUsize>,
    pub hooks: Arc<Mutex<Vec<HookCall>>>,
}

impl CountingNode {
    pub fn new(input_count: usize) -> Self {
        Self {
            input_count,
            ..Default::default()
        }
    }

    pub fn evaluation_count(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }

    pub fn hook_calls(&self) -> Vec<HookCall> {
        self.hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn hook(&self, call: HookCall) {
        self.hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl NodeLike for CountingNode {
    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        let mut sum = 0.;
        for index in 0..ctx.input_count() {
            sum += ctx.input(index)?.as_f32()?;
        }
        ctx.set_output(0, sum)
    }

    fn spec(&self, mut ctx: SpecContext) {
        for index in 0..self.input_count {
            ctx.add_input(format!("in_{index}"), 0.0_f32);
        }
        ctx.add_output("out", ValueKind::F32);
    }

    fn display_name(&self) -> String {
        "Counting".into()
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn on_connect(&mut self, direction: Direction, index: usize) {
        self.hook(HookCall::Connect(direction, index));
    }

    fn on_disconnect(&mut self, direction: Direction, index: usize) {
        self.hook(HookCall::Disconnect(direction, index));
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        encode_state(&self.input_count)
    }
}

impl NodeType for CountingNode {
    const TYPE_TAG: &'static str = "test_counting";

    fn load_state(state: &[u8], _registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        Ok(Self::new(decode_state(state)?))
    }
}

/// Emits a fixed pose.
#[derive(Debug, Clone, Default)]
pub struct PoseSourceNode {
    pub pose: Option<Pose>,
}

impl PoseSourceNode {
    pub fn new(pose: Pose) -> Self {
        Self { pose: Some(pose) }
    }
}

impl NodeLike for PoseSourceNode {
    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()> {
        let pose = self.pose.clone().map(PoseRef::new).unwrap_or_default();
        ctx.set_output(0, pose)
    }

    fn spec(&self, mut ctx: SpecContext) {
        ctx.add_output("pose", ValueKind::Pose);
    }

    fn display_name(&self) -> String {
        "Pose Source".into()
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        encode_state(&self.pose)
    }
}

impl NodeType for PoseSourceNode {
    const TYPE_TAG: &'static str = "test_pose_source";

    fn load_state(state: &[u8], _registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        Ok(Self {
            pose: decode_state(state)?,
        })
    }
}

/// Pose whose bones are all translated to `x`.
pub fn translated_pose(bone_count: usize, x: f32) -> Pose {
    let mut pose = Pose::identity(bone_count);
    for bone in &mut pose.bones {
        bone.translation = Vec3::new(x, 0., 0.);
    }
    pose
}
