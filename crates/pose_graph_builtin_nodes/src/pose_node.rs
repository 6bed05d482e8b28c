use bevy_log::warn;
use bevy_reflect::{Reflect, std_traits::ReflectDefault};
use pose_graph_core::{
    animation_node::{NodeLike, NodeType, decode_state, encode_state},
    context::{NodeContext, SpecContext},
    controller::{ClipId, SampleRequest},
    edge_data::ValueKind,
    errors::{GraphLoadError, GraphResult, GraphSaveError},
    registry::NodeRegistry,
    sync::{SyncStyle, TransitionStatus},
};
use serde::{Deserialize, Serialize};

#[derive(Reflect, Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[reflect(Default)]
pub enum PlayState {
    #[default]
    Play,
    /// Keeps sampling at the current time without advancing.
    Pause,
    /// Holds the clip at its start time.
    Stop,
}

/// Plays back an animation clip.
///
/// Times are in clip ticks; `ticks_per_second` converts frame time. When the
/// node belongs to a synchronizing group, the leader publishes its phase
/// after advancing and the other members adopt it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoseNode {
    pub clip: Option<ClipId>,
    pub state: PlayState,
    pub start_time: f32,
    pub current_play_time: f32,
    pub duration: f32,
    pub ticks_per_second: f32,
    pub looping: bool,
    #[serde(skip)]
    warned_unsupported: bool,
    /// Set while a source-frozen transition holds a playing clip paused.
    #[serde(skip)]
    frozen_by_transition: bool,
}

impl Default for PoseNode {
    fn default() -> Self {
        Self {
            clip: None,
            state: PlayState::Play,
            start_time: 0.,
            current_play_time: 0.,
            duration: 0.,
            ticks_per_second: 30.,
            looping: true,
            warned_unsupported: false,
            frozen_by_transition: false,
        }
    }
}

impl PoseNode {
    pub const OUTPUT: usize = 0;

    pub fn new(clip: impl Into<ClipId>, duration: f32, ticks_per_second: f32) -> Self {
        Self {
            clip: Some(clip.into()),
            duration,
            ticks_per_second,
            ..Default::default()
        }
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Sets the start time and moves the play head there.
    pub fn with_start_time(mut self, start_time: f32) -> Self {
        self.start_time = start_time;
        self.current_play_time = start_time;
        self
    }

    /// Normalized position of the play head in the clip.
    pub fn phase(&self) -> f32 {
        if self.duration > 0. {
            self.current_play_time / self.duration
        } else {
            0.
        }
    }

    fn advance(&mut self, delta_time: f32, time_multiplier: f32) {
        match self.state {
            PlayState::Play => {
                self.current_play_time += delta_time * self.ticks_per_second * time_multiplier;
                self.wrap();
            }
            PlayState::Pause => {}
            PlayState::Stop => self.current_play_time = self.start_time,
        }
    }

    fn wrap(&mut self) {
        if self.duration <= 0. {
            self.current_play_time = 0.;
        } else if self.looping {
            self.current_play_time = self.current_play_time.rem_euclid(self.duration);
        } else {
            self.current_play_time = self.current_play_time.clamp(0., self.duration);
        }
    }

    fn freeze(&mut self) {
        if self.state == PlayState::Play {
            self.state = PlayState::Pause;
            self.frozen_by_transition = true;
        }
    }

    /// Undoes a transition freeze; pauses requested by the user stay.
    fn thaw(&mut self) {
        if self.frozen_by_transition {
            self.state = PlayState::Play;
            self.frozen_by_transition = false;
        }
    }

    fn synchronize(&mut self, ctx: &mut NodeContext) {
        let node_id = ctx.node_id();
        let groups = ctx.sync_groups_mut();
        let Some(name) = groups.group_of(node_id).map(str::to_owned) else {
            return;
        };
        let Some(group) = groups.group_mut(&name) else {
            return;
        };

        if group.is_leader(node_id) {
            group.publish_phase(node_id, self.phase());
        } else if let Some(phase) = group.leader_phase() {
            self.current_play_time = phase * self.duration;
        }
    }
}

impl NodeLike for PoseNode {
    fn display_name(&self) -> String {
        "⏵ Pose".into()
    }

    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()> {
        let Some(clip) = self.clip.clone() else {
            return Ok(());
        };
        let delta_time = ctx.delta_time();
        let mut time_multiplier = 1.;

        let transition = ctx.transition_sync().copied();
        let frozen = transition.is_some_and(|transition| {
            transition.status == TransitionStatus::InProcess
                && transition.sync_style == SyncStyle::SourceFrozen
        });
        if !frozen {
            self.thaw();
        }

        match transition {
            None => self.advance(delta_time, time_multiplier),
            Some(transition) => {
                time_multiplier = transition.time_multiplier;
                match (transition.status, transition.sync_style) {
                    (TransitionStatus::Start, _) if transition.preferences.reset_from_start => {
                        self.current_play_time =
                            self.start_time + transition.preferences.offset;
                        self.wrap();
                        self.advance(delta_time, time_multiplier);
                    }
                    (TransitionStatus::InProcess, SyncStyle::SourceFrozen) => self.freeze(),
                    (TransitionStatus::InProcess, style) => {
                        if let Err(err) = style.ensure_supported() {
                            if !self.warned_unsupported {
                                warn!("Pose node {}: {err}, no pose is sampled", ctx.node_id());
                                self.warned_unsupported = true;
                            }
                            return Ok(());
                        }
                        self.advance(delta_time, time_multiplier);
                    }
                    _ => self.advance(delta_time, time_multiplier),
                }
            }
        }

        self.synchronize(ctx);

        let pose = ctx.controller().process_pose(
            ctx.skeleton(),
            &SampleRequest {
                clip: &clip,
                time: self.current_play_time,
                delta_time,
                time_multiplier,
            },
        );
        ctx.set_output(Self::OUTPUT, pose)
    }

    fn spec(&self, mut ctx: SpecContext) {
        ctx.add_output("pose", ValueKind::Pose);
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        encode_state(self)
    }
}

impl NodeType for PoseNode {
    const TYPE_TAG: &'static str = "pose";

    fn load_state(state: &[u8], _registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        decode_state(state)
    }
}
