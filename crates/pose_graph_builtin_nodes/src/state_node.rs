use pose_graph_core::{
    animation_graph::{AnimationGraph, serial::AnimationGraphSerial},
    animation_node::{NodeFlags, NodeLike, NodeType, decode_state, encode_state},
    context::{NodeContext, SpecContext},
    edge_data::ValueKind,
    errors::{GraphLoadError, GraphResult, GraphSaveError},
    registry::NodeRegistry,
    sync::{TransitionStatus, TransitionSyncData},
};
use serde::{Deserialize, Serialize};

/// A state of a state machine: a nested graph plus the transition data the
/// nodes of that graph see.
#[derive(Clone, Debug, Default)]
pub struct StateNode {
    pub graph: AnimationGraph,
    pub transition: TransitionSyncData,
}

#[derive(Serialize, Deserialize)]
struct StateNodeSerial {
    graph: AnimationGraphSerial,
    transition: TransitionSyncData,
}

impl StateNode {
    pub const OUTPUT: usize = 0;

    pub fn new(graph: AnimationGraph) -> Self {
        Self {
            graph,
            transition: TransitionSyncData::default(),
        }
    }

    pub fn with_transition(mut self, transition: TransitionSyncData) -> Self {
        self.transition = transition;
        self
    }

    pub fn set_status(&mut self, status: TransitionStatus) {
        self.transition.status = status;
    }
}

impl NodeLike for StateNode {
    fn display_name(&self) -> String {
        "⛶ State".into()
    }

    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()> {
        self.graph.evaluate_with(
            ctx.delta_time(),
            ctx.graph_context_mut(),
            Some(&self.transition),
        )?;
        ctx.set_output(Self::OUTPUT, self.graph.final_pose_ref())
    }

    fn spec(&self, mut ctx: SpecContext) {
        ctx.add_output("pose", ValueKind::Pose);
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn flags(&self) -> NodeFlags {
        NodeFlags {
            can_be_open: true,
            ..Default::default()
        }
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        encode_state(&StateNodeSerial {
            graph: self.graph.to_serial()?,
            transition: self.transition,
        })
    }
}

impl NodeType for StateNode {
    const TYPE_TAG: &'static str = "state";

    fn load_state(state: &[u8], registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        let serial: StateNodeSerial = decode_state(state)?;
        Ok(Self {
            graph: serial.graph.into_graph(registry)?,
            transition: serial.transition,
        })
    }
}

#[cfg(test)]
mod test {
    use pose_graph_core::{
        animation_graph::AnimationGraph,
        animation_node::NodeLike,
        id::NodeId,
        sync::{SyncStyle, TransitionStatus, TransitionSyncData},
        testing::{ControllerCall, test_context},
    };

    use super::StateNode;
    use crate::{
        builtin_registry,
        graph_node::GraphNode,
        pose_node::{PlayState, PoseNode},
    };

    fn clip_graph() -> (AnimationGraph, NodeId) {
        let mut graph = AnimationGraph::new();
        let output = graph.root().unwrap();
        let clip = graph.add_node_like("Clip", PoseNode::new("walk", 10., 10.));
        graph.connect_nodes(output, 0, clip, PoseNode::OUTPUT).unwrap();
        (graph, clip)
    }

    fn wrap(node: impl NodeLike) -> (AnimationGraph, NodeId) {
        let mut graph = AnimationGraph::new();
        let output = graph.root().unwrap();
        let id = graph.add_node_like("Wrapped", node);
        graph.connect_nodes(output, 0, id, 0).unwrap();
        (graph, id)
    }

    fn in_process(sync_style: SyncStyle) -> TransitionSyncData {
        TransitionSyncData {
            status: TransitionStatus::InProcess,
            sync_style,
            ..Default::default()
        }
    }

    #[test]
    fn nested_graph_sees_transition() {
        let (mut ctx, _) = test_context(1);
        let (inner, clip) = clip_graph();
        let state = StateNode::new(inner).with_transition(in_process(SyncStyle::SourceFrozen));
        let (mut graph, state) = wrap(state);

        graph.evaluate(0.5, &mut ctx).unwrap();

        let state = graph.node(state).unwrap().inner_as::<StateNode>().unwrap();
        let clip = state.graph.node(clip).unwrap().inner_as::<PoseNode>().unwrap();
        assert_eq!(clip.state, PlayState::Pause);
        assert_eq!(clip.current_play_time, 0.);
        assert!(graph.final_pose().is_some());
    }

    #[test]
    fn only_the_immediate_graph_sees_transition() {
        let (mut ctx, controller) = test_context(1);
        let (clips, _) = clip_graph();
        let (middle, _) = wrap(GraphNode::new(clips));
        let state = StateNode::new(middle).with_transition(in_process(SyncStyle::KeyFrameSync));
        let (mut graph, _) = wrap(state);

        graph.evaluate(0.5, &mut ctx).unwrap();

        assert_eq!(graph.final_pose().unwrap().timestamp, 5.);
        assert_eq!(
            controller.calls(),
            vec![ControllerCall::ProcessPose {
                clip: "walk".into(),
                time: 5.,
                time_multiplier: 1.,
            }]
        );
    }

    #[test]
    fn state_round_trips_with_transition() {
        let (inner, _) = clip_graph();
        let transition = TransitionSyncData {
            time_multiplier: 0.5,
            ..in_process(SyncStyle::SourceFrozen)
        };
        let (graph, state) = wrap(StateNode::new(inner).with_transition(transition));

        let text = graph.to_ron().unwrap();
        let loaded = AnimationGraph::from_ron(&text, &builtin_registry()).unwrap();
        let state = loaded.node(state).unwrap().inner_as::<StateNode>().unwrap();
        assert_eq!(state.transition, transition);
        assert_eq!(state.graph.node_count(), 2);
    }
}
