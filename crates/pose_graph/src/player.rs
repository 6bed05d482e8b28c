use bevy_log::warn;
use pose_graph_core::{
    animation_graph::AnimationGraph,
    animation_node::AnimationNode,
    context::GraphContext,
    errors::{GraphError, GraphResult},
    id::NodeId,
    pose::Pose,
};

/// Plays an animation graph against a context.
pub struct AnimationGraphPlayer {
    paused: bool,
    graph: Option<AnimationGraph>,
    context: GraphContext,
    /// Error that ocurred during graph evaluation in the last frame
    error: Option<GraphError>,
}

impl AnimationGraphPlayer {
    /// Create a new player, with no graph playing
    pub fn new(context: GraphContext) -> Self {
        Self {
            paused: false,
            graph: None,
            context,
            error: None,
        }
    }

    /// Set the animation graph to play
    pub fn with_graph(mut self, graph: AnimationGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Start playing a graph, resetting the state of the player.
    pub fn start(&mut self, graph: AnimationGraph) -> &mut Self {
        self.graph = Some(graph);
        self.paused = false;
        self.error = None;
        self
    }

    /// Runs one evaluation pass. While paused the graph is evaluated with no
    /// elapsed time.
    ///
    /// Returns `None` when no graph is playing, the graph produced no pose or
    /// evaluation failed; in the last case the error is kept in
    /// [`AnimationGraphPlayer::error`].
    pub fn evaluate(&mut self, delta_time: f32) -> Option<&Pose> {
        let graph = self.graph.as_mut()?;
        let delta_time = if self.paused { 0. } else { delta_time };

        if let Err(error) = graph.evaluate(delta_time, &mut self.context) {
            warn!("Animation graph evaluation failed: {error}");
            self.error = Some(error);
            return None;
        }

        self.error = None;
        graph.final_pose()
    }

    /// Pose produced by the last evaluation.
    pub fn final_pose(&self) -> Option<&Pose> {
        self.graph.as_ref()?.final_pose()
    }

    pub fn pause(&mut self) -> &mut Self {
        self.paused = true;
        self
    }

    pub fn resume(&mut self) -> &mut Self {
        self.paused = false;
        self
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn graph(&self) -> Option<&AnimationGraph> {
        self.graph.as_ref()
    }

    pub fn graph_mut(&mut self) -> Option<&mut AnimationGraph> {
        self.graph.as_mut()
    }

    /// Removes a node from the playing graph and from the synchronizing
    /// groups of the player's context.
    pub fn remove_node(&mut self, node_id: NodeId) -> GraphResult<AnimationNode> {
        self.graph
            .as_mut()
            .ok_or(GraphError::MissingNode(node_id))?
            .remove_node_in(node_id, &mut self.context)
    }

    pub fn context(&self) -> &GraphContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut GraphContext {
        &mut self.context
    }

    /// If graph evaluation produced an error in the last frame return the error, otherwise return
    /// `None`.
    pub fn error(&self) -> Option<&GraphError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod test {
    use pose_graph_builtin_nodes::{blend_node::BlendNode, f32::AddF32, pose_node::PoseNode};
    use pose_graph_core::{
        animation_graph::AnimationGraph,
        errors::GraphError,
        id::NodeId,
        testing::{ControllerCall, test_context},
    };

    use super::AnimationGraphPlayer;

    fn walk_graph() -> AnimationGraph {
        let mut graph = AnimationGraph::new();
        let output = graph.root().unwrap();
        let clip = graph.add_node_like("Walk", PoseNode::new("walk", 10., 10.));
        graph.connect_nodes(output, 0, clip, PoseNode::OUTPUT).unwrap();
        graph
    }

    #[test]
    fn no_graph_no_pose() {
        let (ctx, controller) = test_context(1);
        let mut player = AnimationGraphPlayer::new(ctx);
        assert!(player.evaluate(0.1).is_none());
        assert!(controller.calls().is_empty());
    }

    #[test]
    fn pausing_freezes_time() {
        let (ctx, controller) = test_context(1);
        let mut player = AnimationGraphPlayer::new(ctx).with_graph(walk_graph());

        assert_eq!(player.evaluate(0.2).unwrap().timestamp, 2.);
        player.pause();
        assert!(player.is_paused());
        assert_eq!(player.evaluate(0.2).unwrap().timestamp, 2.);
        player.resume();
        assert_eq!(player.evaluate(0.1).unwrap().timestamp, 3.);
        assert_eq!(
            controller.count(|call| matches!(call, ControllerCall::ProcessPose { .. })),
            3
        );
    }

    #[test]
    fn removing_group_leader_frees_followers() {
        let (ctx, _) = test_context(1);
        let mut graph = AnimationGraph::new();
        let output = graph.root().unwrap();
        let walk = graph.add_node_like("Walk", PoseNode::new("walk", 10., 10.));
        let run = graph.add_node_like("Run", PoseNode::new("run", 20., 10.));
        let blend = graph.add_node_like("Blend", BlendNode::default());
        graph.connect_nodes(blend, BlendNode::SOURCE, walk, PoseNode::OUTPUT).unwrap();
        graph
            .connect_nodes(blend, BlendNode::DESTINATION, run, PoseNode::OUTPUT)
            .unwrap();
        graph.connect_nodes(output, 0, blend, BlendNode::OUTPUT).unwrap();

        let mut player = AnimationGraphPlayer::new(ctx).with_graph(graph);
        let group = player.context_mut().sync_groups_mut().add_group("locomotion");
        group.add_node(walk);
        group.add_node(run);

        // run follows walk's phase of 0.2 to 4 of its 20 ticks
        player.evaluate(0.2).unwrap();
        let run_time = |player: &AnimationGraphPlayer| {
            player
                .graph()
                .unwrap()
                .node(run)
                .unwrap()
                .inner_as::<PoseNode>()
                .unwrap()
                .current_play_time
        };
        assert_eq!(run_time(&player), 4.);

        player.remove_node(walk).unwrap();
        player
            .graph_mut()
            .unwrap()
            .connect_nodes(output, 0, run, PoseNode::OUTPUT)
            .unwrap();
        let group = player.context().sync_groups().group("locomotion").unwrap();
        assert_eq!(group.leader(), Some(run));

        let mut times = Vec::new();
        for _ in 0..3 {
            times.push(player.evaluate(0.2).unwrap().timestamp);
        }
        assert_eq!(times, vec![6., 8., 10.]);
        assert_eq!(run_time(&player), 10.);
    }

    #[test]
    fn removal_without_graph_fails() {
        let (ctx, _) = test_context(1);
        let mut player = AnimationGraphPlayer::new(ctx);
        let node = NodeId::generate();
        assert!(matches!(
            player.remove_node(node),
            Err(GraphError::MissingNode(id)) if id == node
        ));
    }

    #[test]
    fn errors_are_kept_until_next_success() {
        let (ctx, _) = test_context(1);
        let mut graph = AnimationGraph::empty();
        let a = graph.add_node_like("A", AddF32::new());
        let b = graph.add_node_like("B", AddF32::new());
        graph.connect_nodes(a, AddF32::IN_A, b, AddF32::OUTPUT).unwrap();
        graph.connect_nodes(b, AddF32::IN_A, a, AddF32::OUTPUT).unwrap();
        graph.set_root(Some(a)).unwrap();

        let mut player = AnimationGraphPlayer::new(ctx).with_graph(graph);
        assert!(player.evaluate(0.1).is_none());
        assert!(matches!(player.error(), Some(GraphError::CycleDetected(_))));

        player.start(walk_graph());
        assert!(player.error().is_none());
        assert!(player.evaluate(0.1).is_some());
        assert!(player.final_pose().is_some());
        assert!(player.error().is_none());
    }
}
