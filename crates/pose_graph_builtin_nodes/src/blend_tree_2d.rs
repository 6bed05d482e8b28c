use bevy_math::Vec2;
use pose_graph_core::{
    animation_graph::AnimationGraph,
    animation_node::{NodeLike, NodeType, decode_state, encode_state},
    context::{NodeContext, SpecContext},
    edge_data::{ValueKind, bone_mask::BoneMask},
    endpoint::Direction,
    errors::{GraphError, GraphLoadError, GraphResult, GraphSaveError},
    id::NodeId,
    pose::{Pose, PoseRef},
    registry::NodeRegistry,
    utils::geometry::polar_weights,
};
use serde::{Deserialize, Serialize};

/// Two dimensional blend space.
///
/// Input 0 is the blend parameter. Every pose added to the space brings two
/// more inputs: the pose itself and the point it sits at.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BlendTree2D {
    /// Threshold each pose pair declares its input with, in pair order.
    ///
    /// [`BlendTree2D::set_threshold`] keeps it and the input default in step.
    /// Setting the threshold input's default directly leaves it untouched.
    pub thresholds: Vec<Vec2>,
}

impl BlendTree2D {
    pub const PARAMETER: usize = 0;
    pub const OUTPUT: usize = 0;

    pub fn new(thresholds: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            thresholds: thresholds.into_iter().collect(),
        }
    }

    pub fn pose_input(pair: usize) -> usize {
        1 + 2 * pair
    }

    pub fn threshold_input(pair: usize) -> usize {
        2 + 2 * pair
    }

    pub fn pair_count(&self) -> usize {
        self.thresholds.len()
    }

    /// Appends a pose pair to the blend tree `node` of `graph` and returns
    /// its pair index.
    pub fn add_input_pose(
        graph: &mut AnimationGraph,
        node: NodeId,
        threshold: Vec2,
    ) -> GraphResult<usize> {
        let tree = tree_mut(graph, node)?;
        let pair = tree.thresholds.len();
        tree.thresholds.push(threshold);

        graph.register_endpoint(node, Direction::Input, pose_name(pair), PoseRef::empty())?;
        graph.register_endpoint(node, Direction::Input, threshold_name(pair), threshold)?;
        Ok(pair)
    }

    /// Moves pair `pair` to `threshold`, updating the input default as well.
    pub fn set_threshold(
        graph: &mut AnimationGraph,
        node: NodeId,
        pair: usize,
        threshold: Vec2,
    ) -> GraphResult<()> {
        let slot = tree_mut(graph, node)?
            .thresholds
            .get_mut(pair)
            .ok_or(GraphError::MissingEndpoint {
                node,
                direction: Direction::Input,
                index: Self::threshold_input(pair),
            })?;
        *slot = threshold;
        graph.set_input_default(node, Self::threshold_input(pair), threshold)
    }

    /// Removes pose pair `pair`. Later pairs move down one slot and keep
    /// their connections.
    pub fn remove_input_pose(
        graph: &mut AnimationGraph,
        node: NodeId,
        pair: usize,
    ) -> GraphResult<()> {
        if pair >= tree_mut(graph, node)?.pair_count() {
            return Err(GraphError::MissingEndpoint {
                node,
                direction: Direction::Input,
                index: Self::pose_input(pair),
            });
        }

        graph.remove_endpoint(node, Direction::Input, Self::threshold_input(pair))?;
        graph.remove_endpoint(node, Direction::Input, Self::pose_input(pair))?;
        tree_mut(graph, node)?.thresholds.remove(pair);

        let animation_node = graph.node_mut(node).ok_or(GraphError::MissingNode(node))?;
        for (offset, endpoint) in animation_node.inputs.iter_mut().skip(1).enumerate() {
            let pair = offset / 2;
            if offset % 2 == 0 {
                endpoint.set_name(pose_name(pair));
            } else {
                endpoint.set_name(threshold_name(pair));
            }
        }
        Ok(())
    }
}

impl NodeLike for BlendTree2D {
    fn display_name(&self) -> String {
        "⊕ Blend Tree 2D".into()
    }

    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()> {
        let parameter = ctx.input(Self::PARAMETER)?.as_vec2()?;

        let mut poses: Vec<&Pose> = Vec::with_capacity(self.thresholds.len());
        let mut points = Vec::with_capacity(self.thresholds.len());
        for pair in 0..self.thresholds.len() {
            if let Some(pose) = ctx.input(Self::pose_input(pair))?.as_pose()?.get() {
                poses.push(pose);
                points.push(ctx.input(Self::threshold_input(pair))?.as_vec2()?);
            }
        }

        let Some((first, rest)) = poses.split_first() else {
            return ctx.set_output(Self::OUTPUT, PoseRef::empty());
        };

        let weights = polar_weights(&points, parameter);
        let mask = BoneMask::all();
        let mut blended = (*first).clone();
        for (pose, weight) in rest.iter().zip(weights.iter().skip(1)) {
            if *weight <= 0. {
                continue;
            }
            blended = ctx
                .controller()
                .blend(ctx.skeleton(), &blended, pose, *weight, &mask);
        }

        ctx.set_output(Self::OUTPUT, blended)
    }

    fn spec(&self, mut ctx: SpecContext) {
        ctx.add_input("parameter", Vec2::ZERO);
        for (pair, threshold) in self.thresholds.iter().enumerate() {
            ctx.add_input_kind(pose_name(pair), ValueKind::Pose)
                .add_input(threshold_name(pair), *threshold);
        }
        ctx.add_output("pose", ValueKind::Pose);
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        encode_state(self)
    }
}

impl NodeType for BlendTree2D {
    const TYPE_TAG: &'static str = "blend_tree_2d";

    fn load_state(state: &[u8], _registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        decode_state(state)
    }
}

fn tree_mut(graph: &mut AnimationGraph, node: NodeId) -> GraphResult<&mut BlendTree2D> {
    graph
        .node_mut(node)
        .ok_or(GraphError::MissingNode(node))?
        .inner_as_mut::<BlendTree2D>()
        .ok_or(GraphError::UnexpectedNodeType(node))
}

fn pose_name(pair: usize) -> String {
    format!("pose_{pair}")
}

fn threshold_name(pair: usize) -> String {
    format!("threshold_{pair}")
}

#[cfg(test)]
mod test {
    use bevy_math::Vec2;
    use pose_graph_core::{
        animation_graph::{AnimationGraph, SourceEndpoint},
        endpoint::Direction,
        errors::GraphError,
        id::NodeId,
        testing::{ControllerCall, PoseSourceNode, test_context, translated_pose},
    };

    use super::BlendTree2D;

    const THRESHOLDS: [Vec2; 3] = [Vec2::ZERO, Vec2::X, Vec2::Y];

    /// Output <- tree <- three pose sources translated to 0, 1 and 2.
    fn tree_graph() -> (AnimationGraph, NodeId, Vec<NodeId>) {
        let mut graph = AnimationGraph::new();
        let output = graph.root().unwrap();
        let tree = graph.add_node_like("Tree", BlendTree2D::default());
        let mut sources = Vec::new();
        for (pair, threshold) in THRESHOLDS.into_iter().enumerate() {
            assert_eq!(BlendTree2D::add_input_pose(&mut graph, tree, threshold), Ok(pair));
            let source = graph.add_node_like(
                format!("Source {pair}"),
                PoseSourceNode::new(translated_pose(1, pair as f32)),
            );
            graph
                .connect_nodes(tree, BlendTree2D::pose_input(pair), source, 0)
                .unwrap();
            sources.push(source);
        }
        graph.connect_nodes(output, 0, tree, BlendTree2D::OUTPUT).unwrap();
        (graph, tree, sources)
    }

    fn final_x(graph: &AnimationGraph) -> f32 {
        graph.final_pose().unwrap().bones[0].translation.x
    }

    #[test]
    fn parameter_on_first_threshold_selects_first_pose() {
        let (mut ctx, controller) = test_context(1);
        let (mut graph, _, _) = tree_graph();
        graph.evaluate(0.1, &mut ctx).unwrap();

        assert_eq!(graph.final_pose(), Some(&translated_pose(1, 0.)));
        assert_eq!(controller.count(|call| matches!(call, ControllerCall::Blend { .. })), 0);
    }

    #[test]
    fn parameter_on_other_threshold_blends_towards_it() {
        let (mut ctx, _) = test_context(1);
        let (mut graph, tree, _) = tree_graph();
        graph
            .set_input_default(tree, BlendTree2D::PARAMETER, Vec2::X)
            .unwrap();
        graph.evaluate(0.1, &mut ctx).unwrap();
        assert!((final_x(&graph) - 1.).abs() < 1e-4);
    }

    #[test]
    fn unconnected_pairs_are_skipped() {
        let (mut ctx, controller) = test_context(1);
        let (mut graph, tree, _) = tree_graph();
        graph.disconnect_nodes(tree, BlendTree2D::pose_input(0)).unwrap();
        graph.disconnect_nodes(tree, BlendTree2D::pose_input(1)).unwrap();

        graph.evaluate(0.1, &mut ctx).unwrap();
        assert_eq!(graph.final_pose(), Some(&translated_pose(1, 2.)));
        assert!(controller.calls().is_empty());
    }

    #[test]
    fn no_poses_produce_empty_output() {
        let (mut ctx, _) = test_context(1);
        let mut graph = AnimationGraph::new();
        let output = graph.root().unwrap();
        let tree = graph.add_node_like("Tree", BlendTree2D::new(THRESHOLDS));
        graph.connect_nodes(output, 0, tree, BlendTree2D::OUTPUT).unwrap();

        graph.evaluate(0.1, &mut ctx).unwrap();
        assert!(graph.final_pose().is_none());
    }

    #[test]
    fn constructor_thresholds_declare_pairs() {
        let mut graph = AnimationGraph::empty();
        let tree = graph.add_node_like("Tree", BlendTree2D::new(THRESHOLDS));
        let node = graph.node(tree).unwrap();
        assert_eq!(node.inputs.len(), 7);
        assert_eq!(
            node.inputs[BlendTree2D::threshold_input(2)]
                .default_value()
                .as_vec2(),
            Ok(Vec2::Y)
        );
    }

    #[test]
    fn removing_a_pair_reindexes_later_pairs() {
        let (mut ctx, _) = test_context(1);
        let (mut graph, tree, sources) = tree_graph();
        BlendTree2D::set_threshold(&mut graph, tree, 2, Vec2::new(0., 2.)).unwrap();

        BlendTree2D::remove_input_pose(&mut graph, tree, 1).unwrap();

        assert_eq!(
            graph.source_of(tree, BlendTree2D::pose_input(0)),
            Some(SourceEndpoint::new(sources[0], 0))
        );
        assert_eq!(
            graph.source_of(tree, BlendTree2D::pose_input(1)),
            Some(SourceEndpoint::new(sources[2], 0))
        );
        assert_eq!(graph.source_of(tree, BlendTree2D::pose_input(2)), None);

        let node = graph.node(tree).unwrap();
        let inner = node.inner_as::<BlendTree2D>().unwrap();
        assert_eq!(inner.thresholds, vec![Vec2::ZERO, Vec2::new(0., 2.)]);
        assert_eq!(node.inputs.len(), 5);
        assert_eq!(node.inputs[3].name(), "pose_1");
        assert_eq!(node.inputs[4].name(), "threshold_1");
        assert_eq!(node.inputs[4].default_value().as_vec2(), Ok(Vec2::new(0., 2.)));
        assert!(node.inner.validate_endpoints(&node.inputs, &node.outputs));

        graph
            .set_input_default(tree, BlendTree2D::PARAMETER, Vec2::new(0., 2.))
            .unwrap();
        graph.evaluate(0.1, &mut ctx).unwrap();
        assert!((final_x(&graph) - 2.).abs() < 1e-4);
    }

    #[test]
    fn moving_a_threshold_updates_input_default() {
        let (mut ctx, _) = test_context(1);
        let (mut graph, tree, _) = tree_graph();
        BlendTree2D::set_threshold(&mut graph, tree, 0, Vec2::NEG_X).unwrap();

        let node = graph.node(tree).unwrap();
        let inner = node.inner_as::<BlendTree2D>().unwrap();
        assert_eq!(inner.thresholds, vec![Vec2::NEG_X, Vec2::X, Vec2::Y]);
        assert_eq!(
            node.inputs[BlendTree2D::threshold_input(0)]
                .default_value()
                .as_vec2(),
            Ok(Vec2::NEG_X)
        );

        graph
            .set_input_default(tree, BlendTree2D::PARAMETER, Vec2::NEG_X)
            .unwrap();
        graph.evaluate(0.1, &mut ctx).unwrap();
        assert_eq!(graph.final_pose(), Some(&translated_pose(1, 0.)));

        assert_eq!(
            BlendTree2D::set_threshold(&mut graph, tree, 3, Vec2::ZERO),
            Err(GraphError::MissingEndpoint {
                node: tree,
                direction: Direction::Input,
                index: 8,
            })
        );
    }

    #[test]
    fn removing_a_missing_pair_fails() {
        let (mut graph, tree, _) = tree_graph();
        assert_eq!(
            BlendTree2D::remove_input_pose(&mut graph, tree, 3),
            Err(GraphError::MissingEndpoint {
                node: tree,
                direction: Direction::Input,
                index: 7,
            })
        );
        let output = graph.root().unwrap();
        assert_eq!(
            BlendTree2D::add_input_pose(&mut graph, output, Vec2::ZERO),
            Err(GraphError::UnexpectedNodeType(output))
        );
    }
}
