use bevy_reflect::{Reflect, std_traits::ReflectDefault};
use pose_graph_core::{
    animation_node::{NodeLike, NodeType},
    context::{NodeContext, SpecContext},
    edge_data::ValueKind,
    errors::{GraphLoadError, GraphResult, GraphSaveError},
    registry::NodeRegistry,
};

/// Extracts the difference between a reference pose and a base pose, to be
/// layered on top of other animation. Without a base pose the skeleton's
/// zero pose is used.
#[derive(Reflect, Clone, Debug, Default)]
#[reflect(Default)]
pub struct AdditivePose;

impl AdditivePose {
    pub const REFERENCE: usize = 0;
    pub const BASE: usize = 1;
    pub const OUTPUT: usize = 0;

    pub fn new() -> Self {
        Self
    }
}

impl NodeLike for AdditivePose {
    fn display_name(&self) -> String {
        "+ Additive Pose".into()
    }

    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()> {
        let Some(reference) = ctx.input(Self::REFERENCE)?.as_pose()?.get() else {
            return Ok(());
        };

        let zero;
        let base = match ctx.input(Self::BASE)?.as_pose()?.get() {
            Some(base) => base,
            None => {
                zero = ctx.controller().zero_pose(ctx.skeleton());
                &zero
            }
        };

        let pose = ctx
            .controller()
            .generate_additive_pose(ctx.skeleton(), reference, base);
        ctx.set_output(Self::OUTPUT, pose)
    }

    fn spec(&self, mut ctx: SpecContext) {
        ctx.add_input_kind("reference", ValueKind::Pose)
            .add_input_kind("base", ValueKind::Pose)
            .add_output("pose", ValueKind::Pose);
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        Ok(Vec::new())
    }
}

impl NodeType for AdditivePose {
    const TYPE_TAG: &'static str = "additive_pose";

    fn load_state(_state: &[u8], _registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        Ok(Self)
    }
}

#[cfg(test)]
mod test {
    use pose_graph_core::{
        animation_graph::AnimationGraph,
        id::NodeId,
        testing::{ControllerCall, PoseSourceNode, test_context, translated_pose},
    };

    use super::AdditivePose;

    fn additive_graph() -> (AnimationGraph, NodeId) {
        let mut graph = AnimationGraph::new();
        let output = graph.root().unwrap();
        let additive = graph.add_node_like("Additive", AdditivePose::new());
        graph.connect_nodes(output, 0, additive, AdditivePose::OUTPUT).unwrap();
        (graph, additive)
    }

    #[test]
    fn unconnected_base_uses_zero_pose_once() {
        let (mut ctx, controller) = test_context(2);
        let (mut graph, additive) = additive_graph();
        let reference = graph.add_node_like("Reference", PoseSourceNode::new(translated_pose(2, 3.)));
        graph
            .connect_nodes(additive, AdditivePose::REFERENCE, reference, 0)
            .unwrap();

        graph.evaluate(0.1, &mut ctx).unwrap();

        assert_eq!(
            controller.calls(),
            vec![ControllerCall::ZeroPose, ControllerCall::Additive]
        );
        assert_eq!(graph.final_pose(), Some(&translated_pose(2, 3.)));
    }

    #[test]
    fn connected_base_is_subtracted() {
        let (mut ctx, controller) = test_context(2);
        let (mut graph, additive) = additive_graph();
        let reference = graph.add_node_like("Reference", PoseSourceNode::new(translated_pose(2, 3.)));
        let base = graph.add_node_like("Base", PoseSourceNode::new(translated_pose(2, 1.)));
        graph
            .connect_nodes(additive, AdditivePose::REFERENCE, reference, 0)
            .unwrap();
        graph.connect_nodes(additive, AdditivePose::BASE, base, 0).unwrap();

        graph.evaluate(0.1, &mut ctx).unwrap();

        assert_eq!(controller.calls(), vec![ControllerCall::Additive]);
        assert_eq!(graph.final_pose(), Some(&translated_pose(2, 2.)));
    }

    #[test]
    fn missing_reference_produces_nothing() {
        let (mut ctx, controller) = test_context(1);
        let (mut graph, _) = additive_graph();
        graph.evaluate(0.1, &mut ctx).unwrap();
        assert!(graph.final_pose().is_none());
        assert!(controller.calls().is_empty());
    }
}
