use bevy_log::warn;
use pose_graph_core::{
    animation_node::{NodeLike, NodeType, decode_state, encode_state},
    context::{NodeContext, SpecContext},
    edge_data::{ValueKind, bone_mask::BoneMask},
    errors::{GraphLoadError, GraphResult, GraphSaveError},
    registry::NodeRegistry,
    sync::SyncStyle,
};
use serde::{Deserialize, Serialize};

/// Blends from a source pose towards a destination pose.
///
/// Only [`SyncStyle::Async`] has an effect on the clocks of the inputs; other
/// styles are accepted but the poses are blended as they arrive.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BlendNode {
    pub sync_style: SyncStyle,
    #[serde(skip)]
    warned_sync_style: bool,
}

impl BlendNode {
    pub const WEIGHT: usize = 0;
    pub const MASK: usize = 1;
    pub const SOURCE: usize = 2;
    pub const DESTINATION: usize = 3;
    pub const OUTPUT: usize = 0;

    pub fn new(sync_style: SyncStyle) -> Self {
        Self {
            sync_style,
            warned_sync_style: false,
        }
    }
}

impl NodeLike for BlendNode {
    fn display_name(&self) -> String {
        "∑ Blend".into()
    }

    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()> {
        if self.sync_style != SyncStyle::Async && !self.warned_sync_style {
            warn!(
                "Blend node {} ignores sync style {:?}, inputs keep their own clocks",
                ctx.node_id(),
                self.sync_style
            );
            self.warned_sync_style = true;
        }

        let weight = ctx.input(Self::WEIGHT)?.as_f32()?;
        let mask = ctx.input(Self::MASK)?.as_bone_mask()?;
        let source = ctx.input(Self::SOURCE)?.as_pose()?;
        let destination = ctx.input(Self::DESTINATION)?.as_pose()?;

        let (Some(source), Some(destination)) = (source.get(), destination.get()) else {
            return Ok(());
        };
        let pose = ctx
            .controller()
            .blend(ctx.skeleton(), source, destination, weight, mask);
        ctx.set_output(Self::OUTPUT, pose)
    }

    fn spec(&self, mut ctx: SpecContext) {
        ctx.add_input("weight", 0.5_f32)
            .add_input("mask", BoneMask::all())
            .add_input_kind("source", ValueKind::Pose)
            .add_input_kind("destination", ValueKind::Pose)
            .add_output("pose", ValueKind::Pose);
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        encode_state(self)
    }
}

impl NodeType for BlendNode {
    const TYPE_TAG: &'static str = "blend";

    fn load_state(state: &[u8], _registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        decode_state(state)
    }
}

#[cfg(test)]
mod test {
    use bevy_math::Vec3;
    use pose_graph_core::{
        animation_graph::AnimationGraph,
        edge_data::bone_mask::BoneMask,
        errors::GraphError,
        id::NodeId,
        sync::SyncStyle,
        testing::{ControllerCall, PoseSourceNode, test_context, translated_pose},
    };

    use super::BlendNode;
    use crate::{f32::ConstF32, vec2::ConstVec2};

    fn blend_graph(node: BlendNode) -> (AnimationGraph, NodeId) {
        let mut graph = AnimationGraph::new();
        let output = graph.root().unwrap();
        let source = graph.add_node_like("Source", PoseSourceNode::new(translated_pose(2, 0.)));
        let destination =
            graph.add_node_like("Destination", PoseSourceNode::new(translated_pose(2, 4.)));
        let blend = graph.add_node_like("Blend", node);
        graph.connect_nodes(blend, BlendNode::SOURCE, source, 0).unwrap();
        graph
            .connect_nodes(blend, BlendNode::DESTINATION, destination, 0)
            .unwrap();
        graph.connect_nodes(output, 0, blend, BlendNode::OUTPUT).unwrap();
        (graph, blend)
    }

    #[test]
    fn blends_connected_poses() {
        let (mut ctx, controller) = test_context(2);
        let (mut graph, blend) = blend_graph(BlendNode::default());
        let weight = graph.add_node_like("Weight", ConstF32::new(0.25));
        graph.connect_nodes(blend, BlendNode::WEIGHT, weight, 0).unwrap();

        graph.evaluate(0.1, &mut ctx).unwrap();

        let pose = graph.final_pose().unwrap();
        assert!(pose.bones.iter().all(|bone| bone.translation == Vec3::new(1., 0., 0.)));
        assert_eq!(controller.calls(), vec![ControllerCall::Blend { weight: 0.25 }]);
    }

    #[test]
    fn mask_limits_blend_per_bone() {
        let (mut ctx, _) = test_context(2);
        let (mut graph, blend) = blend_graph(BlendNode::default());
        graph.set_input_default(blend, BlendNode::WEIGHT, 1.0_f32).unwrap();
        graph
            .set_input_default(
                blend,
                BlendNode::MASK,
                BoneMask::none().with_weight("bone_1", 1.),
            )
            .unwrap();

        graph.evaluate(0.1, &mut ctx).unwrap();

        let pose = graph.final_pose().unwrap();
        assert_eq!(pose.bones[0].translation, Vec3::ZERO);
        assert_eq!(pose.bones[1].translation, Vec3::new(4., 0., 0.));
    }

    #[test]
    fn missing_pose_leaves_output_untouched() {
        let (mut ctx, controller) = test_context(1);
        let mut graph = AnimationGraph::new();
        let output = graph.root().unwrap();
        let source = graph.add_node_like("Source", PoseSourceNode::new(translated_pose(1, 0.)));
        let blend = graph.add_node_like("Blend", BlendNode::default());
        graph.connect_nodes(blend, BlendNode::SOURCE, source, 0).unwrap();
        graph.connect_nodes(output, 0, blend, BlendNode::OUTPUT).unwrap();

        graph.evaluate(0.1, &mut ctx).unwrap();
        assert!(graph.final_pose().is_none());
        assert!(controller.calls().is_empty());
    }

    #[test]
    fn non_async_style_still_blends() {
        let (mut ctx, controller) = test_context(1);
        let (mut graph, blend) = blend_graph(BlendNode::new(SyncStyle::KeyFrameSync));
        graph.evaluate(0.1, &mut ctx).unwrap();
        graph.evaluate(0.1, &mut ctx).unwrap();

        assert!(graph.final_pose().is_some());
        assert_eq!(controller.count(|call| matches!(call, ControllerCall::Blend { .. })), 2);
        let node = graph.node(blend).unwrap().inner_as::<BlendNode>().unwrap();
        assert!(node.warned_sync_style);
    }

    #[test]
    fn wrong_input_kind_is_rejected() {
        let (mut graph, blend) = blend_graph(BlendNode::default());
        let vector = graph.add_node_like("Vector", ConstVec2::default());
        assert!(matches!(
            graph.connect_nodes(blend, BlendNode::WEIGHT, vector, 0),
            Err(GraphError::EndpointTypeMismatch { .. })
        ));
        assert!(matches!(
            graph.connect_nodes(blend, BlendNode::MASK, vector, 0),
            Err(GraphError::EndpointTypeMismatch { .. })
        ));
        assert!(matches!(
            graph.set_input_default(blend, BlendNode::SOURCE, 1.0_f32),
            Err(GraphError::MismatchedDataType(..))
        ));
    }
}
