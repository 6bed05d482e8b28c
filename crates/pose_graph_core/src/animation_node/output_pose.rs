use crate::{
    context::{NodeContext, SpecContext},
    edge_data::ValueKind,
    errors::{GraphLoadError, GraphResult, GraphSaveError},
    registry::NodeRegistry,
};

use super::{NodeFlags, NodeLike, NodeType};

/// Terminal node of a graph. Its single input is the graph's final pose.
#[derive(Clone, Debug, Default)]
pub struct OutputPoseNode;

impl OutputPoseNode {
    pub const IN_POSE: &'static str = "pose";
}

impl NodeLike for OutputPoseNode {
    fn evaluate(&mut self, _ctx: &mut NodeContext) -> GraphResult<()> {
        Ok(())
    }

    fn spec(&self, mut ctx: SpecContext) {
        ctx.add_input_kind(Self::IN_POSE, ValueKind::Pose);
    }

    fn display_name(&self) -> String {
        "Output Pose".into()
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn flags(&self) -> NodeFlags {
        NodeFlags {
            is_removable: false,
            ..Default::default()
        }
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        Ok(Vec::new())
    }
}

impl NodeType for OutputPoseNode {
    const TYPE_TAG: &'static str = "output_pose";

    fn load_state(_state: &[u8], _registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        Ok(Self)
    }
}
