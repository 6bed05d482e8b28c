use pose_graph_core::{
    animation_node::{NodeLike, NodeType, decode_state, encode_state},
    context::{NodeContext, SpecContext},
    edge_data::{ValueKind, bone_mask::BoneMask},
    errors::{GraphLoadError, GraphResult, GraphSaveError},
    registry::NodeRegistry,
};
use serde::{Deserialize, Serialize};

/// Emits an authored bone mask.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoneMaskNode {
    pub mask: BoneMask,
}

impl Default for BoneMaskNode {
    fn default() -> Self {
        Self {
            mask: BoneMask::all(),
        }
    }
}

impl BoneMaskNode {
    pub const OUTPUT: usize = 0;

    pub fn new(mask: BoneMask) -> Self {
        Self { mask }
    }
}

impl NodeLike for BoneMaskNode {
    fn display_name(&self) -> String {
        "Bone Mask".into()
    }

    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()> {
        ctx.set_output(Self::OUTPUT, self.mask.clone())
    }

    fn spec(&self, mut ctx: SpecContext) {
        ctx.add_output("mask", ValueKind::BoneMask);
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        encode_state(self)
    }
}

impl NodeType for BoneMaskNode {
    const TYPE_TAG: &'static str = "bone_mask";

    fn load_state(state: &[u8], _registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        decode_state(state)
    }
}
