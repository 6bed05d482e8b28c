use bevy_math::Vec2;
use pose_graph_core::{
    animation_node::{NodeLike, NodeType, decode_state, encode_state},
    context::{NodeContext, SpecContext},
    edge_data::ValueKind,
    errors::{GraphLoadError, GraphResult, GraphSaveError},
    registry::NodeRegistry,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConstVec2 {
    pub constant: Vec2,
}

impl ConstVec2 {
    pub const OUTPUT: usize = 0;

    pub fn new(constant: Vec2) -> Self {
        Self { constant }
    }
}

impl NodeLike for ConstVec2 {
    fn display_name(&self) -> String {
        "Vec2".into()
    }

    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()> {
        ctx.set_output(Self::OUTPUT, self.constant)
    }

    fn spec(&self, mut ctx: SpecContext) {
        ctx.add_output("out", ValueKind::Vec2);
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        encode_state(self)
    }
}

impl NodeType for ConstVec2 {
    const TYPE_TAG: &'static str = "const_vec2";

    fn load_state(state: &[u8], _registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        decode_state(state)
    }
}
