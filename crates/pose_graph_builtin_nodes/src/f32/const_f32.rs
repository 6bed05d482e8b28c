use bevy_reflect::{Reflect, std_traits::ReflectDefault};
use pose_graph_core::{
    animation_node::{NodeLike, NodeType, decode_state, encode_state},
    context::{NodeContext, SpecContext},
    edge_data::ValueKind,
    errors::{GraphLoadError, GraphResult, GraphSaveError},
    registry::NodeRegistry,
};
use serde::{Deserialize, Serialize};

#[derive(Reflect, Clone, Debug, Default, Serialize, Deserialize)]
#[reflect(Default)]
pub struct ConstF32 {
    pub constant: f32,
}

impl ConstF32 {
    pub const OUTPUT: usize = 0;

    pub fn new(constant: f32) -> Self {
        Self { constant }
    }
}

impl NodeLike for ConstF32 {
    fn display_name(&self) -> String {
        "F32".into()
    }

    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()> {
        ctx.set_output(Self::OUTPUT, self.constant)
    }

    fn spec(&self, mut ctx: SpecContext) {
        ctx.add_output("out", ValueKind::F32);
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        encode_state(self)
    }
}

impl NodeType for ConstF32 {
    const TYPE_TAG: &'static str = "const_f32";

    fn load_state(state: &[u8], _registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        decode_state(state)
    }
}
