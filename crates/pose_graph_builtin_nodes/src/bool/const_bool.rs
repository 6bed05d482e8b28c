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
pub struct ConstBool {
    pub constant: bool,
}

impl ConstBool {
    pub const OUTPUT: usize = 0;

    pub fn new(constant: bool) -> Self {
        Self { constant }
    }
}

impl NodeLike for ConstBool {
    fn display_name(&self) -> String {
        "Bool".into()
    }

    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()> {
        ctx.set_output(Self::OUTPUT, self.constant)
    }

    fn spec(&self, mut ctx: SpecContext) {
        ctx.add_output("out", ValueKind::Bool);
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        encode_state(self)
    }
}

impl NodeType for ConstBool {
    const TYPE_TAG: &'static str = "const_bool";

    fn load_state(state: &[u8], _registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        decode_state(state)
    }
}
