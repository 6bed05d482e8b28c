use bevy_reflect::{Reflect, std_traits::ReflectDefault};
use pose_graph_core::{
    animation_node::{NodeLike, NodeType},
    context::{NodeContext, SpecContext},
    edge_data::ValueKind,
    errors::{GraphLoadError, GraphResult, GraphSaveError},
    registry::NodeRegistry,
};

#[derive(Reflect, Clone, Debug, Default)]
#[reflect(Default)]
pub struct NotBool;

impl NotBool {
    pub const INPUT: usize = 0;
    pub const OUTPUT: usize = 0;

    pub fn new() -> Self {
        Self
    }
}

impl NodeLike for NotBool {
    fn display_name(&self) -> String {
        "Not".into()
    }

    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()> {
        let input = ctx.input(Self::INPUT)?.as_bool()?;
        ctx.set_output(Self::OUTPUT, !input)
    }

    fn spec(&self, mut ctx: SpecContext) {
        ctx.add_input("in", false).add_output("out", ValueKind::Bool);
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        Ok(Vec::new())
    }
}

impl NodeType for NotBool {
    const TYPE_TAG: &'static str = "not_bool";

    fn load_state(_state: &[u8], _registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        Ok(Self)
    }
}
