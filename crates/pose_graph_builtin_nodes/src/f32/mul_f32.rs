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
pub struct MulF32;

impl MulF32 {
    pub const IN_A: usize = 0;
    pub const IN_B: usize = 1;
    pub const OUTPUT: usize = 0;

    pub fn new() -> Self {
        Self
    }
}

impl NodeLike for MulF32 {
    fn display_name(&self) -> String {
        "× Multiply".into()
    }

    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()> {
        let a = ctx.input(Self::IN_A)?.as_f32()?;
        let b = ctx.input(Self::IN_B)?.as_f32()?;
        ctx.set_output(Self::OUTPUT, a * b)
    }

    fn spec(&self, mut ctx: SpecContext) {
        ctx.add_input("a", 1.0_f32)
            .add_input("b", 1.0_f32)
            .add_output("out", ValueKind::F32);
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        Ok(Vec::new())
    }
}

impl NodeType for MulF32 {
    const TYPE_TAG: &'static str = "mul_f32";

    fn load_state(_state: &[u8], _registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        Ok(Self)
    }
}
