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
pub struct ClampF32;

impl ClampF32 {
    pub const INPUT: usize = 0;
    pub const CLAMP_MIN: usize = 1;
    pub const CLAMP_MAX: usize = 2;
    pub const OUTPUT: usize = 0;

    pub fn new() -> Self {
        Self
    }
}

impl NodeLike for ClampF32 {
    fn display_name(&self) -> String {
        "Clamp".into()
    }

    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()> {
        let input = ctx.input(Self::INPUT)?.as_f32()?;
        let min = ctx.input(Self::CLAMP_MIN)?.as_f32()?;
        let max = ctx.input(Self::CLAMP_MAX)?.as_f32()?;
        // f32::clamp panics on inverted bounds
        let clamped = input.max(min).min(max);
        ctx.set_output(Self::OUTPUT, clamped)
    }

    fn spec(&self, mut ctx: SpecContext) {
        ctx.add_input("in", 0.0_f32)
            .add_input("min", 0.0_f32)
            .add_input("max", 1.0_f32)
            .add_output("out", ValueKind::F32);
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        Ok(Vec::new())
    }
}

impl NodeType for ClampF32 {
    const TYPE_TAG: &'static str = "clamp_f32";

    fn load_state(_state: &[u8], _registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        Ok(Self)
    }
}
