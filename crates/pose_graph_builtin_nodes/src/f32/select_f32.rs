use bevy_reflect::{Reflect, std_traits::ReflectDefault};
use pose_graph_core::{
    animation_node::{NodeLike, NodeType},
    context::{NodeContext, SpecContext},
    edge_data::ValueKind,
    errors::{GraphLoadError, GraphResult, GraphSaveError},
    registry::NodeRegistry,
};

/// Picks one of two values depending on a condition.
#[derive(Reflect, Clone, Debug, Default)]
#[reflect(Default)]
pub struct SelectF32;

impl SelectF32 {
    pub const CONDITION: usize = 0;
    pub const IF_TRUE: usize = 1;
    pub const IF_FALSE: usize = 2;
    pub const OUTPUT: usize = 0;

    pub fn new() -> Self {
        Self
    }
}

impl NodeLike for SelectF32 {
    fn display_name(&self) -> String {
        "Select".into()
    }

    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()> {
        let selected = if ctx.input(Self::CONDITION)?.as_bool()? {
            ctx.input(Self::IF_TRUE)?.as_f32()?
        } else {
            ctx.input(Self::IF_FALSE)?.as_f32()?
        };
        ctx.set_output(Self::OUTPUT, selected)
    }

    fn spec(&self, mut ctx: SpecContext) {
        ctx.add_input("condition", false)
            .add_input("if_true", 1.0_f32)
            .add_input("if_false", 0.0_f32)
            .add_output("out", ValueKind::F32);
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        Ok(Vec::new())
    }
}

impl NodeType for SelectF32 {
    const TYPE_TAG: &'static str = "select_f32";

    fn load_state(_state: &[u8], _registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        Ok(Self)
    }
}
