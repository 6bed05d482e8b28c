use bevy_math::Vec2;
use bevy_reflect::{Reflect, std_traits::ReflectDefault};
use pose_graph_core::{
    animation_node::{NodeLike, NodeType},
    context::{NodeContext, SpecContext},
    edge_data::ValueKind,
    errors::{GraphLoadError, GraphResult, GraphSaveError},
    registry::NodeRegistry,
};

/// Builds a `Vec2` from two scalars, e.g. to drive a 2D blend space.
#[derive(Reflect, Clone, Debug, Default)]
#[reflect(Default)]
pub struct BuildVec2;

impl BuildVec2 {
    pub const IN_X: usize = 0;
    pub const IN_Y: usize = 1;
    pub const OUTPUT: usize = 0;

    pub fn new() -> Self {
        Self
    }
}

impl NodeLike for BuildVec2 {
    fn display_name(&self) -> String {
        "Build Vec2".into()
    }

    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()> {
        let x = ctx.input(Self::IN_X)?.as_f32()?;
        let y = ctx.input(Self::IN_Y)?.as_f32()?;
        ctx.set_output(Self::OUTPUT, Vec2::new(x, y))
    }

    fn spec(&self, mut ctx: SpecContext) {
        ctx.add_input("x", 0.0_f32)
            .add_input("y", 0.0_f32)
            .add_output("out", ValueKind::Vec2);
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        Ok(Vec::new())
    }
}

impl NodeType for BuildVec2 {
    const TYPE_TAG: &'static str = "build_vec2";

    fn load_state(_state: &[u8], _registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        Ok(Self)
    }
}
