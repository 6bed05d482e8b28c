use pose_graph_core::{
    animation_graph::{AnimationGraph, serial::AnimationGraphSerial},
    animation_node::{NodeFlags, NodeLike, NodeType, decode_state, encode_state},
    context::{NodeContext, SpecContext},
    edge_data::ValueKind,
    errors::{GraphLoadError, GraphResult, GraphSaveError},
    registry::NodeRegistry,
};

/// Evaluates a nested graph and outputs its final pose.
///
/// The nested graph runs without transition data, even when this node is
/// itself inside a state.
#[derive(Clone, Debug, Default)]
pub struct GraphNode {
    pub graph: AnimationGraph,
}

impl GraphNode {
    pub const OUTPUT: usize = 0;

    pub fn new(graph: AnimationGraph) -> Self {
        Self { graph }
    }
}

impl NodeLike for GraphNode {
    fn display_name(&self) -> String {
        "🗠 Graph".into()
    }

    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()> {
        self.graph
            .evaluate(ctx.delta_time(), ctx.graph_context_mut())?;
        ctx.set_output(Self::OUTPUT, self.graph.final_pose_ref())
    }

    fn spec(&self, mut ctx: SpecContext) {
        ctx.add_output("pose", ValueKind::Pose);
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn flags(&self) -> NodeFlags {
        NodeFlags {
            can_be_open: true,
            ..Default::default()
        }
    }

    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError> {
        encode_state(&self.graph.to_serial()?)
    }
}

impl NodeType for GraphNode {
    const TYPE_TAG: &'static str = "graph";

    fn load_state(state: &[u8], registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        let serial: AnimationGraphSerial = decode_state(state)?;
        Ok(Self {
            graph: serial.into_graph(registry)?,
        })
    }
}
