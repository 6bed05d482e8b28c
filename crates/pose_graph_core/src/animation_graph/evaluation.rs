use bevy_log::{trace, warn};
use bevy_platform::collections::HashMap;

use super::{AnimationGraph, TargetEndpoint};
use crate::{
    animation_node::AnimationNode,
    context::{GraphContext, NodeContext},
    endpoint::Direction,
    errors::{GraphError, GraphResult},
    id::NodeId,
    sync::TransitionSyncData,
};

/// Progress of a node within one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitState {
    #[default]
    Unvisited,
    InProgress,
    Done,
}

struct EvaluationPass<'t> {
    delta_time: f32,
    transition: Option<&'t TransitionSyncData>,
    visits: HashMap<NodeId, VisitState>,
}

impl AnimationGraph {
    /// Runs one evaluation pass from the root. The result is read back with
    /// [`AnimationGraph::final_pose`].
    pub fn evaluate(&mut self, delta_time: f32, ctx: &mut GraphContext) -> GraphResult<()> {
        self.evaluate_with(delta_time, ctx, None)
    }

    /// Like [`AnimationGraph::evaluate`], handing `transition` to every node
    /// of this graph. Used by state nodes for the graph they own.
    pub fn evaluate_with(
        &mut self,
        delta_time: f32,
        ctx: &mut GraphContext,
        transition: Option<&TransitionSyncData>,
    ) -> GraphResult<()> {
        let Some(root) = self.root else {
            warn!("Evaluating an animation graph without a root node, no pose is produced");
            return Ok(());
        };

        let mut pass = EvaluationPass {
            delta_time,
            transition,
            visits: HashMap::default(),
        };
        self.evaluate_node(root, &mut pass, ctx)
    }

    fn evaluate_node(
        &mut self,
        node_id: NodeId,
        pass: &mut EvaluationPass,
        ctx: &mut GraphContext,
    ) -> GraphResult<()> {
        match pass.visits.get(&node_id).copied().unwrap_or_default() {
            VisitState::Done => return Ok(()),
            VisitState::InProgress => return Err(GraphError::CycleDetected(node_id)),
            VisitState::Unvisited => {}
        }
        pass.visits.insert(node_id, VisitState::InProgress);

        let input_count = self.try_node(node_id)?.inputs.len();
        let mut connected = Vec::with_capacity(input_count);

        for index in 0..input_count {
            let source = self.edges.get(&TargetEndpoint::new(node_id, index)).copied();
            connected.push(source.is_some());

            let value = match source {
                Some(source) => {
                    self.evaluate_node(source.node, pass, ctx)?;
                    Some(
                        self.endpoint(source.node, Direction::Output, source.index)?
                            .current()
                            .clone(),
                    )
                }
                None => None,
            };

            let input = self
                .try_node_mut(node_id)?
                .inputs
                .get_mut(index)
                .ok_or(GraphError::MissingEndpoint {
                    node: node_id,
                    direction: Direction::Input,
                    index,
                })?;
            match value {
                Some(value) => input.set_current(value)?,
                None => input.reset(),
            }
        }

        let AnimationNode {
            inputs,
            outputs,
            inner,
            ..
        } = self.try_node_mut(node_id)?;
        let mut node_ctx = NodeContext::new(
            node_id,
            pass.delta_time,
            inputs,
            outputs,
            &connected,
            ctx,
            pass.transition,
        );
        trace!("Evaluating {} node {node_id}", inner.type_tag());
        inner.evaluate(&mut node_ctx)?;

        pass.visits.insert(node_id, VisitState::Done);
        Ok(())
    }
}
