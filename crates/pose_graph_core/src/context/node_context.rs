use crate::{
    controller::{AnimationController, Skeleton},
    edge_data::Value,
    endpoint::{Direction, Endpoint},
    errors::{GraphError, GraphResult},
    id::NodeId,
    sync::{SynchronizingGroups, TransitionSyncData},
};

use super::GraphContext;

/// Everything a node sees while it is evaluated.
///
/// Inputs already hold the values pulled from their sources (or their
/// defaults when unconnected). Outputs keep whatever the node wrote in the
/// previous pass until overwritten.
pub struct NodeContext<'a> {
    node_id: NodeId,
    delta_time: f32,
    inputs: &'a [Endpoint],
    outputs: &'a mut [Endpoint],
    connected_inputs: &'a [bool],
    graph_context: &'a mut GraphContext,
    transition: Option<&'a TransitionSyncData>,
}

impl<'a> NodeContext<'a> {
    pub fn new(
        node_id: NodeId,
        delta_time: f32,
        inputs: &'a [Endpoint],
        outputs: &'a mut [Endpoint],
        connected_inputs: &'a [bool],
        graph_context: &'a mut GraphContext,
        transition: Option<&'a TransitionSyncData>,
    ) -> Self {
        Self {
            node_id,
            delta_time,
            inputs,
            outputs,
            connected_inputs,
            graph_context,
            transition,
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// Frame time in seconds.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn input(&self, index: usize) -> GraphResult<&Value> {
        self.inputs
            .get(index)
            .map(Endpoint::current)
            .ok_or(self.missing(Direction::Input, index))
    }

    pub fn output(&self, index: usize) -> GraphResult<&Value> {
        self.outputs
            .get(index)
            .map(Endpoint::current)
            .ok_or(self.missing(Direction::Output, index))
    }

    /// Writes an output. Fails if the value kind differs from the endpoint's.
    pub fn set_output(&mut self, index: usize, value: impl Into<Value>) -> GraphResult<()> {
        let missing = self.missing(Direction::Output, index);
        self.outputs
            .get_mut(index)
            .ok_or(missing)?
            .set_current(value)
    }

    pub fn is_input_connected(&self, index: usize) -> bool {
        self.connected_inputs.get(index).copied().unwrap_or(false)
    }

    pub fn skeleton(&self) -> &dyn Skeleton {
        self.graph_context.skeleton()
    }

    pub fn controller(&self) -> &dyn AnimationController {
        self.graph_context.controller()
    }

    /// Transition data of the state node that owns the graph being evaluated,
    /// if any.
    pub fn transition_sync(&self) -> Option<&TransitionSyncData> {
        self.transition
    }

    pub fn sync_groups(&self) -> &SynchronizingGroups {
        self.graph_context.sync_groups()
    }

    pub fn sync_groups_mut(&mut self) -> &mut SynchronizingGroups {
        self.graph_context.sync_groups_mut()
    }

    /// Context to evaluate nested graphs with.
    pub fn graph_context_mut(&mut self) -> &mut GraphContext {
        self.graph_context
    }

    fn missing(&self, direction: Direction, index: usize) -> GraphError {
        GraphError::MissingEndpoint {
            node: self.node_id,
            direction,
            index,
        }
    }
}
