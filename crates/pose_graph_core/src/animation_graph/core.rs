use bevy_math::Vec2;
use bevy_platform::collections::HashMap;

use super::{Connection, SourceEndpoint, TargetEndpoint};
use crate::{
    animation_node::{AnimationNode, NodeLike, OutputPoseNode},
    context::GraphContext,
    edge_data::Value,
    endpoint::{Direction, Endpoint},
    errors::{GraphError, GraphResult, GraphValidationError},
    id::NodeId,
    pose::{Pose, PoseRef},
    utils::ordered_map::OrderedMap,
};

/// Extra data for the graph that has no effect in evaluation.
/// Used for editor data, such as node positions in screen.
#[derive(Debug, Clone, Default)]
pub struct Extra {
    /// Positions in canvas of each node
    pub node_positions: HashMap<NodeId, Vec2>,
}

impl Extra {
    /// Set node position (for editor)
    pub fn set_node_position(&mut self, node_id: NodeId, position: Vec2) {
        self.node_positions.insert(node_id, position);
    }

    pub fn node_position(&self, node_id: NodeId) -> Vec2 {
        self.node_positions
            .get(&node_id)
            .copied()
            .unwrap_or(Vec2::ZERO)
    }

    /// Add default position for new node if not already there
    pub fn node_added(&mut self, node_id: NodeId) {
        self.node_positions.entry(node_id).or_insert(Vec2::ZERO);
    }

    pub fn node_removed(&mut self, node_id: NodeId) {
        self.node_positions.remove(&node_id);
    }
}

/// A graph of animation nodes.
///
/// The graph owns its nodes. Connections are stored inverted, keyed by the
/// input they feed, so an input has at most one source while an output may
/// fan out freely.
#[derive(Debug, Clone)]
pub struct AnimationGraph {
    pub(super) nodes: OrderedMap<NodeId, AnimationNode>,
    /// Inverted, indexed by target endpoint.
    pub(super) edges: OrderedMap<TargetEndpoint, SourceEndpoint>,
    pub(super) root: Option<NodeId>,
    pub extra: Extra,
}

impl Default for AnimationGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationGraph {
    /// A graph holding only an output node, which is also its root.
    pub fn new() -> Self {
        let mut graph = Self::empty();
        let output = graph.add_node(AnimationNode::new("Output", OutputPoseNode));
        graph.root = Some(output);
        graph
    }

    /// A graph with no nodes and no root.
    pub fn empty() -> Self {
        Self {
            nodes: OrderedMap::new(),
            edges: OrderedMap::new(),
            root: None,
            extra: Extra::default(),
        }
    }

    // --- Nodes
    // ----------------------------------------------------------------------------------------
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, root: Option<NodeId>) -> GraphResult<()> {
        if let Some(root) = root {
            self.try_node(root)?;
        }
        self.root = root;
        Ok(())
    }

    /// Add a new node to the graph
    pub fn add_node(&mut self, node: AnimationNode) -> NodeId {
        let node_id = node.id;
        self.extra.node_added(node_id);
        self.nodes.insert(node_id, node);
        node_id
    }

    pub fn add_node_like(&mut self, name: impl Into<String>, inner: impl NodeLike) -> NodeId {
        self.add_node(AnimationNode::new(name, inner))
    }

    pub fn node(&self, node_id: NodeId) -> Option<&AnimationNode> {
        self.nodes.get(&node_id)
    }

    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut AnimationNode> {
        self.nodes.get_mut(&node_id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &AnimationNode> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// First node with the given name.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .values()
            .find(|node| node.name == name)
            .map(|node| node.id)
    }

    /// Removes a node after severing every connection touching it.
    pub fn remove_node(&mut self, node_id: NodeId) -> GraphResult<AnimationNode> {
        if !self.try_node(node_id)?.flags().is_removable {
            return Err(GraphError::NodeNotRemovable(node_id));
        }

        let touching: Vec<TargetEndpoint> = self
            .edges
            .iter()
            .filter(|(target, source)| target.node == node_id || source.node == node_id)
            .map(|(target, _)| *target)
            .collect();
        for target in touching {
            self.disconnect_nodes(target.node, target.index)?;
        }

        if self.root == Some(node_id) {
            self.root = None;
        }
        self.extra.node_removed(node_id);
        self.nodes
            .shift_remove(&node_id)
            .ok_or(GraphError::MissingNode(node_id))
    }

    /// Like [`AnimationGraph::remove_node`], also dropping the node from the
    /// synchronizing groups of `ctx`.
    pub fn remove_node_in(
        &mut self,
        node_id: NodeId,
        ctx: &mut GraphContext,
    ) -> GraphResult<AnimationNode> {
        let node = self.remove_node(node_id)?;
        ctx.sync_groups_mut().remove_node_everywhere(node_id);
        Ok(node)
    }

    pub fn rename_node(&mut self, node_id: NodeId, name: impl Into<String>) -> GraphResult<()> {
        let node = self.try_node_mut(node_id)?;
        if !node.flags().is_renamable {
            return Err(GraphError::NodeNotRenamable(node_id));
        }
        node.name = name.into();
        Ok(())
    }
    // ----------------------------------------------------------------------------------------

    // --- Endpoints
    // ----------------------------------------------------------------------------------------
    pub fn endpoint(
        &self,
        node_id: NodeId,
        direction: Direction,
        index: usize,
    ) -> GraphResult<&Endpoint> {
        self.try_node(node_id)?
            .endpoint(direction, index)
            .ok_or(GraphError::MissingEndpoint {
                node: node_id,
                direction,
                index,
            })
    }

    /// Appends an endpoint to a node and returns its index.
    pub fn register_endpoint(
        &mut self,
        node_id: NodeId,
        direction: Direction,
        name: impl Into<String>,
        default: impl Into<Value>,
    ) -> GraphResult<usize> {
        let endpoints = self.try_node_mut(node_id)?.endpoints_mut(direction);
        endpoints.push(Endpoint::new(name, direction, default));
        Ok(endpoints.len() - 1)
    }

    /// Removes an endpoint after disconnecting it. Connections on later
    /// endpoints of the same node and direction shift down one index so they
    /// stay attached to the same endpoints.
    pub fn remove_endpoint(
        &mut self,
        node_id: NodeId,
        direction: Direction,
        index: usize,
    ) -> GraphResult<Endpoint> {
        self.endpoint(node_id, direction, index)?;

        let attached: Vec<TargetEndpoint> = match direction {
            Direction::Input => self
                .edges
                .keys()
                .filter(|target| target.node == node_id && target.index == index)
                .copied()
                .collect(),
            Direction::Output => self
                .edges
                .iter()
                .filter(|(_, source)| source.node == node_id && source.index == index)
                .map(|(target, _)| *target)
                .collect(),
        };
        for target in attached {
            self.disconnect_nodes(target.node, target.index)?;
        }

        let removed = self
            .try_node_mut(node_id)?
            .endpoints_mut(direction)
            .remove(index);

        self.edges = std::mem::take(&mut self.edges)
            .into_iter()
            .map(|(mut target, mut source)| {
                match direction {
                    Direction::Input if target.node == node_id && target.index > index => {
                        target.index -= 1;
                    }
                    Direction::Output if source.node == node_id && source.index > index => {
                        source.index -= 1;
                    }
                    _ => {}
                }
                (target, source)
            })
            .collect();

        Ok(removed)
    }

    /// Sets the value an input falls back to while unconnected.
    pub fn set_input_default(
        &mut self,
        node_id: NodeId,
        index: usize,
        value: impl Into<Value>,
    ) -> GraphResult<()> {
        let endpoint = self
            .try_node_mut(node_id)?
            .inputs
            .get_mut(index)
            .ok_or(GraphError::MissingEndpoint {
                node: node_id,
                direction: Direction::Input,
                index,
            })?;
        let value = value.into();
        endpoint.set_default(value.clone())?;
        endpoint.set_current(value)
    }
    // ----------------------------------------------------------------------------------------

    // --- Connections
    // ----------------------------------------------------------------------------------------
    /// Connects output `source_output` of `source` to input `target_input` of
    /// `target`. An existing connection on that input is replaced. Kinds of
    /// both endpoints must match, otherwise the graph is left untouched.
    pub fn connect_nodes(
        &mut self,
        target: NodeId,
        target_input: usize,
        source: NodeId,
        source_output: usize,
    ) -> GraphResult<()> {
        let source_pin = SourceEndpoint::new(source, source_output);
        let target_pin = TargetEndpoint::new(target, target_input);

        let output_kind = self.endpoint(source, Direction::Output, source_output)?.kind();
        let input_kind = self.endpoint(target, Direction::Input, target_input)?.kind();
        if output_kind != input_kind {
            return Err(GraphError::EndpointTypeMismatch {
                output: source_pin,
                output_kind,
                input: target_pin,
                input_kind,
            });
        }

        match self.edges.get(&target_pin).copied() {
            Some(existing) if existing == source_pin => return Ok(()),
            Some(_) => {
                self.disconnect_nodes(target, target_input)?;
            }
            None => {}
        }

        self.edges.insert(target_pin, source_pin);
        self.try_node_mut(source)?
            .inner
            .on_connect(Direction::Output, source_output);
        self.try_node_mut(target)?
            .inner
            .on_connect(Direction::Input, target_input);

        Ok(())
    }

    /// Removes the connection feeding an input, returning its source.
    pub fn disconnect_nodes(
        &mut self,
        target: NodeId,
        target_input: usize,
    ) -> GraphResult<Option<SourceEndpoint>> {
        self.try_node(target)?;
        let Some(source) = self
            .edges
            .shift_remove(&TargetEndpoint::new(target, target_input))
        else {
            return Ok(None);
        };

        if let Some(source_node) = self.nodes.get_mut(&source.node) {
            source_node
                .inner
                .on_disconnect(Direction::Output, source.index);
        }
        self.try_node_mut(target)?
            .inner
            .on_disconnect(Direction::Input, target_input);

        Ok(Some(source))
    }

    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        self.edges
            .iter()
            .map(|(target, source)| Connection::new(*source, *target))
    }

    pub fn connection_count(&self) -> usize {
        self.edges.len()
    }

    pub fn source_of(&self, target: NodeId, target_input: usize) -> Option<SourceEndpoint> {
        self.edges
            .get(&TargetEndpoint::new(target, target_input))
            .copied()
    }
    // ----------------------------------------------------------------------------------------

    // --- Verification
    // ----------------------------------------------------------------------------------------
    /// Verify that the graph is well formed: every connection joins existing
    /// endpoints of the same kind, the root exists, and no node depends on
    /// itself.
    pub fn validate_edges(&self) -> Result<(), GraphValidationError> {
        for (target, source) in self.edges.iter() {
            let (Ok(output), Ok(input)) = (
                self.endpoint(source.node, Direction::Output, source.index),
                self.endpoint(target.node, Direction::Input, target.index),
            ) else {
                return Err(GraphValidationError::DanglingConnection(*source, *target));
            };
            if output.kind() != input.kind() {
                return Err(GraphValidationError::InconsistentEndpointKinds(
                    *source, *target,
                ));
            }
        }

        if let Some(root) = self.root {
            if !self.nodes.contains_key(&root) {
                return Err(GraphValidationError::DanglingRoot(root));
            }
        }

        self.detect_cycle()
    }

    fn detect_cycle(&self) -> Result<(), GraphValidationError> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Open,
            Closed,
        }

        fn visit(
            node: NodeId,
            dependencies: &HashMap<NodeId, Vec<NodeId>>,
            marks: &mut HashMap<NodeId, Mark>,
        ) -> Result<(), GraphValidationError> {
            match marks.get(&node) {
                Some(Mark::Closed) => return Ok(()),
                Some(Mark::Open) => return Err(GraphValidationError::Cycle(node)),
                None => {}
            }
            marks.insert(node, Mark::Open);
            for dependency in dependencies.get(&node).into_iter().flatten() {
                visit(*dependency, dependencies, marks)?;
            }
            marks.insert(node, Mark::Closed);
            Ok(())
        }

        let mut dependencies = HashMap::<NodeId, Vec<NodeId>>::default();
        for (target, source) in self.edges.iter() {
            dependencies.entry(target.node).or_default().push(source.node);
        }

        let mut marks = HashMap::default();
        for node_id in self.nodes.keys() {
            visit(*node_id, &dependencies, &mut marks)?;
        }
        Ok(())
    }
    // ----------------------------------------------------------------------------------------

    /// Pose feeding the root node, as computed by the last evaluation.
    pub fn final_pose(&self) -> Option<&Pose> {
        let root = self.nodes.get(&self.root?)?;
        root.inputs.first()?.current().as_pose().ok()?.get()
    }

    pub fn final_pose_ref(&self) -> PoseRef {
        self.root
            .and_then(|root| self.nodes.get(&root))
            .and_then(|root| root.inputs.first())
            .and_then(|input| input.current().as_pose().ok().cloned())
            .unwrap_or_default()
    }

    pub(super) fn try_node(&self, node_id: NodeId) -> GraphResult<&AnimationNode> {
        self.nodes
            .get(&node_id)
            .ok_or(GraphError::MissingNode(node_id))
    }

    pub(super) fn try_node_mut(&mut self, node_id: NodeId) -> GraphResult<&mut AnimationNode> {
        self.nodes
            .get_mut(&node_id)
            .ok_or(GraphError::MissingNode(node_id))
    }
}
