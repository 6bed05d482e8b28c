//! Serialized form of animation graphs.
//!
//! Graphs are authored as RON and shipped as MessagePack; both encode the
//! same [`AnimationGraphSerial`] model. Node specific state is stored as an
//! opaque byte blob produced by [`NodeLike::save_state`] and restored by the
//! constructor registered for the node's type tag.

use bevy_log::debug;
use bevy_math::Vec2;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use super::{AnimationGraph, Connection};
use crate::{
    animation_node::{AnimationNode, NodeLike},
    endpoint::{Direction, Endpoint},
    errors::{GraphLoadError, GraphSaveError},
    id::NodeId,
    registry::NodeRegistry,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NodeSerial {
    pub type_tag: String,
    pub id: NodeId,
    pub name: String,
    pub position: Vec2,
    pub inputs: Vec<Endpoint>,
    pub outputs: Vec<Endpoint>,
    pub state: Vec<u8>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnimationGraphSerial {
    pub nodes: Vec<NodeSerial>,
    pub connections: Vec<Connection>,
    /// Nil when the graph has no root.
    pub root: NodeId,
}

impl AnimationGraphSerial {
    pub fn from_graph(graph: &AnimationGraph) -> Result<Self, GraphSaveError> {
        let nodes = graph
            .nodes
            .values()
            .map(|node| {
                Ok(NodeSerial {
                    type_tag: node.inner.type_tag().to_owned(),
                    id: node.id,
                    name: node.name.clone(),
                    position: graph.extra.node_position(node.id),
                    inputs: node.inputs.clone(),
                    outputs: node.outputs.clone(),
                    state: node.inner.save_state()?,
                })
            })
            .collect::<Result<Vec<_>, GraphSaveError>>()?;

        Ok(Self {
            nodes,
            connections: graph.connections().collect(),
            root: graph.root.unwrap_or_else(NodeId::nil),
        })
    }

    /// Rebuilds the graph. Any inconsistency is reported as
    /// [`GraphLoadError::FileCorrupted`] and nothing is recovered.
    pub fn into_graph(self, registry: &NodeRegistry) -> Result<AnimationGraph, GraphLoadError> {
        let mut graph = AnimationGraph::empty();

        for node in self.nodes {
            if node.id.is_nil() || graph.nodes.contains_key(&node.id) {
                return Err(corrupted(format!(
                    "node `{}` has a nil or duplicate id {}",
                    node.name, node.id
                )));
            }

            let inner = registry.construct(&node.type_tag, &node.state)?;
            if !endpoints_well_formed(&node.inputs, Direction::Input)
                || !endpoints_well_formed(&node.outputs, Direction::Output)
                || !inner.validate_endpoints(&node.inputs, &node.outputs)
            {
                return Err(corrupted(format!(
                    "endpoints of node `{}` do not fit node type `{}`",
                    node.name, node.type_tag
                )));
            }

            graph.extra.set_node_position(node.id, node.position);
            graph.nodes.insert(
                node.id,
                AnimationNode {
                    id: node.id,
                    name: node.name,
                    inputs: node.inputs,
                    outputs: node.outputs,
                    inner,
                },
            );
        }

        for connection in self.connections {
            let Connection { source, target } = connection;
            if graph.edges.contains_key(&target) {
                return Err(corrupted(format!("input {target:?} has several sources")));
            }
            graph
                .connect_nodes(target.node, target.index, source.node, source.index)
                .map_err(|err| corrupted(format!("invalid connection {connection:?}: {err}")))?;
        }

        if !self.root.is_nil() {
            graph
                .set_root(Some(self.root))
                .map_err(|_| corrupted(format!("root {} is not part of the graph", self.root)))?;
        }

        debug!(
            "Loaded animation graph with {} nodes and {} connections",
            graph.node_count(),
            graph.connection_count()
        );

        Ok(graph)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, GraphSaveError> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GraphLoadError> {
        Ok(rmp_serde::from_slice(bytes)?)
    }

    pub fn to_ron(&self) -> Result<String, GraphSaveError> {
        Ok(ron::ser::to_string_pretty(self, PrettyConfig::default())?)
    }

    pub fn from_ron(text: &str) -> Result<Self, GraphLoadError> {
        Ok(ron::from_str(text)?)
    }
}

impl AnimationGraph {
    pub fn to_serial(&self) -> Result<AnimationGraphSerial, GraphSaveError> {
        AnimationGraphSerial::from_graph(self)
    }

    pub fn from_serial(
        serial: AnimationGraphSerial,
        registry: &NodeRegistry,
    ) -> Result<Self, GraphLoadError> {
        serial.into_graph(registry)
    }

    /// Compact MessagePack encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, GraphSaveError> {
        self.to_serial()?.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8], registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        AnimationGraphSerial::from_bytes(bytes)?.into_graph(registry)
    }

    pub fn to_ron(&self) -> Result<String, GraphSaveError> {
        self.to_serial()?.to_ron()
    }

    pub fn from_ron(text: &str, registry: &NodeRegistry) -> Result<Self, GraphLoadError> {
        AnimationGraphSerial::from_ron(text)?.into_graph(registry)
    }
}

fn endpoints_well_formed(endpoints: &[Endpoint], direction: Direction) -> bool {
    endpoints
        .iter()
        .all(|endpoint| endpoint.direction() == direction && endpoint.is_consistent())
}

fn corrupted(message: String) -> GraphLoadError {
    GraphLoadError::FileCorrupted(message)
}

#[cfg(test)]
mod test {
    use bevy_math::Vec2;

    use super::AnimationGraphSerial;
    use crate::{
        animation_graph::{AnimationGraph, Connection, SourceEndpoint, TargetEndpoint},
        edge_data::Value,
        errors::GraphLoadError,
        id::NodeId,
        registry::NodeRegistry,
        testing::{CountingNode, PoseSourceNode, test_context, translated_pose},
    };

    fn registry() -> NodeRegistry {
        let mut registry = NodeRegistry::new();
        registry
            .register::<CountingNode>()
            .register::<PoseSourceNode>();
        registry
    }

    fn sample_graph() -> AnimationGraph {
        let mut graph = AnimationGraph::new();
        let output = graph.root().unwrap();
        let source = graph.add_node_like("Source", PoseSourceNode::new(translated_pose(2, 1.)));
        let a = graph.add_node_like("A", CountingNode::new(2));
        let b = graph.add_node_like("B", CountingNode::new(1));
        graph.set_input_default(a, 1, 4.0_f32).unwrap();
        graph.connect_nodes(output, 0, source, 0).unwrap();
        graph.connect_nodes(b, 0, a, 0).unwrap();
        graph.extra.set_node_position(a, Vec2::new(10., -3.));
        graph
    }

    #[test]
    fn binary_round_trip() {
        let graph = sample_graph();
        let bytes = graph.to_bytes().unwrap();
        let loaded = AnimationGraph::from_bytes(&bytes, &registry()).unwrap();
        assert_eq!(loaded.to_serial().unwrap(), graph.to_serial().unwrap());
        assert_eq!(loaded.root(), graph.root());
    }

    #[test]
    fn ron_round_trip() {
        let graph = sample_graph();
        let text = graph.to_ron().unwrap();
        let loaded = AnimationGraph::from_ron(&text, &registry()).unwrap();
        assert_eq!(loaded.to_serial().unwrap(), graph.to_serial().unwrap());

        let a = loaded.find_node("A").unwrap();
        assert_eq!(loaded.extra.node_position(a), Vec2::new(10., -3.));
        assert_eq!(
            loaded.node(a).unwrap().inputs[1].default_value(),
            &Value::F32(4.)
        );
    }

    #[test]
    fn loaded_graph_evaluates_like_original() {
        let (mut ctx, _) = test_context(2);
        let mut loaded = AnimationGraph::from_bytes(&sample_graph().to_bytes().unwrap(), &registry())
            .unwrap();
        loaded.evaluate(0.1, &mut ctx).unwrap();
        assert_eq!(loaded.final_pose(), Some(&translated_pose(2, 1.)));
    }

    #[test]
    fn empty_root_round_trips_as_nil() {
        let mut graph = AnimationGraph::empty();
        graph.add_node_like("A", CountingNode::new(0));
        let serial = graph.to_serial().unwrap();
        assert!(serial.root.is_nil());
        let loaded = serial.into_graph(&registry()).unwrap();
        assert_eq!(loaded.root(), None);
    }

    fn assert_corrupted(serial: AnimationGraphSerial) {
        assert!(matches!(
            serial.into_graph(&registry()),
            Err(GraphLoadError::FileCorrupted(_))
        ));
    }

    #[test]
    fn unknown_node_type_is_corruption() {
        let mut serial = sample_graph().to_serial().unwrap();
        serial.nodes[1].type_tag = "mystery".into();
        assert_corrupted(serial);
    }

    #[test]
    fn wrong_endpoint_count_is_corruption() {
        let mut serial = sample_graph().to_serial().unwrap();
        let a = serial.nodes.iter_mut().find(|node| node.name == "A").unwrap();
        a.inputs.pop();
        assert_corrupted(serial);
    }

    #[test]
    fn wrong_endpoint_kind_is_corruption() {
        let mut serial = sample_graph().to_serial().unwrap();
        let source = serial
            .nodes
            .iter()
            .find(|node| node.name == "Source")
            .unwrap()
            .outputs[0]
            .clone();
        let a = serial.nodes.iter_mut().find(|node| node.name == "A").unwrap();
        a.outputs[0] = source;
        assert_corrupted(serial);
    }

    #[test]
    fn dangling_connection_is_corruption() {
        let mut serial = sample_graph().to_serial().unwrap();
        serial.connections.push(Connection::new(
            SourceEndpoint::new(NodeId::generate(), 0),
            TargetEndpoint::new(serial.nodes[2].id, 0),
        ));
        assert_corrupted(serial);
    }

    #[test]
    fn duplicate_target_is_corruption() {
        let mut serial = sample_graph().to_serial().unwrap();
        let duplicate = serial.connections[1];
        serial.connections.push(duplicate);
        assert_corrupted(serial);
    }

    #[test]
    fn dangling_root_is_corruption() {
        let mut serial = sample_graph().to_serial().unwrap();
        serial.root = NodeId::generate();
        assert_corrupted(serial);
    }

    #[test]
    fn truncated_bytes_fail_to_decode() {
        let bytes = sample_graph().to_bytes().unwrap();
        assert!(AnimationGraph::from_bytes(&bytes[..bytes.len() / 2], &registry()).is_err());
    }
}
