mod output_pose;

pub use output_pose::OutputPoseNode;

use std::{any::Any, fmt::Debug};

use bevy_reflect::{Reflect, std_traits::ReflectDefault};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    context::{NodeContext, SpecContext},
    endpoint::{Direction, Endpoint},
    errors::{GraphLoadError, GraphResult, GraphSaveError},
    id::NodeId,
    registry::NodeRegistry,
};

/// Behaviour of a node.
///
/// A node declares its fixed endpoints in [`NodeLike::spec`] and computes its
/// outputs from its inputs in [`NodeLike::evaluate`]. Endpoint values live in
/// the owning [`AnimationNode`], not in the implementor.
pub trait NodeLike: NodeLikeClone + NodeLikeAny + Send + Sync + Debug + 'static {
    fn evaluate(&mut self, ctx: &mut NodeContext) -> GraphResult<()>;

    fn spec(&self, ctx: SpecContext);

    /// The name of this node.
    fn display_name(&self) -> String;

    /// Stable tag identifying the node type in serialized graphs.
    fn type_tag(&self) -> &'static str;

    fn flags(&self) -> NodeFlags {
        NodeFlags::default()
    }

    #[allow(unused_variables)]
    fn on_connect(&mut self, direction: Direction, index: usize) {}

    #[allow(unused_variables)]
    fn on_disconnect(&mut self, direction: Direction, index: usize) {}

    /// Node specific state, restored by the constructor registered for
    /// [`NodeLike::type_tag`].
    fn save_state(&self) -> Result<Vec<u8>, GraphSaveError>;

    /// Whether endpoints read from a serialized graph fit this node. By
    /// default they must match the declared spec in count and kinds.
    fn validate_endpoints(&self, inputs: &[Endpoint], outputs: &[Endpoint]) -> bool {
        let (spec_inputs, spec_outputs) = spec_endpoints(self);
        endpoints_match(&spec_inputs, inputs) && endpoints_match(&spec_outputs, outputs)
    }
}

/// Node types that can be registered in a [`NodeRegistry`].
pub trait NodeType: NodeLike + Sized {
    const TYPE_TAG: &'static str;

    fn load_state(state: &[u8], registry: &NodeRegistry) -> Result<Self, GraphLoadError>;
}

pub trait NodeLikeClone {
    fn clone_node_like(&self) -> Box<dyn NodeLike>;
}

impl<T> NodeLikeClone for T
where
    T: 'static + NodeLike + Clone,
{
    fn clone_node_like(&self) -> Box<dyn NodeLike> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn NodeLike> {
    fn clone(&self) -> Self {
        self.clone_node_like()
    }
}

pub trait NodeLikeAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: NodeLike> NodeLikeAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Reflect, Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[reflect(Default)]
pub struct NodeFlags {
    /// Node holds a nested graph that editors can open.
    pub can_be_open: bool,
    pub is_renamable: bool,
    pub is_removable: bool,
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self {
            can_be_open: false,
            is_renamable: true,
            is_removable: true,
        }
    }
}

/// Encodes node state for [`NodeLike::save_state`].
pub fn encode_state<T: Serialize + ?Sized>(state: &T) -> Result<Vec<u8>, GraphSaveError> {
    Ok(rmp_serde::to_vec_named(state)?)
}

/// Decodes node state written by [`encode_state`].
pub fn decode_state<T: DeserializeOwned>(state: &[u8]) -> Result<T, GraphLoadError> {
    Ok(rmp_serde::from_slice(state)?)
}

fn spec_endpoints<N: NodeLike + ?Sized>(node: &N) -> (Vec<Endpoint>, Vec<Endpoint>) {
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    node.spec(SpecContext::new(&mut inputs, &mut outputs));
    (inputs, outputs)
}

fn endpoints_match(expected: &[Endpoint], actual: &[Endpoint]) -> bool {
    expected.len() == actual.len()
        && expected
            .iter()
            .zip(actual)
            .all(|(e, a)| e.kind() == a.kind() && e.direction() == a.direction())
}

/// A node owned by a graph: identity, endpoints and behaviour.
#[derive(Debug, Clone)]
pub struct AnimationNode {
    pub id: NodeId,
    pub name: String,
    pub inputs: Vec<Endpoint>,
    pub outputs: Vec<Endpoint>,
    pub inner: Box<dyn NodeLike>,
}

impl AnimationNode {
    /// Creates a node with a fresh id and the endpoints declared by `inner`.
    #[must_use]
    pub fn new(name: impl Into<String>, inner: impl NodeLike) -> Self {
        Self::from_boxed(NodeId::generate(), name, Box::new(inner))
    }

    pub fn from_boxed(id: NodeId, name: impl Into<String>, inner: Box<dyn NodeLike>) -> Self {
        let (inputs, outputs) = spec_endpoints(inner.as_ref());
        Self {
            id,
            name: name.into(),
            inputs,
            outputs,
            inner,
        }
    }

    pub fn flags(&self) -> NodeFlags {
        self.inner.flags()
    }

    pub fn endpoints(&self, direction: Direction) -> &[Endpoint] {
        match direction {
            Direction::Input => &self.inputs,
            Direction::Output => &self.outputs,
        }
    }

    pub fn endpoints_mut(&mut self, direction: Direction) -> &mut Vec<Endpoint> {
        match direction {
            Direction::Input => &mut self.inputs,
            Direction::Output => &mut self.outputs,
        }
    }

    pub fn endpoint(&self, direction: Direction, index: usize) -> Option<&Endpoint> {
        self.endpoints(direction).get(index)
    }

    /// Index of the first endpoint with the given name.
    pub fn endpoint_index(&self, direction: Direction, name: &str) -> Option<usize> {
        self.endpoints(direction)
            .iter()
            .position(|endpoint| endpoint.name() == name)
    }

    pub fn inner_as<T: NodeLike>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }

    pub fn inner_as_mut<T: NodeLike>(&mut self) -> Option<&mut T> {
        self.inner.as_any_mut().downcast_mut::<T>()
    }
}
