use bevy_platform::collections::HashMap;

use crate::{
    animation_node::{NodeLike, NodeType, OutputPoseNode},
    errors::GraphLoadError,
};

/// Rebuilds a node from the state written by [`NodeLike::save_state`].
pub type NodeConstructor = fn(&[u8], &NodeRegistry) -> Result<Box<dyn NodeLike>, GraphLoadError>;

/// Factory of node types keyed by their type tag, used when loading graphs.
#[derive(Clone)]
pub struct NodeRegistry {
    constructors: HashMap<String, NodeConstructor>,
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeRegistry {
    /// Registry that only knows the output node.
    pub fn new() -> Self {
        let mut registry = Self {
            constructors: HashMap::default(),
        };
        registry.register::<OutputPoseNode>();
        registry
    }

    pub fn register<T: NodeType>(&mut self) -> &mut Self {
        self.register_constructor(T::TYPE_TAG, construct::<T>)
    }

    pub fn register_constructor(
        &mut self,
        type_tag: impl Into<String>,
        constructor: NodeConstructor,
    ) -> &mut Self {
        self.constructors.insert(type_tag.into(), constructor);
        self
    }

    pub fn contains(&self, type_tag: &str) -> bool {
        self.constructors.contains_key(type_tag)
    }

    pub fn type_tags(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    pub fn construct(&self, type_tag: &str, state: &[u8]) -> Result<Box<dyn NodeLike>, GraphLoadError> {
        let constructor = self.constructors.get(type_tag).ok_or_else(|| {
            GraphLoadError::FileCorrupted(format!("unknown node type `{type_tag}`"))
        })?;
        constructor(state, self)
    }
}

fn construct<T: NodeType>(
    state: &[u8],
    registry: &NodeRegistry,
) -> Result<Box<dyn NodeLike>, GraphLoadError> {
    Ok(Box::new(T::load_state(state, registry)?))
}

impl std::fmt::Debug for NodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("type_tags", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}
