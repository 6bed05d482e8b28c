use serde::{Deserialize, Serialize};

use crate::id::NodeId;

/// An output endpoint of a node, addressed by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceEndpoint {
    pub node: NodeId,
    pub index: usize,
}

impl SourceEndpoint {
    pub fn new(node: NodeId, index: usize) -> Self {
        Self { node, index }
    }
}

/// An input endpoint of a node, addressed by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetEndpoint {
    pub node: NodeId,
    pub index: usize,
}

impl TargetEndpoint {
    pub fn new(node: NodeId, index: usize) -> Self {
        Self { node, index }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub source: SourceEndpoint,
    pub target: TargetEndpoint,
}

impl Connection {
    pub fn new(source: SourceEndpoint, target: TargetEndpoint) -> Self {
        Self { source, target }
    }
}
