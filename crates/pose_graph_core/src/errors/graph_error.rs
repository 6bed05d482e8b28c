use thiserror::Error;

use crate::{
    animation_graph::{SourceEndpoint, TargetEndpoint},
    edge_data::ValueKind,
    endpoint::Direction,
    id::NodeId,
    sync::SyncStyle,
};

/// Possible errors that can be produced by graph evaluation or graph editing
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("Tried to convert to incorrect data type: expected {0}, got {1}")]
    MismatchedDataType(String, String),
    #[error("Cannot connect {output:?} ({output_kind:?}) to {input:?} ({input_kind:?})")]
    EndpointTypeMismatch {
        output: SourceEndpoint,
        output_kind: ValueKind,
        input: TargetEndpoint,
        input_kind: ValueKind,
    },
    #[error("Node {0} is not part of the graph")]
    MissingNode(NodeId),
    #[error("Node {node} has no {direction:?} endpoint at index {index}")]
    MissingEndpoint {
        node: NodeId,
        direction: Direction,
        index: usize,
    },
    #[error("Cycle detected while evaluating node {0}")]
    CycleDetected(NodeId),
    #[error("Node {0} cannot be removed")]
    NodeNotRemovable(NodeId),
    #[error("Node {0} cannot be renamed")]
    NodeNotRenamable(NodeId),
    #[error("Synchronization style {0:?} is not supported")]
    UnsupportedSyncStyle(SyncStyle),
    #[error("Node {0} is not a member of the synchronizing group")]
    NotAGroupMember(NodeId),
    #[error("No synchronizing group named {0:?}")]
    MissingSyncGroup(String),
    #[error("Node {0} does not have the expected node type")]
    UnexpectedNodeType(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;
