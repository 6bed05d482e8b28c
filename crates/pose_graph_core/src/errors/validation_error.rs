use thiserror::Error;

use crate::{
    animation_graph::{SourceEndpoint, TargetEndpoint},
    id::NodeId,
};

#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphValidationError {
    #[error("{0:?} and {1:?} have different kinds but are connected.")]
    InconsistentEndpointKinds(SourceEndpoint, TargetEndpoint),
    #[error("Connection {0:?} -> {1:?} references a missing node or endpoint.")]
    DanglingConnection(SourceEndpoint, TargetEndpoint),
    #[error("The root {0} is not part of the graph.")]
    DanglingRoot(NodeId),
    #[error("Node {0} is part of a cycle.")]
    Cycle(NodeId),
}
