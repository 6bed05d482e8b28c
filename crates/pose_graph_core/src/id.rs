use pose_graph_proc_macros::UuidWrapper;
use uuid::Uuid;

/// Unique identifier of a node within its graph.
///
/// The nil id is reserved: serialized graphs use it to mean "no root".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, UuidWrapper)]
pub struct NodeId(#[uuid] pub Uuid);
