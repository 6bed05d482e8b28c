pub use crate::{
    animation_graph::{
        AnimationGraph, Connection, Extra, SourceEndpoint, TargetEndpoint,
        serial::{AnimationGraphSerial, NodeSerial},
    },
    animation_node::{
        AnimationNode, NodeFlags, NodeLike, NodeType, OutputPoseNode, decode_state, encode_state,
    },
    context::{GraphContext, NodeContext, SpecContext},
    controller::{AnimationController, ClipId, NamedSkeleton, SampleRequest, Skeleton},
    edge_data::{
        Value, ValueKind,
        bone_mask::{BoneMask, BoneMaskType},
    },
    endpoint::{Direction, Endpoint},
    errors::{GraphError, GraphLoadError, GraphResult, GraphSaveError, GraphValidationError},
    id::NodeId,
    pose::{BonePose, Pose, PoseRef},
    registry::NodeRegistry,
    sync::{
        SyncStyle, SynchronizingGroup, SynchronizingGroups, TransitionPreferences,
        TransitionStatus, TransitionSyncData,
    },
};
