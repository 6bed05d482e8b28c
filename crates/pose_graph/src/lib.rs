//! # Pose Graph
//!
//! **Pose Graph** evaluates node graphs that produce skeletal poses. Nodes
//! sample clips, blend poses, layer additive animation and compute the
//! scalar parameters that drive them. The host application supplies the
//! bone math through an [`AnimationController`](prelude::AnimationController)
//! and a [`Skeleton`](prelude::Skeleton); the graph only decides what gets
//! sampled and how the results are combined.
//!
//! ## Graph files
//!
//! Graphs are authored as `*.animgraph.ron` documents and can be shipped as
//! compact MessagePack files. Both encode the same model: every node with its
//! type tag, id, name, editor position, endpoints and node specific state,
//! followed by the connections and the root node id. See [`io`].
//!
//! ## Playback
//!
//! An [`AnimationGraphPlayer`](player::AnimationGraphPlayer) owns a graph and
//! the [`GraphContext`](prelude::GraphContext) it is evaluated against:
//!
//! ```ignore
//! let mut player = AnimationGraphPlayer::new(context)
//!     .with_graph(load_graph("locomotion.animgraph.ron", &default_registry())?);
//!
//! // every frame
//! if let Some(pose) = player.evaluate(delta_seconds) {
//!     apply_pose(pose);
//! }
//! ```
//!
//! ## Custom nodes
//!
//! Implement [`NodeLike`](prelude::NodeLike) and
//! [`NodeType`](prelude::NodeType), then register the type on the
//! [`NodeRegistry`](prelude::NodeRegistry) used to load graphs.

pub mod io;
pub mod player;

pub use pose_graph_builtin_nodes as builtin_nodes;
pub use pose_graph_core as core;

use pose_graph_core::registry::NodeRegistry;

/// Registry knowing the output node and every builtin node.
pub fn default_registry() -> NodeRegistry {
    pose_graph_builtin_nodes::builtin_registry()
}

pub mod prelude {
    pub use super::{
        default_registry,
        io::{load_graph, save_graph},
        player::AnimationGraphPlayer,
    };
    pub use pose_graph_builtin_nodes::{
        additive_pose::AdditivePose,
        blend_node::BlendNode,
        blend_tree_2d::BlendTree2D,
        bone_mask_node::BoneMaskNode,
        bool::{ConstBool, NotBool},
        f32::{AddF32, ClampF32, ConstF32, MulF32, SelectF32},
        graph_node::GraphNode,
        pose_node::{PlayState, PoseNode},
        register_builtin_nodes,
        state_node::StateNode,
        vec2::{BuildVec2, ConstVec2},
    };
    pub use pose_graph_core::prelude::*;
}
