pub mod additive_pose;
pub mod blend_node;
pub mod blend_tree_2d;
pub mod bone_mask_node;
pub mod bool;
pub mod f32;
pub mod graph_node;
pub mod pose_node;
pub mod state_node;
pub mod vec2;

use pose_graph_core::registry::NodeRegistry;

/// Registers every node type of this crate.
pub fn register_builtin_nodes(registry: &mut NodeRegistry) -> &mut NodeRegistry {
    registry
        .register::<pose_node::PoseNode>()
        .register::<blend_node::BlendNode>()
        .register::<blend_tree_2d::BlendTree2D>()
        .register::<additive_pose::AdditivePose>()
        .register::<bone_mask_node::BoneMaskNode>()
        .register::<graph_node::GraphNode>()
        .register::<state_node::StateNode>()
        .register::<f32::ConstF32>()
        .register::<f32::AddF32>()
        .register::<f32::MulF32>()
        .register::<f32::ClampF32>()
        .register::<f32::SelectF32>()
        .register::<bool::ConstBool>()
        .register::<bool::NotBool>()
        .register::<vec2::ConstVec2>()
        .register::<vec2::BuildVec2>()
}

/// Registry with the output node and every builtin node.
pub fn builtin_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();
    register_builtin_nodes(&mut registry);
    registry
}
