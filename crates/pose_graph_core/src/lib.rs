pub mod animation_graph;
pub mod animation_node;
pub mod context;
pub mod controller;
pub mod edge_data;
pub mod endpoint;
pub mod errors;
pub mod id;
pub mod pose;
pub mod prelude;
pub mod registry;
pub mod sync;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
