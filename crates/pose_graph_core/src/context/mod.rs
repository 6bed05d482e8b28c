mod graph_context;
mod node_context;
mod spec_context;

pub use graph_context::*;
pub use node_context::*;
pub use spec_context::*;
