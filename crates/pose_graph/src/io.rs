//! Reading and writing graph files.
//!
//! Files ending in `.ron` (such as `*.animgraph.ron`) hold the RON form of a
//! graph, anything else is read and written as MessagePack.

use std::{fs, path::Path};

use bevy_log::{debug, warn};
use pose_graph_core::{
    animation_graph::AnimationGraph,
    errors::{GraphLoadError, GraphSaveError},
    registry::NodeRegistry,
};

/// Extension of RON graph documents.
pub const RON_EXTENSION: &str = "animgraph.ron";

fn is_ron(path: &Path) -> bool {
    path.extension().is_some_and(|extension| extension == "ron")
}

/// Loads a graph, constructing its nodes through `registry`.
///
/// Graphs that fail static validation are still returned; the problem is
/// logged and evaluation reports it again if it is reached.
pub fn load_graph(
    path: impl AsRef<Path>,
    registry: &NodeRegistry,
) -> Result<AnimationGraph, GraphLoadError> {
    let path = path.as_ref();
    let graph = if is_ron(path) {
        AnimationGraph::from_ron(&fs::read_to_string(path)?, registry)?
    } else {
        AnimationGraph::from_bytes(&fs::read(path)?, registry)?
    };

    if let Err(error) = graph.validate_edges() {
        warn!("Animation graph {} failed validation: {error}", path.display());
    }
    debug!("Loaded animation graph {}", path.display());

    Ok(graph)
}

pub fn save_graph(graph: &AnimationGraph, path: impl AsRef<Path>) -> Result<(), GraphSaveError> {
    let path = path.as_ref();
    if is_ron(path) {
        fs::write(path, graph.to_ron()?)?;
    } else {
        fs::write(path, graph.to_bytes()?)?;
    }
    debug!("Saved animation graph {}", path.display());
    Ok(())
}
