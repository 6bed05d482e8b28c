use thiserror::Error;

use super::GraphError;

/// Possible errors that can be produced while loading a serialized graph
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GraphLoadError {
    /// An [IO](std::io) Error
    #[error("Could not read graph: {0}")]
    Io(#[from] std::io::Error),
    /// A [RON](ron) Error
    #[error("Could not parse RON: {0}")]
    RonSpannedError(#[from] ron::error::SpannedError),
    #[error("Could not decode MessagePack: {0}")]
    RmpDecodeError(#[from] rmp_serde::decode::Error),
    #[error("Serialized graph is corrupted: {0}")]
    FileCorrupted(String),
    #[error("Graph error while rebuilding: {0}")]
    Graph(#[from] GraphError),
}
