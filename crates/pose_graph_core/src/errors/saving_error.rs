use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GraphSaveError {
    #[error("Could not write graph: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not encode MessagePack: {0}")]
    RmpEncodeError(#[from] rmp_serde::encode::Error),
    #[error("Could not write RON: {0}")]
    RonError(#[from] ron::Error),
}
