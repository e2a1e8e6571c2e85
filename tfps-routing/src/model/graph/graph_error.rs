use super::NodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("attempting to get adjacencies for node '{0}' not in graph")]
    UnknownNode(NodeId),
    #[error("failure restoring edge '{0}' -> '{1}': {2}")]
    RestorationError(NodeId, NodeId, String),
    #[error("{0}")]
    InternalError(String),
}
