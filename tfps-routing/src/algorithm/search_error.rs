use crate::model::graph::GraphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid search argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    GraphError(#[from] GraphError),
    #[error("{0}")]
    InternalError(String),
}
