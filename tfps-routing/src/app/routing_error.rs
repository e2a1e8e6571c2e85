use crate::{
    algorithm::SearchError,
    model::graph::{GraphError, NodeId},
    model::provider::ProviderError,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("no approach data for location '{0}'")]
    UnknownLocation(NodeId),
    #[error("invalid time of day: {0}")]
    InvalidTime(String),
    #[error("invalid routing argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("failure reading {0}: {1}")]
    CsvError(String, csv::Error),
    #[error("failure writing {0}: {1}")]
    IoError(String, std::io::Error),
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
}
