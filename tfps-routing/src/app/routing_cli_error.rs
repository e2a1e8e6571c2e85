use super::RoutingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutingCliError {
    #[error("invalid command line argument: {0}")]
    ArgumentError(String),
    #[error("routing failed: {source}")]
    RoutingError {
        #[from]
        source: RoutingError,
    },
    #[error("failure writing output: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure encoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
}
