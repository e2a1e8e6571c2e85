use crate::model::graph::{NodeId, SiteId, TimeSlot};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("site '{0}' has no known approaches")]
    UnknownSite(SiteId),
    #[error("no location data for approach '{0}'")]
    UnknownLocation(NodeId),
    #[error("no travel cost for '{0}' -> '{1}' at {2}")]
    MissingCost(NodeId, NodeId, TimeSlot),
    #[error("travel cost {3} for '{0}' -> '{1}' at {2} must be finite and non-negative")]
    InvalidCost(NodeId, NodeId, TimeSlot, f64),
    #[error("invalid provider parameter: {0}")]
    InvalidParameter(String),
    #[error("failure reading {0}: {1}")]
    CsvReadError(String, csv::Error),
    #[error("failure writing {0}: {1}")]
    CsvWriteError(String, csv::Error),
    #[error("{0}")]
    InternalError(String),
}
