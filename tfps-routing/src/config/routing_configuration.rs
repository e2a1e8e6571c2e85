use crate::{app::RoutingError, model::graph::GraphBuildOptions, model::provider::DEFAULT_SPEED_KPH};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// defines the inputs and behaviors of a routing session
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct RoutingConfiguration {
    /// CSV with header `site,approach,name,latitude,longitude`
    pub sites_file: String,
    /// CSV with header `from,to`
    pub connections_file: String,
    /// headerless `time,origin,destination,cost` cache. when absent or
    /// missing on disk, costs are estimated from site positions instead.
    pub travel_time_file: Option<String>,
    pub bidirectional_connections: bool,
    pub internal_connections: bool,
    /// travel speed for the distance-based estimate
    pub speed_kph: f64,
    pub parallelize: bool,
    pub default_k: usize,
}

impl Default for RoutingConfiguration {
    fn default() -> Self {
        Self {
            sites_file: String::from("data/sites.csv"),
            connections_file: String::from("data/connections.csv"),
            travel_time_file: None,
            bidirectional_connections: true,
            internal_connections: true,
            speed_kph: DEFAULT_SPEED_KPH,
            parallelize: true,
            default_k: 5,
        }
    }
}

impl RoutingConfiguration {
    pub fn graph_build_options(&self) -> GraphBuildOptions {
        GraphBuildOptions {
            bidirectional: self.bidirectional_connections,
            internal_connections: self.internal_connections,
        }
    }

    /// the configured travel time cache, if it exists on disk
    pub fn existing_travel_time_file(&self) -> Option<&Path> {
        self.travel_time_file
            .as_deref()
            .map(Path::new)
            .filter(|p| p.is_file())
    }
}

impl TryFrom<&String> for RoutingConfiguration {
    type Error = RoutingError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let conf: RoutingConfiguration = if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                RoutingError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                RoutingError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                RoutingError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                RoutingError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else {
            return Err(RoutingError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )));
        };
        if conf.default_k == 0 {
            return Err(RoutingError::ConfigurationError(format!(
                "default_k in {f} must be at least 1"
            )));
        }
        Ok(conf)
    }
}
