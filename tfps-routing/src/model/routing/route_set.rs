use super::Route;
use crate::model::graph::NodeId;
use serde::{Deserialize, Serialize};

/// ranked routes between one origin and destination. `paths[i]` costs
/// `costs[i]`, ordered by non-decreasing cost.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSet {
    pub paths: Vec<Vec<NodeId>>,
    pub costs: Vec<f64>,
}

impl RouteSet {
    /// the result for an unreachable destination
    pub fn empty() -> RouteSet {
        RouteSet {
            paths: vec![],
            costs: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// the cheapest route, if any
    pub fn best(&self) -> Option<Route> {
        self.routes().next()
    }

    pub fn routes(&self) -> impl Iterator<Item = Route> + '_ {
        self.paths
            .iter()
            .zip(self.costs.iter())
            .map(|(p, c)| Route::new(p.clone(), *c))
    }
}

impl From<Vec<Route>> for RouteSet {
    fn from(routes: Vec<Route>) -> Self {
        let (paths, costs) = routes.into_iter().map(|r| (r.nodes, r.cost)).unzip();
        RouteSet { paths, costs }
    }
}
