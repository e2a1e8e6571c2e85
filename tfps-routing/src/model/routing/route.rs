use crate::model::graph::NodeId;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt::Display};

/// a node sequence from origin to destination with its total cost for
/// the time slot it was computed in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub nodes: Vec<NodeId>,
    pub cost: f64,
}

impl Route {
    pub fn new(nodes: Vec<NodeId>, cost: f64) -> Route {
        Route { nodes, cost }
    }

    /// the zero-cost route that starts and ends at `node`
    pub fn trivial(node: NodeId) -> Route {
        Route {
            nodes: vec![node],
            cost: 0.0,
        }
    }

    pub fn origin(&self) -> Option<&NodeId> {
        self.nodes.first()
    }

    pub fn destination(&self) -> Option<&NodeId> {
        self.nodes.last()
    }

    /// number of nodes along the route
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_loopless(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        self.nodes.iter().all(|n| seen.insert(*n))
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self
            .nodes
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        write!(f, "{path} ({:.2})", self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::Route;
    use crate::model::graph::NodeId;

    #[test]
    fn detects_loops() {
        let a = NodeId::new(1, 1);
        let b = NodeId::new(2, 1);
        assert!(Route::new(vec![a, b], 1.0).is_loopless());
        assert!(!Route::new(vec![a, b, a], 2.0).is_loopless());
        assert!(Route::trivial(a).is_loopless());
    }

    #[test]
    fn display() {
        let route = Route::new(vec![NodeId::new(970, 1), NodeId::new(2000, 3)], 12.345);
        assert_eq!(route.to_string(), "970-1 -> 2000-3 (12.35)");
    }
}
