use super::{CostTable, GraphError, NodeId};
use itertools::Itertools;
use std::collections::HashMap;

/// an edge taken out of the graph along with everything needed to put it
/// back exactly where it was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetachedEdge {
    pub src: NodeId,
    pub dst: NodeId,
    /// index of `dst` in the adjacency list of `src` before removal
    pub position: usize,
    /// active cost at removal time, if the edge had one
    pub cost: Option<f64>,
}

/// directed road graph over intersection approaches along with the edge
/// costs of the currently active time slot.
///
/// the graph holds no time slot bookkeeping of its own. callers swap whole
/// cost tables in and out with [`RouteGraph::replace_costs`].
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RouteGraph {
    /// forward adjacency list. outgoing neighbors keep their insertion order.
    adj: HashMap<NodeId, Vec<NodeId>>,
    /// costs for the active time slot
    costs: CostTable,
}

impl RouteGraph {
    pub fn empty() -> RouteGraph {
        RouteGraph {
            adj: HashMap::new(),
            costs: CostTable::new(),
        }
    }

    /// registers a node with no neighbors. returns false if it was already present.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        if self.adj.contains_key(&node) {
            false
        } else {
            self.adj.insert(node, vec![]);
            true
        }
    }

    /// appends `dst` to the adjacency list of `src`. self loops and repeated
    /// edges are ignored. both endpoints become known nodes of the graph.
    /// costs are not touched.
    pub fn add_edge(&mut self, src: NodeId, dst: NodeId) -> bool {
        if src == dst {
            return false;
        }
        self.add_node(dst);
        let adjacencies = self.adj.entry(src).or_default();
        if adjacencies.contains(&dst) {
            false
        } else {
            adjacencies.push(dst);
            true
        }
    }

    /// removes `dst` from the adjacency list of `src` if present. removing an
    /// edge that does not exist is not an error.
    pub fn remove_edge(&mut self, src: &NodeId, dst: &NodeId) -> bool {
        match self.adj.get_mut(src) {
            Some(adjacencies) => match adjacencies.iter().position(|n| n == dst) {
                Some(idx) => {
                    adjacencies.remove(idx);
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    pub fn set_cost(&mut self, src: NodeId, dst: NodeId, cost: f64) -> Option<f64> {
        self.costs.insert(src, dst, cost)
    }

    /// active-slot cost of an edge, or None if the edge cannot be traversed
    pub fn get_cost(&self, src: &NodeId, dst: &NodeId) -> Option<f64> {
        self.costs.get(src, dst)
    }

    /// outgoing neighbors of `node` in insertion order. a node that was never
    /// added is an error, which is distinct from a known node with no neighbors.
    pub fn neighbors(&self, node: &NodeId) -> Result<&[NodeId], GraphError> {
        self.adj
            .get(node)
            .map(|v| v.as_slice())
            .ok_or(GraphError::UnknownNode(*node))
    }

    pub fn contains_node(&self, node: &NodeId) -> bool {
        self.adj.contains_key(node)
    }

    pub fn has_edge(&self, src: &NodeId, dst: &NodeId) -> bool {
        self.adj
            .get(src)
            .map(|adjacencies| adjacencies.contains(dst))
            .unwrap_or_default()
    }

    pub fn n_nodes(&self) -> usize {
        self.adj.len()
    }

    pub fn n_edges(&self) -> usize {
        self.adj.values().map(|v| v.len()).sum()
    }

    /// all nodes, sorted by id
    pub fn nodes(&self) -> Vec<NodeId> {
        self.adj.keys().copied().sorted().collect_vec()
    }

    /// all (src, dst) edges, sorted by id for deterministic iteration
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.adj
            .iter()
            .flat_map(|(src, adjacencies)| adjacencies.iter().map(|dst| (*src, *dst)))
            .sorted()
            .collect_vec()
    }

    pub fn costs(&self) -> &CostTable {
        &self.costs
    }

    /// installs the cost table of another time slot, returning the previous one
    pub fn replace_costs(&mut self, costs: CostTable) -> CostTable {
        std::mem::replace(&mut self.costs, costs)
    }

    /// removes an edge and its active cost, recording what is needed to
    /// restore it. returns None if the edge does not exist.
    pub fn detach_edge(&mut self, src: &NodeId, dst: &NodeId) -> Option<DetachedEdge> {
        let adjacencies = self.adj.get_mut(src)?;
        let position = adjacencies.iter().position(|n| n == dst)?;
        adjacencies.remove(position);
        let cost = self.costs.remove(src, dst);
        Some(DetachedEdge {
            src: *src,
            dst: *dst,
            position,
            cost,
        })
    }

    /// re-inserts a detached edge at its recorded adjacency position with its
    /// recorded cost. edges detached together must be restored in reverse
    /// order of detachment for positions to line up.
    pub fn restore_edge(&mut self, edge: DetachedEdge) -> Result<(), GraphError> {
        let DetachedEdge {
            src,
            dst,
            position,
            cost,
        } = edge;
        let adjacencies = self.adj.get_mut(&src).ok_or_else(|| {
            GraphError::RestorationError(src, dst, String::from("source node no longer in graph"))
        })?;
        if adjacencies.contains(&dst) {
            return Err(GraphError::RestorationError(
                src,
                dst,
                String::from("edge is already present"),
            ));
        }
        if position > adjacencies.len() {
            return Err(GraphError::RestorationError(
                src,
                dst,
                format!(
                    "position {position} exceeds adjacency list length {}",
                    adjacencies.len()
                ),
            ));
        }
        adjacencies.insert(position, dst);
        if let Some(c) = cost {
            if self.costs.insert(src, dst, c).is_some() {
                return Err(GraphError::RestorationError(
                    src,
                    dst,
                    String::from("cost was re-assigned while the edge was detached"),
                ));
            }
        }
        Ok(())
    }

    /// sum of active costs along consecutive pairs of `nodes`. None if any
    /// pair is not an edge or has no cost.
    pub fn route_cost(&self, nodes: &[NodeId]) -> Option<f64> {
        nodes.iter().tuple_windows().try_fold(0.0, |acc, (src, dst)| {
            if self.has_edge(src, dst) {
                self.get_cost(src, dst).map(|c| acc + c)
            } else {
                None
            }
        })
    }
}
