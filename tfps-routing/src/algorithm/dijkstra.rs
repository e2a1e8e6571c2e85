use crate::model::{
    graph::{GraphError, NodeId, RouteGraph},
    routing::Route,
};
use ordered_float::OrderedFloat;
use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap, HashSet},
};

/// label-setting shortest path search from `origin` to `destination` over
/// the active-slot costs of `graph`.
///
/// edges without a cost are impassable. nodes in `blocked` are never
/// entered. among frontier nodes with equal tentative cost, the smallest
/// [`NodeId`] is settled first, so results are reproducible for a given graph.
///
/// # Arguments
///
/// * `graph`       - graph to search, with the costs of one time slot installed
/// * `origin`      - start of the route
/// * `destination` - end of the route
/// * `blocked`     - nodes the route may not pass through, if any
///
/// # Returns
///
/// The cheapest route, `None` if the destination is unreachable, or an error
/// if either endpoint is not in the graph.
pub fn shortest_path(
    graph: &RouteGraph,
    origin: &NodeId,
    destination: &NodeId,
    blocked: Option<&HashSet<NodeId>>,
) -> Result<Option<Route>, GraphError> {
    if !graph.contains_node(origin) {
        return Err(GraphError::UnknownNode(*origin));
    }
    if !graph.contains_node(destination) {
        return Err(GraphError::UnknownNode(*destination));
    }
    if origin == destination {
        return Ok(Some(Route::trivial(*origin)));
    }

    // node -> (predecessor, cumulative cost)
    let mut labels: HashMap<NodeId, (Option<NodeId>, f64)> = HashMap::from([(*origin, (None, 0.0))]);
    let mut settled: HashSet<NodeId> = HashSet::new();
    let mut frontier: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeId)>> = BinaryHeap::new();
    frontier.push(Reverse((OrderedFloat(0.0), *origin)));

    while let Some(Reverse((OrderedFloat(cost), node))) = frontier.pop() {
        // stale entries remain in the heap after a label improves
        if !settled.insert(node) {
            continue;
        }
        if node == *destination {
            let nodes = backtrack(&labels, origin, destination)?;
            return Ok(Some(Route::new(nodes, cost)));
        }
        for next in graph.neighbors(&node)? {
            if settled.contains(next) || blocked.is_some_and(|b| b.contains(next)) {
                continue;
            }
            let Some(edge_cost) = graph.get_cost(&node, next) else {
                continue;
            };
            let next_cost = cost + edge_cost;
            let improves = match labels.get(next) {
                Some((_, best)) => next_cost < *best,
                None => true,
            };
            if improves {
                labels.insert(*next, (Some(node), next_cost));
                frontier.push(Reverse((OrderedFloat(next_cost), *next)));
            }
        }
    }

    Ok(None)
}

/// walks predecessor links from the destination back to the origin
fn backtrack(
    labels: &HashMap<NodeId, (Option<NodeId>, f64)>,
    origin: &NodeId,
    destination: &NodeId,
) -> Result<Vec<NodeId>, GraphError> {
    let mut nodes = vec![*destination];
    let mut current = *destination;
    while current != *origin {
        let (predecessor, _) = labels.get(&current).ok_or_else(|| {
            GraphError::InternalError(format!("search label missing for settled node '{current}'"))
        })?;
        current = predecessor.ok_or_else(|| {
            GraphError::InternalError(format!(
                "node '{current}' has no predecessor on the way back to '{origin}'"
            ))
        })?;
        if nodes.len() > labels.len() {
            return Err(GraphError::InternalError(String::from(
                "predecessor links contain a cycle",
            )));
        }
        nodes.push(current);
    }
    nodes.reverse();
    Ok(nodes)
}
