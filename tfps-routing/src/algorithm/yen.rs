use super::{dijkstra, SearchError};
use crate::model::{
    graph::{DetachedEdge, NodeId, RouteGraph},
    routing::Route,
};
use ordered_float::OrderedFloat;
use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashSet},
};

/// a deviation path waiting to be accepted. ordered by cost, then by node
/// sequence so that equal-cost candidates pop deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    cost: OrderedFloat<f64>,
    nodes: Vec<NodeId>,
}

/// finds up to `k` loopless routes from `origin` to `destination`, cheapest
/// first, using Yen's algorithm.
///
/// each spur probe temporarily detaches edges from `graph`; every probe
/// restores them before the next one runs, so on return the graph is
/// exactly as it was on entry, including when an error is returned.
///
/// # Arguments
///
/// * `graph`       - graph to search, with the costs of one time slot installed
/// * `origin`      - start of every route
/// * `destination` - end of every route
/// * `k`           - maximum number of routes, at least 1
///
/// # Returns
///
/// Routes in non-decreasing cost order without duplicates. Empty if the
/// destination is unreachable. Fewer than `k` when the graph does not admit
/// `k` distinct loopless routes.
pub fn k_shortest_paths(
    graph: &mut RouteGraph,
    origin: &NodeId,
    destination: &NodeId,
    k: usize,
) -> Result<Vec<Route>, SearchError> {
    if k == 0 {
        return Err(SearchError::InvalidArgument(String::from(
            "number of routes k must be at least 1",
        )));
    }
    #[cfg(debug_assertions)]
    let snapshot = graph.clone();

    let result = run(graph, origin, destination, k);

    #[cfg(debug_assertions)]
    debug_assert!(
        *graph == snapshot,
        "graph was not restored after k shortest paths search from '{origin}' to '{destination}'"
    );
    result
}

fn run(
    graph: &mut RouteGraph,
    origin: &NodeId,
    destination: &NodeId,
    k: usize,
) -> Result<Vec<Route>, SearchError> {
    let first = match dijkstra::shortest_path(graph, origin, destination, None)? {
        Some(route) => route,
        None => return Ok(vec![]),
    };
    let mut accepted: Vec<Route> = vec![first];
    let mut candidates: BinaryHeap<Reverse<Candidate>> = BinaryHeap::new();
    let mut pooled: HashSet<Vec<NodeId>> = HashSet::new();

    while accepted.len() < k {
        let previous = accepted
            .last()
            .map(|r| r.nodes.clone())
            .unwrap_or_default();
        for j in 0..previous.len().saturating_sub(1) {
            let spur = previous[j];
            let root = &previous[..=j];
            let Some(spur_route) = probe(graph, &accepted, root, destination)? else {
                continue;
            };
            let mut nodes = previous[..j].to_vec();
            nodes.extend(spur_route.nodes);
            let cost = graph.route_cost(&nodes).ok_or_else(|| {
                SearchError::InternalError(format!(
                    "deviation at spur node '{spur}' has an edge without a cost"
                ))
            })?;
            if accepted.iter().any(|r| r.nodes == nodes) || !pooled.insert(nodes.clone()) {
                continue;
            }
            candidates.push(Reverse(Candidate {
                cost: OrderedFloat(cost),
                nodes,
            }));
        }

        let next = std::iter::from_fn(|| candidates.pop().map(|Reverse(c)| c))
            .find(|c| !accepted.iter().any(|r| r.nodes == c.nodes));
        match next {
            Some(Candidate { cost, nodes }) => {
                debug_assert!(Route::new(nodes.clone(), cost.0).is_loopless());
                accepted.push(Route::new(nodes, cost.0));
            }
            None => {
                log::debug!(
                    "found {} of {k} routes from '{origin}' to '{destination}' before running out of deviations",
                    accepted.len()
                );
                break;
            }
        }
    }
    Ok(accepted)
}

/// searches for the cheapest spur path that leaves `root` by an edge none of
/// the accepted routes sharing `root` already uses. the root nodes before
/// the spur node are blocked so the joined route stays loopless.
fn probe(
    graph: &mut RouteGraph,
    accepted: &[Route],
    root: &[NodeId],
    destination: &NodeId,
) -> Result<Option<Route>, SearchError> {
    let j = root.len() - 1;
    let spur = root[j];
    let mut detached: Vec<DetachedEdge> = vec![];
    for route in accepted.iter() {
        if route.nodes.len() > j + 1 && route.nodes[..=j] == *root {
            // an edge shared by several accepted routes is only detached once
            if let Some(edge) = graph.detach_edge(&route.nodes[j], &route.nodes[j + 1]) {
                detached.push(edge);
            }
        }
    }
    let blocked: HashSet<NodeId> = root[..j].iter().copied().collect();
    let found = dijkstra::shortest_path(graph, &spur, destination, Some(&blocked));

    // restore before anything from this probe can propagate
    for edge in detached.into_iter().rev() {
        graph.restore_edge(edge)?;
    }
    Ok(found?)
}
