//! small graphs shared by the search tests
use crate::model::{
    graph::{NodeId, RouteGraph},
    routing::Route,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;

pub const A: NodeId = NodeId::new(1, 1);
pub const B: NodeId = NodeId::new(2, 1);
pub const C: NodeId = NodeId::new(3, 1);
pub const D: NodeId = NodeId::new(4, 1);

pub fn graph_with(edges: &[(NodeId, NodeId, f64)]) -> RouteGraph {
    let mut graph = RouteGraph::empty();
    for (src, dst, cost) in edges {
        graph.add_edge(*src, *dst);
        graph.set_cost(*src, *dst, *cost);
    }
    graph
}

/// A->B(1), A->C(4), B->C(1), B->D(5), C->D(1)
pub fn abcd_graph() -> RouteGraph {
    graph_with(&[
        (A, B, 1.0),
        (A, C, 4.0),
        (B, C, 1.0),
        (B, D, 5.0),
        (C, D, 1.0),
    ])
}

/// seeded random digraph with integer-valued costs so that sums are exact
pub fn random_graph(seed: u64, n_nodes: u32, edge_probability: f64) -> RouteGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = RouteGraph::empty();
    for i in 0..n_nodes {
        graph.add_node(NodeId::new(i, 1));
    }
    for i in 0..n_nodes {
        for j in 0..n_nodes {
            if i != j && rng.random_bool(edge_probability) {
                let (src, dst) = (NodeId::new(i, 1), NodeId::new(j, 1));
                graph.add_edge(src, dst);
                graph.set_cost(src, dst, rng.random_range(1..10) as f64);
            }
        }
    }
    graph
}

/// every loopless path from origin to destination, by exhaustive search
pub fn all_loopless_paths(graph: &RouteGraph, origin: &NodeId, destination: &NodeId) -> Vec<Route> {
    let mut found = vec![];
    let mut stack = vec![*origin];
    let mut on_path = HashSet::from([*origin]);
    extend(graph, destination, &mut stack, &mut on_path, &mut found);
    found
}

fn extend(
    graph: &RouteGraph,
    destination: &NodeId,
    stack: &mut Vec<NodeId>,
    on_path: &mut HashSet<NodeId>,
    found: &mut Vec<Route>,
) {
    let Some(current) = stack.last().copied() else {
        return;
    };
    if current == *destination {
        if let Some(cost) = graph.route_cost(stack.as_slice()) {
            found.push(Route::new(stack.clone(), cost));
        }
        return;
    }
    let neighbors = graph.neighbors(&current).map(|n| n.to_vec()).unwrap_or_default();
    for next in neighbors {
        if on_path.insert(next) {
            stack.push(next);
            extend(graph, destination, stack, on_path, found);
            stack.pop();
            on_path.remove(&next);
        }
    }
}
