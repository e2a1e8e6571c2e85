use super::{Connection, NodeId, RouteGraph};
use crate::model::provider::{LocationResolver, ProviderError};
use serde::{Deserialize, Serialize};

/// controls how persisted road connections expand into graph edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphBuildOptions {
    /// also add the reverse of every connection and of every turning edge
    pub bidirectional: bool,
    /// connect each connection endpoint with the other approaches of its site
    pub internal_connections: bool,
}

impl Default for GraphBuildOptions {
    fn default() -> Self {
        Self {
            bidirectional: true,
            internal_connections: true,
        }
    }
}

/// builds the road graph from the persisted connection list.
///
/// each connection `a -> b` adds the edge itself plus, depending on the
/// options, the turning edges between `a` and the other approaches at its
/// site, the reverse edge `b -> a`, and the turning edges at `b`'s site.
/// fails if an endpoint's site is unknown to the resolver while turning
/// edges are requested.
pub fn build_graph(
    connections: &[Connection],
    resolver: &dyn LocationResolver,
    options: &GraphBuildOptions,
) -> Result<RouteGraph, ProviderError> {
    let mut graph = RouteGraph::empty();
    for Connection { from, to } in connections.iter() {
        graph.add_edge(*from, *to);
        if options.internal_connections {
            add_internal_connections(&mut graph, from, resolver, options.bidirectional)?;
        }
        if options.bidirectional {
            graph.add_edge(*to, *from);
            if options.internal_connections {
                add_internal_connections(&mut graph, to, resolver, options.bidirectional)?;
            }
        }
    }
    log::info!(
        "built road graph with {} nodes and {} edges from {} connections",
        graph.n_nodes(),
        graph.n_edges(),
        connections.len()
    );
    Ok(graph)
}

/// adds turning edges from `node` to each other approach of the same site
fn add_internal_connections(
    graph: &mut RouteGraph,
    node: &NodeId,
    resolver: &dyn LocationResolver,
    bidirectional: bool,
) -> Result<(), ProviderError> {
    for approach in resolver.approaches_of(&node.site)? {
        let other = NodeId {
            site: node.site,
            approach,
        };
        graph.add_edge(*node, other);
        if bidirectional {
            graph.add_edge(other, *node);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{build_graph, GraphBuildOptions};
    use crate::model::{
        graph::{Connection, NodeId},
        provider::{SiteCatalog, SiteRecord},
    };

    fn catalog() -> SiteCatalog {
        let rows = [(1, 1), (1, 2), (1, 3), (2, 1), (2, 2)];
        SiteCatalog::new(
            rows.iter()
                .map(|(site, approach)| SiteRecord {
                    site: *site,
                    approach: *approach,
                    name: format!("{site}-{approach}"),
                    latitude: 0.0,
                    longitude: 0.0,
                })
                .collect(),
        )
    }

    fn connections() -> Vec<Connection> {
        vec![Connection::new(NodeId::new(1, 1), NodeId::new(2, 1))]
    }

    #[test]
    fn expands_turning_edges_in_both_directions() {
        let graph =
            build_graph(&connections(), &catalog(), &GraphBuildOptions::default()).expect("builds");
        let n = NodeId::new;
        let expected = vec![
            (n(1, 1), n(1, 2)),
            (n(1, 1), n(1, 3)),
            (n(1, 1), n(2, 1)),
            (n(1, 2), n(1, 1)),
            (n(1, 3), n(1, 1)),
            (n(2, 1), n(1, 1)),
            (n(2, 1), n(2, 2)),
            (n(2, 2), n(2, 1)),
        ];
        assert_eq!(graph.edges(), expected);
        assert!(graph.edges().iter().all(|(a, b)| a != b));
    }

    #[test]
    fn respects_disabled_options() {
        let plain = GraphBuildOptions {
            bidirectional: false,
            internal_connections: false,
        };
        let graph = build_graph(&connections(), &catalog(), &plain).expect("builds");
        assert_eq!(graph.edges(), vec![(NodeId::new(1, 1), NodeId::new(2, 1))]);

        let one_way = GraphBuildOptions {
            bidirectional: false,
            internal_connections: true,
        };
        let graph = build_graph(&connections(), &catalog(), &one_way).expect("builds");
        assert_eq!(graph.n_edges(), 3);
        assert!(!graph.has_edge(&NodeId::new(2, 1), &NodeId::new(1, 1)));
    }

    #[test]
    fn unknown_site_fails_expansion() {
        let connections = vec![Connection::new(NodeId::new(1, 1), NodeId::new(9, 1))];
        assert!(build_graph(&connections, &catalog(), &GraphBuildOptions::default()).is_err());
    }
}
