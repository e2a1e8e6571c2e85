pub mod dijkstra;
mod search_error;
#[cfg(test)]
mod test_graphs;
pub mod yen;

pub use dijkstra::shortest_path;
pub use search_error::SearchError;
pub use yen::k_shortest_paths;
