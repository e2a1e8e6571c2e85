pub mod graph;
pub mod provider;
pub mod routing;
