mod connection;
mod cost_table;
mod graph_error;
pub mod graph_ops;
mod node_id;
mod route_graph;
mod time_slot;

pub use connection::Connection;
pub use cost_table::CostTable;
pub use graph_error::GraphError;
pub use graph_ops::{build_graph, GraphBuildOptions};
pub use node_id::{ApproachId, NodeId, SiteId};
pub use route_graph::{DetachedEdge, RouteGraph};
pub use time_slot::{TimeSlot, SLOTS_PER_DAY, SLOT_MINUTES};
