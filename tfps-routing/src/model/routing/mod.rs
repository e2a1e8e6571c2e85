mod route;
mod route_set;

pub use route::Route;
pub use route_set::RouteSet;
