mod route_facade;
mod routing_cli_error;
mod routing_error;

pub use route_facade::RouteFacade;
pub use routing_cli_error::RoutingCliError;
pub use routing_error::RoutingError;
