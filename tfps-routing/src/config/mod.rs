mod routing_configuration;

pub use routing_configuration::RoutingConfiguration;
