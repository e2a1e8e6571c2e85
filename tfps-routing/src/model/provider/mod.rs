mod cost_provider;
mod haversine_cost_provider;
mod location_resolver;
mod provider_error;
mod site_catalog;
mod travel_time_table;

pub use cost_provider::{checked_cost, CostProvider};
pub use haversine_cost_provider::{HaversineCostProvider, DEFAULT_SPEED_KPH};
pub use location_resolver::LocationResolver;
pub use provider_error::ProviderError;
pub use site_catalog::{SiteCatalog, SiteRecord};
pub use travel_time_table::{sample_slot, TravelTimeRow, TravelTimeTable};
