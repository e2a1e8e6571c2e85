use super::{CostProvider, ProviderError, SiteCatalog};
use crate::model::graph::{NodeId, TimeSlot};
use geo::{Distance, Haversine, Point};
use std::collections::HashMap;

/// speed assumed for a road with no known speed limit
pub const DEFAULT_SPEED_KPH: f64 = 60.0;

/// estimates travel time in seconds as the great-circle distance between
/// two approaches driven at a constant speed. the estimate is the same for
/// every time slot.
#[derive(Debug, Clone)]
pub struct HaversineCostProvider {
    positions: HashMap<NodeId, Point<f64>>,
    meters_per_second: f64,
}

impl HaversineCostProvider {
    pub fn new(catalog: &SiteCatalog, speed_kph: f64) -> Result<HaversineCostProvider, ProviderError> {
        if !(speed_kph.is_finite() && speed_kph > 0.0) {
            return Err(ProviderError::InvalidParameter(format!(
                "speed must be a positive number of km/h, found {speed_kph}"
            )));
        }
        let positions = catalog
            .locations()
            .map(|node| catalog.position(&node).map(|p| (node, p)))
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(HaversineCostProvider {
            positions,
            meters_per_second: speed_kph * 1000.0 / 3600.0,
        })
    }

    fn position(&self, node: &NodeId) -> Result<&Point<f64>, ProviderError> {
        self.positions
            .get(node)
            .ok_or(ProviderError::UnknownLocation(*node))
    }
}

impl CostProvider for HaversineCostProvider {
    fn travel_cost(
        &self,
        src: &NodeId,
        dst: &NodeId,
        _slot: TimeSlot,
    ) -> Result<f64, ProviderError> {
        let meters = Haversine.distance(*self.position(src)?, *self.position(dst)?);
        Ok(meters / self.meters_per_second)
    }
}

#[cfg(test)]
mod tests {
    use super::HaversineCostProvider;
    use crate::model::{
        graph::{NodeId, TimeSlot},
        provider::{CostProvider, SiteCatalog, SiteRecord},
    };

    fn catalog() -> SiteCatalog {
        SiteCatalog::new(vec![
            SiteRecord {
                site: 1,
                approach: 1,
                name: String::from("A"),
                latitude: 0.0,
                longitude: 0.0,
            },
            SiteRecord {
                site: 2,
                approach: 1,
                name: String::from("B"),
                latitude: 0.0,
                longitude: 0.01,
            },
        ])
    }

    #[test]
    fn travel_time_at_constant_speed() {
        let provider = HaversineCostProvider::new(&catalog(), 36.0).expect("valid speed");
        let slot = TimeSlot::default();
        let seconds = provider
            .travel_cost(&NodeId::new(1, 1), &NodeId::new(2, 1), slot)
            .expect("known nodes");
        // 0.01 degrees of longitude at the equator is ~1112m, at 10 m/s
        assert!((seconds - 111.2).abs() < 0.5, "found {seconds}");
        let back = provider
            .travel_cost(&NodeId::new(2, 1), &NodeId::new(1, 1), slot)
            .expect("known nodes");
        assert!((seconds - back).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_speed_and_unknown_nodes() {
        assert!(HaversineCostProvider::new(&catalog(), 0.0).is_err());
        assert!(HaversineCostProvider::new(&catalog(), f64::NAN).is_err());
        let provider = HaversineCostProvider::new(&catalog(), 60.0).expect("valid speed");
        assert!(provider
            .travel_cost(&NodeId::new(1, 1), &NodeId::new(3, 1), TimeSlot::default())
            .is_err());
    }
}
