use super::ProviderError;
use crate::model::graph::{NodeId, TimeSlot};

/// source of edge travel costs for a time slot. implementations may wrap a
/// trained predictor, a lookup table or a geometric estimate. costs must be
/// non-negative and the provider must answer for every edge it is asked about.
pub trait CostProvider: Send + Sync {
    fn travel_cost(&self, src: &NodeId, dst: &NodeId, slot: TimeSlot)
        -> Result<f64, ProviderError>;
}

impl<F> CostProvider for F
where
    F: Fn(&NodeId, &NodeId, TimeSlot) -> Result<f64, ProviderError> + Send + Sync,
{
    fn travel_cost(
        &self,
        src: &NodeId,
        dst: &NodeId,
        slot: TimeSlot,
    ) -> Result<f64, ProviderError> {
        self(src, dst, slot)
    }
}

/// queries a provider and rejects costs the search engines cannot use
pub fn checked_cost(
    provider: &dyn CostProvider,
    src: &NodeId,
    dst: &NodeId,
    slot: TimeSlot,
) -> Result<f64, ProviderError> {
    let cost = provider.travel_cost(src, dst, slot)?;
    if cost.is_finite() && cost >= 0.0 {
        Ok(cost)
    } else {
        Err(ProviderError::InvalidCost(*src, *dst, slot, cost))
    }
}
