use super::ProviderError;
use crate::model::graph::{ApproachId, NodeId, SiteId};

/// knows which approaches exist at each site
pub trait LocationResolver {
    /// approaches of a site, sorted and without duplicates
    fn approaches_of(&self, site: &SiteId) -> Result<Vec<ApproachId>, ProviderError>;

    fn has_location(&self, node: &NodeId) -> bool {
        self.approaches_of(&node.site)
            .map(|approaches| approaches.contains(&node.approach))
            .unwrap_or_default()
    }
}
