use super::NodeId;
use std::collections::HashMap;

/// edge travel costs for a single time slot, keyed by (src, dst).
///
/// a missing entry means the edge cannot be traversed during this slot.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CostTable(HashMap<(NodeId, NodeId), f64>);

impl CostTable {
    pub fn new() -> CostTable {
        CostTable(HashMap::new())
    }

    pub fn with_capacity(capacity: usize) -> CostTable {
        CostTable(HashMap::with_capacity(capacity))
    }

    pub fn get(&self, src: &NodeId, dst: &NodeId) -> Option<f64> {
        self.0.get(&(*src, *dst)).copied()
    }

    /// sets the cost for (src, dst), returning any previous value
    pub fn insert(&mut self, src: NodeId, dst: NodeId, cost: f64) -> Option<f64> {
        self.0.insert((src, dst), cost)
    }

    pub fn remove(&mut self, src: &NodeId, dst: &NodeId) -> Option<f64> {
        self.0.remove(&(*src, *dst))
    }

    pub fn contains(&self, src: &NodeId, dst: &NodeId) -> bool {
        self.0.contains_key(&(*src, *dst))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(NodeId, NodeId), &f64)> {
        self.0.iter()
    }
}

impl FromIterator<((NodeId, NodeId), f64)> for CostTable {
    fn from_iter<T: IntoIterator<Item = ((NodeId, NodeId), f64)>>(iter: T) -> Self {
        CostTable(iter.into_iter().collect())
    }
}
