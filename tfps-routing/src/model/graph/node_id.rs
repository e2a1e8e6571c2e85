use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// a physical intersection (SCATS site number)
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct SiteId(pub u32);

impl Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a direction of travel at some site (VicRoads location id)
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct ApproachId(pub u32);

impl Display for ApproachId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// graph vertex: one approach of one site.
///
/// ordering is by site, then approach. shortest path searches rely on this
/// ordering to break ties between equal-cost labels, so it must stay total.
/// the textual form is `<site>-<approach>`, e.g. `970-1`.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId {
    pub site: SiteId,
    pub approach: ApproachId,
}

impl NodeId {
    pub const fn new(site: u32, approach: u32) -> NodeId {
        NodeId {
            site: SiteId(site),
            approach: ApproachId(approach),
        }
    }

    /// true if both nodes are approaches of the same intersection
    pub fn same_site(&self, other: &NodeId) -> bool {
        self.site == other.site
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.site, self.approach)
    }
}

impl FromStr for NodeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (site_str, approach_str) = trimmed
            .split_once('-')
            .ok_or_else(|| format!("node id '{trimmed}' is not of the form <site>-<approach>"))?;
        let site = site_str
            .parse::<u32>()
            .map_err(|e| format!("invalid site '{site_str}' in node id '{trimmed}': {e}"))?;
        let approach = approach_str
            .parse::<u32>()
            .map_err(|e| format!("invalid approach '{approach_str}' in node id '{trimmed}': {e}"))?;
        Ok(NodeId::new(site, approach))
    }
}

impl TryFrom<String> for NodeId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NodeId> for String {
    fn from(value: NodeId) -> Self {
        value.to_string()
    }
}
