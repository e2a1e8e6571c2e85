use super::{LocationResolver, ProviderError};
use crate::model::graph::{ApproachId, NodeId, SiteId};
use geo::Point;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, io::Read, path::Path};

/// one row of the site metadata file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub site: u32,
    pub approach: u32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl SiteRecord {
    pub fn node_id(&self) -> NodeId {
        NodeId::new(self.site, self.approach)
    }
}

/// site/approach metadata, keyed by site and then approach.
///
/// read from a CSV file with header `site,approach,name,latitude,longitude`.
/// a site/approach pair listed more than once keeps its first row.
#[derive(Debug, Default, Clone)]
pub struct SiteCatalog {
    sites: BTreeMap<SiteId, BTreeMap<ApproachId, SiteRecord>>,
}

impl SiteCatalog {
    pub fn new(records: Vec<SiteRecord>) -> SiteCatalog {
        let mut sites: BTreeMap<SiteId, BTreeMap<ApproachId, SiteRecord>> = BTreeMap::new();
        for record in records {
            let node = record.node_id();
            let approaches = sites.entry(node.site).or_default();
            if approaches.contains_key(&node.approach) {
                log::debug!("ignoring repeated site catalog row for {node}");
            } else {
                approaches.insert(node.approach, record);
            }
        }
        SiteCatalog { sites }
    }

    pub fn from_csv_file(path: &Path) -> Result<SiteCatalog, ProviderError> {
        let source = path.to_string_lossy().to_string();
        let file = std::fs::File::open(path).map_err(|e| {
            ProviderError::CsvReadError(source.clone(), csv::Error::from(e))
        })?;
        SiteCatalog::from_csv_reader(file, &source)
    }

    /// reads a catalog from any CSV source. `source` names the input in errors.
    pub fn from_csv_reader<R: Read>(reader: R, source: &str) -> Result<SiteCatalog, ProviderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let records = csv_reader
            .deserialize::<SiteRecord>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ProviderError::CsvReadError(source.to_string(), e))?;
        let catalog = SiteCatalog::new(records);
        log::info!(
            "read {} sites with {} approaches from {source}",
            catalog.n_sites(),
            catalog.n_locations()
        );
        Ok(catalog)
    }

    pub fn n_sites(&self) -> usize {
        self.sites.len()
    }

    pub fn n_locations(&self) -> usize {
        self.sites.values().map(|a| a.len()).sum()
    }

    pub fn get(&self, node: &NodeId) -> Result<&SiteRecord, ProviderError> {
        self.sites
            .get(&node.site)
            .and_then(|approaches| approaches.get(&node.approach))
            .ok_or(ProviderError::UnknownLocation(*node))
    }

    /// location as a lon/lat point
    pub fn position(&self, node: &NodeId) -> Result<Point<f64>, ProviderError> {
        self.get(node)
            .map(|r| Point::new(r.longitude, r.latitude))
    }

    pub fn name(&self, node: &NodeId) -> Result<&str, ProviderError> {
        self.get(node).map(|r| r.name.as_str())
    }

    /// every known location, sorted by id
    pub fn locations(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.sites
            .values()
            .flat_map(|approaches| approaches.values().map(|r| r.node_id()))
    }
}

impl LocationResolver for SiteCatalog {
    fn approaches_of(&self, site: &SiteId) -> Result<Vec<ApproachId>, ProviderError> {
        self.sites
            .get(site)
            .map(|approaches| approaches.keys().copied().collect())
            .ok_or(ProviderError::UnknownSite(*site))
    }
}

#[cfg(test)]
mod tests {
    use super::SiteCatalog;
    use crate::model::{
        graph::{ApproachId, NodeId, SiteId},
        provider::{LocationResolver, ProviderError},
    };

    const SITES: &str = "site,approach,name,latitude,longitude
970,1,WARRIGAL_RD N of HIGH STREET_RD,-37.86703,145.09159
970,3,HIGH STREET_RD E of WARRIGAL_RD,-37.86723,145.09207
970,1,WARRIGAL_RD N of HIGH STREET_RD,-37.0,145.0
2000,5,TOORAK_RD W of WARRIGAL_RD,-37.85192,145.09432
";

    #[test]
    fn reads_catalog_and_resolves_approaches() {
        let catalog = SiteCatalog::from_csv_reader(SITES.as_bytes(), "sites").expect("reads");
        assert_eq!(catalog.n_sites(), 2);
        assert_eq!(catalog.n_locations(), 3);
        assert_eq!(
            catalog.approaches_of(&SiteId(970)).expect("known site"),
            vec![ApproachId(1), ApproachId(3)]
        );
        assert!(catalog.has_location(&NodeId::new(2000, 5)));
        assert!(!catalog.has_location(&NodeId::new(2000, 1)));
        // first row wins for repeated site/approach pairs
        let position = catalog.position(&NodeId::new(970, 1)).expect("known");
        assert_eq!(position.y(), -37.86703);
    }

    #[test]
    fn unknown_site_and_location() {
        let catalog = SiteCatalog::from_csv_reader(SITES.as_bytes(), "sites").expect("reads");
        match catalog.approaches_of(&SiteId(1)) {
            Err(ProviderError::UnknownSite(SiteId(1))) => {}
            other => panic!("expected unknown site, found {other:?}"),
        }
        match catalog.name(&NodeId::new(970, 9)) {
            Err(ProviderError::UnknownLocation(node)) => assert_eq!(node, NodeId::new(970, 9)),
            other => panic!("expected unknown location, found {other:?}"),
        }
    }

    #[test]
    fn malformed_rows_fail() {
        let bad = "site,approach,name,latitude,longitude\n970,north,X,-37.0,145.0\n";
        assert!(SiteCatalog::from_csv_reader(bad.as_bytes(), "sites").is_err());
    }
}
