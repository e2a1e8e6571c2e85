use super::RoutingError;
use crate::{
    algorithm::k_shortest_paths,
    config::RoutingConfiguration,
    model::{
        graph::{build_graph, ApproachId, Connection, CostTable, NodeId, RouteGraph, SiteId, TimeSlot},
        provider::{
            sample_slot, CostProvider, HaversineCostProvider, LocationResolver, SiteCatalog,
            TravelTimeTable,
        },
        routing::RouteSet,
    },
};
use itertools::Itertools;
use std::{collections::HashMap, io::Write, path::Path};

/// entry point for route queries. owns the road graph and installs the
/// edge costs of the requested time slot before each search.
///
/// slot cost tables are sampled from the cost provider on first use and
/// kept for the lifetime of the facade, so switching back to a slot that
/// was already used never queries the provider again.
pub struct RouteFacade {
    graph: RouteGraph,
    resolver: Box<dyn LocationResolver>,
    provider: Box<dyn CostProvider>,
    active_slot: Option<TimeSlot>,
    /// sampled tables of every slot except the active one, which lives in the graph
    slot_cache: HashMap<TimeSlot, CostTable>,
    sample_count: usize,
    parallelize: bool,
}

impl RouteFacade {
    pub fn new(
        graph: RouteGraph,
        resolver: Box<dyn LocationResolver>,
        provider: Box<dyn CostProvider>,
    ) -> RouteFacade {
        RouteFacade {
            graph,
            resolver,
            provider,
            active_slot: None,
            slot_cache: HashMap::new(),
            sample_count: 0,
            parallelize: false,
        }
    }

    /// sample slots concurrently in [`RouteFacade::precompute`]
    pub fn with_parallelize(mut self, parallelize: bool) -> RouteFacade {
        self.parallelize = parallelize;
        self
    }

    pub fn graph(&self) -> &RouteGraph {
        &self.graph
    }

    pub fn active_slot(&self) -> Option<TimeSlot> {
        self.active_slot
    }

    /// number of time slots sampled from the cost provider so far
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// finds up to `k` routes between two approaches at a time of day.
    ///
    /// # Arguments
    ///
    /// * `origin_site`          - SCATS site of the origin
    /// * `origin_approach`      - approach at the origin site
    /// * `destination_site`     - SCATS site of the destination
    /// * `destination_approach` - approach at the destination site
    /// * `time`                 - time of day, `HH:MM`
    /// * `k`                    - maximum number of routes, at least 1
    ///
    /// # Returns
    ///
    /// Up to `k` routes with their costs, cheapest first. Empty if the
    /// destination cannot be reached at that time.
    pub fn route(
        &mut self,
        origin_site: SiteId,
        origin_approach: ApproachId,
        destination_site: SiteId,
        destination_approach: ApproachId,
        time: &str,
        k: usize,
    ) -> Result<RouteSet, RoutingError> {
        let origin = NodeId {
            site: origin_site,
            approach: origin_approach,
        };
        let destination = NodeId {
            site: destination_site,
            approach: destination_approach,
        };
        self.route_between(&origin, &destination, time, k)
    }

    /// [`RouteFacade::route`] for node ids that are already assembled
    pub fn route_between(
        &mut self,
        origin: &NodeId,
        destination: &NodeId,
        time: &str,
        k: usize,
    ) -> Result<RouteSet, RoutingError> {
        if k == 0 {
            return Err(RoutingError::InvalidArgument(String::from(
                "number of routes k must be at least 1",
            )));
        }
        self.resolve(origin)?;
        self.resolve(destination)?;
        let slot = time.parse::<TimeSlot>().map_err(RoutingError::InvalidTime)?;
        self.activate(slot)?;

        log::debug!("routing '{origin}' -> '{destination}' at {slot} with k={k}");
        let routes = k_shortest_paths(&mut self.graph, origin, destination, k)?;
        if routes.is_empty() {
            log::debug!("no route from '{origin}' to '{destination}' at {slot}");
        }
        Ok(RouteSet::from(routes))
    }

    /// the single cheapest route
    pub fn shortest_route(
        &mut self,
        origin_site: SiteId,
        origin_approach: ApproachId,
        destination_site: SiteId,
        destination_approach: ApproachId,
        time: &str,
    ) -> Result<RouteSet, RoutingError> {
        self.route(
            origin_site,
            origin_approach,
            destination_site,
            destination_approach,
            time,
            1,
        )
    }

    /// samples every slot of the day that has not been sampled yet
    pub fn precompute(&mut self) -> Result<(), RoutingError> {
        let missing = TimeSlot::all()
            .filter(|s| Some(*s) != self.active_slot && !self.slot_cache.contains_key(s))
            .collect_vec();
        if missing.is_empty() {
            return Ok(());
        }
        let sampled = TravelTimeTable::sample_slots(
            &self.graph,
            self.provider.as_ref(),
            &missing,
            self.parallelize,
        )?;
        self.sample_count += missing.len();
        self.slot_cache.extend(sampled);
        Ok(())
    }

    /// the costs of every slot of the day, sampling whatever is missing
    pub fn travel_time_table(&mut self) -> Result<TravelTimeTable, RoutingError> {
        self.precompute()?;
        let table = TimeSlot::all()
            .filter_map(|slot| {
                if Some(slot) == self.active_slot {
                    Some((slot, self.graph.costs().clone()))
                } else {
                    self.slot_cache.get(&slot).map(|t| (slot, t.clone()))
                }
            })
            .collect::<TravelTimeTable>();
        Ok(table)
    }

    /// writes the travel time cache for all 96 slots as headerless
    /// `time,origin,destination,cost` rows
    pub fn generate_travel_times<W: Write>(
        &mut self,
        writer: W,
        destination: &str,
    ) -> Result<(), RoutingError> {
        let table = self.travel_time_table()?;
        table.write_csv(writer, destination)?;
        log::info!(
            "wrote {} travel times over {} time slots to {destination}",
            table.n_rows(),
            table.n_slots()
        );
        Ok(())
    }

    pub fn generate_travel_times_file(&mut self, path: &Path) -> Result<(), RoutingError> {
        let destination = path.to_string_lossy().to_string();
        let file = std::fs::File::create(path)
            .map_err(|e| RoutingError::IoError(destination.clone(), e))?;
        self.generate_travel_times(file, &destination)
    }

    fn resolve(&self, node: &NodeId) -> Result<(), RoutingError> {
        if self.resolver.has_location(node) {
            Ok(())
        } else {
            Err(RoutingError::UnknownLocation(*node))
        }
    }

    /// installs the cost table of `slot` into the graph, sampling it first
    /// if this slot has never been used
    fn activate(&mut self, slot: TimeSlot) -> Result<(), RoutingError> {
        if self.active_slot == Some(slot) {
            return Ok(());
        }
        let table = match self.slot_cache.remove(&slot) {
            Some(table) => table,
            None => {
                log::info!("sampling travel costs for time slot {slot}");
                let table = sample_slot(&self.graph.edges(), self.provider.as_ref(), slot)?;
                self.sample_count += 1;
                table
            }
        };
        let previous = self.graph.replace_costs(table);
        if let Some(previous_slot) = self.active_slot {
            self.slot_cache.insert(previous_slot, previous);
        }
        log::debug!("switched active time slot from {:?} to {slot}", self.active_slot.map(|s| s.to_string()));
        self.active_slot = Some(slot);
        Ok(())
    }
}

impl TryFrom<&RoutingConfiguration> for RouteFacade {
    type Error = RoutingError;

    /// loads the site catalog and connections named by the configuration and
    /// builds the graph. costs come from the travel time cache when it exists,
    /// otherwise from the distance-based estimate.
    fn try_from(conf: &RoutingConfiguration) -> Result<Self, Self::Error> {
        let catalog = SiteCatalog::from_csv_file(Path::new(&conf.sites_file))?;
        let connections = Connection::from_csv_file(Path::new(&conf.connections_file))
            .map_err(|e| RoutingError::CsvError(conf.connections_file.clone(), e))?;
        let graph = build_graph(&connections, &catalog, &conf.graph_build_options())?;

        let provider: Box<dyn CostProvider> = match conf.existing_travel_time_file() {
            Some(path) => Box::new(TravelTimeTable::from_csv_file(path)?),
            None => {
                if let Some(f) = &conf.travel_time_file {
                    log::warn!("travel time file {f} not found, estimating costs from site positions");
                }
                Box::new(HaversineCostProvider::new(&catalog, conf.speed_kph)?)
            }
        };
        let facade = RouteFacade::new(graph, Box::new(catalog), provider)
            .with_parallelize(conf.parallelize);
        Ok(facade)
    }
}
