use super::{cost_provider::checked_cost, CostProvider, ProviderError};
use crate::model::graph::{CostTable, NodeId, RouteGraph, TimeSlot};
use itertools::Itertools;
use kdam::{tqdm, Bar, BarExt};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    io::{Read, Write},
    path::Path,
    sync::{Arc, Mutex},
};

/// one row of the travel time cache file: `time,origin,destination,cost`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelTimeRow {
    pub time: TimeSlot,
    pub origin: NodeId,
    pub destination: NodeId,
    pub cost: f64,
}

/// edge costs for every sampled time slot of the day
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TravelTimeTable {
    slots: BTreeMap<TimeSlot, CostTable>,
}

impl TravelTimeTable {
    pub fn empty() -> TravelTimeTable {
        TravelTimeTable {
            slots: BTreeMap::new(),
        }
    }

    /// queries the provider for every edge of the graph at every time slot.
    pub fn sample(
        graph: &RouteGraph,
        provider: &dyn CostProvider,
        parallelize: bool,
    ) -> Result<TravelTimeTable, ProviderError> {
        let slots = TimeSlot::all().collect_vec();
        TravelTimeTable::sample_slots(graph, provider, &slots, parallelize)
    }

    /// queries the provider for every edge of the graph at each of `slots`.
    /// with `parallelize`, slots are sampled concurrently.
    pub fn sample_slots(
        graph: &RouteGraph,
        provider: &dyn CostProvider,
        slots: &[TimeSlot],
        parallelize: bool,
    ) -> Result<TravelTimeTable, ProviderError> {
        let edges = graph.edges();
        log::info!(
            "sampling {} edges over {} time slots",
            edges.len(),
            slots.len()
        );
        let sampled = if parallelize {
            let bar = Arc::new(Mutex::new(
                Bar::builder()
                    .desc("sample travel times")
                    .total(slots.len())
                    .build()
                    .map_err(ProviderError::InternalError)?,
            ));
            slots
                .par_iter()
                .map(|slot| {
                    let table = sample_slot(&edges, provider, *slot)?;
                    if let Ok(mut b) = bar.lock() {
                        let _ = b.update(1);
                    }
                    Ok((*slot, table))
                })
                .collect::<Result<BTreeMap<_, _>, ProviderError>>()?
        } else {
            tqdm!(
                slots.iter(),
                desc = "sample travel times",
                total = slots.len()
            )
            .map(|slot| sample_slot(&edges, provider, *slot).map(|table| (*slot, table)))
            .collect::<Result<BTreeMap<_, _>, ProviderError>>()?
        };
        eprintln!();
        Ok(TravelTimeTable { slots: sampled })
    }

    pub fn get(&self, slot: &TimeSlot) -> Option<&CostTable> {
        self.slots.get(slot)
    }

    pub fn insert(&mut self, slot: TimeSlot, table: CostTable) -> Option<CostTable> {
        self.slots.insert(slot, table)
    }

    pub fn n_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn n_rows(&self) -> usize {
        self.slots.values().map(|t| t.len()).sum()
    }

    pub fn from_csv_file(path: &Path) -> Result<TravelTimeTable, ProviderError> {
        let source = path.to_string_lossy().to_string();
        let file = std::fs::File::open(path)
            .map_err(|e| ProviderError::CsvReadError(source.clone(), csv::Error::from(e)))?;
        TravelTimeTable::from_csv_reader(file, &source)
    }

    /// reads a headerless `time,origin,destination,cost` CSV. a repeated
    /// (time, origin, destination) row overwrites the earlier one.
    pub fn from_csv_reader<R: Read>(
        reader: R,
        source: &str,
    ) -> Result<TravelTimeTable, ProviderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut table = TravelTimeTable::empty();
        for row in csv_reader.deserialize::<TravelTimeRow>() {
            let TravelTimeRow {
                time,
                origin,
                destination,
                cost,
            } = row.map_err(|e| ProviderError::CsvReadError(source.to_string(), e))?;
            if !(cost.is_finite() && cost >= 0.0) {
                return Err(ProviderError::InvalidCost(origin, destination, time, cost));
            }
            table
                .slots
                .entry(time)
                .or_default()
                .insert(origin, destination, cost);
        }
        log::info!(
            "read {} travel times over {} time slots from {source}",
            table.n_rows(),
            table.n_slots()
        );
        Ok(table)
    }

    pub fn write_csv_file(&self, path: &Path) -> Result<(), ProviderError> {
        let destination = path.to_string_lossy().to_string();
        let file = std::fs::File::create(path).map_err(|e| {
            ProviderError::CsvWriteError(destination.clone(), csv::Error::from(e))
        })?;
        self.write_csv(file, &destination)
    }

    /// writes all rows ordered by time slot, then origin, then destination
    pub fn write_csv<W: Write>(&self, writer: W, destination: &str) -> Result<(), ProviderError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        for (slot, table) in self.slots.iter() {
            let rows = table
                .iter()
                .map(|((origin, destination), cost)| TravelTimeRow {
                    time: *slot,
                    origin: *origin,
                    destination: *destination,
                    cost: *cost,
                })
                .sorted_by_key(|r| (r.origin, r.destination));
            for row in rows {
                csv_writer
                    .serialize(row)
                    .map_err(|e| ProviderError::CsvWriteError(destination.to_string(), e))?;
            }
        }
        csv_writer.flush().map_err(|e| {
            ProviderError::CsvWriteError(destination.to_string(), csv::Error::from(e))
        })
    }
}

impl IntoIterator for TravelTimeTable {
    type Item = (TimeSlot, CostTable);
    type IntoIter = std::collections::btree_map::IntoIter<TimeSlot, CostTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}

impl FromIterator<(TimeSlot, CostTable)> for TravelTimeTable {
    fn from_iter<T: IntoIterator<Item = (TimeSlot, CostTable)>>(iter: T) -> Self {
        TravelTimeTable {
            slots: iter.into_iter().collect(),
        }
    }
}

impl CostProvider for TravelTimeTable {
    fn travel_cost(
        &self,
        src: &NodeId,
        dst: &NodeId,
        slot: TimeSlot,
    ) -> Result<f64, ProviderError> {
        self.slots
            .get(&slot)
            .and_then(|table| table.get(src, dst))
            .ok_or(ProviderError::MissingCost(*src, *dst, slot))
    }
}

/// queries the provider for each of the given edges at a single time slot
pub fn sample_slot(
    edges: &[(NodeId, NodeId)],
    provider: &dyn CostProvider,
    slot: TimeSlot,
) -> Result<CostTable, ProviderError> {
    let mut table = CostTable::with_capacity(edges.len());
    for (src, dst) in edges.iter() {
        let cost = checked_cost(provider, src, dst, slot)?;
        table.insert(*src, *dst, cost);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::{sample_slot, TravelTimeTable};
    use crate::model::{
        graph::{NodeId, RouteGraph, TimeSlot},
        provider::{CostProvider, ProviderError},
    };

    fn slot(s: &str) -> TimeSlot {
        s.parse().unwrap_or_else(|e| panic!("{e}"))
    }

    fn by_slot_index(src: &NodeId, _dst: &NodeId, slot: TimeSlot) -> Result<f64, ProviderError> {
        Ok(slot.index() as f64 + src.approach.0 as f64)
    }

    fn two_edge_graph() -> RouteGraph {
        let mut graph = RouteGraph::empty();
        graph.add_edge(NodeId::new(970, 1), NodeId::new(2000, 3));
        graph.add_edge(NodeId::new(2000, 3), NodeId::new(970, 1));
        graph
    }

    #[test]
    fn reads_cache_rows() {
        let rows = "08:15,970-1,2000-3,42.5\n08:15,2000-3,970-1,40\n08:30,970-1,2000-3,44\n";
        let table = TravelTimeTable::from_csv_reader(rows.as_bytes(), "cache").expect("reads");
        assert_eq!(table.n_slots(), 2);
        assert_eq!(table.n_rows(), 3);
        let cost = table
            .travel_cost(&NodeId::new(970, 1), &NodeId::new(2000, 3), slot("08:15"))
            .expect("present");
        assert_eq!(cost, 42.5);
        match table.travel_cost(&NodeId::new(2000, 3), &NodeId::new(970, 1), slot("08:30")) {
            Err(ProviderError::MissingCost(_, _, s)) => assert_eq!(s, slot("08:30")),
            other => panic!("expected missing cost, found {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_and_negative_rows() {
        let malformed = "8am,970-1,2000-3,42.5\n";
        assert!(TravelTimeTable::from_csv_reader(malformed.as_bytes(), "cache").is_err());
        let negative = "08:15,970-1,2000-3,-1\n";
        match TravelTimeTable::from_csv_reader(negative.as_bytes(), "cache") {
            Err(ProviderError::InvalidCost(..)) => {}
            other => panic!("expected invalid cost, found {other:?}"),
        }
    }

    #[test]
    fn sample_covers_every_slot_and_edge() {
        let graph = two_edge_graph();
        let table = TravelTimeTable::sample(&graph, &by_slot_index, false).expect("samples");
        assert_eq!(table.n_slots(), 96);
        assert_eq!(table.n_rows(), 96 * 2);
        let cost = table
            .travel_cost(&NodeId::new(2000, 3), &NodeId::new(970, 1), slot("23:45"))
            .expect("present");
        assert_eq!(cost, 95.0 + 3.0);

        let parallel = TravelTimeTable::sample(&graph, &by_slot_index, true).expect("samples");
        assert_eq!(parallel, table);
    }

    #[test]
    fn sample_rejects_negative_costs() {
        let negative = |_: &NodeId, _: &NodeId, _: TimeSlot| -> Result<f64, ProviderError> {
            Ok(-2.0)
        };
        let edges = two_edge_graph().edges();
        match sample_slot(&edges, &negative, TimeSlot::default()) {
            Err(ProviderError::InvalidCost(_, _, _, c)) => assert_eq!(c, -2.0),
            other => panic!("expected invalid cost, found {other:?}"),
        }
    }

    #[test]
    fn written_cache_reads_back() {
        let graph = two_edge_graph();
        let table = TravelTimeTable::sample(&graph, &by_slot_index, false).expect("samples");
        let mut buffer: Vec<u8> = vec![];
        table.write_csv(&mut buffer, "buffer").expect("writes");
        let text = String::from_utf8(buffer.clone()).expect("utf8");
        assert_eq!(text.lines().next(), Some("00:00,970-1,2000-3,1.0"));
        let back = TravelTimeTable::from_csv_reader(buffer.as_slice(), "buffer").expect("reads");
        assert_eq!(back, table);
    }
}
