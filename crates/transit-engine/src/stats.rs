//! Pull-model statistics tables.
//!
//! Tables are plain strings so any reporting layer can render them without
//! knowing engine types. With `human_readable` set, vertex indices are
//! replaced by vertex names wherever a name exists.

use transit_core::{EdgeKey, VertexId};
use transit_net::Network;

use crate::entity::{Car, CarPosition, Passenger, PassengerPosition};
use crate::registry::EntityRegistry;

/// Which table to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatsKind {
    /// One row per vertex: `vertex, name, waiting, parked`.
    Net,
    /// One row per live car: `id, position, next, last, capacity, onboard`.
    Car,
    /// One row per live passenger: `id, position, next, last`.
    Passenger,
}

impl StatsKind {
    /// Column headers for this table.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Net => &["vertex", "name", "waiting", "parked"],
            Self::Car => &["id", "position", "next", "last", "capacity", "onboard"],
            Self::Passenger => &["id", "position", "next", "last"],
        }
    }
}

/// A table of statistics rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsTable {
    /// Column headers.
    pub columns: Vec<&'static str>,
    /// Rows, each as long as `columns`.
    pub rows: Vec<Vec<String>>,
}

impl StatsTable {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row` under the header `column`.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| *c == column)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// Builds a [`StatsTable`] over borrowed simulation state.
pub(crate) struct StatsBuilder<'a> {
    net: &'a Network,
    registry: &'a EntityRegistry,
    human: bool,
}

impl<'a> StatsBuilder<'a> {
    pub(crate) fn new(net: &'a Network, registry: &'a EntityRegistry, human: bool) -> Self {
        Self { net, registry, human }
    }

    pub(crate) fn build(&self, kind: StatsKind) -> StatsTable {
        let rows = match kind {
            StatsKind::Net => self.net.vertex_ids().map(|v| self.vertex_row(v)).collect(),
            StatsKind::Car => self.registry.cars().map(|c| self.car_row(c)).collect(),
            StatsKind::Passenger => self
                .registry
                .passengers()
                .map(|p| self.passenger_row(p))
                .collect(),
        };
        StatsTable {
            columns: kind.columns().to_vec(),
            rows,
        }
    }

    fn vertex(&self, v: VertexId) -> String {
        if self.human {
            self.net.label(v)
        } else {
            v.to_string()
        }
    }

    fn edge(&self, edge: EdgeKey) -> String {
        format!("{}-{}", self.vertex(edge.source), self.vertex(edge.target))
    }

    fn vertex_row(&self, v: VertexId) -> Vec<String> {
        vec![
            self.vertex(v),
            self.net.name_of(v).unwrap_or_default().to_string(),
            self.net.waiting(v).map_or(0, |q| q.len()).to_string(),
            self.net.parked(v).map_or(0, |q| q.len()).to_string(),
        ]
    }

    fn car_row(&self, car: &Car) -> Vec<String> {
        let position = match car.position() {
            CarPosition::Parked(v) => self.vertex(v),
            CarPosition::InTransit(edge) => self.edge(edge),
        };
        vec![
            car.id().to_string(),
            position,
            self.vertex(car.next_stop()),
            self.vertex(car.final_stop()),
            car.capacity().to_string(),
            car.onboard().len().to_string(),
        ]
    }

    fn passenger_row(&self, passenger: &Passenger) -> Vec<String> {
        let (position, here) = match passenger.position() {
            PassengerPosition::Waiting(v) => (self.vertex(v), Some(v)),
            PassengerPosition::Aboard(car) => (
                format!("car#{car}"),
                self.registry.car(car).ok().map(Car::next_stop),
            ),
        };
        let route = passenger.route();
        let fallback = |hop: Option<VertexId>| match hop.or(here) {
            Some(v) => self.vertex(v),
            None => "-".to_string(),
        };
        vec![
            passenger.id().to_string(),
            position,
            fallback(route.next_hop()),
            fallback(route.last()),
        ]
    }
}
