//! The two-phase car movement protocol.
//!
//! One movement tick runs two passes over the network's queues:
//!
//! 1. **Edge → vertex.** Every unlocked car in transit arrives at its
//!    edge's target, parks there, and is locked.
//! 2. **Vertex → edge.** Every unlocked parked car either arrives for good
//!    (empty route: destroyed), gets stuck (next hop not adjacent), or
//!    departs onto the edge to its next hop and is locked.
//!
//! The lock stops a car from crossing both phases within one tick. Each
//! queue is visited over a snapshot of its length, so ids re-appended
//! while visiting a queue wait for the next tick.

use tracing::warn;
use transit_core::{CarId, EdgeKey, EntityKind, EventLog, PassengerId, StepError, VertexId};
use transit_net::Network;

use crate::entity::CarPosition;
use crate::place;
use crate::registry::EntityRegistry;

/// A car destroyed on reaching the end of its route.
///
/// Its passengers are no longer owned by any car. The transfer pass at
/// `vertex` must eject them in this same step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrivedCar {
    /// The destroyed car.
    pub car: CarId,
    /// Where it arrived.
    pub vertex: VertexId,
    /// Passengers aboard at arrival, in boarding order.
    pub passengers: Vec<PassengerId>,
}

/// What a movement tick did.
#[derive(Clone, Debug, Default)]
pub struct MovementOutcome {
    /// Cars destroyed this tick, in processing order.
    pub arrived: Vec<ArrivedCar>,
    /// Per-car faults. The affected cars remain parked.
    pub errors: Vec<StepError>,
    /// Cars that left an edge and parked (phase 1).
    pub arrivals_at_vertices: u32,
    /// Cars that left a vertex onto an edge (phase 2).
    pub departures: u32,
}

/// Runs one movement tick over borrowed simulation state.
pub struct MovementScheduler<'a> {
    net: &'a mut Network,
    registry: &'a mut EntityRegistry,
    log: &'a dyn EventLog,
}

impl<'a> MovementScheduler<'a> {
    /// Borrow the state one tick needs.
    pub fn new(
        net: &'a mut Network,
        registry: &'a mut EntityRegistry,
        log: &'a dyn EventLog,
    ) -> Self {
        Self { net, registry, log }
    }

    /// Run both phases, then clear every lock if `unlock` is set.
    ///
    /// With `unlock == false` cars that moved stay locked, so a further
    /// tick leaves them in place until someone unlocks them.
    pub fn run(mut self, unlock: bool) -> MovementOutcome {
        let mut outcome = MovementOutcome::default();
        self.edges_to_vertices(&mut outcome);
        self.vertices_to_edges(&mut outcome);
        if unlock {
            self.unlock_all();
        }
        outcome
    }

    // ── Phase 1 ─────────────────────────────────────────────────

    fn edges_to_vertices(&mut self, outcome: &mut MovementOutcome) {
        let keys: Vec<EdgeKey> = self.net.edge_keys().collect();
        for key in keys {
            let pending = self.net.transit(key).map_or(0, |q| q.len());
            for _ in 0..pending {
                let Some(id) = self.net.transit_mut(key).and_then(|q| q.pop_front()) else {
                    break;
                };
                let Ok(car) = self.registry.car_mut(id) else {
                    warn!(car = id.0, edge = %key, "dropping unknown car from transit queue");
                    continue;
                };
                if car.locked {
                    if let Some(q) = self.net.transit_mut(key) {
                        q.push_back(id);
                    }
                    continue;
                }
                car.position = CarPosition::Parked(key.target);
                car.locked = true;
                if let Some(q) = self.net.parked_mut(key.target) {
                    q.push_back(id);
                }
                outcome.arrivals_at_vertices += 1;
                self.log.log(
                    &format!("i am at {}", place(self.net, key.target)),
                    EntityKind::Car,
                    id.0,
                );
            }
        }
    }

    // ── Phase 2 ─────────────────────────────────────────────────

    fn vertices_to_edges(&mut self, outcome: &mut MovementOutcome) {
        let vertices: Vec<VertexId> = self.net.vertex_ids().collect();
        for v in vertices {
            let pending = self.net.parked(v).map_or(0, |q| q.len());
            for _ in 0..pending {
                let Some(id) = self.net.parked_mut(v).and_then(|q| q.pop_front()) else {
                    break;
                };
                self.depart(v, id, outcome);
            }
        }
    }

    /// Decide the fate of one car popped from the parked queue at `v`.
    fn depart(&mut self, v: VertexId, id: CarId, outcome: &mut MovementOutcome) {
        let Ok(car) = self.registry.car_mut(id) else {
            warn!(car = id.0, vertex = %v, "dropping unknown car from parked queue");
            return;
        };
        if car.locked {
            self.park(v, id);
            return;
        }

        let Some(next) = car.route.next_hop() else {
            self.arrive(v, id, outcome);
            return;
        };

        if !self.net.has_edge(v, next) {
            warn!(car = id.0, vertex = %v, next_hop = %next, "car is stuck");
            self.log.log(
                &format!("i am stuck at vertex {}", place(self.net, v)),
                EntityKind::Car,
                id.0,
            );
            outcome.errors.push(StepError::StuckCar {
                car: id,
                vertex: v,
                next_hop: next,
            });
            self.park(v, id);
            return;
        }

        let repeat = car.repeat;
        car.route.advance(repeat);
        let edge = EdgeKey::new(v, next);
        car.position = CarPosition::InTransit(edge);
        car.locked = true;
        if let Some(q) = self.net.transit_mut(edge) {
            q.push_back(id);
        }
        outcome.departures += 1;
        self.log.log(
            &format!(
                "i am at {v}-{next}: {}-{}",
                self.net.name_of(v).unwrap_or_default(),
                self.net.name_of(next).unwrap_or_default()
            ),
            EntityKind::Car,
            id.0,
        );
    }

    fn arrive(&mut self, v: VertexId, id: CarId, outcome: &mut MovementOutcome) {
        self.log.log(
            &format!("i reached destination at {}", place(self.net, v)),
            EntityKind::Car,
            id.0,
        );
        match self.registry.destroy_car(id) {
            Ok(car) => outcome.arrived.push(ArrivedCar {
                car: id,
                vertex: v,
                passengers: car.onboard.into_iter().collect(),
            }),
            Err(err) => warn!(%err, "arrived car vanished from registry"),
        }
    }

    fn park(&mut self, v: VertexId, id: CarId) {
        if let Some(q) = self.net.parked_mut(v) {
            q.push_back(id);
        }
    }

    // ── Unlock ──────────────────────────────────────────────────

    fn unlock_all(&mut self) {
        for car in self.registry.cars_mut() {
            car.locked = false;
        }
    }
}
