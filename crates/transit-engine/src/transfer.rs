//! Passenger transfers between parked cars and vertex waiting queues.
//!
//! At each target vertex, in order:
//!
//! 1. **Ejection.** Passengers of cars that ended their route here are
//!    dropped off unconditionally. Then each parked car drops off every
//!    passenger whose next stop no longer lies on the car's remaining
//!    route. A rider whose stop the car will pass again stays aboard.
//! 2. **Arrival check.** Waiting passengers with nothing left to visit
//!    are complete and destroyed.
//! 3. **Boarding.** Each remaining waiting passenger boards the first
//!    parked car with room whose remaining route contains the passenger's
//!    next stop. Passengers without a match keep waiting.

use tracing::trace;
use transit_core::{CarId, EntityKind, EventLog, PassengerId, VertexId};
use transit_net::Network;

use crate::entity::PassengerPosition;
use crate::movement::ArrivedCar;
use crate::place;
use crate::registry::EntityRegistry;

/// What a transfer pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferOutcome {
    /// Passengers moved from a car into a waiting queue.
    pub ejected: u32,
    /// Passengers moved from a waiting queue into a car.
    pub boarded: u32,
    /// Passengers that reached their destination and were destroyed.
    pub completed: Vec<PassengerId>,
}

/// Runs one transfer pass over borrowed simulation state.
pub struct TransferCoordinator<'a> {
    net: &'a mut Network,
    registry: &'a mut EntityRegistry,
    log: &'a dyn EventLog,
}

impl<'a> TransferCoordinator<'a> {
    /// Borrow the state one pass needs.
    pub fn new(
        net: &'a mut Network,
        registry: &'a mut EntityRegistry,
        log: &'a dyn EventLog,
    ) -> Self {
        Self { net, registry, log }
    }

    /// Transfer passengers at each of `targets`, in the given order.
    ///
    /// `arrived` holds cars destroyed by the movement pass of the same
    /// step. Their passengers are ejected at the car's vertex; a record for
    /// a vertex missing from `targets` is ejected after the targets are
    /// done, so no passenger is ever left without a container.
    pub fn run(mut self, targets: &[VertexId], mut arrived: Vec<ArrivedCar>) -> TransferOutcome {
        let mut outcome = TransferOutcome::default();
        for &v in targets {
            let (here, rest): (Vec<_>, Vec<_>) = arrived.into_iter().partition(|a| a.vertex == v);
            arrived = rest;
            for record in here {
                self.eject_arrived(record, &mut outcome);
            }
            self.eject_parked(v, &mut outcome);
            self.complete_arrivals(v, &mut outcome);
            self.board(v, &mut outcome);
        }
        for record in arrived {
            self.eject_arrived(record, &mut outcome);
        }
        outcome
    }

    // ── Ejection ────────────────────────────────────────────────

    fn eject_arrived(&mut self, record: ArrivedCar, outcome: &mut TransferOutcome) {
        let ejected: Vec<PassengerId> = record
            .passengers
            .into_iter()
            .filter(|&p| self.drop_off(record.vertex, record.car, p))
            .collect();
        outcome.ejected += ejected.len() as u32;
        self.summarize(record.car, &ejected);
    }

    fn eject_parked(&mut self, v: VertexId, outcome: &mut TransferOutcome) {
        let cars: Vec<CarId> = self
            .net
            .parked(v)
            .map(|q| q.iter().copied().collect())
            .unwrap_or_default();
        for car_id in cars {
            let Ok(car) = self.registry.car(car_id) else {
                continue;
            };
            let route = &car.route;
            let (staying, leaving): (Vec<PassengerId>, Vec<PassengerId>) =
                car.onboard.iter().copied().partition(|&p| {
                    match self.registry.passenger(p).ok().and_then(|x| x.route.next_hop()) {
                        Some(hop) => route.contains(hop),
                        None => false,
                    }
                });
            if let Ok(car) = self.registry.car_mut(car_id) {
                car.onboard = staying.into();
            }
            let ejected: Vec<PassengerId> = leaving
                .into_iter()
                .filter(|&p| self.drop_off(v, car_id, p))
                .collect();
            outcome.ejected += ejected.len() as u32;
            self.summarize(car_id, &ejected);
        }
    }

    /// Move `p` from `car` into the waiting queue at `v`, consuming its
    /// next stop if that stop is `v`. Returns whether `p` existed.
    fn drop_off(&mut self, v: VertexId, car: CarId, p: PassengerId) -> bool {
        let Ok(passenger) = self.registry.passenger_mut(p) else {
            return false;
        };
        passenger.position = PassengerPosition::Waiting(v);
        if passenger.route.next_hop() == Some(v) {
            passenger.route.take_next_hop();
        }
        if let Some(q) = self.net.waiting_mut(v) {
            q.push_back(p);
        }
        trace!(passenger = p.0, car = car.0, vertex = %v, "ejected");
        self.log
            .log(&format!("ejected from car {car}"), EntityKind::Passenger, p.0);
        true
    }

    fn summarize(&self, car: CarId, ejected: &[PassengerId]) {
        if ejected.is_empty() {
            return;
        }
        let ids: Vec<u64> = ejected.iter().map(|p| p.0).collect();
        self.log
            .log(&format!("ejecting passengers: {ids:?}"), EntityKind::Car, car.0);
    }

    // ── Arrival check ───────────────────────────────────────────

    fn complete_arrivals(&mut self, v: VertexId, outcome: &mut TransferOutcome) {
        let pending = self.net.waiting(v).map_or(0, |q| q.len());
        for _ in 0..pending {
            let Some(p) = self.net.waiting_mut(v).and_then(|q| q.pop_front()) else {
                break;
            };
            let Ok(passenger) = self.registry.passenger_mut(p) else {
                continue;
            };
            if passenger.route.next_hop() == Some(v) {
                passenger.route.take_next_hop();
            }
            if !passenger.route.is_empty() {
                if let Some(q) = self.net.waiting_mut(v) {
                    q.push_back(p);
                }
                continue;
            }
            self.log.log(
                &format!("i am at the destination {}", place(self.net, v)),
                EntityKind::Passenger,
                p.0,
            );
            if self.registry.destroy_passenger(p).is_ok() {
                outcome.completed.push(p);
            }
        }
    }

    // ── Boarding ────────────────────────────────────────────────

    fn board(&mut self, v: VertexId, outcome: &mut TransferOutcome) {
        let pending = self.net.waiting(v).map_or(0, |q| q.len());
        for _ in 0..pending {
            let Some(p) = self.net.waiting_mut(v).and_then(|q| q.pop_front()) else {
                break;
            };
            match self.first_fit(v, p) {
                Some(car_id) => {
                    if let Ok(car) = self.registry.car_mut(car_id) {
                        car.onboard.push_back(p);
                    }
                    if let Ok(passenger) = self.registry.passenger_mut(p) {
                        passenger.position = PassengerPosition::Aboard(car_id);
                    }
                    outcome.boarded += 1;
                    trace!(passenger = p.0, car = car_id.0, vertex = %v, "boarded");
                    self.log.log(
                        &format!("mounting car {car_id} at {}", place(self.net, v)),
                        EntityKind::Passenger,
                        p.0,
                    );
                }
                None => {
                    if let Some(q) = self.net.waiting_mut(v) {
                        q.push_back(p);
                    }
                }
            }
        }
    }

    /// First parked car at `v`, in queue order, with room for `p` and a
    /// remaining route through `p`'s next stop.
    fn first_fit(&self, v: VertexId, p: PassengerId) -> Option<CarId> {
        let next = self.registry.passenger(p).ok()?.route.next_hop()?;
        self.net.parked(v)?.iter().copied().find(|&c| {
            self.registry
                .car(c)
                .is_ok_and(|car| car.has_room() && car.route.contains(next))
        })
    }
}
