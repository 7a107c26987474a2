//! Cars and passengers.
//!
//! Entities are plain records owned by the
//! [`EntityRegistry`](crate::registry::EntityRegistry). Their position
//! mirrors which network queue holds their id; the movement and transfer
//! passes keep the two in agreement.

use std::collections::VecDeque;

use transit_core::{CarId, EdgeKey, PassengerId, VertexId};
use transit_net::Route;

/// Where a car is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CarPosition {
    /// In the parked queue of a vertex.
    Parked(VertexId),
    /// In the transit queue of an edge.
    InTransit(EdgeKey),
}

impl CarPosition {
    /// The vertex the car is at, or the one it is heading into.
    pub fn vertex(self) -> VertexId {
        match self {
            Self::Parked(v) => v,
            Self::InTransit(edge) => edge.target,
        }
    }
}

/// Where a passenger is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassengerPosition {
    /// In the waiting queue of a vertex.
    Waiting(VertexId),
    /// In the onboard queue of a car.
    Aboard(CarId),
}

/// Per-car behaviour switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CarOptions {
    /// Re-append each consumed hop to the tail of the route, so the car
    /// loops its route forever instead of arriving.
    pub repeat: bool,
}

impl CarOptions {
    /// Options for a car that loops its route.
    pub fn repeating() -> Self {
        Self { repeat: true }
    }
}

/// A vehicle carrying passengers along a route.
#[derive(Clone, Debug)]
pub struct Car {
    pub(crate) id: CarId,
    pub(crate) route: Route,
    pub(crate) position: CarPosition,
    pub(crate) capacity: usize,
    pub(crate) onboard: VecDeque<PassengerId>,
    pub(crate) locked: bool,
    pub(crate) repeat: bool,
}

impl Car {
    /// The car's id.
    pub fn id(&self) -> CarId {
        self.id
    }

    /// Hops still to be taken. Excludes the current position.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Current position.
    pub fn position(&self) -> CarPosition {
        self.position
    }

    /// Maximum number of passengers aboard.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Passengers aboard, in boarding order.
    pub fn onboard(&self) -> &VecDeque<PassengerId> {
        &self.onboard
    }

    /// Whether another passenger fits.
    pub fn has_room(&self) -> bool {
        self.onboard.len() < self.capacity
    }

    /// Whether the car already moved during the current step.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether the car loops its route.
    pub fn is_repeating(&self) -> bool {
        self.repeat
    }

    /// The next vertex the car will stop at.
    ///
    /// For a car in transit this is the edge target. A parked car with an
    /// exhausted route reports its current vertex.
    pub fn next_stop(&self) -> VertexId {
        match self.position {
            CarPosition::InTransit(edge) => edge.target,
            CarPosition::Parked(v) => self.route.next_hop().unwrap_or(v),
        }
    }

    /// The final vertex of the route, or the current one if exhausted.
    pub fn final_stop(&self) -> VertexId {
        self.route.last().unwrap_or_else(|| self.position.vertex())
    }
}

/// A rider travelling along a route by boarding cars.
#[derive(Clone, Debug)]
pub struct Passenger {
    pub(crate) id: PassengerId,
    pub(crate) route: Route,
    pub(crate) position: PassengerPosition,
}

impl Passenger {
    /// The passenger's id.
    pub fn id(&self) -> PassengerId {
        self.id
    }

    /// Stops still to be reached. Excludes the current position.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Current position.
    pub fn position(&self) -> PassengerPosition {
        self.position
    }

    /// The vertex the passenger waits at, if not aboard.
    pub fn waiting_at(&self) -> Option<VertexId> {
        match self.position {
            PassengerPosition::Waiting(v) => Some(v),
            PassengerPosition::Aboard(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(route: &[u32], position: CarPosition) -> Car {
        Car {
            id: CarId(0),
            route: route.iter().map(|&v| VertexId(v)).collect(),
            position,
            capacity: 2,
            onboard: VecDeque::new(),
            locked: false,
            repeat: false,
        }
    }

    #[test]
    fn parked_car_reports_route_hops() {
        let c = car(&[1, 2], CarPosition::Parked(VertexId(0)));
        assert_eq!(c.next_stop(), VertexId(1));
        assert_eq!(c.final_stop(), VertexId(2));
    }

    #[test]
    fn exhausted_route_falls_back_to_current_vertex() {
        let c = car(&[], CarPosition::Parked(VertexId(4)));
        assert_eq!(c.next_stop(), VertexId(4));
        assert_eq!(c.final_stop(), VertexId(4));
    }

    #[test]
    fn car_in_transit_stops_at_edge_target() {
        let edge = EdgeKey::new(VertexId(0), VertexId(1));
        let c = car(&[], CarPosition::InTransit(edge));
        assert_eq!(c.next_stop(), VertexId(1));
        assert_eq!(c.final_stop(), VertexId(1));
    }

    #[test]
    fn room_tracks_capacity() {
        let mut c = car(&[], CarPosition::Parked(VertexId(0)));
        assert!(c.has_room());
        c.onboard.extend([PassengerId(0), PassengerId(1)]);
        assert!(!c.has_room());
        c.capacity = 0;
        c.onboard.clear();
        assert!(!c.has_room());
    }
}
