//! Entity lifecycle: id allocation, lookup, and destruction.

use indexmap::IndexMap;
use transit_core::{CarId, EntityError, EntityKind, PassengerId};
use transit_net::Route;

use crate::entity::{Car, CarOptions, CarPosition, Passenger, PassengerPosition};

/// Spawn and destroy totals per entity kind.
///
/// `spawned - destroyed` always equals the number of live entities, which
/// makes these the basis for conservation checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EntityCounters {
    /// Cars ever spawned.
    pub cars_spawned: u64,
    /// Cars destroyed on arrival.
    pub cars_destroyed: u64,
    /// Passengers ever spawned.
    pub passengers_spawned: u64,
    /// Passengers destroyed at their destination.
    pub passengers_destroyed: u64,
}

impl EntityCounters {
    /// Cars currently alive.
    pub fn cars_live(&self) -> u64 {
        self.cars_spawned - self.cars_destroyed
    }

    /// Passengers currently alive.
    pub fn passengers_live(&self) -> u64 {
        self.passengers_spawned - self.passengers_destroyed
    }
}

/// Owner of every live car and passenger.
///
/// Ids come from two independent counters starting at 0 and are never
/// reused. Entities iterate in spawn order; that order is for reporting
/// only, since movement and transfer follow queue order.
///
/// The registry does not touch network queues. Callers place a freshly
/// spawned entity's id into the queue matching its position.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    cars: IndexMap<CarId, Car>,
    passengers: IndexMap<PassengerId, Passenger>,
    counters: EntityCounters,
}

impl EntityRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a car and return its id.
    pub fn spawn_car(
        &mut self,
        route: Route,
        capacity: usize,
        position: CarPosition,
        options: CarOptions,
    ) -> CarId {
        let id = CarId(self.counters.cars_spawned);
        self.counters.cars_spawned += 1;
        self.cars.insert(
            id,
            Car {
                id,
                route,
                position,
                capacity,
                onboard: Default::default(),
                locked: false,
                repeat: options.repeat,
            },
        );
        id
    }

    /// Create a passenger and return its id.
    pub fn spawn_passenger(&mut self, route: Route, position: PassengerPosition) -> PassengerId {
        let id = PassengerId(self.counters.passengers_spawned);
        self.counters.passengers_spawned += 1;
        self.passengers.insert(id, Passenger { id, route, position });
        id
    }

    /// Remove a car, returning its final state.
    pub fn destroy_car(&mut self, id: CarId) -> Result<Car, EntityError> {
        let car = self.cars.shift_remove(&id).ok_or_else(|| unknown_car(id))?;
        self.counters.cars_destroyed += 1;
        Ok(car)
    }

    /// Remove a passenger, returning its final state.
    pub fn destroy_passenger(&mut self, id: PassengerId) -> Result<Passenger, EntityError> {
        let passenger = self
            .passengers
            .shift_remove(&id)
            .ok_or_else(|| unknown_passenger(id))?;
        self.counters.passengers_destroyed += 1;
        Ok(passenger)
    }

    /// Look up a live car.
    pub fn car(&self, id: CarId) -> Result<&Car, EntityError> {
        self.cars.get(&id).ok_or_else(|| unknown_car(id))
    }

    /// Look up a live car for mutation.
    pub fn car_mut(&mut self, id: CarId) -> Result<&mut Car, EntityError> {
        self.cars.get_mut(&id).ok_or_else(|| unknown_car(id))
    }

    /// Look up a live passenger.
    pub fn passenger(&self, id: PassengerId) -> Result<&Passenger, EntityError> {
        self.passengers.get(&id).ok_or_else(|| unknown_passenger(id))
    }

    /// Look up a live passenger for mutation.
    pub fn passenger_mut(&mut self, id: PassengerId) -> Result<&mut Passenger, EntityError> {
        self.passengers
            .get_mut(&id)
            .ok_or_else(|| unknown_passenger(id))
    }

    /// Live cars in spawn order.
    pub fn cars(&self) -> impl Iterator<Item = &Car> {
        self.cars.values()
    }

    /// Live passengers in spawn order.
    pub fn passengers(&self) -> impl Iterator<Item = &Passenger> {
        self.passengers.values()
    }

    /// Number of live cars.
    pub fn car_count(&self) -> usize {
        self.cars.len()
    }

    /// Number of live passengers.
    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }

    /// Spawn and destroy totals.
    pub fn counters(&self) -> EntityCounters {
        self.counters
    }

    pub(crate) fn cars_mut(&mut self) -> impl Iterator<Item = &mut Car> {
        self.cars.values_mut()
    }
}

fn unknown_car(id: CarId) -> EntityError {
    EntityError::UnknownEntity {
        kind: EntityKind::Car,
        id: id.0,
    }
}

fn unknown_passenger(id: PassengerId) -> EntityError {
    EntityError::UnknownEntity {
        kind: EntityKind::Passenger,
        id: id.0,
    }
}
