//! The simulation engine facade.
//!
//! [`SimulationEngine`] owns the network, the entity registry, and the
//! event log. Each call to [`step()`](SimulationEngine::step) runs one
//! indivisible tick: the movement pass, then a transfer pass over every
//! vertex, then the tick counter advances.
//!
//! # Ownership model
//!
//! `SimulationEngine` is [`Send`] but not [`Sync`]. All mutating methods
//! take `&mut self`, so no caller can touch a queue while a step runs and
//! entities spawned between steps first take part in the next one.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use transit_core::{
    CarId, EdgeKey, EntityKind, EventLog, PassengerId, StepError, TickId, VertexId, VertexRef,
};
use transit_net::{Network, Route};

use crate::config::{ConfigError, EngineConfig, Placement};
use crate::entity::{Car, CarOptions, CarPosition, Passenger, PassengerPosition};
use crate::error::EngineError;
use crate::metrics::StepMetrics;
use crate::movement::MovementScheduler;
use crate::place;
use crate::plan::RoutePlan;
use crate::registry::{EntityCounters, EntityRegistry};
use crate::stats::{StatsBuilder, StatsKind, StatsTable};
use crate::transfer::{TransferCoordinator, TransferOutcome};

// Fails to compile if any field stops being Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<SimulationEngine>();
    }
};

// ── StepResult ──────────────────────────────────────────────────

/// Result of one [`SimulationEngine::step()`].
#[derive(Clone, Debug)]
pub struct StepResult {
    /// The tick counter after this step.
    pub tick: TickId,
    /// Per-car faults. The step still completed for every other entity.
    pub errors: Vec<StepError>,
    /// Counts and timings for this step.
    pub metrics: StepMetrics,
}

// ── SimulationEngine ────────────────────────────────────────────

/// Single-threaded, lockstep simulation of cars and passengers.
///
/// # Example
///
/// ```
/// use transit_core::TracingLog;
/// use transit_engine::{CarOptions, EngineConfig, RoutePlan, SimulationEngine};
/// use transit_net::NetworkBuilder;
///
/// let network = NetworkBuilder::new()
///     .vertices(["A", "B", "C"])
///     .line(["A", "B", "C"])
///     .build()
///     .unwrap();
/// let config = EngineConfig::new(network).with_event_log(TracingLog);
/// let mut engine = SimulationEngine::new(config).unwrap();
///
/// let car = engine
///     .spawn_car("A", 4, RoutePlan::to("C"), CarOptions::default())
///     .unwrap();
/// engine.spawn_passenger("A", RoutePlan::to("C")).unwrap();
///
/// // Board before the car leaves A.
/// engine.transfer(None).unwrap();
/// for _ in 0..5 {
///     let result = engine.step();
///     assert!(result.errors.is_empty());
/// }
/// assert!(engine.car(car).is_err());
/// assert_eq!(engine.counters().passengers_live(), 0);
/// ```
pub struct SimulationEngine {
    network: Network,
    registry: EntityRegistry,
    log: Box<dyn EventLog>,
    rng: ChaCha8Rng,
    seed: u64,
    tick: TickId,
    last_metrics: StepMetrics,
}

impl SimulationEngine {
    /// Create an engine from an [`EngineConfig`].
    ///
    /// Validates the configuration, then applies its initial placements in
    /// order. Consumes the config.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let EngineConfig {
            network,
            event_log,
            seed,
            occupancy,
        } = config;
        let log = event_log.ok_or(ConfigError::MissingEventLog)?;
        let mut engine = Self {
            network,
            registry: EntityRegistry::new(),
            log,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            tick: TickId::default(),
            last_metrics: StepMetrics::default(),
        };
        for placement in occupancy {
            engine.apply(placement).map_err(ConfigError::Placement)?;
        }
        debug!(
            vertices = engine.network.vertex_count(),
            edges = engine.network.edge_count(),
            cars = engine.registry.car_count(),
            passengers = engine.registry.passenger_count(),
            seed,
            "engine ready"
        );
        Ok(engine)
    }

    fn apply(&mut self, placement: Placement) -> Result<(), EngineError> {
        match placement {
            Placement::Passengers { at, plan, amount } => {
                self.spawn_passengers(at, &plan, amount)?;
            }
            Placement::Cars {
                at,
                capacity,
                plan,
                options,
                amount,
            } => {
                self.spawn_cars(at, capacity, &plan, options, amount)?;
            }
            Placement::InTransit {
                from,
                to,
                capacity,
                plan,
                options,
            } => {
                self.place_car_in_transit(from, to, capacity, plan, options)?;
            }
        }
        Ok(())
    }

    // ── Spawning ────────────────────────────────────────────────

    /// Spawn a car parked at `target`.
    ///
    /// The car joins the back of the vertex's parked queue and moves from
    /// the next step on.
    pub fn spawn_car(
        &mut self,
        target: impl Into<VertexRef>,
        capacity: usize,
        plan: RoutePlan,
        options: CarOptions,
    ) -> Result<CarId, EngineError> {
        let at = self.network.resolve(&target.into())?;
        self.spawn_car_at(at, capacity, &plan, options)
    }

    /// Spawn `amount` cars at `target`, each with its own route from `plan`.
    ///
    /// Stops at the first failure; cars spawned before it remain.
    pub fn spawn_cars(
        &mut self,
        target: impl Into<VertexRef>,
        capacity: usize,
        plan: &RoutePlan,
        options: CarOptions,
        amount: u32,
    ) -> Result<Vec<CarId>, EngineError> {
        let at = self.network.resolve(&target.into())?;
        (0..amount)
            .map(|_| self.spawn_car_at(at, capacity, plan, options))
            .collect()
    }

    fn spawn_car_at(
        &mut self,
        at: VertexId,
        capacity: usize,
        plan: &RoutePlan,
        options: CarOptions,
    ) -> Result<CarId, EngineError> {
        let route = plan.resolve(&self.network, at, &mut self.rng)?;
        let destination = route.last().unwrap_or(at);
        let id = self
            .registry
            .spawn_car(route, capacity, CarPosition::Parked(at), options);
        if let Some(q) = self.network.parked_mut(at) {
            q.push_back(id);
        }
        self.log_created(EntityKind::Car, id.0, at, destination);
        Ok(id)
    }

    /// Spawn a car already travelling on the edge `from → to`.
    ///
    /// Its route is planned from `to`, where it parks on the next step.
    pub fn place_car_in_transit(
        &mut self,
        from: impl Into<VertexRef>,
        to: impl Into<VertexRef>,
        capacity: usize,
        plan: RoutePlan,
        options: CarOptions,
    ) -> Result<CarId, EngineError> {
        let from = self.network.resolve(&from.into())?;
        let to = self.network.resolve(&to.into())?;
        let edge = EdgeKey::new(from, to);
        if !self.network.has_edge(from, to) {
            return Err(EngineError::NoSuchEdge { from, to });
        }
        let route = plan.resolve(&self.network, to, &mut self.rng)?;
        let destination = route.last().unwrap_or(to);
        let id = self
            .registry
            .spawn_car(route, capacity, CarPosition::InTransit(edge), options);
        if let Some(q) = self.network.transit_mut(edge) {
            q.push_back(id);
        }
        self.log_created(EntityKind::Car, id.0, from, destination);
        Ok(id)
    }

    /// Spawn a passenger waiting at `target`.
    pub fn spawn_passenger(
        &mut self,
        target: impl Into<VertexRef>,
        plan: RoutePlan,
    ) -> Result<PassengerId, EngineError> {
        let at = self.network.resolve(&target.into())?;
        self.spawn_passenger_at(at, &plan)
    }

    /// Spawn `amount` passengers at `target`, each with its own route.
    ///
    /// Stops at the first failure; passengers spawned before it remain.
    pub fn spawn_passengers(
        &mut self,
        target: impl Into<VertexRef>,
        plan: &RoutePlan,
        amount: u32,
    ) -> Result<Vec<PassengerId>, EngineError> {
        let at = self.network.resolve(&target.into())?;
        (0..amount).map(|_| self.spawn_passenger_at(at, plan)).collect()
    }

    fn spawn_passenger_at(
        &mut self,
        at: VertexId,
        plan: &RoutePlan,
    ) -> Result<PassengerId, EngineError> {
        let route = plan.resolve(&self.network, at, &mut self.rng)?;
        let destination = route.last().unwrap_or(at);
        let id = self
            .registry
            .spawn_passenger(route, PassengerPosition::Waiting(at));
        if let Some(q) = self.network.waiting_mut(at) {
            q.push_back(id);
        }
        self.log_created(EntityKind::Passenger, id.0, at, destination);
        Ok(id)
    }

    fn log_created(&self, kind: EntityKind, id: u64, at: VertexId, destination: VertexId) {
        self.log.log(
            &format!(
                "created at {} with destination {}",
                place(&self.network, at),
                place(&self.network, destination)
            ),
            kind,
            id,
        );
    }

    // ── Stepping ────────────────────────────────────────────────

    /// Run one tick and unlock every car afterwards.
    pub fn step(&mut self) -> StepResult {
        self.step_with(true)
    }

    /// Run one tick: movement, transfer at every vertex, tick increment.
    ///
    /// With `unlock == false` cars that moved this tick stay locked and
    /// will not move on the next one.
    pub fn step_with(&mut self, unlock: bool) -> StepResult {
        let step_start = Instant::now();

        let movement_start = Instant::now();
        let movement =
            MovementScheduler::new(&mut self.network, &mut self.registry, &*self.log).run(unlock);
        let movement_us = movement_start.elapsed().as_micros() as u64;

        let transfer_start = Instant::now();
        let targets: Vec<VertexId> = self.network.vertex_ids().collect();
        let cars_completed = movement.arrived.len() as u32;
        let transfer = TransferCoordinator::new(&mut self.network, &mut self.registry, &*self.log)
            .run(&targets, movement.arrived);
        let transfer_us = transfer_start.elapsed().as_micros() as u64;

        self.tick = TickId(self.tick.0 + 1);
        let metrics = StepMetrics {
            total_us: step_start.elapsed().as_micros() as u64,
            movement_us,
            transfer_us,
            departures: movement.departures,
            arrivals_at_vertices: movement.arrivals_at_vertices,
            cars_completed,
            stuck_cars: movement.errors.len() as u32,
            passengers_ejected: transfer.ejected,
            passengers_boarded: transfer.boarded,
            passengers_completed: transfer.completed.len() as u32,
        };
        debug!(
            tick = self.tick.0,
            departures = metrics.departures,
            arrivals = metrics.arrivals_at_vertices,
            cars_completed = metrics.cars_completed,
            stuck = metrics.stuck_cars,
            boarded = metrics.passengers_boarded,
            completed = metrics.passengers_completed,
            "step complete"
        );
        self.last_metrics = metrics.clone();
        StepResult {
            tick: self.tick,
            errors: movement.errors,
            metrics,
        }
    }

    /// Run a transfer pass outside of a step.
    ///
    /// `None` targets every vertex in index order. Every reference is
    /// resolved before anything moves, so an unknown target fails the whole
    /// call and leaves the simulation unchanged.
    pub fn transfer(
        &mut self,
        targets: Option<&[VertexRef]>,
    ) -> Result<TransferOutcome, EngineError> {
        let targets: Vec<VertexId> = match targets {
            Some(refs) => self.network.resolve_all(refs)?,
            None => self.network.vertex_ids().collect(),
        };
        let coordinator =
            TransferCoordinator::new(&mut self.network, &mut self.registry, &*self.log);
        Ok(coordinator.run(&targets, Vec::new()))
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Shortest route between two vertices, both endpoints included.
    pub fn route(
        &self,
        from: impl Into<VertexRef>,
        to: impl Into<VertexRef>,
    ) -> Result<Route, EngineError> {
        let from = self.network.resolve(&from.into())?;
        let to = self.network.resolve(&to.into())?;
        Ok(self.network.route(from, to)?)
    }

    /// A statistics table over the current state.
    pub fn stats(&self, kind: StatsKind, human_readable: bool) -> StatsTable {
        StatsBuilder::new(&self.network, &self.registry, human_readable).build(kind)
    }

    /// Look up a live car.
    pub fn car(&self, id: CarId) -> Result<&Car, EngineError> {
        Ok(self.registry.car(id)?)
    }

    /// Look up a live passenger.
    pub fn passenger(&self, id: PassengerId) -> Result<&Passenger, EngineError> {
        Ok(self.registry.passenger(id)?)
    }

    /// The network, including its queues.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The entity registry.
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Ticks completed so far.
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// Spawn and destroy totals.
    pub fn counters(&self) -> EntityCounters {
        self.registry.counters()
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// The seed random destinations are drawn from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl std::fmt::Debug for SimulationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationEngine")
            .field("current_tick", &self.tick)
            .field("seed", &self.seed)
            .field("cars", &self.registry.car_count())
            .field("passengers", &self.registry.passenger_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CAR_CAPACITY;
    use transit_core::EntityError;
    use transit_net::{NetError, NetworkBuilder};
    use transit_test_utils::{fixtures, MemoryLog};

    fn engine() -> (SimulationEngine, MemoryLog) {
        let log = MemoryLog::new();
        let config = EngineConfig::new(fixtures::abc_line()).with_event_log(log.clone());
        (SimulationEngine::new(config).unwrap(), log)
    }

    #[test]
    fn new_engine_starts_at_tick_zero() {
        let (engine, _) = engine();
        assert_eq!(engine.current_tick(), TickId(0));
        assert_eq!(engine.seed(), 0);
        assert_eq!(engine.registry().car_count(), 0);
    }

    #[test]
    fn step_advances_tick() {
        let (mut engine, _) = engine();
        assert_eq!(engine.step().tick, TickId(1));
        assert_eq!(engine.step().tick, TickId(2));
        assert_eq!(engine.current_tick(), TickId(2));
    }

    #[test]
    fn spawn_logs_origin_and_destination() {
        let (mut engine, log) = engine();
        let car = engine
            .spawn_car("A", 2, RoutePlan::to("C"), CarOptions::default())
            .unwrap();
        let p = engine.spawn_passenger(0u32, RoutePlan::to("B")).unwrap();
        assert!(log.contains(EntityKind::Car, car.0, "created at 0: A with destination 2: C"));
        assert!(log.contains(EntityKind::Passenger, p.0, "created at 0: A with destination 1: B"));
        assert_eq!(engine.network().parked(VertexId(0)).unwrap().front(), Some(&car));
        assert_eq!(engine.network().waiting(VertexId(0)).unwrap().front(), Some(&p));
    }

    #[test]
    fn spawn_at_unknown_vertex_fails_without_side_effects() {
        let (mut engine, log) = engine();
        match engine.spawn_passenger("Nowhere", RoutePlan::to("A")) {
            Err(EngineError::Net(NetError::UnknownVertex { .. })) => {}
            other => panic!("expected UnknownVertex, got {other:?}"),
        }
        assert_eq!(engine.counters().passengers_spawned, 0);
        assert!(log.is_empty());
    }

    #[test]
    fn spawn_many_yields_distinct_ids() {
        let (mut engine, _) = engine();
        let cars = engine
            .spawn_cars("B", DEFAULT_CAR_CAPACITY, &RoutePlan::Random, CarOptions::default(), 3)
            .unwrap();
        assert_eq!(cars, vec![CarId(0), CarId(1), CarId(2)]);
        let passengers = engine.spawn_passengers("B", &RoutePlan::to("A"), 2).unwrap();
        assert_eq!(passengers, vec![PassengerId(0), PassengerId(1)]);
        assert_eq!(engine.network().parked(VertexId(1)).unwrap().len(), 3);
    }

    #[test]
    fn car_in_transit_parks_on_first_step() {
        let (mut engine, _) = engine();
        let car = engine
            .place_car_in_transit("A", "B", 4, RoutePlan::to("C"), CarOptions::default())
            .unwrap();
        let result = engine.step();
        assert_eq!(result.metrics.arrivals_at_vertices, 1);
        assert_eq!(engine.car(car).unwrap().position(), CarPosition::Parked(VertexId(1)));
        assert_eq!(engine.car(car).unwrap().route().to_vec(), vec![VertexId(2)]);
    }

    #[test]
    fn transit_placement_requires_edge() {
        let (mut engine, _) = engine();
        match engine.place_car_in_transit("A", "C", 4, RoutePlan::to("C"), CarOptions::default()) {
            Err(EngineError::NoSuchEdge { from, to }) => {
                assert_eq!((from, to), (VertexId(0), VertexId(2)));
            }
            other => panic!("expected NoSuchEdge, got {other:?}"),
        }
    }

    #[test]
    fn unknown_transfer_target_changes_nothing() {
        let (mut engine, _) = engine();
        engine
            .spawn_car("A", 4, RoutePlan::to("C"), CarOptions::default())
            .unwrap();
        let p = engine.spawn_passenger("A", RoutePlan::to("C")).unwrap();
        let targets = [VertexRef::from("A"), VertexRef::from("Q")];
        assert!(engine.transfer(Some(targets.as_slice())).is_err());
        assert_eq!(
            engine.passenger(p).unwrap().position(),
            PassengerPosition::Waiting(VertexId(0))
        );
    }

    #[test]
    fn transfer_boards_at_selected_vertices() {
        let (mut engine, _) = engine();
        let car = engine
            .spawn_car("A", 4, RoutePlan::to("C"), CarOptions::default())
            .unwrap();
        let p = engine.spawn_passenger("A", RoutePlan::to("C")).unwrap();
        let outcome = engine.transfer(Some(&[VertexRef::from("A")][..])).unwrap();
        assert_eq!(outcome.boarded, 1);
        assert_eq!(engine.passenger(p).unwrap().position(), PassengerPosition::Aboard(car));
    }

    #[test]
    fn route_query_surfaces_unreachable() {
        let network = NetworkBuilder::new()
            .vertices(["A", "B"])
            .link("A", "B")
            .build()
            .unwrap();
        let config = EngineConfig::new(network).with_event_log(MemoryLog::new());
        let engine = SimulationEngine::new(config).unwrap();
        assert_eq!(engine.route("A", "B").unwrap().len(), 2);
        match engine.route("B", "A") {
            Err(EngineError::Net(NetError::RouteNotFound { .. })) => {}
            other => panic!("expected RouteNotFound, got {other:?}"),
        }
    }

    #[test]
    fn destroyed_car_lookup_is_an_entity_error() {
        let (mut engine, _) = engine();
        let car = engine
            .spawn_car("A", 1, RoutePlan::through(["A"]), CarOptions::default())
            .unwrap();
        engine.step();
        match engine.car(car) {
            Err(EngineError::Entity(EntityError::UnknownEntity { kind, id })) => {
                assert_eq!(kind, EntityKind::Car);
                assert_eq!(id, car.0);
            }
            other => panic!("expected UnknownEntity, got {other:?}"),
        }
        assert_eq!(engine.last_metrics().cars_completed, 1);
    }

    #[test]
    fn placements_apply_in_order() {
        let config = EngineConfig::new(fixtures::abc_line())
            .with_event_log(MemoryLog::new())
            .with_placement(Placement::Cars {
                at: "A".into(),
                capacity: 3,
                plan: RoutePlan::to("C"),
                options: CarOptions::default(),
                amount: 2,
            })
            .with_placement(Placement::Passengers {
                at: "B".into(),
                plan: RoutePlan::to("C"),
                amount: 4,
            });
        let engine = SimulationEngine::new(config).unwrap();
        assert_eq!(engine.counters().cars_spawned, 2);
        assert_eq!(engine.network().waiting(VertexId(1)).unwrap().len(), 4);
    }

    #[test]
    fn failing_placement_is_a_config_error() {
        let network = NetworkBuilder::new().vertices(["A", "B"]).build().unwrap();
        let config = EngineConfig::new(network)
            .with_event_log(MemoryLog::new())
            .with_placement(Placement::Passengers {
                at: "A".into(),
                plan: RoutePlan::to("B"),
                amount: 1,
            });
        match SimulationEngine::new(config) {
            Err(ConfigError::Placement(EngineError::Net(NetError::RouteNotFound { .. }))) => {}
            other => panic!("expected Placement(RouteNotFound), got {other:?}"),
        }
    }

    #[test]
    fn stats_reflect_engine_state() {
        let (mut engine, _) = engine();
        engine
            .spawn_car("A", 4, RoutePlan::to("C"), CarOptions::default())
            .unwrap();
        let table = engine.stats(StatsKind::Car, true);
        assert_eq!(table.get(0, "position"), Some("A"));
        assert_eq!(table.get(0, "next"), Some("B"));
        assert_eq!(table.get(0, "last"), Some("C"));
    }
}
