//! Property tests: structural invariants hold after every step.

use std::collections::HashMap;

use proptest::prelude::*;
use transit_core::{CarId, PassengerId, VertexId};
use transit_engine::{
    CarOptions, CarPosition, EngineConfig, PassengerPosition, RoutePlan, SimulationEngine,
};
use transit_test_utils::{fixtures, MemoryLog};

#[derive(Clone, Debug)]
enum Op {
    Car { at: u32, to: u32, capacity: usize, repeat: bool },
    Passenger { at: u32, to: u32 },
    Step,
    Transfer,
}

const SIDE: u32 = 3;
const VERTICES: u32 = SIDE * SIDE;

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => (0..VERTICES, 0..VERTICES, 0usize..4, any::<bool>())
            .prop_map(|(at, to, capacity, repeat)| Op::Car { at, to, capacity, repeat }),
        1 => (0..VERTICES, 0..VERTICES).prop_map(|(at, to)| Op::Passenger { at, to }),
        3 => Just(Op::Step),
        1 => Just(Op::Transfer),
    ]
}

fn engine(seed: u64) -> SimulationEngine {
    let config = EngineConfig::new(fixtures::grid(SIDE, SIDE))
        .with_event_log(MemoryLog::new())
        .with_seed(seed);
    SimulationEngine::new(config).unwrap()
}

fn apply(engine: &mut SimulationEngine, op: &Op) {
    match *op {
        Op::Car { at, to, capacity, repeat } => {
            let plan = if repeat {
                // A loop out and back so every recycled hop stays adjacent.
                match engine.route(at, to) {
                    Ok(out) if out.len() > 1 => {
                        let mut stops = out.to_vec();
                        let back: Vec<VertexId> = stops.iter().rev().skip(1).copied().collect();
                        stops.extend(back);
                        RoutePlan::through(stops)
                    }
                    _ => RoutePlan::to(to),
                }
            } else {
                RoutePlan::to(to)
            };
            engine
                .spawn_car(at, capacity, plan, CarOptions { repeat })
                .unwrap();
        }
        Op::Passenger { at, to } => {
            engine.spawn_passenger(at, RoutePlan::to(to)).unwrap();
        }
        Op::Step => {
            let result = engine.step();
            assert!(result.errors.is_empty(), "grid routes never get stuck");
        }
        Op::Transfer => {
            engine.transfer(None).unwrap();
        }
    }
}

/// Every live car sits in exactly one queue matching its position.
fn check_car_containers(engine: &SimulationEngine) -> Result<(), TestCaseError> {
    let net = engine.network();
    let mut seen: HashMap<CarId, CarPosition> = HashMap::new();
    for v in net.vertex_ids() {
        for &c in net.parked(v).unwrap() {
            let fresh = seen.insert(c, CarPosition::Parked(v)).is_none();
            prop_assert!(fresh, "car {} queued twice", c);
        }
    }
    for key in net.edge_keys() {
        for &c in net.transit(key).unwrap() {
            let fresh = seen.insert(c, CarPosition::InTransit(key)).is_none();
            prop_assert!(fresh, "car {} queued twice", c);
        }
    }
    prop_assert_eq!(seen.len(), engine.registry().car_count());
    for car in engine.registry().cars() {
        prop_assert_eq!(seen.get(&car.id()), Some(&car.position()));
        prop_assert!(car.onboard().len() <= car.capacity());
    }
    Ok(())
}

/// Every live passenger sits in exactly one waiting or onboard queue.
fn check_passenger_containers(engine: &SimulationEngine) -> Result<(), TestCaseError> {
    let net = engine.network();
    let mut seen: HashMap<PassengerId, PassengerPosition> = HashMap::new();
    for v in net.vertex_ids() {
        for &p in net.waiting(v).unwrap() {
            prop_assert!(seen.insert(p, PassengerPosition::Waiting(v)).is_none());
        }
    }
    for car in engine.registry().cars() {
        for &p in car.onboard() {
            prop_assert!(seen.insert(p, PassengerPosition::Aboard(car.id())).is_none());
        }
    }
    prop_assert_eq!(seen.len(), engine.registry().passenger_count());
    for passenger in engine.registry().passengers() {
        prop_assert_eq!(seen.get(&passenger.id()), Some(&passenger.position()));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn containers_and_capacity_hold_every_step(
        seed in any::<u64>(),
        ops in prop::collection::vec(arb_op(), 1..80),
    ) {
        let mut engine = engine(seed);
        for op in &ops {
            apply(&mut engine, op);
            check_car_containers(&engine)?;
            check_passenger_containers(&engine)?;
        }
    }

    #[test]
    fn routes_only_shrink(
        seed in any::<u64>(),
        ops in prop::collection::vec(arb_op(), 1..80),
    ) {
        let mut engine = engine(seed);
        for op in &ops {
            let before: HashMap<CarId, (usize, bool)> = engine
                .registry()
                .cars()
                .map(|c| (c.id(), (c.route().len(), c.is_repeating())))
                .collect();
            let riders: HashMap<PassengerId, usize> = engine
                .registry()
                .passengers()
                .map(|p| (p.id(), p.route().len()))
                .collect();
            apply(&mut engine, op);
            for car in engine.registry().cars() {
                if let Some(&(len, repeat)) = before.get(&car.id()) {
                    if repeat {
                        prop_assert_eq!(car.route().len(), len);
                    } else {
                        prop_assert!(car.route().len() <= len);
                    }
                }
            }
            for p in engine.registry().passengers() {
                if let Some(&len) = riders.get(&p.id()) {
                    prop_assert!(p.route().len() <= len, "passenger {} route grew", p.id());
                }
            }
        }
    }

    #[test]
    fn cars_are_conserved(
        seed in any::<u64>(),
        ops in prop::collection::vec(arb_op(), 1..80),
    ) {
        let mut engine = engine(seed);
        let mut completed = 0u64;
        for op in &ops {
            if let Op::Step = op {
                let result = engine.step();
                completed += u64::from(result.metrics.cars_completed);
            } else {
                apply(&mut engine, op);
            }
            let counters = engine.counters();
            let live = engine.registry().car_count() as u64;
            prop_assert_eq!(counters.cars_spawned, live + completed);
            prop_assert_eq!(counters.cars_destroyed, completed);
        }
    }
}
