//! Benchmark profiles and utilities for the Transit simulation engine.
//!
//! Provides pre-built [`EngineConfig`] profiles for benchmarking and examples:
//!
//! - [`reference_profile`]: 20x20 grid (400 stations), 200 cars, 2000 passengers
//! - [`stress_profile`]: 64x64 grid (~4K stations), 2000 cars, 20K passengers
//! - [`spread_positions`]: deterministic spawn placement via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashSet;

use transit_core::{EntityKind, EventLog, VertexId};
use transit_engine::{CarOptions, EngineConfig, Placement, RoutePlan};
use transit_net::{Network, DEFAULT_WEIGHT};

/// [`EventLog`] that discards every event, so benchmarks time the
/// simulation rather than the sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLog;

impl EventLog for NullLog {
    fn log(&self, _message: &str, _kind: EntityKind, _id: u64) {}
}

/// Row-major grid with roads between orthogonal neighbours, all weight 1.
pub fn grid_network(rows: u32, cols: u32) -> Network {
    let mut net = Network::new();
    for _ in 0..rows * cols {
        net.add_vertex(None).unwrap();
    }
    let at = |r: u32, c: u32| VertexId(r * cols + c);
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                net.add_road(at(r, c), at(r, c + 1), DEFAULT_WEIGHT).unwrap();
            }
            if r + 1 < rows {
                net.add_road(at(r, c), at(r + 1, c), DEFAULT_WEIGHT).unwrap();
            }
        }
    }
    net
}

/// Build a reference benchmark profile: 20x20 grid (400 stations).
///
/// 20 depots each start 10 cars of capacity 8 and 100 passengers, all on
/// random destinations.
pub fn reference_profile(seed: u64) -> EngineConfig {
    profile(grid_network(20, 20), seed, 20, 10, 100)
}

/// Build a stress benchmark profile: 64x64 grid (~4K stations).
///
/// Same shape as [`reference_profile`] at 10x the entity count.
pub fn stress_profile(seed: u64) -> EngineConfig {
    profile(grid_network(64, 64), seed, 200, 10, 100)
}

fn profile(network: Network, seed: u64, depots: u16, cars: u32, passengers: u32) -> EngineConfig {
    let depots = spread_positions(network.vertex_count(), depots, seed);
    let mut config = EngineConfig::new(network)
        .with_event_log(NullLog)
        .with_seed(seed);
    for v in depots {
        config = config
            .with_placement(Placement::Cars {
                at: v.into(),
                capacity: 8,
                plan: RoutePlan::Random,
                options: CarOptions::default(),
                amount: cars,
            })
            .with_placement(Placement::Passengers {
                at: v.into(),
                plan: RoutePlan::Random,
                amount: passengers,
            });
    }
    config
}

/// Generate `n` distinct station ids spread over `vertex_count` stations.
///
/// Uses a simple hash of the seed with linear probing, so the same inputs
/// always give the same positions.
pub fn spread_positions(vertex_count: usize, n: u16, seed: u64) -> Vec<VertexId> {
    let mut positions = Vec::with_capacity(n as usize);
    let mut occupied = HashSet::new();

    for i in 0..n.min(vertex_count as u16) {
        let mut pos = (seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(i as u64 * 1442695040888963407)
            % vertex_count as u64) as usize;
        while !occupied.insert(pos) {
            pos = (pos + 1) % vertex_count;
        }
        positions.push(VertexId(pos as u32));
    }

    positions
}
