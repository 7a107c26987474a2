//! Transit Quickstart: a small simulation from scratch.
//!
//! Demonstrates:
//!   1. Building a named network with `NetworkBuilder`
//!   2. Configuring an engine with a seed and initial placements
//!   3. Boarding passengers before the first step
//!   4. Stepping, reading metrics, and printing stats tables
//!
//! Run with:
//!   RUST_LOG=info cargo run --example quickstart

use transit_core::TracingLog;
use transit_engine::{
    CarOptions, EngineConfig, Placement, RoutePlan, SimulationEngine, StatsKind, StatsTable,
};
use transit_net::NetworkBuilder;
use tracing_subscriber::EnvFilter;

// ─── Parameters ─────────────────────────────────────────────────

const SEED: u64 = 42;
const STEPS: u32 = 30;

// ─── Printing ───────────────────────────────────────────────────

fn print_table(title: &str, table: &StatsTable) {
    println!("\n{title}");
    println!("  {}", table.columns.join("\t"));
    for row in &table.rows {
        println!("  {}", row.join("\t"));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    // ─── 1. Network ─────────────────────────────────────────────
    //
    //   Harbour - Market - Station - Depot
    //                 \              /
    //                  ---- Park ----       (Market-Park-Depot is slower)

    let network = NetworkBuilder::new()
        .vertices(["Harbour", "Market", "Station", "Depot", "Park"])
        .line(["Harbour", "Market", "Station", "Depot"])
        .road("Market", "Park", 3)
        .road("Park", "Depot", 3)
        .build()?;

    // ─── 2. Engine ──────────────────────────────────────────────

    let config = EngineConfig::new(network)
        .with_event_log(TracingLog)
        .with_seed(SEED)
        .with_placement(Placement::Cars {
            at: "Harbour".into(),
            capacity: 4,
            plan: RoutePlan::through([
                "Harbour", "Market", "Station", "Depot", "Station", "Market", "Harbour",
            ]),
            options: CarOptions::repeating(),
            amount: 2,
        })
        .with_placement(Placement::Passengers {
            at: "Harbour".into(),
            plan: RoutePlan::Random,
            amount: 6,
        });
    let mut engine = SimulationEngine::new(config)?;

    engine.spawn_car("Park", 2, RoutePlan::to("Harbour"), CarOptions::default())?;
    engine.spawn_passengers("Depot", &RoutePlan::to("Harbour"), 3)?;

    println!("Route Harbour -> Depot: {}", engine.route("Harbour", "Depot")?);

    // ─── 3. Board before the first departure ────────────────────

    let boarded = engine.transfer(None)?;
    println!("Boarded before departure: {}", boarded.boarded);

    // ─── 4. Step ────────────────────────────────────────────────

    let mut delivered = 0;
    for _ in 0..STEPS {
        let result = engine.step();
        for error in &result.errors {
            println!("  tick {}: {error}", result.tick.0);
        }
        delivered += result.metrics.passengers_completed;
    }

    let counters = engine.counters();
    println!(
        "\nAfter {} ticks: {delivered} passengers delivered, {} still travelling, {} cars live",
        engine.current_tick().0,
        counters.passengers_live(),
        counters.cars_live(),
    );

    print_table("Stations", &engine.stats(StatsKind::Net, true));
    print_table("Cars", &engine.stats(StatsKind::Car, true));
    print_table("Passengers", &engine.stats(StatsKind::Passenger, true));

    Ok(())
}
