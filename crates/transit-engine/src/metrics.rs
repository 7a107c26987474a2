//! Per-step counters and timings.
//!
//! [`StepMetrics`] captures what a single step did and how long each pass
//! took. The engine returns it in every
//! [`StepResult`](crate::engine::StepResult) and keeps the latest copy.

/// Timing and activity counts for a single step.
///
/// Durations are wall-clock microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the whole step.
    pub total_us: u64,
    /// Time spent in the movement pass.
    pub movement_us: u64,
    /// Time spent in the transfer pass.
    pub transfer_us: u64,
    /// Cars that left a vertex onto an edge.
    pub departures: u32,
    /// Cars that left an edge and parked at a vertex.
    pub arrivals_at_vertices: u32,
    /// Cars that finished their route and were destroyed.
    pub cars_completed: u32,
    /// Cars that could not reach their next hop.
    pub stuck_cars: u32,
    /// Passengers dropped off into waiting queues.
    pub passengers_ejected: u32,
    /// Passengers that boarded a car.
    pub passengers_boarded: u32,
    /// Passengers that reached their destination.
    pub passengers_completed: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.movement_us, 0);
        assert_eq!(m.transfer_us, 0);
        assert_eq!(m.departures, 0);
        assert_eq!(m.arrivals_at_vertices, 0);
        assert_eq!(m.cars_completed, 0);
        assert_eq!(m.stuck_cars, 0);
        assert_eq!(m.passengers_ejected, 0);
        assert_eq!(m.passengers_boarded, 0);
        assert_eq!(m.passengers_completed, 0);
    }
}
