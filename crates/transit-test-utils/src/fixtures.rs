//! Reference networks for tests and benchmarks.
//!
//! - [`abc_line()`]: three named stations `A - B - C`, roads both ways.
//! - [`line()`]: `n` anonymous stations in a bidirectional line.
//! - [`ring()`]: `n` anonymous stations joined clockwise only.
//! - [`grid()`]: `rows x cols` anonymous stations with roads to the four
//!   orthogonal neighbours.

use transit_core::VertexId;
use transit_net::{Network, NetworkBuilder, DEFAULT_WEIGHT};

/// `A - B - C`, all weights 1.
pub fn abc_line() -> Network {
    NetworkBuilder::new()
        .vertices(["A", "B", "C"])
        .line(["A", "B", "C"])
        .build()
        .expect("fixture network is valid")
}

/// `0 - 1 - ... - (n-1)`, roads both ways.
pub fn line(n: u32) -> Network {
    NetworkBuilder::new()
        .anonymous(n)
        .line(0..n)
        .build()
        .expect("fixture network is valid")
}

/// `0 -> 1 -> ... -> (n-1) -> 0`. Needs `n >= 2`.
pub fn ring(n: u32) -> Network {
    let mut builder = NetworkBuilder::new().anonymous(n);
    for i in 0..n {
        builder = builder.link(i, (i + 1) % n);
    }
    builder.build().expect("fixture network is valid")
}

/// Row-major grid: vertex `r * cols + c` sits at row `r`, column `c`.
pub fn grid(rows: u32, cols: u32) -> Network {
    let mut net = Network::new();
    for _ in 0..rows * cols {
        net.add_vertex(None).expect("anonymous vertices never clash");
    }
    let at = |r: u32, c: u32| VertexId(r * cols + c);
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                net.add_road(at(r, c), at(r, c + 1), DEFAULT_WEIGHT)
                    .expect("grid roads are unique");
            }
            if r + 1 < rows {
                net.add_road(at(r, c), at(r + 1, c), DEFAULT_WEIGHT)
                    .expect("grid roads are unique");
            }
        }
    }
    net
}
