//! How a spawned entity's route is chosen.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use transit_core::{VertexId, VertexRef};
use transit_net::{Network, Route};

use crate::error::EngineError;

/// Route choice for a newly spawned car or passenger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoutePlan {
    /// Follow these vertices. The first must be the spawn vertex.
    Explicit(Vec<VertexRef>),
    /// Take the shortest route to this vertex.
    Destination(VertexRef),
    /// Take the shortest route to a uniformly chosen other vertex.
    Random,
}

impl RoutePlan {
    /// Shortest route to `destination`.
    pub fn to(destination: impl Into<VertexRef>) -> Self {
        Self::Destination(destination.into())
    }

    /// Explicit route through `stops`.
    pub fn through<I, R>(stops: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<VertexRef>,
    {
        Self::Explicit(stops.into_iter().map(Into::into).collect())
    }

    /// Resolve into the hops remaining after `start`.
    ///
    /// The returned route never contains `start` as its head: the spawn
    /// vertex is the entity's position, not a hop still to take.
    pub(crate) fn resolve(
        &self,
        net: &Network,
        start: VertexId,
        rng: &mut ChaCha8Rng,
    ) -> Result<Route, EngineError> {
        let mut route = match self {
            Self::Explicit(stops) => {
                let hops = net.resolve_all(stops)?;
                let first = *hops.first().ok_or(EngineError::EmptyRoute)?;
                if first != start {
                    return Err(EngineError::RouteStartMismatch {
                        expected: start,
                        found: first,
                    });
                }
                Route::from(hops)
            }
            Self::Destination(dst) => net.route(start, net.resolve(dst)?)?,
            Self::Random => net.route(start, random_destination(net, start, rng)?)?,
        };
        route.take_next_hop();
        Ok(route)
    }
}

/// A vertex other than `start`, chosen uniformly.
fn random_destination(
    net: &Network,
    start: VertexId,
    rng: &mut ChaCha8Rng,
) -> Result<VertexId, EngineError> {
    let others = net.vertex_count().saturating_sub(1) as u32;
    if others == 0 {
        return Err(EngineError::NoDestination { at: start });
    }
    let pick = rng.gen_range(0..others);
    Ok(if pick >= start.0 { VertexId(pick + 1) } else { VertexId(pick) })
}
