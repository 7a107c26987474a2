//! Ordered vertex routes consumed hop by hop.

use std::collections::VecDeque;
use std::fmt;

use transit_core::VertexId;

/// An ordered sequence of vertices still to be visited.
///
/// The front is the next hop. Routes returned by
/// [`Network::route`](crate::Network::route) include both endpoints; an
/// entity stores only the hops *after* its current position.
///
/// # Examples
///
/// ```
/// use transit_core::VertexId;
/// use transit_net::Route;
///
/// let mut route: Route = [VertexId(0), VertexId(1), VertexId(2)].into_iter().collect();
/// assert_eq!(route.next_hop(), Some(VertexId(0)));
/// assert_eq!(route.last(), Some(VertexId(2)));
///
/// // Cyclic consumption keeps the length constant.
/// assert_eq!(route.advance(true), Some(VertexId(0)));
/// assert_eq!(route.len(), 3);
/// assert_eq!(route.last(), Some(VertexId(0)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Route {
    hops: VecDeque<VertexId>,
}

impl Route {
    /// An empty route.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next hop, if any.
    pub fn next_hop(&self) -> Option<VertexId> {
        self.hops.front().copied()
    }

    /// Final hop, if any.
    pub fn last(&self) -> Option<VertexId> {
        self.hops.back().copied()
    }

    /// Remove and return the next hop.
    pub fn take_next_hop(&mut self) -> Option<VertexId> {
        self.hops.pop_front()
    }

    /// Remove the next hop and re-append it at the tail.
    pub fn take_and_recycle(&mut self) -> Option<VertexId> {
        let hop = self.hops.pop_front()?;
        self.hops.push_back(hop);
        Some(hop)
    }

    /// Consume the next hop, recycling it when `repeat` is set.
    pub fn advance(&mut self, repeat: bool) -> Option<VertexId> {
        if repeat {
            self.take_and_recycle()
        } else {
            self.take_next_hop()
        }
    }

    /// Whether `vertex` appears anywhere in the remaining hops.
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.hops.contains(&vertex)
    }

    /// Number of remaining hops.
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    /// Whether no hops remain.
    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// Iterate over the remaining hops, next hop first.
    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.hops.iter().copied()
    }

    /// Copy the remaining hops into a `Vec`.
    pub fn to_vec(&self) -> Vec<VertexId> {
        self.hops.iter().copied().collect()
    }
}

impl FromIterator<VertexId> for Route {
    fn from_iter<I: IntoIterator<Item = VertexId>>(iter: I) -> Self {
        Self {
            hops: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<VertexId>> for Route {
    fn from(hops: Vec<VertexId>) -> Self {
        Self { hops: hops.into() }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, hop) in self.hops.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{hop}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(hops: &[u32]) -> Route {
        hops.iter().map(|&h| VertexId(h)).collect()
    }

    #[test]
    fn empty_route_has_no_hops() {
        let mut r = Route::new();
        assert!(r.is_empty());
        assert_eq!(r.next_hop(), None);
        assert_eq!(r.last(), None);
        assert_eq!(r.take_next_hop(), None);
        assert_eq!(r.take_and_recycle(), None);
    }

    #[test]
    fn take_next_hop_consumes_front_to_back() {
        let mut r = route(&[4, 5, 6]);
        assert_eq!(r.take_next_hop(), Some(VertexId(4)));
        assert_eq!(r.take_next_hop(), Some(VertexId(5)));
        assert_eq!(r.len(), 1);
        assert_eq!(r.next_hop(), Some(VertexId(6)));
    }

    #[test]
    fn recycle_moves_front_to_tail() {
        let mut r = route(&[1, 2, 0]);
        assert_eq!(r.take_and_recycle(), Some(VertexId(1)));
        assert_eq!(r.to_vec(), vec![VertexId(2), VertexId(0), VertexId(1)]);
    }

    #[test]
    fn advance_respects_repeat_flag() {
        let mut once = route(&[1, 2]);
        let mut cyclic = route(&[1, 2]);
        once.advance(false);
        cyclic.advance(true);
        assert_eq!(once.len(), 1);
        assert_eq!(cyclic.len(), 2);
    }

    #[test]
    fn contains_searches_all_remaining_hops() {
        let r = route(&[3, 9, 1]);
        assert!(r.contains(VertexId(1)));
        assert!(!r.contains(VertexId(2)));
    }

    #[test]
    fn display_lists_hops() {
        assert_eq!(route(&[0, 2]).to_string(), "[0, 2]");
        assert_eq!(Route::new().to_string(), "[]");
    }
}
