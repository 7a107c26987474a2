use proptest::prelude::*;
use transit_core::VertexId;
use transit_net::{NetError, Network, NetworkBuilder};

fn arb_network() -> impl Strategy<Value = Network> {
    (2u32..12).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, 1u32..10), 0..40).prop_map(move |edges| {
            let mut net = Network::new();
            for _ in 0..n {
                net.add_vertex(None).unwrap();
            }
            for (a, b, w) in edges {
                // Duplicates are rejected; keeping the first is enough here.
                let _ = net.add_edge(VertexId(a), VertexId(b), w);
            }
            net
        })
    })
}

/// All-pairs shortest distances by Floyd-Warshall.
fn all_pairs(net: &Network) -> Vec<Vec<Option<u64>>> {
    let n = net.vertex_count();
    let mut dist = vec![vec![None; n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = Some(0);
    }
    for key in net.edge_keys() {
        let w = u64::from(net.weight(key.source, key.target).unwrap());
        let cell = &mut dist[key.source.index()][key.target.index()];
        *cell = Some(cell.map_or(w, |d: u64| d.min(w)));
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if let (Some(ik), Some(kj)) = (dist[i][k], dist[k][j]) {
                    let via = ik + kj;
                    if dist[i][j].is_none_or(|d| via < d) {
                        dist[i][j] = Some(via);
                    }
                }
            }
        }
    }
    dist
}

proptest! {
    #[test]
    fn route_walks_existing_edges_from_source_to_target(net in arb_network()) {
        for a in net.vertex_ids() {
            for b in net.vertex_ids() {
                if let Ok(mut route) = net.route(a, b) {
                    prop_assert_eq!(route.next_hop(), Some(a));
                    let mut at = route.take_next_hop().unwrap();
                    while let Some(hop) = route.take_next_hop() {
                        prop_assert!(net.has_edge(at, hop), "no edge {}-{}", at, hop);
                        at = hop;
                    }
                    prop_assert_eq!(at, b);
                }
            }
        }
    }

    #[test]
    fn route_cost_matches_all_pairs_distance(net in arb_network()) {
        let dist = all_pairs(&net);
        for a in net.vertex_ids() {
            for b in net.vertex_ids() {
                let expected = dist[a.index()][b.index()];
                match net.route(a, b) {
                    Ok(route) => prop_assert_eq!(net.route_cost(&route), expected),
                    Err(NetError::RouteNotFound { .. }) => prop_assert_eq!(expected, None),
                    Err(other) => prop_assert!(false, "unexpected error {other}"),
                }
            }
        }
    }

    #[test]
    fn routing_is_deterministic(net in arb_network()) {
        let copy = net.clone();
        for a in net.vertex_ids() {
            for b in net.vertex_ids() {
                prop_assert_eq!(net.route(a, b), copy.route(a, b));
            }
        }
    }
}

#[test]
fn equal_cost_tie_goes_to_first_created_edge() {
    // Two equal-cost detours A->B->D and A->C->D; A->B was added first.
    let net = NetworkBuilder::new()
        .vertices(["A", "B", "C", "D"])
        .link("A", "B")
        .link("A", "C")
        .link("B", "D")
        .link("C", "D")
        .build()
        .unwrap();
    let route = net.route(VertexId(0), VertexId(3)).unwrap();
    assert_eq!(route.to_vec(), vec![VertexId(0), VertexId(1), VertexId(3)]);
}

#[test]
fn wide_tie_expands_in_discovery_order() {
    // Four siblings at distance 1; B2 and B3 both reach D at cost 2.
    // B2 was discovered first, so it expands first and keeps D.
    let net = NetworkBuilder::new()
        .vertices(["A", "B1", "B2", "B3", "B4", "D"])
        .link("A", "B1")
        .link("A", "B2")
        .link("A", "B3")
        .link("A", "B4")
        .link("B2", "D")
        .link("B3", "D")
        .build()
        .unwrap();
    let a = net.resolve(&"A".into()).unwrap();
    let d = net.resolve(&"D".into()).unwrap();
    let labels: Vec<String> = net.route(a, d).unwrap().iter().map(|v| net.label(v)).collect();
    assert_eq!(labels, ["A", "B2", "D"]);
}

#[test]
fn named_line_routes_through_the_middle() {
    let net = NetworkBuilder::new()
        .vertices(["A", "B", "C"])
        .line(["A", "B", "C"])
        .build()
        .unwrap();
    let a = net.resolve(&"A".into()).unwrap();
    let c = net.resolve(&"C".into()).unwrap();
    let labels: Vec<String> = net.route(a, c).unwrap().iter().map(|v| net.label(v)).collect();
    assert_eq!(labels, ["A", "B", "C"]);
}
