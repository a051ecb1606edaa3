use super::*;
use crate::cfg::MatchingCfg;
use crate::gen::{grid_graph, random_connected_graph};
use proptest::prelude::*;

fn assert_closed_cover(g: &Graph, tour: &PostmanTour) {
    assert_eq!(tour.walk.first(), Some(&0));
    assert_eq!(tour.walk.last(), Some(&0));
    let mut used = vec![0usize; g.num_edges()];
    for e in tour.edge_sequence(g).unwrap() {
        used[e] += 1;
    }
    assert_eq!(used, tour.multiplicity);
    assert!(used.iter().all(|&c| c >= 1));
}

/// Edge-cost sum plus the cheapest pairing of odd vertices, by enumeration.
fn brute_force_cost(g: &Graph, cost: &[f64]) -> f64 {
    fn pair_up(odd: &[usize], used: &mut [bool], dist: &dyn Fn(usize, usize) -> f64) -> f64 {
        let Some(i) = (0..odd.len()).find(|&i| !used[i]) else {
            return 0.0;
        };
        used[i] = true;
        let mut best = f64::INFINITY;
        for j in i + 1..odd.len() {
            if used[j] {
                continue;
            }
            used[j] = true;
            best = best.min(dist(odd[i], odd[j]) + pair_up(odd, used, dist));
            used[j] = false;
        }
        used[i] = false;
        best
    }
    let trees: Vec<_> = (0..g.num_vertices())
        .map(|s| dijkstra(g, s, Some(cost)).unwrap())
        .collect();
    let dist = |u: usize, v: usize| trees[u].cost[v];
    let odd = odd_vertices(g);
    cost.iter().sum::<f64>() + pair_up(&odd, &mut vec![false; odd.len()], &dist)
}

#[test]
fn eulerian_triangle_walks_each_edge_once() {
    let g = Graph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
    let tour = chinese_postman(&g, Some(&[1.0, 2.0, 3.0])).unwrap();
    assert_closed_cover(&g, &tour);
    assert_eq!(tour.cost, 6.0);
    assert_eq!(tour.len(), 3);
    assert_eq!(tour.multiplicity, vec![1, 1, 1]);
}

#[test]
fn path_is_walked_there_and_back() {
    let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
    let tour = chinese_postman(&g, None).unwrap();
    assert_closed_cover(&g, &tour);
    assert_eq!(tour.cost, 6.0);
    assert_eq!(tour.walk, vec![0, 1, 2, 3, 2, 1, 0]);
}

#[test]
fn star_leaves_pair_through_center() {
    let g = Graph::from_edges(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]).unwrap();
    let tour = chinese_postman(&g, None).unwrap();
    assert_closed_cover(&g, &tour);
    assert_eq!(tour.cost, 8.0);
}

#[test]
fn square_with_diagonal() {
    let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]).unwrap();
    let unit = chinese_postman(&g, None).unwrap();
    assert_closed_cover(&g, &unit);
    assert_eq!(unit.cost, 6.0);
    assert_eq!(unit.multiplicity, vec![1, 1, 1, 1, 2]);

    // An expensive diagonal is cheaper to bypass than to repeat.
    let cost = [1.0, 1.0, 1.0, 1.0, 5.0];
    let tour = chinese_postman(&g, Some(&cost)).unwrap();
    assert_closed_cover(&g, &tour);
    assert_eq!(tour.cost, 11.0);
    assert_eq!(tour.multiplicity[4], 1);
}

#[test]
fn petersen_graph_needs_a_perfect_matching_of_edges() {
    let g = Graph::from_edges(
        10,
        &[
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 0),
            (0, 5),
            (1, 6),
            (2, 7),
            (3, 8),
            (4, 9),
            (5, 7),
            (7, 9),
            (9, 6),
            (6, 8),
            (8, 5),
        ],
    )
    .unwrap();
    for warm in [true, false] {
        let cfg = PostmanCfg {
            matching: MatchingCfg {
                greedy_warm_start: warm,
            },
        };
        let tour = chinese_postman_with(&g, None, cfg).unwrap();
        assert_closed_cover(&g, &tour);
        assert_eq!(tour.cost, 20.0);
    }
}

#[test]
fn k4_and_grid() {
    let k4 = Graph::from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]).unwrap();
    let tour = chinese_postman(&k4, None).unwrap();
    assert_closed_cover(&k4, &tour);
    assert_eq!(tour.cost, 8.0);

    let grid = grid_graph(3, 3).unwrap();
    let tour = chinese_postman(&grid, None).unwrap();
    assert_closed_cover(&grid, &tour);
    assert_eq!(tour.cost, 16.0);
}

#[test]
fn bad_inputs_fail_before_solving() {
    assert_eq!(chinese_postman(&Graph::new(0), None), Err(Error::EmptyGraph));
    let g = Graph::from_edges(4, &[(0, 1), (2, 3)]).unwrap();
    assert_eq!(
        chinese_postman(&g, None),
        Err(Error::Disconnected {
            reached: 2,
            total: 4
        })
    );
    let g = Graph::from_edges(2, &[(0, 1)]).unwrap();
    assert!(matches!(
        chinese_postman(&g, Some(&[-1.0])),
        Err(Error::InvalidCost { edge: 0, .. })
    ));
    assert!(matches!(
        chinese_postman(&g, Some(&[1.0, 2.0])),
        Err(Error::CostLength { .. })
    ));
}

#[test]
fn single_vertex_is_a_trivial_tour() {
    let tour = chinese_postman(&Graph::new(1), None).unwrap();
    assert_eq!(tour.walk, vec![0]);
    assert_eq!(tour.cost, 0.0);
    assert!(tour.is_empty());
}

#[test]
fn solving_twice_gives_the_same_tour() {
    let (g, cost) = random_connected_graph(40, 30, 11).unwrap();
    let a = chinese_postman(&g, Some(&cost)).unwrap();
    let b = chinese_postman(&g, Some(&cost)).unwrap();
    assert_eq!(a, b);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn random_tours_are_closed_covers(n in 1usize..30, extra in 0usize..30, seed in any::<u64>()) {
        let (g, cost) = random_connected_graph(n, extra, seed).unwrap();
        let tour = chinese_postman(&g, Some(&cost)).unwrap();
        assert_closed_cover(&g, &tour);

        let walked: f64 = tour
            .multiplicity
            .iter()
            .zip(&cost)
            .map(|(&k, &c)| k as f64 * c)
            .sum();
        prop_assert!((walked - tour.cost).abs() < 1e-6);
        let sum: f64 = cost.iter().sum();
        prop_assert!(tour.cost >= sum - 1e-9);
        prop_assert!(tour.cost <= 2.0 * sum + 1e-6);
        prop_assert!(tour.multiplicity.iter().all(|&k| k <= 2));

        let cold = PostmanCfg {
            matching: MatchingCfg {
                greedy_warm_start: false,
            },
        };
        let other = chinese_postman_with(&g, Some(&cost), cold).unwrap();
        prop_assert!((other.cost - tour.cost).abs() < 1e-6);
    }

    #[test]
    fn small_tours_are_optimal(n in 2usize..10, extra in 0usize..8, seed in any::<u64>()) {
        let (g, cost) = random_connected_graph(n, extra, seed).unwrap();
        let tour = chinese_postman(&g, Some(&cost)).unwrap();
        prop_assert!((tour.cost - brute_force_cost(&g, &cost)).abs() < 1e-6);
    }
}
