//! Property tests over random instances.

use proptest::prelude::*;

use u_tsp::constructive::{nearest_neighbor, random_walk};
use u_tsp::distance::{tour_length, CoordinateOracle, DistanceMatrix, DistanceOracle};
use u_tsp::exact::exact_search;
use u_tsp::ga::{dpx_crossover, genetic_algorithm, genetic_algorithm_dpx, GaConfig};
use u_tsp::local_search::{is_two_opt_optimal, two_opt};
use u_tsp::models::{is_permutation, Instance, Tour};

fn coords(min: usize, max: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.0f64..1000.0, 0.0f64..1000.0), min..=max)
}

fn tag() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("EUC_2D"), Just("ATT"), Just("GEO"), Just("XRAY")]
}

/// Coordinates plus a shuffled visiting order of the same size.
fn coords_and_order(min: usize, max: usize) -> impl Strategy<Value = (Vec<(f64, f64)>, Vec<usize>)> {
    coords(min, max).prop_flat_map(|c| {
        let n = c.len();
        (Just(c), Just((1..=n).collect::<Vec<usize>>()).prop_shuffle())
    })
}

proptest! {
    #[test]
    fn matrix_agrees_with_coordinates(c in coords(1, 25), t in tag()) {
        let inst = Instance::from_coords("p", t, &c);
        let o = CoordinateOracle::for_instance(&inst);
        let dm = DistanceMatrix::build(&o).expect("build");
        let n = c.len();
        for i in 1..=n {
            prop_assert_eq!(dm.get(i, i), 0.0);
            for j in 1..=n {
                prop_assert_eq!(dm.get(i, j), o.distance(i, j));
                prop_assert_eq!(dm.get(i, j), dm.get(j, i));
            }
        }
    }

    #[test]
    fn tour_length_matches_matrix((c, order) in coords_and_order(1, 30), closed in any::<bool>()) {
        let inst = Instance::from_coords("p", "EUC_2D", &c);
        let o = CoordinateOracle::for_instance(&inst);
        let dm = DistanceMatrix::build(&o).expect("build");
        let tour = if closed { Tour::new(order) } else { Tour::open(order) };
        prop_assert_eq!(tour_length(&o, &tour), tour_length(&dm, &tour));
    }

    #[test]
    fn constructive_tours_are_permutations(c in coords(1, 40), start in 0usize..50, seed in any::<u64>()) {
        let inst = Instance::from_coords("p", "EUC_2D", &c);
        let o = CoordinateOracle::for_instance(&inst);
        let n = c.len();

        let mut nn = Tour::canonical(n);
        let len = nearest_neighbor(&o, &mut nn, start).expect("nn");
        prop_assert!(nn.is_permutation());
        prop_assert!((len - tour_length(&o, &nn)).abs() < 1e-9);

        let mut rw = Tour::canonical(n);
        let mut rng = u_numflow::random::create_rng(seed);
        let len = random_walk(&o, &mut rw, &mut rng).expect("rw");
        prop_assert!(rw.is_permutation());
        prop_assert!((len - tour_length(&o, &rw)).abs() < 1e-9);
    }

    #[test]
    fn two_opt_never_worsens((c, order) in coords_and_order(1, 30)) {
        let inst = Instance::from_coords("p", "EUC_2D", &c);
        let o = CoordinateOracle::for_instance(&inst);
        let mut tour = Tour::new(order);
        let before = tour_length(&o, &tour);
        let after = two_opt(&o, &mut tour).expect("2-opt");
        prop_assert!(after <= before + 1e-9);
        prop_assert!(tour.is_permutation());
        prop_assert!(is_two_opt_optimal(&o, tour.cities()));
        prop_assert_eq!(tour.length(), Some(after));
    }

    #[test]
    fn dpx_child_is_permutation_keeping_shared_edges(
        (c, p1) in coords_and_order(2, 25),
        seed in any::<u64>(),
    ) {
        let inst = Instance::from_coords("p", "EUC_2D", &c);
        let o = CoordinateOracle::for_instance(&inst);
        let n = c.len();
        let mut p2: Vec<usize> = (1..=n).collect();
        u_numflow::random::shuffle(&mut p2, &mut u_numflow::random::create_rng(seed));

        let mut child = vec![0; n];
        dpx_crossover(&o, &p1, &p2, &mut child);
        prop_assert!(is_permutation(&child));

        let edges = |t: &[usize]| -> Vec<(usize, usize)> {
            (0..t.len())
                .map(|i| {
                    let (a, b) = (t[i], t[(i + 1) % t.len()]);
                    (a.min(b), a.max(b))
                })
                .collect()
        };
        let e2 = edges(&p2[..]);
        let ec = edges(&child[..]);
        for e in edges(&p1[..]).into_iter().filter(|e| e2.contains(e)) {
            prop_assert!(ec.contains(&e));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn exact_search_same_on_matrix(c in coords(1, 6)) {
        let inst = Instance::from_coords("p", "EUC_2D", &c);
        let o = CoordinateOracle::for_instance(&inst);
        let dm = DistanceMatrix::build(&o).expect("build");
        let a = exact_search(&o, None).expect("coords");
        let b = exact_search(&dm, None).expect("matrix");
        prop_assert_eq!(a.best.cities(), b.best.cities());
        prop_assert_eq!(a.worst.cities(), b.worst.cities());
        prop_assert!(a.best.is_permutation() && a.worst.is_permutation());
        prop_assert!(a.best.length() <= a.worst.length());
    }

    #[test]
    fn ga_history_non_increasing(c in coords(2, 15), seed in any::<u64>(), dpx in any::<bool>()) {
        let inst = Instance::from_coords("p", "EUC_2D", &c);
        let o = CoordinateOracle::for_instance(&inst);
        let config = GaConfig::default()
            .with_population_size(8)
            .with_generations(10)
            .with_seed(seed);
        let result = if dpx {
            genetic_algorithm_dpx(&o, &config)
        } else {
            genetic_algorithm(&o, &config)
        }
        .expect("ga");
        prop_assert!(result.tour.is_permutation());
        prop_assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
        prop_assert!((result.length - tour_length(&o, &result.tour)).abs() < 1e-9);
    }
}
