//! Property tests over random instances.

use proptest::prelude::*;

use u_tsp::bnb::{BnbConfig, BnbRunner};
use u_tsp::ga::operators::pmx_crossover;
use u_tsp::ga::{GaConfig, GaRunner};
use u_tsp::geometry::{tour_length, City, TspInstance};
use u_tsp::held_karp::{HeldKarpConfig, HeldKarpRunner};
use u_tsp::sa::{SaConfig, SaRunner};
use u_tsp::tabu::{TabuConfig, TabuRunner};

fn cities(min: usize, max: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), min..=max)
}

fn permutation(n: usize) -> impl Strategy<Value = Vec<usize>> {
    Just((0..n).collect::<Vec<usize>>()).prop_shuffle()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_tour_length_rotation_and_reversal_invariant(
        coords in cities(1, 12),
        shift in 0usize..12,
    ) {
        let route: Vec<City> = coords.iter().copied().map(City::from).collect();
        let length = tour_length(&route);

        let mut rotated = route.clone();
        rotated.rotate_left(shift % route.len());
        prop_assert!((tour_length(&rotated) - length).abs() < 1e-9);

        let mut reversed = route.clone();
        reversed.reverse();
        prop_assert!((tour_length(&reversed) - length).abs() < 1e-9);
    }

    #[test]
    fn prop_exact_solvers_agree(coords in cities(1, 7)) {
        let instance = TspInstance::from_coords(&coords).unwrap();
        let bnb = BnbRunner::run(&instance, &BnbConfig::default()).unwrap();
        let hk = HeldKarpRunner::run(&instance, &HeldKarpConfig::default()).unwrap();
        prop_assert!(bnb.tour.is_permutation_of(instance.len()));
        prop_assert!(hk.tour.is_permutation_of(instance.len()));
        prop_assert!((bnb.tour.length() - hk.tour.length()).abs() < 1e-9);
    }

    #[test]
    fn prop_heuristics_return_permutations_no_shorter_than_optimum(
        coords in cities(1, 8),
        seed in any::<u64>(),
    ) {
        let instance = TspInstance::from_coords(&coords).unwrap();
        let n = instance.len();
        let optimum = HeldKarpRunner::run(&instance, &HeldKarpConfig::default())
            .unwrap()
            .tour
            .length();

        let sa = SaRunner::run(&instance, &SaConfig::default().with_iterations(300).with_seed(seed))
            .unwrap()
            .tour;
        let tabu = TabuRunner::run(
            &instance,
            &TabuConfig::default().with_iterations(100).with_seed(seed),
        )
        .unwrap()
        .tour;
        let ga = GaRunner::run(&instance, &GaConfig::default().with_generations(30).with_seed(seed))
            .unwrap()
            .tour;

        for tour in [sa, tabu, ga] {
            prop_assert!(tour.is_permutation_of(n));
            prop_assert!(tour.length() >= optimum - 1e-9);
            prop_assert!((tour.length() - instance.tour_length(tour.order())).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_pmx_child_is_permutation_keeping_segment(
        (p1, p2, start, end) in (2usize..12).prop_flat_map(|n| {
            (permutation(n), permutation(n), 0..n)
                .prop_flat_map(move |(p1, p2, start)| {
                    (Just(p1), Just(p2), Just(start), (start + 1)..=n)
                })
        }),
    ) {
        let n = p1.len();
        let child = pmx_crossover(&p1, &p2, start, end).unwrap();
        let mut sorted = child.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..n).collect::<Vec<usize>>());
        prop_assert_eq!(&child[start..end], &p1[start..end]);
    }
}
