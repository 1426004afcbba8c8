#[cfg(test)]
mod _tests_placement {
    use super::super::periodic::PeriodicGraph;
    use super::super::placement::*;
    use super::super::test_nets::*;
    use crate::arithmetic::{plus, Rational};
    use crate::error::NetError;
    use itertools::Itertools;
    use num_bigint::BigInt;
    use num_traits::Zero;
    use proptest::prelude::*;

    fn q(n: i64, d: i64) -> Rational {
        Rational::new(BigInt::from(n), BigInt::from(d))
    }

    fn assert_balanced(g: &PeriodicGraph, p: &Placement) {
        for &v in g.vertices() {
            let total = g
                .incidences(v)
                .iter()
                .fold(vec![Rational::zero(); g.dim()], |acc, e| plus(&acc, &p.edge_vector(e)));
            assert!(total.iter().all(|x| x.is_zero()), "vertex {v} is not balanced in {g}");
        }
    }

    #[test]
    fn test_reference_vertex_at_origin() {
        for g in [pcu(), sql(), dia(), hcb()] {
            let p = barycentric_placement(&g).unwrap();
            assert!(p.position(g.vertices()[0]).iter().all(|x| x.is_zero()));
            assert_balanced(&g, &p);
        }
    }

    #[test]
    fn test_diamond_positions() {
        let g = dia();
        let p = barycentric_placement(&g).unwrap();
        assert_eq!(p.position(2), &[q(1, 4), q(1, 4), q(1, 4)]);
        assert_eq!(
            p.edge_vector(&g.incidences(1)[0]),
            vec![q(-3, 4), q(1, 4), q(1, 4)]
        );
    }

    #[test]
    fn test_honeycomb_positions() {
        let p = barycentric_placement(&hcb()).unwrap();
        assert_eq!(p.position(2), &[q(1, 3), q(1, 3)]);
    }

    #[test]
    fn test_self_loops_cancel() {
        let p = barycentric_placement(&unstable()).unwrap();
        assert_eq!(p.position(2), &[q(1, 2), q(0, 1)]);
        assert_eq!(p.position(3), &[q(1, 2), q(0, 1)]);
    }

    #[test]
    fn test_large_system_matches_supercell_geometry() {
        // 27 equations, solved p-adically
        let g = supercell(&pcu(), &[3, 3, 3]);
        let p = barycentric_placement(&g).unwrap();
        assert_balanced(&g, &p);

        let cells: Vec<Vec<i64>> = (0..3).map(|_| 0..3i64).multi_cartesian_product().collect();
        for (i, c) in cells.iter().enumerate() {
            let v = i as u32 * 2 + 1;
            let expected: Vec<Rational> = c.iter().map(|&x| q(x, 3)).collect();
            assert_eq!(p.position(v), expected.as_slice());
        }
    }

    #[test]
    fn test_disconnected_system_is_singular() {
        assert_eq!(barycentric_placement(&two_sql()), Err(NetError::SingularPlacement));
    }

    // ==================== Stability ====================

    #[test]
    fn test_stability() {
        let g = dia();
        let p = barycentric_placement(&g).unwrap();
        assert!(p.is_stable());
        assert!(p.is_locally_stable(&g));

        let g = unstable();
        let p = barycentric_placement(&g).unwrap();
        assert!(!p.is_stable());
        assert!(!p.is_locally_stable(&g));

        let g = ladder();
        let p = barycentric_placement(&g).unwrap();
        assert!(!p.is_stable());
        assert!(p.is_locally_stable(&g));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        #[test]
        fn prop_supercell_placement_is_balanced(a in 1i64..3, b in 1i64..3, c in 1i64..3, pick in 0usize..2) {
            let base = if pick == 0 { dia() } else { pcu() };
            let g = supercell(&base, &[a, b, c]);
            let p = barycentric_placement(&g).unwrap();
            assert_balanced(&g, &p);
            prop_assert!(p.is_stable());
        }
    }
}
