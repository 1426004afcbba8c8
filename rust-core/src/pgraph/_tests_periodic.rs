#[cfg(test)]
mod _tests_periodic {
    use super::super::periodic::*;
    use super::super::test_nets::*;
    use crate::error::NetError;
    use nalgebra::DMatrix;

    // ==================== Edges ====================

    #[test]
    fn test_canonical_edge_forms() {
        let e = Edge::new(2, 1, vec![1, 0]);
        assert_eq!(e.canonical(), Edge::new(1, 2, vec![-1, 0]));
        assert!(!e.is_canonical());

        let lp = Edge::new(1, 1, vec![0, -1]);
        assert_eq!(lp.canonical(), Edge::new(1, 1, vec![0, 1]));
        assert_eq!(lp.reverse().reverse(), lp);

        let up = Edge::new(1, 3, vec![-2, 5]);
        assert_eq!(up.canonical(), up);
    }

    #[test]
    fn test_edge_display() {
        assert_eq!(Edge::new(1, 2, vec![0, -1, 0]).to_string(), "(1, 2, [0, -1, 0])");
    }

    // ==================== Construction ====================

    #[test]
    fn test_duplicate_edges_collapse() {
        let g = PeriodicGraph::new(vec![
            (1, 2, vec![0, 0]),
            (2, 1, vec![0, 0]),
            (1, 1, vec![1, 0]),
            (1, 1, vec![-1, 0]),
            (2, 2, vec![0, 1]),
        ])
        .unwrap();

        assert_eq!(g.edges().len(), 3);
        assert_eq!(g.vertices(), &[1, 2]);
        assert!(g.edges().iter().all(|e| e.is_canonical()));
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        assert_eq!(PeriodicGraph::new(vec![]), Err(NetError::NoEdges));
        assert_eq!(PeriodicGraph::new(vec![(1, 2, vec![])]), Err(NetError::ZeroDimension));
        assert_eq!(
            PeriodicGraph::new(vec![(1, 2, vec![0, 0]), (1, 2, vec![1, 0, 0])]),
            Err(NetError::InconsistentDimension { expected: 2, found: 3 })
        );
        assert_eq!(
            PeriodicGraph::new(vec![(1, 2, vec![0, 0]), (3, 3, vec![0, 0])]),
            Err(NetError::DegenerateLoop(3))
        );
    }

    #[test]
    fn test_incidences_list_both_directions() {
        let g = dia();
        assert_eq!(g.dim(), 3);
        assert_eq!(g.degree(1), 4);
        assert_eq!(g.degree(2), 4);
        assert!(g.incidences(2).iter().all(|e| e.head == 2 && e.tail == 1));
        assert!(g.incidences(2).contains(&Edge::new(2, 1, vec![1, 0, 0])));
        assert!(g.incidences(7).is_empty());

        let s = sql();
        assert_eq!(s.degree(1), 4);
        assert_eq!(s.directed_edges().len(), 2 * s.edges().len());

        let sorted = {
            let mut v = s.incidences(1).to_vec();
            v.sort();
            v
        };
        assert_eq!(s.incidences(1), sorted.as_slice());
    }

    // ==================== Connectivity ====================

    #[test]
    fn test_connected_nets() {
        for g in [pcu(), sql(), dia(), hcb(), unstable(), ladder()] {
            assert!(g.is_connected(), "{g} should be connected");
        }
    }

    #[test]
    fn test_disjoint_copies_are_separate_components() {
        let g = two_sql();
        let components = g.connected_components();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].vertices, vec![1]);
        assert_eq!(components[1].vertices, vec![2]);
        assert!(components.iter().all(|c| c.multiplicity == 1));
        assert!(!g.is_connected());
    }

    #[test]
    fn test_sublattice_component_has_multiplicity() {
        let g = sparse_sql();
        let components = g.connected_components();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].multiplicity, 2);
        assert!(!g.is_connected());

        let layer = net(&[(1, 1, &[1, 0, 0]), (1, 1, &[0, 1, 0])]);
        let components = layer.connected_components();
        assert_eq!(components[0].multiplicity, 0);
        assert_eq!(components[0].basis.len(), 2);
    }

    #[test]
    fn test_coordination_sequences() {
        assert_eq!(dia().coordination_sequence(1, 5).unwrap(), vec![1, 4, 12, 24, 42, 64]);
        assert_eq!(pcu().coordination_sequence(1, 4).unwrap(), vec![1, 6, 18, 38, 66]);
        assert_eq!(sql().coordination_sequence(1, 4).unwrap(), vec![1, 4, 8, 12, 16]);
        assert_eq!(hcb().coordination_sequence(2, 4).unwrap(), vec![1, 3, 6, 9, 12]);
        assert_eq!(sql().coordination_sequence(5, 2), Err(NetError::UnknownVertex(5)));
    }

    #[test]
    fn test_supercell_keeps_coordination() {
        let big = supercell(&dia(), &[2, 1, 2]);
        assert_eq!(big.vertices().len(), 8);
        for &v in big.vertices() {
            assert_eq!(big.coordination_sequence(v, 4).unwrap(), vec![1, 4, 12, 24, 42]);
        }
    }

    // ==================== Transformations ====================

    #[test]
    fn test_vertex_mapping() {
        let g = dia();
        let swapped = g.with_vertex_mapping(|v| 3 - v).unwrap();
        assert_eq!(swapped.vertices(), &[1, 2]);
        assert!(swapped.edges().contains(&Edge::new(1, 2, vec![1, 0, 0])));

        assert_eq!(g.with_vertex_mapping(|_| 1), Err(NetError::NonInjectiveMapping(1)));
    }

    #[test]
    fn test_shift_transform() {
        let g = sql();
        let shear = DMatrix::from_row_slice(2, 2, &[1, 1, 0, 1]);
        let sheared = g.with_shift_transform(&shear).unwrap();
        assert!(sheared.edges().contains(&Edge::new(1, 1, vec![1, 1])));
        assert!(sheared.edges().contains(&Edge::new(1, 1, vec![0, 1])));

        let doubling = DMatrix::from_row_slice(2, 2, &[2, 0, 0, 1]);
        assert_eq!(g.with_shift_transform(&doubling), Err(NetError::NotUnimodular));

        let wrong = DMatrix::<i64>::identity(3, 3);
        assert_eq!(
            g.with_shift_transform(&wrong),
            Err(NetError::TransformDimension { expected: 2, found: 3 })
        );
    }
}
