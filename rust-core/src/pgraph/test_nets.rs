// Small nets shared by the unit tests

use itertools::Itertools;

use super::periodic::{Edge, PeriodicGraph};
use crate::interfaces::VertexId;

pub fn net(edges: &[(VertexId, VertexId, &[i64])]) -> PeriodicGraph {
    PeriodicGraph::new(edges.iter().map(|&(h, t, s)| (h, t, s.to_vec()))).expect("valid test net")
}

/// Primitive cubic: one vertex, three loops.
pub fn pcu() -> PeriodicGraph {
    net(&[(1, 1, &[1, 0, 0]), (1, 1, &[0, 1, 0]), (1, 1, &[0, 0, 1])])
}

/// Square lattice: one vertex, two loops.
pub fn sql() -> PeriodicGraph {
    net(&[(1, 1, &[1, 0]), (1, 1, &[0, 1])])
}

/// Diamond.
pub fn dia() -> PeriodicGraph {
    net(&[
        (1, 2, &[0, 0, 0]),
        (1, 2, &[-1, 0, 0]),
        (1, 2, &[0, -1, 0]),
        (1, 2, &[0, 0, -1]),
    ])
}

/// Honeycomb.
pub fn hcb() -> PeriodicGraph {
    net(&[(1, 2, &[0, 0]), (1, 2, &[-1, 0]), (1, 2, &[0, -1])])
}

/// Square lattice with a second vertex in every cell centre.
pub fn centred_sql() -> PeriodicGraph {
    net(&[
        (1, 1, &[1, 0]),
        (1, 1, &[0, 1]),
        (1, 2, &[0, 0]),
        (1, 2, &[-1, 0]),
        (1, 2, &[0, -1]),
        (1, 2, &[-1, -1]),
    ])
}

/// The chiral srs net. No vertex has three independent edge vectors.
pub fn srs() -> PeriodicGraph {
    net(&[
        (1, 2, &[0, 0, 0]),
        (1, 3, &[0, 0, 0]),
        (1, 4, &[0, 0, 0]),
        (2, 3, &[1, 0, 0]),
        (2, 4, &[0, 1, 0]),
        (3, 4, &[0, 0, 1]),
    ])
}

/// Connected, but two neighbours of vertex 1 sit at the same point.
pub fn unstable() -> PeriodicGraph {
    net(&[
        (1, 2, &[0, 0]),
        (1, 3, &[0, 0]),
        (2, 1, &[1, 0]),
        (3, 1, &[1, 0]),
        (1, 1, &[0, 1]),
    ])
}

/// Two translation equivalent chains at the same position.
pub fn ladder() -> PeriodicGraph {
    net(&[(1, 1, &[1]), (2, 2, &[1]), (1, 2, &[0])])
}

/// Two disjoint copies of the square lattice.
pub fn two_sql() -> PeriodicGraph {
    net(&[(1, 1, &[1, 0]), (1, 1, &[0, 1]), (2, 2, &[1, 0]), (2, 2, &[0, 1])])
}

/// A single component that only reaches every other cell along x.
pub fn sparse_sql() -> PeriodicGraph {
    net(&[(1, 1, &[2, 0]), (1, 1, &[0, 1])])
}

/// Covering graph of `graph` on the cell enlarged by `factors` along the axes.
pub fn supercell(graph: &PeriodicGraph, factors: &[i64]) -> PeriodicGraph {
    let stride = graph.vertices().iter().max().copied().unwrap_or(0) + 1;
    let cells: Vec<Vec<i64>> = factors.iter().map(|&f| 0..f).multi_cartesian_product().collect();
    let cell_index = |c: &[i64]| cells.iter().position(|x| x.as_slice() == c).expect("cell exists") as VertexId;

    let mut edges = Vec::new();
    for e in graph.edges() {
        for c in &cells {
            let target: Vec<i64> = c.iter().zip(&e.shift).map(|(a, b)| a + b).collect();
            let shift: Vec<i64> = target.iter().zip(factors).map(|(t, f)| t.div_euclid(*f)).collect();
            let cell: Vec<i64> = target.iter().zip(factors).map(|(t, f)| t.rem_euclid(*f)).collect();
            edges.push(Edge::new(
                cell_index(c.as_slice()) * stride + e.head,
                cell_index(cell.as_slice()) * stride + e.tail,
                shift,
            ));
        }
    }

    PeriodicGraph::from_edges(edges).expect("supercell is valid")
}
