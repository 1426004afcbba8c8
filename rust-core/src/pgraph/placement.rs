use std::collections::{BTreeMap, HashSet};

use log::{debug, trace};
use nalgebra::DMatrix;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use super::periodic::{Edge, PeriodicGraph};
use crate::arithmetic::{modulo_one, plus, rational, solve, solve_padic, Rational};
use crate::config::PADIC_SOLVER_MIN_ROWS;
use crate::error::NetError;
use crate::interfaces::VertexId;
use crate::Result;

/// Exact fractional positions of the vertices of a periodic graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    dim: usize,
    positions: BTreeMap<VertexId, Vec<Rational>>,
}

impl Placement {
    pub fn new(dim: usize, positions: BTreeMap<VertexId, Vec<Rational>>) -> Self {
        Self { dim, positions }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Position of `v`. Panics if `v` was not placed.
    pub fn position(&self, v: VertexId) -> &[Rational] {
        &self.positions[&v]
    }

    pub fn positions(&self) -> &BTreeMap<VertexId, Vec<Rational>> {
        &self.positions
    }

    /// Difference vector `shift + pos[tail] - pos[head]` of a directed edge.
    pub fn edge_vector(&self, e: &Edge) -> Vec<Rational> {
        let head = self.position(e.head);
        let tail = self.position(e.tail);
        e.shift
            .iter()
            .zip(tail.iter().zip(head))
            .map(|(&s, (t, h))| rational(s) + t - h)
            .collect()
    }

    /// No two vertices share a position modulo the lattice.
    pub fn is_stable(&self) -> bool {
        let mut seen = HashSet::new();
        self.positions.values().all(|p| seen.insert(modulo_one(p)))
    }

    /// For every vertex the neighbour positions `pos[tail] + shift` are
    /// pairwise distinct.
    pub fn is_locally_stable(&self, graph: &PeriodicGraph) -> bool {
        graph.vertices().iter().all(|&v| {
            let mut seen = HashSet::new();
            graph.incidences(v).iter().all(|e| {
                let shift: Vec<Rational> = e.shift.iter().map(|&x| rational(x)).collect();
                seen.insert(plus(self.position(e.tail), &shift))
            })
        })
    }
}

/// Balance equations of the barycentric placement. Row 0 pins the first
/// vertex at the origin; every other row states that the vertex sits at the
/// average of its neighbours.
fn balance_equations(graph: &PeriodicGraph) -> (DMatrix<i64>, DMatrix<i64>) {
    let verts = graph.vertices();
    let n = verts.len();
    let d = graph.dim();
    let index: BTreeMap<VertexId, usize> = verts.iter().enumerate().map(|(i, &v)| (v, i)).collect();

    let mut a = DMatrix::<i64>::zeros(n, n);
    let mut b = DMatrix::<i64>::zeros(n, d);
    a[(0, 0)] = 1;

    for (i, &v) in verts.iter().enumerate().skip(1) {
        for e in graph.incidences(v) {
            let j = index[&e.tail];
            a[(i, i)] += 1;
            a[(i, j)] -= 1;
            for (k, &s) in e.shift.iter().enumerate() {
                b[(i, k)] += s;
            }
        }
    }

    (a, b)
}

/// Computes the barycentric placement of `graph` with the first vertex at the
/// origin.
///
/// Large systems are first handed to the p-adic solver; small ones, and any
/// system the p-adic solver cannot handle, go through exact elimination.
pub fn barycentric_placement(graph: &PeriodicGraph) -> Result<Placement> {
    let (a, b) = balance_equations(graph);
    let n = a.nrows();

    let padic = if n >= PADIC_SOLVER_MIN_ROWS {
        let solution = solve_padic(&a.map(BigInt::from), &b.map(BigInt::from));
        if solution.is_none() {
            debug!("p-adic solver failed on {n} equations, falling back to elimination");
        }
        solution
    } else {
        None
    };

    let x = match padic {
        Some(x) => x,
        None => solve(&a.map(rational), &b.map(rational)).ok_or_else(|| {
            trace!("balance equations of {graph} are singular");
            NetError::SingularPlacement
        })?,
    };

    let positions = graph
        .vertices()
        .iter()
        .enumerate()
        .map(|(i, &v)| (v, (0..graph.dim()).map(|k| x[(i, k)].clone()).collect()))
        .collect();

    Ok(Placement::new(graph.dim(), positions))
}
