use std::cmp::Ordering;
use std::fmt;

use log::debug;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use super::traversal::{NormalizedTraversal, PlacementOrderedTraversal, TraversalStep};
use crate::arithmetic::{
    inverse, is_integral, matrix_from_rows, negated, row_times, sign_of, triangulate, Rational,
};
use crate::pgraph::{Edge, PeriodicGraph, Placement};
use crate::symmetries::{basis_matrix, SymmetryGroup};

/// One entry of an invariant: two vertex numbers and an integer shift.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InvariantStep {
    pub head: usize,
    pub tail: usize,
    pub shift: Vec<BigInt>,
}

/// Canonical form of a periodic graph. Two graphs describe the same net if
/// and only if their invariants are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Invariant {
    pub dim: usize,
    pub steps: Vec<InvariantStep>,
}

impl Invariant {
    /// The key string, dimension followed by all steps flattened.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dim)?;
        for step in &self.steps {
            write!(f, " {} {}", step.head, step.tail)?;
            for x in &step.shift {
                write!(f, " {x}")?;
            }
        }
        Ok(())
    }
}

type Candidate<'a> = NormalizedTraversal<PlacementOrderedTraversal<'a>>;

fn traversal_for<'a>(graph: &'a PeriodicGraph, placement: &'a Placement, basis: &[Edge]) -> Candidate<'a> {
    let transform = inverse(&basis_matrix(basis, placement))
        .unwrap_or_else(|| panic!("representative basis {basis:?} is singular"));
    let edges = PlacementOrderedTraversal::new(graph, placement, basis[0].head, transform);
    NormalizedTraversal::new(edges, graph.dim())
}

/// True if `candidate` is smaller than `best` at their first difference.
/// Only as many steps as needed to decide are generated.
fn precedes(candidate: &mut Candidate<'_>, best: &mut Candidate<'_>) -> bool {
    for i in 0.. {
        let Some(next) = candidate.get(i) else {
            return false;
        };
        let Some(current) = best.get(i) else {
            return false;
        };
        match next.cmp(current) {
            Ordering::Less => return true,
            Ordering::Greater => return false,
            Ordering::Equal => {}
        }
    }
    false
}

/// Re-expresses the shifts of the winning traversal in the lattice basis they
/// span, so the result no longer depends on the cell the graph was given in.
fn postprocess(dim: usize, steps: Vec<TraversalStep>) -> Vec<InvariantStep> {
    let shifts: Vec<Vec<Rational>> = steps.iter().map(|s| s.shift.clone()).collect();
    let reduced = triangulate(&shifts);
    if reduced.rank < dim {
        panic!("traversal shifts span only {} of {dim} dimensions", reduced.rank);
    }
    let basis_change = inverse(&matrix_from_rows(&reduced.rows[..dim], dim))
        .unwrap_or_else(|| panic!("reduced traversal shifts are singular"));

    let mut result: Vec<InvariantStep> = steps
        .into_iter()
        .map(|step| {
            let mut shift = row_times(&step.shift, &basis_change);
            if !is_integral(&shift) {
                panic!("produced non-integer shift {shift:?}");
            }
            if step.head == step.tail && sign_of(&shift) < 0 {
                shift = negated(&shift);
            }
            InvariantStep {
                head: step.head,
                tail: step.tail,
                shift: shift.iter().map(|x| x.to_integer()).collect(),
            }
        })
        .collect();

    result.sort();
    result
}

/// Computes the invariant of a minimal, connected, locally stable graph from
/// its symmetry group: one traversal per representative basis, the smallest
/// one wins.
pub fn compute_invariant(graph: &PeriodicGraph, placement: &Placement, group: &SymmetryGroup) -> Invariant {
    let mut bases = group.representative_bases().iter();
    let Some(first) = bases.next() else {
        panic!("symmetry group of {graph} has no representative bases");
    };

    let mut best = traversal_for(graph, placement, first);
    let mut replaced = 0;
    for basis in bases {
        let mut candidate = traversal_for(graph, placement, basis);
        if precedes(&mut candidate, &mut best) {
            best = candidate;
            replaced += 1;
        }
    }
    debug!(
        "compared {} traversals, best replaced {replaced} times",
        group.representative_bases().len()
    );

    Invariant {
        dim: graph.dim(),
        steps: postprocess(graph.dim(), best.into_steps()),
    }
}
