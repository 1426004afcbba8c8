use std::collections::{HashMap, HashSet, VecDeque};

use nalgebra::DMatrix;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use super::basis::LatticeBasisAccumulator;
use crate::arithmetic::{row_times, sign_of, to_rationals, Rational};
use crate::interfaces::{Shift, VertexId};
use crate::pgraph::{Edge, PeriodicGraph, Placement};

// ======================== PLACEMENT ORDERED TRAVERSAL ========================

/// Breadth-first enumeration of all directed edges, starting at `start`.
///
/// The edges leaving each vertex are visited in the order of their edge
/// vectors after the basis change `transform`, which makes the enumeration
/// depend only on the chosen basis and not on vertex names or shifts.
pub struct PlacementOrderedTraversal<'a> {
    graph: &'a PeriodicGraph,
    placement: &'a Placement,
    transform: DMatrix<Rational>,
    seen: HashSet<VertexId>,
    queue: VecDeque<VertexId>,
    pending: VecDeque<Edge>,
}

impl<'a> PlacementOrderedTraversal<'a> {
    pub fn new(
        graph: &'a PeriodicGraph,
        placement: &'a Placement,
        start: VertexId,
        transform: DMatrix<Rational>,
    ) -> Self {
        Self {
            graph,
            placement,
            transform,
            seen: HashSet::from([start]),
            queue: VecDeque::from([start]),
            pending: VecDeque::new(),
        }
    }
}

impl Iterator for PlacementOrderedTraversal<'_> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        loop {
            if let Some(e) = self.pending.pop_front() {
                if self.seen.insert(e.tail) {
                    self.queue.push_back(e.tail);
                }
                return Some(e);
            }

            let v = self.queue.pop_front()?;
            let mut keyed: Vec<(Vec<Rational>, &Edge)> = self
                .graph
                .incidences(v)
                .iter()
                .map(|e| (row_times(&self.placement.edge_vector(e), &self.transform), e))
                .collect();
            keyed.sort_by(|a, b| a.0.cmp(&b.0));
            self.pending = keyed.into_iter().map(|(_, e)| e.clone()).collect();
        }
    }
}

// ======================== NORMALIZED TRAVERSAL ========================

/// One emitted step: traversal numbers of both ends and the shift in the
/// coordinates of the traversal's own lattice basis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TraversalStep {
    pub head: usize,
    pub tail: usize,
    pub shift: Vec<Rational>,
}

/// Renames vertices by order of discovery, tracks where each vertex sits
/// relative to the start, and expresses remaining shifts in a basis picked up
/// along the way. Steps are produced lazily so that competing traversals can
/// be compared without finishing them.
pub struct NormalizedTraversal<I> {
    source: I,
    dim: usize,
    steps: Vec<TraversalStep>,
    numbers: HashMap<VertexId, usize>,
    offsets: HashMap<VertexId, Shift>,
    basis: LatticeBasisAccumulator,
}

impl<I: Iterator<Item = Edge>> NormalizedTraversal<I> {
    pub fn new(source: I, dim: usize) -> Self {
        Self {
            source,
            dim,
            steps: Vec::new(),
            numbers: HashMap::new(),
            offsets: HashMap::new(),
            basis: LatticeBasisAccumulator::new(dim),
        }
    }

    fn number(&mut self, v: VertexId, offset: Shift) -> usize {
        let n = self.numbers.len() + 1;
        self.numbers.insert(v, n);
        self.offsets.insert(v, offset);
        n
    }

    /// Consumes one edge of the source; false once the source is exhausted.
    pub fn advance(&mut self) -> bool {
        let Some(e) = self.source.next() else {
            return false;
        };

        let v = match self.numbers.get(&e.head).copied() {
            Some(v) => v,
            None => self.number(e.head, vec![0; self.dim]),
        };
        let head_offset = self.offsets[&e.head].clone();

        match self.numbers.get(&e.tail).copied() {
            None => {
                let offset = e.shift.iter().zip(&head_offset).map(|(s, o)| s + o).collect();
                let w = self.number(e.tail, offset);
                self.steps.push(TraversalStep {
                    head: v,
                    tail: w,
                    shift: vec![Rational::zero(); self.dim],
                });
            }
            Some(w) if v <= w => {
                let tail_offset = &self.offsets[&e.tail];
                let raw: Shift = e
                    .shift
                    .iter()
                    .zip(head_offset.iter().zip(tail_offset))
                    .map(|(s, (h, t))| s + h - t)
                    .collect();
                let shift = self.basis.add(&to_rationals(&raw));
                if v < w || sign_of(&shift) > 0 {
                    self.steps.push(TraversalStep { head: v, tail: w, shift });
                }
            }
            Some(_) => {}
        }

        true
    }

    /// The `i`-th step, advancing the source as far as needed.
    pub fn get(&mut self, i: usize) -> Option<&TraversalStep> {
        while self.steps.len() <= i && self.advance() {}
        self.steps.get(i)
    }

    /// Runs the traversal to the end and returns all steps.
    pub fn into_steps(mut self) -> Vec<TraversalStep> {
        while self.advance() {}
        self.steps
    }
}
