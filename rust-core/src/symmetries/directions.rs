use std::collections::{BTreeMap, BTreeSet};

use crate::arithmetic::Rational;
use crate::interfaces::VertexId;
use crate::pgraph::{Edge, PeriodicGraph, Placement};

/// Directed edges keyed by their edge vector, per head vertex.
///
/// A direction shared by two different edges at the same vertex cannot be
/// used to deduce images and is dropped from the index.
#[derive(Debug, Clone)]
pub struct DirectionIndex {
    by_vertex: BTreeMap<VertexId, BTreeMap<Vec<Rational>, Edge>>,
}

impl DirectionIndex {
    pub fn new(graph: &PeriodicGraph, placement: &Placement) -> Self {
        let mut by_vertex = BTreeMap::new();

        for &v in graph.vertices() {
            let mut edges: BTreeMap<Vec<Rational>, Edge> = BTreeMap::new();
            let mut ambiguous = BTreeSet::new();

            for e in graph.incidences(v) {
                let d = placement.edge_vector(e);
                if ambiguous.contains(&d) {
                    continue;
                }
                if edges.insert(d.clone(), e.clone()).is_some() {
                    edges.remove(&d);
                    ambiguous.insert(d);
                }
            }

            by_vertex.insert(v, edges);
        }

        Self { by_vertex }
    }

    /// The unique edge leaving `v` with the given edge vector.
    pub fn edge(&self, v: VertexId, direction: &[Rational]) -> Option<&Edge> {
        self.by_vertex.get(&v)?.get(direction)
    }

    /// Unambiguous directions at `v` and their edges, ordered by direction.
    pub fn directions(&self, v: VertexId) -> impl Iterator<Item = (&Vec<Rational>, &Edge)> {
        self.by_vertex.get(&v).into_iter().flatten()
    }
}
