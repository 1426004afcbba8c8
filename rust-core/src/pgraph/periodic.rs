use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use std::fmt;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::arithmetic::{is_unimodular, sign_of, IntegerLattice};
use crate::error::NetError;
use crate::interfaces::{Shift, VertexId};
use crate::Result;

// ======================== EDGES ========================

/// A directed edge of the quotient graph: from `head` in the home cell to
/// `tail` in the cell translated by `shift`.
///
/// Field order gives the derived ordering (head, tail, shift), which is the
/// order edges are stored and enumerated in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub head: VertexId,
    pub tail: VertexId,
    pub shift: Shift,
}

impl Edge {
    pub fn new(head: VertexId, tail: VertexId, shift: Shift) -> Self {
        Self { head, tail, shift }
    }

    /// The same undirected edge traversed the other way.
    pub fn reverse(&self) -> Self {
        Self {
            head: self.tail,
            tail: self.head,
            shift: self.shift.iter().map(|x| -x).collect(),
        }
    }

    /// Representative of the undirected edge: tail ≥ head, and for loops a
    /// shift whose first non-zero entry is positive.
    pub fn canonical(&self) -> Self {
        if self.tail < self.head || (self.tail == self.head && sign_of(&self.shift) < 0) {
            self.reverse()
        } else {
            self.clone()
        }
    }

    pub fn is_canonical(&self) -> bool {
        *self == self.canonical()
    }

    pub fn is_loop(&self) -> bool {
        self.head == self.tail
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shift: Vec<String> = self.shift.iter().map(|x| x.to_string()).collect();
        write!(f, "({}, {}, [{}])", self.head, self.tail, shift.join(", "))
    }
}

// ======================== CONNECTIVITY ========================

/// A connected component of the quotient graph together with the lattice of
/// translations its cycles generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub vertices: Vec<VertexId>,
    pub basis: Vec<Shift>,
    /// Index of the translation lattice in ℤᵈ; 0 if it does not have full rank.
    pub multiplicity: u64,
}

// ======================== PERIODIC GRAPH ========================

/// A periodic graph given by its quotient: canonical, de-duplicated edges whose
/// shifts all have the same dimension.
///
/// Vertices and incidence lists are derived once at construction; the graph is
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodicGraph {
    dim: usize,
    edges: Vec<Edge>,
    vertices: Vec<VertexId>,
    incidences: BTreeMap<VertexId, Vec<Edge>>,
}

impl PeriodicGraph {
    /// Builds a graph from (head, tail, shift) triples.
    pub fn new<I>(data: I) -> Result<Self>
    where
        I: IntoIterator<Item = (VertexId, VertexId, Shift)>,
    {
        Self::from_edges(data.into_iter().map(|(h, t, s)| Edge::new(h, t, s)))
    }

    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = Edge>,
    {
        let edges: BTreeSet<Edge> = edges.into_iter().map(|e| e.canonical()).collect();
        let dim = edges.iter().next().ok_or(NetError::NoEdges)?.shift.len();
        if dim == 0 {
            return Err(NetError::ZeroDimension);
        }

        for e in &edges {
            if e.shift.len() != dim {
                return Err(NetError::InconsistentDimension {
                    expected: dim,
                    found: e.shift.len(),
                });
            }
            if e.is_loop() && e.shift.iter().all(|&x| x == 0) {
                return Err(NetError::DegenerateLoop(e.head));
            }
        }

        let mut incidences: BTreeMap<VertexId, Vec<Edge>> = BTreeMap::new();
        for e in &edges {
            incidences.entry(e.head).or_default().push(e.clone());
            incidences.entry(e.tail).or_default().push(e.reverse());
        }
        for list in incidences.values_mut() {
            list.sort();
        }

        Ok(Self {
            dim,
            edges: edges.into_iter().collect(),
            vertices: incidences.keys().copied().collect(),
            incidences,
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Canonical edges in sorted order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Vertices in increasing order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.incidences.contains_key(&v)
    }

    /// All edges leaving `v`, both orientations of every incident edge, sorted.
    pub fn incidences(&self, v: VertexId) -> &[Edge] {
        self.incidences.get(&v).map_or(&[], |list| list.as_slice())
    }

    pub fn degree(&self, v: VertexId) -> usize {
        self.incidences(v).len()
    }

    /// Every edge in both orientations, grouped by head vertex.
    pub fn directed_edges(&self) -> Vec<Edge> {
        self.incidences.values().flatten().cloned().collect()
    }

    /// Relabels the vertices. The mapping must be injective on the vertex set.
    pub fn with_vertex_mapping<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(VertexId) -> VertexId,
    {
        let mut seen = HashSet::new();
        for &v in &self.vertices {
            if !seen.insert(f(v)) {
                return Err(NetError::NonInjectiveMapping(f(v)));
            }
        }
        Self::from_edges(
            self.edges
                .iter()
                .map(|e| Edge::new(f(e.head), f(e.tail), e.shift.clone())),
        )
    }

    /// Expresses every shift in a new lattice basis, `shift · transform`.
    pub fn with_shift_transform(&self, transform: &DMatrix<i64>) -> Result<Self> {
        if transform.nrows() != self.dim || transform.ncols() != self.dim {
            return Err(NetError::TransformDimension {
                expected: self.dim,
                found: transform.nrows(),
            });
        }
        if !is_unimodular(transform) {
            return Err(NetError::NotUnimodular);
        }
        Self::from_edges(self.edges.iter().map(|e| {
            let shift = (0..self.dim)
                .map(|j| (0..self.dim).map(|i| e.shift[i] * transform[(i, j)]).sum())
                .collect();
            Edge::new(e.head, e.tail, shift)
        }))
    }

    // ======================== CONNECTIVITY ========================

    /// Breadth-first decomposition into connected components. Every cycle
    /// closed during the traversal contributes its net translation to the
    /// component's lattice.
    pub fn connected_components(&self) -> Vec<Component> {
        let mut offsets: BTreeMap<VertexId, Shift> = BTreeMap::new();
        let mut result = Vec::new();

        for &start in &self.vertices {
            if offsets.contains_key(&start) {
                continue;
            }

            let mut lattice = IntegerLattice::new(self.dim);
            let mut members = vec![start];
            let mut queue = VecDeque::from([start]);
            offsets.insert(start, vec![0; self.dim]);

            while let Some(v) = queue.pop_front() {
                let base = offsets[&v].clone();
                for e in self.incidences(v) {
                    let reached: Shift = base.iter().zip(&e.shift).map(|(a, b)| a + b).collect();
                    match offsets.get(&e.tail) {
                        None => {
                            offsets.insert(e.tail, reached);
                            members.push(e.tail);
                            queue.push_back(e.tail);
                        }
                        Some(known) => {
                            let cycle: Shift = reached.iter().zip(known).map(|(a, b)| a - b).collect();
                            lattice.extend(&cycle);
                        }
                    }
                }
            }

            members.sort_unstable();
            result.push(Component {
                vertices: members,
                multiplicity: lattice.index(),
                basis: lattice.basis().to_vec(),
            });
        }

        result
    }

    /// True if the infinite graph is connected: a single component whose
    /// cycles generate every lattice translation.
    pub fn is_connected(&self) -> bool {
        let components = self.connected_components();
        components.len() == 1 && components[0].multiplicity == 1
    }

    /// Sizes of the first `dist` shells around `start` in the infinite graph,
    /// starting with the 1 for `start` itself.
    pub fn coordination_sequence(&self, start: VertexId, dist: usize) -> Result<Vec<usize>> {
        if !self.contains_vertex(start) {
            return Err(NetError::UnknownVertex(start));
        }

        let origin = (start, vec![0; self.dim]);
        let mut previous: HashSet<(VertexId, Shift)> = HashSet::new();
        let mut current: HashSet<(VertexId, Shift)> = HashSet::from([origin]);
        let mut result = vec![1];

        for _ in 0..dist {
            let mut next = HashSet::new();
            for (v, s) in &current {
                for e in self.incidences(*v) {
                    let w: Shift = s.iter().zip(&e.shift).map(|(a, b)| a + b).collect();
                    let node = (e.tail, w);
                    if !previous.contains(&node) && !current.contains(&node) {
                        next.insert(node);
                    }
                }
            }
            result.push(next.len());
            previous = std::mem::replace(&mut current, next);
        }

        Ok(result)
    }
}

impl fmt::Display for PeriodicGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edges: Vec<String> = self.edges.iter().map(|e| e.to_string()).collect();
        write!(f, "PeriodicGraph({}D: {})", self.dim, edges.join(", "))
    }
}
