use std::collections::{BTreeMap, BTreeSet, VecDeque};

use log::trace;
use nalgebra::DMatrix;

use super::directions::DirectionIndex;
use crate::arithmetic::{from_integer_matrix, inverse, row_times, to_integer_matrix};
use crate::interfaces::VertexId;
use crate::pgraph::{Edge, PeriodicGraph, Placement};

/// A symmetry of a periodic graph: a bijection of the vertices and directed
/// edges of the quotient together with the integer basis change it induces on
/// edge vectors (`v · transform`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automorphism {
    src2img: BTreeMap<VertexId, VertexId>,
    edge_map: BTreeMap<Edge, Edge>,
    transform: DMatrix<i64>,
}

impl Automorphism {
    pub fn identity(graph: &PeriodicGraph) -> Self {
        Self {
            src2img: graph.vertices().iter().map(|&v| (v, v)).collect(),
            edge_map: graph.directed_edges().into_iter().map(|e| (e.clone(), e)).collect(),
            transform: DMatrix::identity(graph.dim(), graph.dim()),
        }
    }

    pub(crate) fn from_parts(
        src2img: BTreeMap<VertexId, VertexId>,
        edge_map: BTreeMap<Edge, Edge>,
        transform: DMatrix<i64>,
    ) -> Self {
        Self {
            src2img,
            edge_map,
            transform,
        }
    }

    pub fn image(&self, v: VertexId) -> VertexId {
        self.src2img[&v]
    }

    /// Image of a directed edge; `None` for edges not in the graph.
    pub fn edge_image(&self, e: &Edge) -> Option<&Edge> {
        self.edge_map.get(e)
    }

    /// Images of a list of edges, e.g. a candidate basis.
    pub fn map_edges(&self, edges: &[Edge]) -> Option<Vec<Edge>> {
        edges.iter().map(|e| self.edge_image(e).cloned()).collect()
    }

    /// Directed edges of the source graph, sorted.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edge_map.keys()
    }

    pub fn src2img(&self) -> &BTreeMap<VertexId, VertexId> {
        &self.src2img
    }

    pub fn transform(&self) -> &DMatrix<i64> {
        &self.transform
    }

    pub fn is_identity(&self) -> bool {
        let n = self.transform.nrows();
        self.src2img.iter().all(|(v, w)| v == w) && self.transform == DMatrix::identity(n, n)
    }

    /// `self` followed by `other`.
    pub fn compose(&self, other: &Automorphism) -> Automorphism {
        Automorphism {
            src2img: self.src2img.iter().map(|(&v, &w)| (v, other.image(w))).collect(),
            edge_map: self
                .edge_map
                .iter()
                .map(|(e, f)| (e.clone(), other.edge_map[f].clone()))
                .collect(),
            transform: &self.transform * &other.transform,
        }
    }

    pub fn inverse(&self) -> Automorphism {
        let inv = inverse(&from_integer_matrix(&self.transform))
            .and_then(|m| to_integer_matrix(&m))
            .unwrap_or_else(|| panic!("automorphism transform {} is not unimodular", self.transform));

        Automorphism {
            src2img: self.src2img.iter().map(|(&v, &w)| (w, v)).collect(),
            edge_map: self.edge_map.iter().map(|(e, f)| (f.clone(), e.clone())).collect(),
            transform: inv,
        }
    }
}

/// Tries to extend `start_src ↦ start_img` with the given transform to a full
/// automorphism, propagating breadth-first along edge directions.
///
/// Returns `None` as soon as an image direction is missing, an edge or vertex
/// would get two different images, or the resulting map is not a bijection
/// of all vertices and directed edges.
pub fn find_automorphism(
    graph: &PeriodicGraph,
    placement: &Placement,
    index: &DirectionIndex,
    start_src: VertexId,
    start_img: VertexId,
    transform: &DMatrix<i64>,
) -> Option<Automorphism> {
    let m = from_integer_matrix(transform);

    let mut src2img = BTreeMap::from([(start_src, start_img)]);
    let mut edge_map: BTreeMap<Edge, Edge> = BTreeMap::new();
    let mut queue = VecDeque::from([start_src]);

    while let Some(v) = queue.pop_front() {
        let w = src2img[&v];

        for e in graph.incidences(v) {
            let direction = row_times(&placement.edge_vector(e), &m);
            let Some(f) = index.edge(w, &direction) else {
                trace!("no edge at {w} in direction {direction:?}");
                return None;
            };

            match edge_map.get(e) {
                Some(known) if known != f => return None,
                Some(_) => continue,
                None => {
                    edge_map.insert(e.clone(), f.clone());
                }
            }

            match src2img.get(&e.tail) {
                Some(&known) if known != f.tail => return None,
                Some(_) => {}
                None => {
                    src2img.insert(e.tail, f.tail);
                    queue.push_back(e.tail);
                }
            }
        }
    }

    if src2img.len() != graph.vertices().len() {
        return None;
    }
    let images: BTreeSet<VertexId> = src2img.values().copied().collect();
    if images.len() != src2img.len() {
        trace!("candidate from {start_src} to {start_img} is not injective");
        return None;
    }
    let edge_images: BTreeSet<&Edge> = edge_map.values().collect();
    if edge_map.len() != graph.directed_edges().len() || edge_images.len() != edge_map.len() {
        return None;
    }

    Some(Automorphism {
        src2img,
        edge_map,
        transform: transform.clone(),
    })
}
