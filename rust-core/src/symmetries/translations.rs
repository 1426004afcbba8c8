use std::collections::BTreeMap;

use log::debug;
use nalgebra::DMatrix;
use num_traits::Zero;

use super::automorphism::find_automorphism;
use super::directions::DirectionIndex;
use crate::arithmetic::{
    inverse, matrix_from_rows, minus, modulo_one, row_times, to_integers, to_rationals, triangulate,
    Rational,
};
use crate::common::Partition;
use crate::error::NetError;
use crate::interfaces::VertexId;
use crate::pgraph::{Edge, PeriodicGraph, Placement};
use crate::Result;

/// Classes of vertices related by a pure translation of the infinite graph,
/// together with the fractional translations that relate them.
#[derive(Debug, Clone)]
pub struct Translations {
    classes: Vec<Vec<VertexId>>,
    extra: Vec<Vec<Rational>>,
    vertex_count: usize,
}

impl Translations {
    /// Translation classes, ordered by their smallest vertex.
    pub fn classes(&self) -> &[Vec<VertexId>] {
        &self.classes
    }

    /// Translations not in the integer lattice, as vectors in [0, 1)ᵈ.
    pub fn extra_translations(&self) -> &[Vec<Rational>] {
        &self.extra
    }

    /// True if the given cell is already the smallest one.
    pub fn is_minimal(&self) -> bool {
        self.classes.len() == self.vertex_count
    }

    /// True if some vertex is translation equivalent to a different vertex at
    /// the same position, which no finite cell can represent.
    pub fn is_ladder(&self) -> bool {
        self.extra.iter().any(|t| t.iter().all(|x| x.is_zero()))
    }
}

/// Finds all vertices translation equivalent to the first vertex via
/// identity-transform automorphisms, and closes that into classes.
pub fn find_translations(graph: &PeriodicGraph, placement: &Placement) -> Result<Translations> {
    if !graph.is_connected() {
        return Err(NetError::NotConnected);
    }
    if !placement.is_locally_stable(graph) {
        return Err(NetError::NotLocallyStable);
    }

    let verts = graph.vertices();
    let v0 = verts[0];
    let id = DMatrix::identity(graph.dim(), graph.dim());
    let index = DirectionIndex::new(graph, placement);

    let mut p = Partition::new();
    for v in verts {
        p.find(v);
    }

    for &v in &verts[1..] {
        if p.same_class(&v0, &v) {
            continue;
        }
        if let Some(a) = find_automorphism(graph, placement, &index, v0, v, &id) {
            for w in verts {
                p.union(w, &a.image(*w));
            }
        }
    }

    let origin = placement.position(v0);
    let mut extra = Vec::new();
    for &v in &verts[1..] {
        if p.same_class(&v0, &v) {
            extra.push(modulo_one(&minus(placement.position(v), origin)));
        }
    }

    let classes = p.classes();
    debug!("{} vertices in {} translation classes", verts.len(), classes.len());

    Ok(Translations {
        classes,
        extra,
        vertex_count: verts.len(),
    })
}

/// The graph on the smallest cell together with the vertex each original vertex
/// collapses to.
#[derive(Debug, Clone)]
pub struct MinimalImage {
    pub graph: PeriodicGraph,
    pub orbits: BTreeMap<VertexId, VertexId>,
}

/// Collapses translation equivalent vertices and re-expresses every shift in
/// the finer lattice generated by ℤᵈ and the extra translations.
pub fn minimal_image(
    graph: &PeriodicGraph,
    placement: &Placement,
    translations: &Translations,
) -> Result<MinimalImage> {
    if translations.is_ladder() {
        return Err(NetError::Ladder);
    }

    let orbits: BTreeMap<VertexId, VertexId> = translations
        .classes()
        .iter()
        .flat_map(|class| {
            // members are listed in vertex order
            let rep = class[0];
            class.iter().map(move |&v| (v, rep))
        })
        .collect();

    if translations.is_minimal() {
        return Ok(MinimalImage {
            graph: graph.clone(),
            orbits,
        });
    }

    let d = graph.dim();
    let mut generators: Vec<Vec<Rational>> = (0..d)
        .map(|i| to_rationals(&(0..d).map(|j| i64::from(i == j)).collect::<Vec<_>>()))
        .collect();
    generators.extend(translations.extra_translations().iter().cloned());

    let reduced = triangulate(&generators);
    assert_eq!(reduced.rank, d, "translation lattice of {graph} is not full rank");
    let basis = matrix_from_rows(&reduced.rows[..d], d);
    let basis_change =
        inverse(&basis).unwrap_or_else(|| panic!("translation lattice of {graph} is degenerate"));

    let edges: Vec<Edge> = graph
        .edges()
        .iter()
        .map(|e| {
            let (u, v) = (orbits[&e.head], orbits[&e.tail]);
            let offset = minus(placement.position(v), placement.position(u));
            let shift = row_times(&minus(&placement.edge_vector(e), &offset), &basis_change);
            let shift = to_integers(&shift)
                .unwrap_or_else(|| panic!("edge {e} has fractional shift {shift:?} in the minimal cell"));
            Edge::new(u, v, shift)
        })
        .collect();

    debug!("minimal image has {} of {} vertices", translations.classes().len(), graph.vertices().len());

    Ok(MinimalImage {
        graph: PeriodicGraph::from_edges(edges)?,
        orbits,
    })
}
