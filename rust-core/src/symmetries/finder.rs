use std::collections::{HashMap, HashSet, VecDeque};

use log::{debug, trace};
use nalgebra::DMatrix;

use super::automorphism::{find_automorphism, Automorphism};
use super::characteristic::{basis_matrix, characteristic_bases};
use super::directions::DirectionIndex;
use crate::arithmetic::{inverse, is_unimodular, to_integer_matrix};
use crate::common::{LabelledPartition, Partition};
use crate::error::NetError;
use crate::interfaces::VertexId;
use crate::pgraph::{Edge, PeriodicGraph, Placement};
use crate::Result;

/// The symmetry group of a connected, locally stable periodic graph, modulo
/// lattice translations.
#[derive(Debug, Clone)]
pub struct SymmetryGroup {
    generators: Vec<Automorphism>,
    elements: Vec<Automorphism>,
    representative_bases: Vec<Vec<Edge>>,
}

impl SymmetryGroup {
    pub fn generators(&self) -> &[Automorphism] {
        &self.generators
    }

    /// All group elements, the identity first.
    pub fn elements(&self) -> &[Automorphism] {
        &self.elements
    }

    pub fn order(&self) -> usize {
        self.elements.len()
    }

    /// Number of distinct lattice transforms, i.e. the order of the point group.
    pub fn point_group_order(&self) -> usize {
        let transforms: HashSet<&DMatrix<i64>> = self.elements.iter().map(|a| a.transform()).collect();
        transforms.len()
    }

    /// One candidate basis per orbit of the group on characteristic bases.
    pub fn representative_bases(&self) -> &[Vec<Edge>] {
        &self.representative_bases
    }

    fn identity(&self) -> &Automorphism {
        &self.elements[0]
    }

    /// Vertices grouped by symmetry, orbits ordered by their smallest vertex.
    pub fn vertex_orbits(&self) -> Vec<Vec<VertexId>> {
        let mut p = Partition::new();
        for &v in self.identity().src2img().keys() {
            p.find(&v);
        }
        for g in &self.generators {
            for (v, w) in g.src2img() {
                p.union(v, w);
            }
        }
        p.classes()
    }

    /// Canonical edges grouped by symmetry, orbits ordered by their smallest edge.
    pub fn edge_orbits(&self) -> Vec<Vec<Edge>> {
        let canonical: Vec<&Edge> = self.identity().edges().filter(|e| e.is_canonical()).collect();
        let mut p = Partition::new();
        for &e in &canonical {
            p.find(e);
        }
        for g in &self.generators {
            for &e in &canonical {
                if let Some(f) = g.edge_image(e) {
                    p.union(e, &f.canonical());
                }
            }
        }
        p.classes()
    }
}

/// Closes the generators under composition, starting from the identity.
fn closure(graph: &PeriodicGraph, generators: &[Automorphism]) -> Vec<Automorphism> {
    let v0 = graph.vertices()[0];
    let identity = Automorphism::identity(graph);

    let key = |a: &Automorphism| (a.image(v0), a.transform().as_slice().to_vec());
    let mut seen = HashSet::from([key(&identity)]);
    let mut elements = vec![identity.clone()];
    let mut queue = VecDeque::from([identity]);

    while let Some(a) = queue.pop_front() {
        for g in generators {
            let b = a.compose(g);
            if seen.insert(key(&b)) {
                elements.push(b.clone());
                queue.push_back(b);
            }
        }
    }

    elements
}

/// Computes the symmetry group of `graph`.
///
/// Every automorphism is determined by the image of the first characteristic
/// basis. Other bases are tried one at a time; a union-find over basis indices
/// records which bases are already known to be images of the first one and
/// which ones are dead ends, so each orbit is probed at most once.
pub fn find_symmetries(graph: &PeriodicGraph, placement: &Placement) -> Result<SymmetryGroup> {
    if !graph.is_connected() {
        return Err(NetError::NotConnected);
    }
    if !placement.is_locally_stable(graph) {
        return Err(NetError::NotLocallyStable);
    }

    let bases = characteristic_bases(graph, placement);
    if bases.is_empty() {
        panic!("connected graph {graph} has no characteristic bases");
    }
    let position: HashMap<&[Edge], usize> = bases.iter().enumerate().map(|(i, b)| (b.as_slice(), i)).collect();

    let index = DirectionIndex::new(graph, placement);
    let b0 = &bases[0];
    let b0_inv = inverse(&basis_matrix(b0, placement))
        .unwrap_or_else(|| panic!("first characteristic basis of {graph} is singular"));

    let mut classes = LabelledPartition::new(|a: &bool, b: &bool| *a || *b);
    let mut generators = Vec::new();

    for (j, b) in bases.iter().enumerate().skip(1) {
        if classes.same_class(&0, &j) || classes.label(&j) {
            continue;
        }

        let candidate = to_integer_matrix(&(&b0_inv * basis_matrix(b, placement)))
            .filter(is_unimodular)
            .and_then(|m| find_automorphism(graph, placement, &index, b0[0].head, b[0].head, &m));

        let Some(a) = candidate else {
            trace!("basis {j} is a dead end");
            classes.set_label(&j, true);
            continue;
        };

        for (k, basis) in bases.iter().enumerate() {
            let image = a
                .map_edges(basis)
                .and_then(|img| position.get(img.as_slice()).copied())
                .unwrap_or_else(|| panic!("image of characteristic basis {k} is not characteristic"));
            classes.union(&k, &image);
        }
        generators.push(a);
    }

    let mut representative_bases = Vec::new();
    let mut roots = HashSet::new();
    for (k, b) in bases.iter().enumerate() {
        if roots.insert(classes.find(&k)) {
            representative_bases.push(b.clone());
        }
    }

    let elements = closure(graph, &generators);
    debug!(
        "{} generators, {} group elements, {} of {} bases representative",
        generators.len(),
        elements.len(),
        representative_bases.len(),
        bases.len()
    );

    Ok(SymmetryGroup {
        generators,
        elements,
        representative_bases,
    })
}
