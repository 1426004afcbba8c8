use itertools::Itertools;
use log::debug;
use nalgebra::DMatrix;

use crate::arithmetic::{matrix_from_rows, rank_of_rows, Rational};
use crate::pgraph::{Edge, PeriodicGraph, Placement};

/// Matrix whose rows are the edge vectors of `edges`.
pub fn basis_matrix(edges: &[Edge], placement: &Placement) -> DMatrix<Rational> {
    let rows: Vec<Vec<Rational>> = edges.iter().map(|e| placement.edge_vector(e)).collect();
    matrix_from_rows(&rows, placement.dim())
}

fn is_independent(edges: &[&Edge], placement: &Placement) -> bool {
    let rows: Vec<Vec<Rational>> = edges.iter().map(|e| placement.edge_vector(e)).collect();
    rank_of_rows(&rows, placement.dim()) == edges.len()
}

/// Every ordering of every independent `d`-subset of `edges`.
fn ordered_bases(edges: &[Edge], placement: &Placement) -> Vec<Vec<Edge>> {
    let d = placement.dim();
    let mut result = Vec::new();

    for combo in edges.iter().combinations(d) {
        if !is_independent(&combo, placement) {
            continue;
        }
        for perm in combo.into_iter().permutations(d) {
            result.push(perm.into_iter().cloned().collect());
        }
    }

    result
}

/// Bases made of edges that all leave the same vertex.
fn vertex_bases(graph: &PeriodicGraph, placement: &Placement) -> Vec<Vec<Edge>> {
    graph
        .vertices()
        .iter()
        .flat_map(|&v| ordered_bases(graph.incidences(v), placement))
        .collect()
}

/// Chains of `d` edges, each starting where the previous one ends, with
/// independent edge vectors.
fn chain_bases(graph: &PeriodicGraph, placement: &Placement) -> Vec<Vec<Edge>> {
    let d = placement.dim();
    let mut result = Vec::new();
    let mut stack: Vec<Vec<&Edge>> = graph
        .vertices()
        .iter()
        .flat_map(|&v| graph.incidences(v))
        .map(|e| vec![e])
        .filter(|chain| is_independent(chain, placement))
        .rev()
        .collect();

    while let Some(chain) = stack.pop() {
        if chain.len() == d {
            result.push(chain.into_iter().cloned().collect());
            continue;
        }
        let Some(last) = chain.last() else {
            continue;
        };
        for e in graph.incidences(last.tail).iter().rev() {
            let mut next = chain.clone();
            next.push(e);
            if is_independent(&next, placement) {
                stack.push(next);
            }
        }
    }

    result
}

/// Candidate bases for the symmetry search, in a fixed enumeration order.
///
/// The set is mapped onto itself by every automorphism, so any automorphism
/// is determined by where it sends the first basis. Edges at a common vertex
/// are preferred; chains and then arbitrary edge subsets are only used when
/// no vertex carries `d` independent edges.
pub fn characteristic_bases(graph: &PeriodicGraph, placement: &Placement) -> Vec<Vec<Edge>> {
    let bases = vertex_bases(graph, placement);
    if !bases.is_empty() {
        debug!("{} characteristic bases at vertices", bases.len());
        return bases;
    }

    let bases = chain_bases(graph, placement);
    if !bases.is_empty() {
        debug!("{} characteristic bases along edge chains", bases.len());
        return bases;
    }

    let bases = ordered_bases(&graph.directed_edges(), placement);
    debug!("{} characteristic bases from arbitrary edges", bases.len());
    bases
}
