use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use log::{debug, warn};
use nalgebra::DMatrix;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use super::automorphism::Automorphism;
use super::directions::DirectionIndex;
use crate::arithmetic::{minus, modulo_one, to_integers, Rational};
use crate::config::STATIONARY_STEP_BUDGET;
use crate::error::NetError;
use crate::interfaces::{Completeness, Shift, VertexId};
use crate::pgraph::{Edge, PeriodicGraph, Placement};
use crate::Result;

/// Tuning for the stationary symmetry search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationaryOptions {
    /// Candidate assignments tried before the search gives up.
    pub step_budget: usize,
}

impl Default for StationaryOptions {
    fn default() -> Self {
        Self {
            step_budget: STATIONARY_STEP_BUDGET,
        }
    }
}

/// Automorphisms with identity transform that keep every vertex position
/// fixed modulo the lattice. Only unstable graphs have more than the identity.
#[derive(Debug, Clone)]
pub struct StationarySymmetries {
    pub symmetries: Vec<Automorphism>,
    pub completeness: Completeness,
    pub steps: usize,
}

impl StationarySymmetries {
    pub fn is_complete(&self) -> bool {
        self.completeness.is_complete()
    }

    pub fn len(&self) -> usize {
        self.symmetries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symmetries.is_empty()
    }
}

type Assignment = BTreeMap<VertexId, VertexId>;

struct StationarySearch<'a> {
    graph: &'a PeriodicGraph,
    placement: &'a Placement,
    index: DirectionIndex,
    candidates: BTreeMap<VertexId, Vec<VertexId>>,
    seeds: Vec<VertexId>,
    budget: usize,
    steps: usize,
    truncated: bool,
    found: Vec<Automorphism>,
}

/// One seed per strongly connected component of the direction-deduction
/// graph, upstream components first. Fixing the image of a seed fixes the
/// images of everything reachable from it.
fn deduction_seeds(graph: &PeriodicGraph, index: &DirectionIndex) -> Vec<VertexId> {
    let mut deductions = DiGraph::<VertexId, ()>::new();
    let nodes: HashMap<VertexId, NodeIndex> = graph
        .vertices()
        .iter()
        .map(|&v| (v, deductions.add_node(v)))
        .collect();

    for &v in graph.vertices() {
        for (_, e) in index.directions(v) {
            deductions.add_edge(nodes[&v], nodes[&e.tail], ());
        }
    }

    // components come out downstream first
    tarjan_scc(&deductions)
        .into_iter()
        .rev()
        .filter_map(|scc| scc.into_iter().map(|n| deductions[n]).min())
        .collect()
}

impl<'a> StationarySearch<'a> {
    fn new(graph: &'a PeriodicGraph, placement: &'a Placement, budget: usize) -> Self {
        let index = DirectionIndex::new(graph, placement);
        let seeds = deduction_seeds(graph, &index);

        let mut by_position: BTreeMap<Vec<Rational>, Vec<VertexId>> = BTreeMap::new();
        for &v in graph.vertices() {
            by_position.entry(modulo_one(placement.position(v))).or_default().push(v);
        }
        let candidates = graph
            .vertices()
            .iter()
            .map(|&v| (v, by_position[&modulo_one(placement.position(v))].clone()))
            .collect();

        Self {
            graph,
            placement,
            index,
            candidates,
            seeds,
            budget,
            steps: 0,
            truncated: false,
            found: Vec::new(),
        }
    }

    /// Extends the assignment along unambiguous directions from `start`.
    /// Returns false on a contradiction.
    fn propagate(&self, assignment: &mut Assignment, used: &mut BTreeSet<VertexId>, start: VertexId) -> bool {
        let mut queue = VecDeque::from([start]);

        while let Some(v) = queue.pop_front() {
            let w = assignment[&v];
            for (direction, e) in self.index.directions(v) {
                let Some(f) = self.index.edge(w, direction) else {
                    return false;
                };
                match assignment.get(&e.tail) {
                    Some(&known) if known != f.tail => return false,
                    Some(_) => {}
                    None => {
                        if !self.candidates[&e.tail].contains(&f.tail) || !used.insert(f.tail) {
                            return false;
                        }
                        assignment.insert(e.tail, f.tail);
                        queue.push_back(e.tail);
                    }
                }
            }
        }

        true
    }

    /// Turns a complete vertex assignment into an automorphism, if every edge
    /// has an image.
    fn verify(&self, assignment: &Assignment) -> Option<Automorphism> {
        if assignment.len() != self.graph.vertices().len() {
            return None;
        }

        let mut offsets: BTreeMap<VertexId, Shift> = BTreeMap::new();
        for (&v, &w) in assignment {
            let delta = minus(self.placement.position(w), self.placement.position(v));
            offsets.insert(v, to_integers(&delta)?);
        }

        let mut edge_map = BTreeMap::new();
        for e in self.graph.directed_edges() {
            let shift: Shift = e
                .shift
                .iter()
                .zip(offsets[&e.head].iter().zip(&offsets[&e.tail]))
                .map(|(s, (du, dv))| s + du - dv)
                .collect();
            let image = Edge::new(assignment[&e.head], assignment[&e.tail], shift);
            if self.graph.incidences(image.head).binary_search(&image).is_err() {
                return None;
            }
            edge_map.insert(e, image);
        }

        let d = self.graph.dim();
        Some(Automorphism::from_parts(
            assignment.clone(),
            edge_map,
            DMatrix::identity(d, d),
        ))
    }

    fn search(&mut self, depth: usize, assignment: Assignment, used: BTreeSet<VertexId>) {
        if self.truncated {
            return;
        }
        let Some(&seed) = self.seeds.get(depth) else {
            if let Some(a) = self.verify(&assignment) {
                self.found.push(a);
            }
            return;
        };
        if assignment.contains_key(&seed) {
            self.search(depth + 1, assignment, used);
            return;
        }

        for c in self.candidates[&seed].clone() {
            if used.contains(&c) {
                continue;
            }
            self.steps += 1;
            if self.steps > self.budget {
                self.truncated = true;
                return;
            }

            let mut next = assignment.clone();
            let mut next_used = used.clone();
            next.insert(seed, c);
            next_used.insert(c);
            if self.propagate(&mut next, &mut next_used, seed) {
                self.search(depth + 1, next, next_used);
            }
        }
    }
}

/// Finds the stationary symmetries of a connected graph by backtracking over
/// the images of deduction seeds, within the step budget of `options`.
pub fn stationary_symmetries(
    graph: &PeriodicGraph,
    placement: &Placement,
    options: &StationaryOptions,
) -> Result<StationarySymmetries> {
    if !graph.is_connected() {
        return Err(NetError::NotConnected);
    }

    let mut search = StationarySearch::new(graph, placement, options.step_budget);
    debug!("stationary search over {} deduction seeds", search.seeds.len());
    search.search(0, Assignment::new(), BTreeSet::new());

    let completeness = if search.truncated {
        warn!(
            "stationary symmetry search stopped after {} steps with {} symmetries found",
            options.step_budget,
            search.found.len()
        );
        Completeness::Truncated
    } else {
        Completeness::Complete
    };

    let mut symmetries = search.found;
    symmetries.sort_by_key(|a| a.src2img().values().copied().collect::<Vec<_>>());

    Ok(StationarySymmetries {
        symmetries,
        completeness,
        steps: search.steps.min(options.step_budget),
    })
}
