use std::sync::OnceLock;

use nalgebra::DMatrix;

use super::density::{topological_density, TopologicalDensity};
use super::periodic::PeriodicGraph;
use super::placement::{barycentric_placement, Placement};
use crate::config::DENSITY_COUNT_CAP;
use crate::error::NetError;
use crate::interfaces::VertexId;
use crate::invariant::{compute_invariant, Invariant};
use crate::symmetries::{
    find_automorphism, find_symmetries, find_translations, minimal_image, stationary_symmetries, Automorphism,
    DirectionIndex, MinimalImage, StationaryOptions, StationarySymmetries, SymmetryGroup, Translations,
};
use crate::Result;

fn cached<'a, T>(cell: &'a OnceLock<T>, compute: impl FnOnce() -> Result<T>) -> Result<&'a T> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = compute()?;
    Ok(cell.get_or_init(|| value))
}

/// A periodic graph together with everything derived from it.
///
/// Placement, symmetry group, translation classes, minimal image and invariant
/// are computed on first use and kept for the lifetime of the value.
#[derive(Debug)]
pub struct AnalyzedGraph {
    graph: PeriodicGraph,
    placement: OnceLock<Placement>,
    symmetries: OnceLock<SymmetryGroup>,
    translations: OnceLock<Translations>,
    minimal: OnceLock<MinimalImage>,
    invariant: OnceLock<Invariant>,
}

impl From<PeriodicGraph> for AnalyzedGraph {
    fn from(graph: PeriodicGraph) -> Self {
        Self::new(graph)
    }
}

impl AnalyzedGraph {
    pub fn new(graph: PeriodicGraph) -> Self {
        Self {
            graph,
            placement: OnceLock::new(),
            symmetries: OnceLock::new(),
            translations: OnceLock::new(),
            minimal: OnceLock::new(),
            invariant: OnceLock::new(),
        }
    }

    pub fn graph(&self) -> &PeriodicGraph {
        &self.graph
    }

    pub fn placement(&self) -> Result<&Placement> {
        cached(&self.placement, || barycentric_placement(&self.graph))
    }

    pub fn is_connected(&self) -> bool {
        self.graph.is_connected()
    }

    pub fn is_stable(&self) -> Result<bool> {
        Ok(self.placement()?.is_stable())
    }

    pub fn is_locally_stable(&self) -> Result<bool> {
        Ok(self.placement()?.is_locally_stable(&self.graph))
    }

    /// Connectivity first, then local stability.
    pub fn check_preconditions(&self) -> Result<()> {
        if !self.is_connected() {
            return Err(NetError::NotConnected);
        }
        if !self.is_locally_stable()? {
            return Err(NetError::NotLocallyStable);
        }
        Ok(())
    }

    pub fn symmetries(&self) -> Result<&SymmetryGroup> {
        self.check_preconditions()?;
        cached(&self.symmetries, || find_symmetries(&self.graph, self.placement()?))
    }

    /// The automorphism sending `start_src` to `start_img` with the given
    /// lattice transform, if there is one.
    pub fn automorphism(
        &self,
        start_src: VertexId,
        start_img: VertexId,
        transform: &DMatrix<i64>,
    ) -> Result<Option<Automorphism>> {
        self.check_preconditions()?;

        let d = self.graph.dim();
        if transform.nrows() != d || transform.ncols() != d {
            return Err(NetError::TransformDimension {
                expected: d,
                found: transform.nrows(),
            });
        }
        for v in [start_src, start_img] {
            if !self.graph.contains_vertex(v) {
                return Err(NetError::UnknownVertex(v));
            }
        }

        let placement = self.placement()?;
        let index = DirectionIndex::new(&self.graph, placement);
        Ok(find_automorphism(&self.graph, placement, &index, start_src, start_img, transform))
    }

    pub fn translations(&self) -> Result<&Translations> {
        self.check_preconditions()?;
        cached(&self.translations, || find_translations(&self.graph, self.placement()?))
    }

    pub fn is_minimal(&self) -> Result<bool> {
        Ok(self.translations()?.is_minimal())
    }

    pub fn is_ladder(&self) -> Result<bool> {
        Ok(self.translations()?.is_ladder())
    }

    pub fn minimal_image(&self) -> Result<&MinimalImage> {
        cached(&self.minimal, || {
            minimal_image(&self.graph, self.placement()?, self.translations()?)
        })
    }

    /// Canonical invariant, computed on the minimal image.
    pub fn invariant(&self) -> Result<&Invariant> {
        cached(&self.invariant, || {
            if self.is_minimal()? {
                Ok(compute_invariant(&self.graph, self.placement()?, self.symmetries()?))
            } else {
                let image = AnalyzedGraph::new(self.minimal_image()?.graph.clone());
                image.invariant().cloned()
            }
        })
    }

    /// The canonical key string; identical for all representations of a net.
    pub fn systre_key(&self) -> Result<String> {
        Ok(self.invariant()?.to_string())
    }

    /// Coordination sequences per vertex orbit and the topological density
    /// over `dist` shells, both taken on the minimal image.
    pub fn topological_density(&self, dist: usize) -> Result<TopologicalDensity> {
        let image = if self.is_minimal()? {
            None
        } else {
            Some(AnalyzedGraph::new(self.minimal_image()?.graph.clone()))
        };
        let net = image.as_ref().unwrap_or(self);
        let orbits = net.symmetries()?.vertex_orbits();
        topological_density(net.graph(), &orbits, dist, DENSITY_COUNT_CAP)
    }

    pub fn stationary_symmetries(&self, options: &StationaryOptions) -> Result<StationarySymmetries> {
        if !self.is_connected() {
            return Err(NetError::NotConnected);
        }
        stationary_symmetries(&self.graph, self.placement()?, options)
    }
}
