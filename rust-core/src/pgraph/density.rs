use log::debug;
use serde::{Deserialize, Serialize};

use super::periodic::PeriodicGraph;
use crate::interfaces::VertexId;
use crate::Result;

/// Coordination shells around one representative of a vertex orbit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrbitShells {
    pub representative: VertexId,
    pub size: usize,
    /// Shells 1..=dist, cut short once the running total passes the cap.
    pub shells: Vec<usize>,
}

impl OrbitShells {
    /// The vertex itself plus every listed shell.
    pub fn cumulative(&self) -> usize {
        1 + self.shells.iter().sum::<usize>()
    }
}

/// Coordination sequences per vertex orbit and the topological density
/// derived from them (TD10 for ten shells).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologicalDensity {
    pub dist: usize,
    pub orbits: Vec<OrbitShells>,
    /// Cumulative count averaged over all vertices of the cell, rounded.
    /// `None` when some orbit passed the cap.
    pub density: Option<usize>,
}

impl TopologicalDensity {
    pub fn is_complete(&self) -> bool {
        self.density.is_some()
    }
}

/// Sums the first `dist` shells around one vertex per orbit and weights each
/// sum by the orbit size.
///
/// An orbit whose running total exceeds `cap` before all shells are added
/// stops there and leaves the density undefined.
pub fn topological_density(
    graph: &PeriodicGraph,
    orbits: &[Vec<VertexId>],
    dist: usize,
    cap: usize,
) -> Result<TopologicalDensity> {
    let mut result = Vec::with_capacity(orbits.len());
    let mut total = 0;
    let mut complete = true;

    for orbit in orbits {
        let Some(&representative) = orbit.first() else {
            continue;
        };
        let sequence = graph.coordination_sequence(representative, dist)?;

        let mut sum = 1;
        let mut shells = Vec::with_capacity(dist);
        for &x in &sequence[1..] {
            if sum > cap {
                complete = false;
                break;
            }
            shells.push(x);
            sum += x;
        }

        total += orbit.len() * sum;
        result.push(OrbitShells {
            representative,
            size: orbit.len(),
            shells,
        });
    }

    let n = graph.vertices().len();
    let density = complete.then(|| (2 * total + n) / (2 * n));
    if density.is_none() {
        debug!("cumulative count passed {cap} within {dist} shells, no density");
    }

    Ok(TopologicalDensity {
        dist,
        orbits: result,
        density,
    })
}
