use nalgebra::DMatrix;

use crate::arithmetic::{identity, inverse, matrix_from_rows, rank_of_rows, row_times, to_rationals, Rational};

/// Projects shift vectors onto a lattice basis that is fixed by the order in
/// which independent shifts first show up.
///
/// The first `d` independent vectors added become the unit vectors of the new
/// coordinates; until there are `d` of them the basis is padded with standard
/// unit vectors.
#[derive(Debug, Clone)]
pub struct LatticeBasisAccumulator {
    dim: usize,
    vectors: Vec<Vec<Rational>>,
    matrix: DMatrix<Rational>,
}

impl LatticeBasisAccumulator {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: Vec::new(),
            matrix: identity(dim),
        }
    }

    /// Records `v` if it extends the basis and returns it in basis coordinates.
    pub fn add(&mut self, v: &[Rational]) -> Vec<Rational> {
        let n = self.vectors.len();

        if n < self.dim {
            let mut extended = self.vectors.clone();
            extended.push(v.to_vec());

            if rank_of_rows(&extended, self.dim) > n {
                self.vectors = extended;

                let mut basis = self.vectors.clone();
                for i in 0..self.dim {
                    let unit: Vec<i64> = (0..self.dim).map(|j| i64::from(i == j)).collect();
                    basis.push(to_rationals(&unit));
                    if rank_of_rows(&basis, self.dim) < basis.len() {
                        basis.pop();
                    }
                }

                self.matrix = inverse(&matrix_from_rows(&basis, self.dim))
                    .unwrap_or_else(|| panic!("completed lattice basis is singular"));
            }
        }

        row_times(v, &self.matrix)
    }

    /// Number of independent vectors seen so far.
    pub fn rank(&self) -> usize {
        self.vectors.len()
    }
}
