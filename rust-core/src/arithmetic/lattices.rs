use num_integer::Integer;
use num_traits::{Signed, Zero};

use super::rationals::{floor_div, negated, sign_of, Rational};

/// Result of [`triangulate`]: the reduced rows and the number of leading rows
/// that are not zero.
#[derive(Debug, Clone)]
pub struct Triangulation {
    pub rows: Vec<Vec<Rational>>,
    pub rank: usize,
}

/// Integer row reduction of rational row vectors.
///
/// Only unimodular operations are used (swaps, negations, adding integer
/// multiples of one row to another), so the rows keep generating the same
/// lattice. Each column is cleared below the diagonal Euclid style, always
/// pivoting on the entry of smallest absolute value; pivots end up positive and
/// zero rows at the bottom.
pub fn triangulate(rows: &[Vec<Rational>]) -> Triangulation {
    let mut a: Vec<Vec<Rational>> = rows.to_vec();
    let nrows = a.len();
    let ncols = a.first().map_or(0, |r| r.len());

    let mut row = 0;
    let mut col = 0;

    while row < nrows && col < ncols {
        let mut pivot: Option<(usize, Rational)> = None;
        for (i, r) in a.iter().enumerate().skip(row) {
            let val = r[col].abs();
            if !val.is_zero() && pivot.as_ref().map_or(true, |(_, p)| val < *p) {
                pivot = Some((i, val));
            }
        }

        let Some((pivot_row, _)) = pivot else {
            col += 1;
            continue;
        };

        a.swap(row, pivot_row);
        if sign_of(&a[row]) < 0 {
            a[row] = negated(&a[row]);
        }

        for i in (row + 1)..nrows {
            if a[i][col].is_zero() {
                continue;
            }
            let f = floor_div(&a[i][col], &a[row][col]);
            let reduced: Vec<Rational> = a[i]
                .iter()
                .zip(&a[row])
                .map(|(x, y)| x - &f * y)
                .collect();
            a[i] = reduced;
        }

        if a[(row + 1)..].iter().all(|r| r[col].is_zero()) {
            row += 1;
            col += 1;
        }
    }

    Triangulation { rows: a, rank: row }
}

/// Echelon basis of an integer lattice, grown one generator at a time.
///
/// Rows are kept in echelon form with strictly increasing pivot columns. A new
/// generator is merged into the rows it shares a pivot with via extended gcd,
/// so the basis always spans exactly the lattice generated so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLattice {
    dim: usize,
    rows: Vec<Vec<i64>>,
}

fn pivot_column(v: &[i64]) -> Option<usize> {
    v.iter().position(|&x| x != 0)
}

impl IntegerLattice {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            rows: Vec::new(),
        }
    }

    /// Adds a generator to the lattice.
    pub fn extend(&mut self, vector: &[i64]) {
        assert_eq!(vector.len(), self.dim, "generator has the wrong dimension");
        let mut v = vector.to_vec();

        let mut k = 0;
        while k < self.rows.len() {
            let Some(vc) = pivot_column(&v) else {
                return;
            };
            let pc = pivot_column(&self.rows[k]).unwrap_or(self.dim);

            if vc < pc {
                self.rows.insert(k, v);
                return;
            }
            if vc == pc {
                let a = self.rows[k][pc];
                let b = v[pc];
                let gcd = a.extended_gcd(&b);
                let (ag, bg) = (a / gcd.gcd, b / gcd.gcd);
                let row = &self.rows[k];
                let merged: Vec<i64> = row.iter().zip(&v).map(|(r, w)| gcd.x * r + gcd.y * w).collect();
                let rest: Vec<i64> = row.iter().zip(&v).map(|(r, w)| bg * r - ag * w).collect();
                self.rows[k] = merged;
                v = rest;
            }
            k += 1;
        }

        if pivot_column(&v).is_some() {
            self.rows.push(v);
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn rank(&self) -> usize {
        self.rows.len()
    }

    pub fn basis(&self) -> &[Vec<i64>] {
        &self.rows
    }

    /// Index of the lattice in the full integer lattice, or 0 if it does not
    /// have full rank.
    pub fn index(&self) -> u64 {
        if self.rows.len() < self.dim {
            return 0;
        }
        // Square echelon form, so the pivots sit on the diagonal
        (0..self.dim)
            .map(|i| self.rows[i][i].unsigned_abs())
            .product()
    }
}
