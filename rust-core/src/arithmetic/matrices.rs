use nalgebra::DMatrix;
use num_traits::{One, Signed, Zero};

use super::rationals::{rational, Rational};

// ======================== CONSTRUCTION & ACCESS ========================

/// Builds a matrix whose rows are the given vectors. `ncols` is needed for the
/// empty case.
pub fn matrix_from_rows(rows: &[Vec<Rational>], ncols: usize) -> DMatrix<Rational> {
    DMatrix::from_fn(rows.len(), ncols, |i, j| rows[i][j].clone())
}

pub fn identity(n: usize) -> DMatrix<Rational> {
    DMatrix::identity(n, n)
}

/// Row vector times matrix, `v · M`.
pub fn row_times(v: &[Rational], m: &DMatrix<Rational>) -> Vec<Rational> {
    assert_eq!(v.len(), m.nrows(), "vector length does not match matrix rows");
    (0..m.ncols())
        .map(|j| {
            v.iter()
                .enumerate()
                .filter(|(_, x)| !x.is_zero())
                .fold(Rational::zero(), |acc, (i, x)| acc + x * &m[(i, j)])
        })
        .collect()
}

pub fn from_integer_matrix(m: &DMatrix<i64>) -> DMatrix<Rational> {
    m.map(rational)
}

/// Converts an integral matrix to machine integers.
pub fn to_integer_matrix(m: &DMatrix<Rational>) -> Option<DMatrix<i64>> {
    let mut entries = Vec::with_capacity(m.len());
    for x in m.iter() {
        if !x.is_integer() {
            return None;
        }
        entries.push(num_traits::ToPrimitive::to_i64(&x.to_integer())?);
    }
    // nalgebra stores column-major, so does `iter`
    Some(DMatrix::from_vec(m.nrows(), m.ncols(), entries))
}

// ======================== ELIMINATION ========================

/// Forward elimination in place. Returns the pivot columns and the sign of the
/// row permutation that was applied.
fn row_echelon(m: &mut DMatrix<Rational>) -> (Vec<usize>, i8) {
    let (nrows, ncols) = m.shape();
    let mut pivots = Vec::new();
    let mut sign = 1;
    let mut row = 0;

    for col in 0..ncols {
        if row >= nrows {
            break;
        }
        let Some(pivot_row) = (row..nrows).find(|&i| !m[(i, col)].is_zero()) else {
            continue;
        };
        if pivot_row != row {
            m.swap_rows(pivot_row, row);
            sign = -sign;
        }
        for i in (row + 1)..nrows {
            if m[(i, col)].is_zero() {
                continue;
            }
            let f = &m[(i, col)] / &m[(row, col)];
            for j in col..ncols {
                let delta = &f * &m[(row, j)];
                m[(i, j)] -= delta;
            }
        }
        pivots.push(col);
        row += 1;
    }

    (pivots, sign)
}

pub fn rank(m: &DMatrix<Rational>) -> usize {
    let mut work = m.clone();
    row_echelon(&mut work).0.len()
}

/// Rank of a list of row vectors of common length `ncols`.
pub fn rank_of_rows(rows: &[Vec<Rational>], ncols: usize) -> usize {
    rank(&matrix_from_rows(rows, ncols))
}

pub fn determinant(m: &DMatrix<Rational>) -> Rational {
    assert!(m.is_square(), "determinant of a non-square matrix");
    let n = m.nrows();
    let mut work = m.clone();
    let (pivots, sign) = row_echelon(&mut work);
    if pivots.len() < n {
        return Rational::zero();
    }
    let product = (0..n).fold(Rational::one(), |acc, i| acc * &work[(i, i)]);
    if sign < 0 {
        -product
    } else {
        product
    }
}

/// Solves `A · X = B` for square, non-singular `A` by Gauss-Jordan elimination.
pub fn solve(a: &DMatrix<Rational>, b: &DMatrix<Rational>) -> Option<DMatrix<Rational>> {
    assert!(a.is_square(), "solve needs a square coefficient matrix");
    assert_eq!(a.nrows(), b.nrows(), "right hand side has the wrong number of rows");

    let n = a.nrows();
    let k = b.ncols();
    let mut aug = DMatrix::from_fn(n, n + k, |i, j| {
        if j < n {
            a[(i, j)].clone()
        } else {
            b[(i, j - n)].clone()
        }
    });

    for col in 0..n {
        let pivot_row = (col..n).find(|&i| !aug[(i, col)].is_zero())?;
        if pivot_row != col {
            aug.swap_rows(pivot_row, col);
        }

        let f = aug[(col, col)].recip();
        for j in col..(n + k) {
            let scaled = &aug[(col, j)] * &f;
            aug[(col, j)] = scaled;
        }

        for i in 0..n {
            if i == col || aug[(i, col)].is_zero() {
                continue;
            }
            let g = aug[(i, col)].clone();
            for j in col..(n + k) {
                let delta = &g * &aug[(col, j)];
                aug[(i, j)] -= delta;
            }
        }
    }

    Some(DMatrix::from_fn(n, k, |i, j| aug[(i, n + j)].clone()))
}

pub fn inverse(m: &DMatrix<Rational>) -> Option<DMatrix<Rational>> {
    solve(m, &identity(m.nrows()))
}

/// True if `m` is square with determinant +1 or -1.
pub fn is_unimodular(m: &DMatrix<i64>) -> bool {
    m.is_square() && determinant(&from_integer_matrix(m)).abs().is_one()
}
