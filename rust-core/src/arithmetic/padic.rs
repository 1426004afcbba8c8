//! Dixon style p-adic lifting for integer linear systems.
//!
//! `A · X = B` is solved modulo a single word-sized prime, the solution is
//! lifted digit by digit until the p-adic approximation is long enough to fix
//! every numerator and denominator (Hadamard bound), and the rationals are
//! recovered by half-extended Euclid. The result is always checked against the
//! original system; any failure returns `None` so callers can fall back to
//! exact elimination.

use log::trace;
use nalgebra::DMatrix;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::rationals::Rational;
use crate::config::PADIC_PRIME;

fn reduce(x: &BigInt, p: i64) -> i64 {
    x.mod_floor(&BigInt::from(p))
        .to_i64()
        .unwrap_or_else(|| panic!("residue of {x} modulo {p} does not fit into i64"))
}

fn modular_inverse(a: i64, m: i64) -> Option<i64> {
    let gcd = a.extended_gcd(&m);
    if gcd.gcd == 1 {
        Some(gcd.x.rem_euclid(m))
    } else {
        None
    }
}

/// Inverse of a square matrix modulo the prime `p`, if it exists.
fn modular_matrix_inverse(a: &DMatrix<i64>, p: i64) -> Option<DMatrix<i64>> {
    let n = a.nrows();
    let mut aug = DMatrix::from_fn(n, 2 * n, |i, j| {
        if j < n {
            a[(i, j)].rem_euclid(p)
        } else if j - n == i {
            1
        } else {
            0
        }
    });

    for col in 0..n {
        let pivot_row = (col..n).find(|&i| aug[(i, col)] != 0)?;
        if pivot_row != col {
            aug.swap_rows(pivot_row, col);
        }

        let f = modular_inverse(aug[(col, col)], p)?;
        for j in 0..2 * n {
            aug[(col, j)] = aug[(col, j)] * f % p;
        }

        for i in 0..n {
            let g = aug[(i, col)];
            if i == col || g == 0 {
                continue;
            }
            for j in 0..2 * n {
                aug[(i, j)] = (aug[(i, j)] - g * aug[(col, j)] % p).rem_euclid(p);
            }
        }
    }

    Some(DMatrix::from_fn(n, n, |i, j| aug[(i, n + j)]))
}

fn modular_product(a: &DMatrix<i64>, b: &DMatrix<i64>, p: i64) -> DMatrix<i64> {
    DMatrix::from_fn(a.nrows(), b.ncols(), |i, j| {
        (0..a.ncols()).fold(0, |acc, k| (acc + a[(i, k)] * b[(k, j)] % p) % p)
    })
}

fn log_norm(entries: impl Iterator<Item = f64>) -> f64 {
    let squares: f64 = entries.map(|x| x * x).sum();
    squares.sqrt().max(1.0).ln()
}

/// Number of lifting steps after which every entry of the solution can be
/// reconstructed.
fn lifting_steps(a: &DMatrix<BigInt>, b: &DMatrix<BigInt>, p: i64) -> usize {
    let to_f64 = |x: &BigInt| x.to_f64().unwrap_or(f64::MAX);

    let mut logs: Vec<f64> = (0..a.ncols())
        .map(|j| log_norm(a.column(j).iter().map(to_f64)))
        .collect();
    let rhs = (0..b.ncols())
        .map(|j| log_norm(b.column(j).iter().map(to_f64)))
        .fold(0.0, f64::max);
    logs.push(rhs);
    logs.sort_by(|x, y| y.total_cmp(x));

    let log_delta: f64 = logs.iter().take(a.ncols()).sum();
    let golden = (1.0 + 5.0_f64.sqrt()) / 2.0;

    (2.0 * (log_delta + golden.ln()) / (p as f64).ln()).ceil() as usize + 1
}

/// Recovers `u / v` from `s ≡ u / v (mod h)` with |u|, |v| below sqrt(h / 2).
fn rational_reconstruction(s: &BigInt, h: &BigInt) -> Option<Rational> {
    let (mut r0, mut r1) = (h.clone(), s.mod_floor(h));
    let (mut t0, mut t1) = (BigInt::zero(), BigInt::one());

    while &r1 * &r1 * 2 > *h {
        let q = &r0 / &r1;
        let r2 = &r0 - &q * &r1;
        let t2 = &t0 - &q * &t1;
        r0 = std::mem::replace(&mut r1, r2);
        t0 = std::mem::replace(&mut t1, t2);
    }

    if t1.is_zero() || &t1.abs() * &t1.abs() * 2 > *h {
        return None;
    }
    Some(Rational::new(r1, t1))
}

/// Solves `A · X = B` for square integer `A` and integer `B`.
pub fn solve_padic(a: &DMatrix<BigInt>, b: &DMatrix<BigInt>) -> Option<DMatrix<Rational>> {
    assert!(a.is_square(), "p-adic solve needs a square coefficient matrix");
    assert_eq!(a.nrows(), b.nrows(), "right hand side has the wrong number of rows");

    let p = PADIC_PRIME;
    let n = a.nrows();
    let k = b.ncols();

    let a_mod = a.map(|x| reduce(&x, p));
    let Some(c) = modular_matrix_inverse(&a_mod, p) else {
        trace!("coefficient matrix is singular modulo {p}");
        return None;
    };

    let steps = lifting_steps(a, b, p);
    let p_big = BigInt::from(p);

    let mut bi = b.clone();
    let mut si = DMatrix::<BigInt>::zeros(n, k);
    let mut pi = BigInt::one();

    for step in 0..steps {
        let bi_mod = bi.map(|x| reduce(&x, p));
        let xi = modular_product(&c, &bi_mod, p);

        for (s, &x) in si.iter_mut().zip(xi.iter()) {
            *s += &pi * x;
        }
        pi *= &p_big;

        if step + 1 < steps {
            bi = DMatrix::from_fn(n, k, |i, j| {
                let ax: BigInt = (0..n).map(|l| &a[(i, l)] * xi[(l, j)]).sum();
                (&bi[(i, j)] - ax) / &p_big
            });
        }
    }

    let mut entries = Vec::with_capacity(n * k);
    for s in si.iter() {
        entries.push(rational_reconstruction(s, &pi)?);
    }
    let x = DMatrix::from_vec(n, k, entries);

    let verified = (0..n).all(|i| {
        (0..k).all(|j| {
            let lhs: Rational = (0..n)
                .map(|l| Rational::from_integer(a[(i, l)].clone()) * &x[(l, j)])
                .sum();
            lhs == Rational::from_integer(b[(i, j)].clone())
        })
    });

    if verified {
        Some(x)
    } else {
        trace!("p-adic solution failed verification after {steps} steps");
        None
    }
}
