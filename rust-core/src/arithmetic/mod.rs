// Arithmetic module: exact rational linear algebra and integer lattice reduction
// This module backs every placement, basis change and unimodularity test in the crate

// ======================== MODULE DECLARATIONS ========================
pub mod lattices;
pub mod matrices;
pub mod padic;
pub mod rationals;

// Test modules
mod _tests_arithmetic;

// ======================== NUMBERS & VECTORS ========================
pub use rationals::{
    Rational,                       // type - arbitrary precision rational (BigRational)
    rational,                       // fn(n: i64) -> Rational - integer as rational
    to_rationals,                   // fn(v: &[i64]) -> Vec<Rational> - integer vector as rationals
    sign_of,                        // fn(v: &[T]) -> i8 - sign of the first non-zero entry
    is_integral,                    // fn(v: &[Rational]) -> bool - all entries are integers
    to_integers,                    // fn(v: &[Rational]) -> Option<Vec<i64>> - integral vector as i64
    modulo_one,                     // fn(v: &[Rational]) -> Vec<Rational> - fractional parts in [0, 1)
    plus,                           // fn(a, b) -> Vec<Rational> - entrywise sum
    minus,                          // fn(a, b) -> Vec<Rational> - entrywise difference
    negated,                        // fn(v: &[Rational]) -> Vec<Rational>
};

// ======================== MATRICES ========================
pub use matrices::{
    matrix_from_rows,               // fn(rows: &[Vec<Rational>], ncols: usize) -> DMatrix<Rational>
    identity,                       // fn(n: usize) -> DMatrix<Rational>
    row_times,                      // fn(v: &[Rational], m: &DMatrix<Rational>) -> Vec<Rational> - v · M
    rank,                           // fn(m: &DMatrix<Rational>) -> usize
    rank_of_rows,                   // fn(rows: &[Vec<Rational>], ncols: usize) -> usize
    determinant,                    // fn(m: &DMatrix<Rational>) -> Rational
    inverse,                        // fn(m: &DMatrix<Rational>) -> Option<DMatrix<Rational>>
    solve,                          // fn(a, b) -> Option<DMatrix<Rational>> - exact Gauss-Jordan
    to_integer_matrix,              // fn(m: &DMatrix<Rational>) -> Option<DMatrix<i64>>
    from_integer_matrix,            // fn(m: &DMatrix<i64>) -> DMatrix<Rational>
    is_unimodular,                  // fn(m: &DMatrix<i64>) -> bool - square with det ±1
};

// ======================== LATTICES & SOLVERS ========================
pub use lattices::{
    IntegerLattice,                 // struct - echelon basis of an integer lattice grown by extended gcd
    Triangulation,                  // struct - reduced rows and their rank
    triangulate,                    // fn(rows: &[Vec<Rational>]) -> Triangulation - unimodular row reduction
};
pub use padic::solve_padic;         // fn(a: &DMatrix<BigInt>, b: &DMatrix<BigInt>) -> Option<DMatrix<Rational>>
