use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

/// Exact rational number used for positions, edge vectors and basis changes.
pub type Rational = BigRational;

pub fn rational(n: i64) -> Rational {
    Rational::from_integer(BigInt::from(n))
}

pub fn to_rationals(v: &[i64]) -> Vec<Rational> {
    v.iter().map(|&x| rational(x)).collect()
}

/// Sign of the first non-zero entry, or 0 for the zero vector.
pub fn sign_of<T: Zero + PartialOrd>(v: &[T]) -> i8 {
    let zero = T::zero();
    for x in v {
        if *x > zero {
            return 1;
        }
        if *x < zero {
            return -1;
        }
    }
    0
}

pub fn plus(a: &[Rational], b: &[Rational]) -> Vec<Rational> {
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

pub fn minus(a: &[Rational], b: &[Rational]) -> Vec<Rational> {
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}

pub fn negated(v: &[Rational]) -> Vec<Rational> {
    v.iter().map(|x| -x).collect()
}

pub fn is_integral(v: &[Rational]) -> bool {
    v.iter().all(|x| x.is_integer())
}

/// Converts an integral vector to machine integers; `None` if an entry is
/// fractional or out of range.
pub fn to_integers(v: &[Rational]) -> Option<Vec<i64>> {
    v.iter()
        .map(|x| if x.is_integer() { x.to_integer().to_i64() } else { None })
        .collect()
}

/// Fractional part of every coordinate, i.e. the representative in [0, 1).
pub fn modulo_one(v: &[Rational]) -> Vec<Rational> {
    v.iter().map(|x| x - x.floor()).collect()
}

/// Largest integer not exceeding `a / b`.
pub fn floor_div(a: &Rational, b: &Rational) -> Rational {
    (a / b).floor()
}
