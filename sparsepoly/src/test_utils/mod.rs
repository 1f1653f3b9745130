//! proptest strategies for polynomials.
//!
//! Coefficients are multiples of 1/8 in `[-125, 125]`, so sums and products of
//! low-degree polynomials stay exact and fall on the comparison grid.

use proptest::{collection, prelude::*};

use crate::{constants::DEFAULT_EPSILON, polynomials::Term, SparsePolynomial};

/// A coefficient `n / 8` with `n` in `[-1000, 1000]`.
pub fn small_coefficient() -> impl Strategy<Value = f64> {
    (-1000i32..=1000).prop_map(|n| f64::from(n) / 8.0)
}

/// Dense coefficient arrays of length 1 to 6.
pub fn dense_coefficients() -> impl Strategy<Value = Vec<f64>> {
    collection::vec(small_coefficient(), 1..=6)
}

/// Polynomials of degree at most 5 built with the default epsilon.
pub fn small_polynomial() -> impl Strategy<Value = SparsePolynomial> {
    dense_coefficients().prop_filter_map("coefficient array is never empty", |coefficients| {
        SparsePolynomial::from_coefficients(&coefficients, DEFAULT_EPSILON).ok()
    })
}

/// Unsorted term lists that may repeat degrees.
pub fn scattered_terms() -> impl Strategy<Value = Vec<Term>> {
    collection::vec(
        (0usize..12, small_coefficient())
            .prop_map(|(degree, coefficient)| Term::new(degree, coefficient)),
        1..10,
    )
}

/// An offset well inside half the comparison tolerance, at most 4e-7 in magnitude.
pub fn perturbation() -> impl Strategy<Value = f64> {
    (-400i32..=400).prop_map(|n| f64::from(n) * 1e-9)
}
