use std::{
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    constants::{COMPARISON_TOLERANCE, DEFAULT_EPSILON, MAX_DEGREE},
    error::{PolynomialError, Result},
    polynomials::Term,
};

/// An immutable univariate polynomial with `f64` coefficients, stored sparsely.
///
/// Terms are kept in strictly increasing degree order and none of them has a coefficient
/// whose magnitude is at or below the epsilon used at construction. When every term is
/// filtered out the polynomial collapses to the single zero term `(0, 0)`, so the term list
/// is never empty.
///
/// Equality is approximate: two polynomials are equal when their coefficients agree within
/// [`COMPARISON_TOLERANCE`] at every degree present in either of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Term>", into = "Vec<Term>")]
pub struct SparsePolynomial {
    terms: Vec<Term>,
}

impl SparsePolynomial {
    /// The canonical zero polynomial.
    pub fn zero() -> Self {
        Self {
            terms: vec![Term::default()],
        }
    }

    /// Builds a polynomial from dense coefficients, where `coefficients[i]` belongs to `x^i`.
    ///
    /// Coefficients with `|c| <= eps` are dropped.
    ///
    /// # Errors
    /// - [`PolynomialError::InvalidArgument`] if `coefficients` is empty or longer than
    ///   `MAX_DEGREE + 1`.
    pub fn from_coefficients(coefficients: &[f64], eps: f64) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(PolynomialError::invalid_argument(
                "coefficient array must not be empty",
            ));
        }
        if coefficients.len() - 1 > MAX_DEGREE {
            return Err(PolynomialError::invalid_argument(format!(
                "{} coefficients exceed the maximum degree {MAX_DEGREE}",
                coefficients.len()
            )));
        }
        Ok(Self::from_sorted_terms(
            coefficients
                .iter()
                .enumerate()
                .map(|(degree, &coefficient)| Term::new(degree, coefficient)),
            eps,
        ))
    }

    /// Builds `coefficient * x^degree`, or the zero polynomial if `|coefficient| <= eps`.
    ///
    /// # Errors
    /// - [`PolynomialError::InvalidArgument`] if `degree` is negative or above `MAX_DEGREE`.
    pub fn monomial(coefficient: f64, degree: i64, eps: f64) -> Result<Self> {
        Ok(Self::from_term(Term::try_new(degree, coefficient)?, eps))
    }

    /// Single-term polynomial from an existing [`Term`].
    pub fn from_term(term: Term, eps: f64) -> Self {
        Self::from_sorted_terms(std::iter::once(term), eps)
    }

    /// Two-term polynomial. The terms may come in any order and may share a degree.
    pub fn binomial(first: Term, second: Term, eps: f64) -> Self {
        Self::from_sorted_terms(normalize_terms(vec![first, second]), eps)
    }

    /// Builds a polynomial from an arbitrary list of terms.
    ///
    /// Terms are sorted by degree and terms sharing a degree are summed before the `eps`
    /// filter runs.
    ///
    /// # Errors
    /// - [`PolynomialError::InvalidArgument`] if `terms` is empty.
    pub fn from_terms(terms: Vec<Term>, eps: f64) -> Result<Self> {
        if terms.is_empty() {
            return Err(PolynomialError::invalid_argument(
                "term array must not be empty",
            ));
        }
        Ok(Self::from_sorted_terms(normalize_terms(terms), eps))
    }

    /// Filters terms that are already in strictly increasing degree order.
    pub(crate) fn from_sorted_terms(terms: impl IntoIterator<Item = Term>, eps: f64) -> Self {
        let mut dropped = 0usize;
        let kept: Vec<Term> = terms
            .into_iter()
            .filter(|term| {
                let negligible = term.is_negligible(eps);
                dropped += usize::from(negligible);
                !negligible
            })
            .collect();
        debug_assert!(kept.windows(2).all(|w| w[0].degree() < w[1].degree()));

        if dropped > 0 {
            trace!(dropped, eps, "dropped near-zero terms");
        }
        if kept.is_empty() {
            debug!(eps, "every term filtered out, using the zero polynomial");
            return Self::zero();
        }
        Self { terms: kept }
    }

    /// Stored terms in increasing degree order.
    #[inline]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Number of stored terms. The zero polynomial has one.
    #[inline]
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Highest stored degree.
    #[inline]
    pub fn degree(&self) -> usize {
        self.terms.last().map_or(0, Term::degree)
    }

    /// True for the canonical zero polynomial.
    pub fn is_zero(&self) -> bool {
        matches!(self.terms.as_slice(), [only] if only.degree() == 0 && only.coefficient() == 0.0)
    }

    /// Coefficient stored for `degree`, or `0.0` if there is none.
    pub fn coefficient_at(&self, degree: usize) -> f64 {
        self.terms
            .binary_search_by_key(&degree, Term::degree)
            .map_or(0.0, |idx| self.terms[idx].coefficient())
    }

    /// Evaluates the polynomial at `x`, accumulating in increasing degree order.
    ///
    /// NaN and infinite inputs propagate as usual.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.terms
            .iter()
            .fold(0.0, |acc, term| {
                acc + term.coefficient() * pow(x, term.degree())
            })
    }

    // every term of `self` has a counterpart in `other` within tolerance
    fn agrees_with(&self, other: &Self) -> bool {
        self.terms.iter().all(|term| {
            (other.coefficient_at(term.degree()) - term.coefficient()).abs()
                < COMPARISON_TOLERANCE
        })
    }
}

// stored degrees never exceed MAX_DEGREE, which is i32::MAX
#[inline]
fn pow(x: f64, degree: usize) -> f64 {
    x.powi(degree as i32)
}

/// Sorts by degree and sums coefficients that share a degree.
fn normalize_terms(mut terms: Vec<Term>) -> Vec<Term> {
    terms.sort_by_key(Term::degree);
    let mut merged: Vec<Term> = Vec::with_capacity(terms.len());
    for term in terms {
        match merged.last_mut() {
            Some(last) if last.degree() == term.degree() => {
                *last = Term::new(last.degree(), last.coefficient() + term.coefficient());
            }
            _ => merged.push(term),
        }
    }
    merged
}

impl Default for SparsePolynomial {
    fn default() -> Self {
        Self::zero()
    }
}

impl TryFrom<&[f64]> for SparsePolynomial {
    type Error = PolynomialError;

    fn try_from(coefficients: &[f64]) -> Result<Self> {
        Self::from_coefficients(coefficients, DEFAULT_EPSILON)
    }
}

impl TryFrom<Vec<Term>> for SparsePolynomial {
    type Error = PolynomialError;

    fn try_from(terms: Vec<Term>) -> Result<Self> {
        Self::from_terms(terms, DEFAULT_EPSILON)
    }
}

impl From<SparsePolynomial> for Vec<Term> {
    fn from(polynomial: SparsePolynomial) -> Self {
        polynomial.terms
    }
}

impl From<Term> for SparsePolynomial {
    fn from(term: Term) -> Self {
        Self::from_term(term, DEFAULT_EPSILON)
    }
}

impl PartialEq for SparsePolynomial {
    fn eq(&self, other: &Self) -> bool {
        self.agrees_with(other) && other.agrees_with(self)
    }
}

impl Hash for SparsePolynomial {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // terms that round to zero on the comparison grid compare equal to missing ones
        for term in self.terms.iter().filter(|t| t.quantized_coefficient() != 0) {
            term.hash(state);
        }
    }
}

impl Display for SparsePolynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (idx, term) in self.terms.iter().enumerate() {
            let negative = term.coefficient() < 0.0;
            match (idx, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            let magnitude = term.coefficient().abs();
            match term.degree() {
                0 => write!(f, "{magnitude}")?,
                degree => {
                    if magnitude != 1.0 {
                        write!(f, "{magnitude}")?;
                    }
                    write!(f, "x")?;
                    if degree > 1 {
                        write!(f, "^{degree}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_matches_hand_written_form() {
        let p = SparsePolynomial::from_coefficients(&[10.0, 0.0, 0.0, -2.5, 9.0], DEFAULT_EPSILON)
            .unwrap();
        assert_eq!(p.to_string(), "10 - 2.5x^3 + 9x^4");

        let q = SparsePolynomial::from_coefficients(&[0.0, -1.0, 1.0], DEFAULT_EPSILON).unwrap();
        assert_eq!(q.to_string(), "-x + x^2");

        assert_eq!(SparsePolynomial::zero().to_string(), "0");
    }

    #[test]
    fn normalize_terms_sorts_and_merges() {
        let merged = normalize_terms(vec![
            Term::new(3, 1.0),
            Term::new(0, 2.0),
            Term::new(3, 4.0),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].degree(), 0);
        assert_eq!(merged[1].degree(), 3);
        assert_eq!(merged[1].coefficient(), 5.0);
    }

    #[test]
    fn pow_at_maximum_degree() {
        assert_eq!(pow(1.0, MAX_DEGREE), 1.0);
        assert_eq!(pow(-1.0, MAX_DEGREE), -1.0);
        assert_eq!(pow(2.0, 10), 1024.0);
    }

    #[test]
    fn zero_coefficient_away_from_degree_zero_is_not_canonical_zero() {
        // a negative eps keeps exact zeros
        let p = SparsePolynomial::monomial(0.0, 5, -1.0).unwrap();
        assert_eq!(p.degree(), 5);
        assert!(!p.is_zero());
        assert!(SparsePolynomial::monomial(0.0, 0, -1.0).unwrap().is_zero());
        assert!(SparsePolynomial::zero().is_zero());
    }
}
