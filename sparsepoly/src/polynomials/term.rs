use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::{
    constants::{COMPARISON_TOLERANCE, MAX_DEGREE},
    error::{PolynomialError, Result},
};

/// A single `coefficient * x^degree` summand.
///
/// The default term is the canonical zero term `(0, 0)`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(try_from = "RawTerm")]
pub struct Term {
    degree: usize,
    coefficient: f64,
}

impl Term {
    // callers guarantee `degree <= MAX_DEGREE`
    #[inline]
    pub(crate) const fn new(degree: usize, coefficient: f64) -> Self {
        Self {
            degree,
            coefficient,
        }
    }

    /// Builds a term from a signed degree.
    ///
    /// # Errors
    /// - [`PolynomialError::InvalidArgument`] if `degree` is negative or above [`MAX_DEGREE`].
    pub fn try_new(degree: i64, coefficient: f64) -> Result<Self> {
        let degree = usize::try_from(degree).map_err(|_| {
            PolynomialError::invalid_argument(format!("degree must be non-negative, got {degree}"))
        })?;
        if degree > MAX_DEGREE {
            return Err(PolynomialError::invalid_argument(format!(
                "degree {degree} exceeds the maximum of {MAX_DEGREE}"
            )));
        }
        Ok(Self::new(degree, coefficient))
    }

    /// Exponent of the free variable.
    #[inline]
    pub const fn degree(&self) -> usize {
        self.degree
    }

    /// Multiplier of `x^degree`.
    #[inline]
    pub const fn coefficient(&self) -> f64 {
        self.coefficient
    }

    /// Same term with the coefficient negated.
    #[inline]
    pub(crate) fn negated(self) -> Self {
        Self::new(self.degree, -self.coefficient)
    }

    /// True when `|coefficient| <= eps`, i.e. the term would be dropped at construction.
    #[inline]
    pub(crate) fn is_negligible(&self, eps: f64) -> bool {
        self.coefficient.abs() <= eps
    }

    /// Coefficient snapped to the comparison grid.
    ///
    /// Coefficients that compare equal land on the same grid point unless they straddle a
    /// rounding boundary, which is the best any tolerance-based hash can do.
    #[inline]
    pub(crate) fn quantized_coefficient(&self) -> i64 {
        (self.coefficient / COMPARISON_TOLERANCE).round() as i64
    }

    /// Degrees match and coefficients agree within [`COMPARISON_TOLERANCE`].
    pub fn approx_eq(&self, other: &Term) -> bool {
        self.degree == other.degree
            && (self.coefficient - other.coefficient).abs() < COMPARISON_TOLERANCE
    }
}

// wire form; goes through `try_new` so degrees are bounded
#[derive(Deserialize)]
struct RawTerm {
    degree: i64,
    coefficient: f64,
}

impl TryFrom<RawTerm> for Term {
    type Error = PolynomialError;

    fn try_from(raw: RawTerm) -> Result<Self> {
        Self::try_new(raw.degree, raw.coefficient)
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.degree.hash(state);
        self.quantized_coefficient().hash(state);
    }
}
