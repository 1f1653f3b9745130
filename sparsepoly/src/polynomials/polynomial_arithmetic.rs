use std::{
    cmp::Ordering,
    ops::{Add, Mul, Neg, Sub},
};

use crate::{
    constants::{MAX_DEGREE, OPERATOR_EPSILON},
    error::{PolynomialError, Result},
    polynomials::{SparsePolynomial, Term},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeOp {
    Add,
    Subtract,
}

impl MergeOp {
    #[inline]
    fn combine(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            MergeOp::Add => lhs + rhs,
            MergeOp::Subtract => lhs - rhs,
        }
    }

    // a right-hand term with no left-hand partner
    #[inline]
    fn rhs_only(self, term: Term) -> Term {
        match self {
            MergeOp::Add => term,
            MergeOp::Subtract => term.negated(),
        }
    }
}

/// Sorted merge of two ascending-degree term lists.
///
/// Matching degrees are combined with `op`, left-only terms pass through unchanged and
/// right-only terms pass through `op.rhs_only`. The output is ascending with unique degrees
/// but is not filtered.
fn merge_terms(lhs: &[Term], rhs: &[Term], op: MergeOp) -> Vec<Term> {
    let mut merged = Vec::with_capacity(lhs.len() + rhs.len());
    let (mut i, mut j) = (0, 0);
    while i < lhs.len() && j < rhs.len() {
        let (a, b) = (lhs[i], rhs[j]);
        match a.degree().cmp(&b.degree()) {
            Ordering::Equal => {
                merged.push(Term::new(
                    a.degree(),
                    op.combine(a.coefficient(), b.coefficient()),
                ));
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                merged.push(a);
                i += 1;
            }
            Ordering::Greater => {
                merged.push(op.rhs_only(b));
                j += 1;
            }
        }
    }
    merged.extend_from_slice(&lhs[i..]);
    merged.extend(rhs[j..].iter().map(|&term| op.rhs_only(term)));
    merged
}

/// `lhs + rhs`, re-filtered with [`OPERATOR_EPSILON`].
pub fn add_polynomials(lhs: &SparsePolynomial, rhs: &SparsePolynomial) -> SparsePolynomial {
    SparsePolynomial::from_sorted_terms(
        merge_terms(lhs.terms(), rhs.terms(), MergeOp::Add),
        OPERATOR_EPSILON,
    )
}

/// `lhs - rhs`, re-filtered with [`OPERATOR_EPSILON`].
pub fn subtract_polynomials(lhs: &SparsePolynomial, rhs: &SparsePolynomial) -> SparsePolynomial {
    SparsePolynomial::from_sorted_terms(
        merge_terms(lhs.terms(), rhs.terms(), MergeOp::Subtract),
        OPERATOR_EPSILON,
    )
}

/// Distributive product of `lhs` and `rhs`.
///
/// Each term of `lhs` times the whole of `rhs` is one row; rows keep `rhs`'s degree order,
/// so they are summed with the same merge as [`add_polynomials`].
///
/// # Errors
/// - [`PolynomialError::InvalidArgument`] if the product's degree would exceed [`MAX_DEGREE`].
pub fn try_multiply_polynomials(
    lhs: &SparsePolynomial,
    rhs: &SparsePolynomial,
) -> Result<SparsePolynomial> {
    // both sides are bounded by MAX_DEGREE, so the sum cannot overflow
    let degree = lhs.degree() + rhs.degree();
    if degree > MAX_DEGREE {
        return Err(PolynomialError::invalid_argument(format!(
            "product degree {degree} exceeds the maximum of {MAX_DEGREE}"
        )));
    }
    Ok(lhs
        .terms()
        .iter()
        .fold(SparsePolynomial::zero(), |acc, a| {
            let row = SparsePolynomial::from_sorted_terms(
                rhs.terms().iter().map(|b| {
                    Term::new(a.degree() + b.degree(), a.coefficient() * b.coefficient())
                }),
                OPERATOR_EPSILON,
            );
            add_polynomials(&acc, &row)
        }))
}

/// Infallible form of [`try_multiply_polynomials`], backing the `*` operator.
///
/// # Panics
/// If the product's degree would exceed [`MAX_DEGREE`].
pub fn multiply_polynomials(lhs: &SparsePolynomial, rhs: &SparsePolynomial) -> SparsePolynomial {
    match try_multiply_polynomials(lhs, rhs) {
        Ok(product) => product,
        Err(err) => panic!("{err}"),
    }
}

/// Every coefficient negated.
pub fn negate_polynomial(polynomial: &SparsePolynomial) -> SparsePolynomial {
    SparsePolynomial::from_sorted_terms(
        polynomial.terms().iter().map(|&term| term.negated()),
        OPERATOR_EPSILON,
    )
}

fn require_operands<'a>(
    lhs: Option<&'a SparsePolynomial>,
    rhs: Option<&'a SparsePolynomial>,
    operation: &'static str,
) -> Result<(&'a SparsePolynomial, &'a SparsePolynomial)> {
    let lhs = lhs.ok_or(PolynomialError::NullOperand("left", operation))?;
    let rhs = rhs.ok_or(PolynomialError::NullOperand("right", operation))?;
    Ok((lhs, rhs))
}

/// [`add_polynomials`] for operands that may be absent.
///
/// # Errors
/// - [`PolynomialError::NullOperand`] if either operand is `None`.
pub fn add(
    lhs: Option<&SparsePolynomial>,
    rhs: Option<&SparsePolynomial>,
) -> Result<SparsePolynomial> {
    let (lhs, rhs) = require_operands(lhs, rhs, "addition")?;
    Ok(add_polynomials(lhs, rhs))
}

/// [`subtract_polynomials`] for operands that may be absent.
///
/// # Errors
/// - [`PolynomialError::NullOperand`] if either operand is `None`.
pub fn subtract(
    lhs: Option<&SparsePolynomial>,
    rhs: Option<&SparsePolynomial>,
) -> Result<SparsePolynomial> {
    let (lhs, rhs) = require_operands(lhs, rhs, "subtraction")?;
    Ok(subtract_polynomials(lhs, rhs))
}

/// [`try_multiply_polynomials`] for operands that may be absent.
///
/// # Errors
/// - [`PolynomialError::NullOperand`] if either operand is `None`.
/// - [`PolynomialError::InvalidArgument`] if the product's degree would exceed [`MAX_DEGREE`].
pub fn multiply(
    lhs: Option<&SparsePolynomial>,
    rhs: Option<&SparsePolynomial>,
) -> Result<SparsePolynomial> {
    let (lhs, rhs) = require_operands(lhs, rhs, "multiplication")?;
    try_multiply_polynomials(lhs, rhs)
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $func:ident) => {
        impl<'a, 'b> $trait<&'b SparsePolynomial> for &'a SparsePolynomial {
            type Output = SparsePolynomial;

            fn $method(self, rhs: &'b SparsePolynomial) -> SparsePolynomial {
                $func(self, rhs)
            }
        }

        impl $trait<SparsePolynomial> for SparsePolynomial {
            type Output = SparsePolynomial;

            fn $method(self, rhs: SparsePolynomial) -> SparsePolynomial {
                $func(&self, &rhs)
            }
        }

        impl<'b> $trait<&'b SparsePolynomial> for SparsePolynomial {
            type Output = SparsePolynomial;

            fn $method(self, rhs: &'b SparsePolynomial) -> SparsePolynomial {
                $func(&self, rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, add_polynomials);
impl_binary_op!(Sub, sub, subtract_polynomials);
impl_binary_op!(Mul, mul, multiply_polynomials);

impl Neg for &SparsePolynomial {
    type Output = SparsePolynomial;

    fn neg(self) -> SparsePolynomial {
        negate_polynomial(self)
    }
}

impl Neg for SparsePolynomial {
    type Output = SparsePolynomial;

    fn neg(self) -> SparsePolynomial {
        negate_polynomial(&self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn terms(pairs: &[(usize, f64)]) -> Vec<Term> {
        pairs
            .iter()
            .map(|&(degree, coefficient)| Term::new(degree, coefficient))
            .collect()
    }

    #[test]
    fn merge_adds_matching_degrees_and_keeps_the_rest() {
        let merged = merge_terms(
            &terms(&[(0, 1.0), (2, 3.0), (5, 1.0)]),
            &terms(&[(1, 4.0), (2, -1.0), (7, 2.0)]),
            MergeOp::Add,
        );
        let got: Vec<(usize, f64)> = merged
            .iter()
            .map(|t| (t.degree(), t.coefficient()))
            .collect();
        assert_eq!(
            got,
            vec![(0, 1.0), (1, 4.0), (2, 2.0), (5, 1.0), (7, 2.0)]
        );
    }

    #[test]
    fn merge_subtract_negates_right_only_terms() {
        let merged = merge_terms(
            &terms(&[(1, 5.0)]),
            &terms(&[(0, 2.0), (1, 1.0), (3, -4.0)]),
            MergeOp::Subtract,
        );
        let got: Vec<(usize, f64)> = merged
            .iter()
            .map(|t| (t.degree(), t.coefficient()))
            .collect();
        assert_eq!(got, vec![(0, -2.0), (1, 4.0), (3, 4.0)]);
    }

    #[test]
    fn merge_with_empty_side_copies_other() {
        let lhs = terms(&[(0, 1.0), (4, 2.0)]);
        let merged = merge_terms(&lhs, &[], MergeOp::Subtract);
        assert_eq!(merged, lhs);
    }

    #[test]
    fn operator_epsilon_ignores_operand_eps() {
        // built with a loose eps, but the sum is filtered at 1e-6
        let a = SparsePolynomial::from_coefficients(&[1.0, 0.5], 0.1).unwrap();
        let b = SparsePolynomial::from_coefficients(&[-1.0, 0.5], 0.1).unwrap();
        let sum = &a + &b;
        assert_eq!(sum.terms(), &[Term::new(1, 1.0)]);

        // built with a tight eps, but the sum still falls under 1e-6
        let c = SparsePolynomial::from_coefficients(&[0.0, 5e-7], 1e-9).unwrap();
        let d = SparsePolynomial::from_coefficients(&[0.0, 1e-7], 1e-9).unwrap();
        assert_eq!(c.num_terms(), 1);
        assert!((&c + &d).is_zero());
    }

    #[test]
    fn product_degree_is_bounded() {
        let x = SparsePolynomial::monomial(1.0, 1, OPERATOR_EPSILON).unwrap();
        let top = SparsePolynomial::monomial(1.0, MAX_DEGREE as i64, OPERATOR_EPSILON).unwrap();
        let below_top =
            SparsePolynomial::monomial(2.0, MAX_DEGREE as i64 - 1, OPERATOR_EPSILON).unwrap();

        let err = multiply(Some(&top), Some(&x)).unwrap_err();
        assert!(matches!(err, PolynomialError::InvalidArgument(_)));
        assert!(try_multiply_polynomials(&x, &top).is_err());

        let product = try_multiply_polynomials(&below_top, &x).unwrap();
        assert_eq!(product.terms(), &[Term::new(MAX_DEGREE, 2.0)]);
    }

    #[test]
    #[should_panic(expected = "exceeds the maximum")]
    fn product_operator_panics_past_maximum_degree() {
        let x = SparsePolynomial::monomial(1.0, 1, OPERATOR_EPSILON).unwrap();
        let top = SparsePolynomial::monomial(1.0, MAX_DEGREE as i64, OPERATOR_EPSILON).unwrap();
        let _ = &top * &x;
    }

    #[test]
    fn missing_operands_report_which_side() {
        let p = SparsePolynomial::zero();
        assert_eq!(
            add(None, Some(&p)).unwrap_err(),
            PolynomialError::NullOperand("left", "addition")
        );
        assert_eq!(
            subtract(Some(&p), None).unwrap_err(),
            PolynomialError::NullOperand("right", "subtraction")
        );
        assert_eq!(
            multiply(None, None).unwrap_err(),
            PolynomialError::NullOperand("left", "multiplication")
        );
    }
}
