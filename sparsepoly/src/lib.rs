#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![deny(unreachable_pub)]

//! sparsepoly
//!
//! Sparse univariate polynomials over `f64`. Terms below an epsilon are dropped at
//! construction and polynomials compare equal when their coefficients agree within
//! [`constants::COMPARISON_TOLERANCE`].
//!
//! ```
//! use sparsepoly::{SparsePolynomial, constants::DEFAULT_EPSILON};
//!
//! let p = SparsePolynomial::from_coefficients(&[0.0, 2.0, 4.0, -1.0], DEFAULT_EPSILON)?;
//! assert_eq!(p.evaluate(2.0), 12.0);
//! assert!((&p - &p).is_zero());
//! # Ok::<(), sparsepoly::PolynomialError>(())
//! ```

/// tolerances and default epsilons
pub mod constants;
/// error type
pub mod error;
/// the polynomial type and its arithmetic
pub mod polynomials;

pub use error::{PolynomialError, Result};
pub use polynomials::{polynomial_arithmetic, SparsePolynomial, Term};

/// Test utilities.
#[cfg(any(test, feature = "test_utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test_utils")))]
pub mod test_utils;
