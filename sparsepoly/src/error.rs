use thiserror::Error;

/// Errors produced while building or combining polynomials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolynomialError {
    /// A coefficient or term list was empty, or a degree was negative.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// An arithmetic operation was handed an absent polynomial.
    #[error("{0} operand of polynomial {1} is missing")]
    NullOperand(&'static str, &'static str),
}

impl PolynomialError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        PolynomialError::InvalidArgument(msg.into())
    }
}

/// Shorthand for results carrying a [`PolynomialError`].
pub type Result<T> = std::result::Result<T, PolynomialError>;
