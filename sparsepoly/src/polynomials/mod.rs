/// merge-based `+ - *` and their null-checked forms
pub mod polynomial_arithmetic;
pub(crate) mod sparse_polynomial;
pub(crate) mod term;
pub use sparse_polynomial::SparsePolynomial;
pub use term::Term;
