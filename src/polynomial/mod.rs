//! Polynomial evaluation and quadrature node generation.
//!
//! This module provides:
//! - Legendre polynomials and their derivatives
//! - Gauss-Legendre nodes and weights on [-1, 1]
//!
//! These are the scalar building blocks behind the modal basis tables:
//! the orthonormal basis is a tensor product of normalized Legendre
//! polynomials, and all upwind/projection quadrature uses tensor-product
//! Gauss-Legendre rules.

mod legendre;
mod nodes;

pub use legendre::{legendre, legendre_and_derivative, legendre_derivative};
pub use nodes::{gauss_legendre_nodes, gauss_legendre_weights};
