//! Modal polynomial bases for phase-space DG expansions.
//!
//! This module provides:
//! - A basis descriptor: dimensionality split into configuration and
//!   velocity directions, polynomial order, and basis family
//! - The orthonormal modal basis itself: multi-index enumeration for the
//!   serendipity, p1-hybrid, and tensor-product families, with pointwise
//!   evaluation and gradients on the reference cell [-1, 1]^d

mod descriptor;
mod modal;

pub use descriptor::{BasisDesc, BasisKind};
pub use modal::ModalBasis;
