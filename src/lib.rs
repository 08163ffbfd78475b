//! # kinetic-dg
//!
//! Discontinuous-Galerkin kernel machinery for kinetic plasma equations.
//!
//! This crate provides the core building blocks of a modal DG phase-space
//! solver:
//! - Orthonormal polynomial bases (serendipity and p1-hybrid families)
//!   over `[-1, 1]^ndim` with configuration and velocity directions
//! - Gauss-Legendre quadrature tables and nodal↔modal projections
//! - Upwinded surface-flux kernels: alpha sign tests at face quadrature
//!   nodes, numerical-flux (`Ghat`) projection, divergence accumulation
//! - Velocity-moment kernels (M0/M1/M2 and parallel variants), LBO-style
//!   boundary-correction kernels, and bi-Maxwellian projection
//! - Closed-enumeration kernel dispatch over (cdim, vdim, poly_order)
//! - Range/grid/field infrastructure and sweep updaters tying it together

pub mod basis;
pub mod dispatch;
pub mod error;
pub mod field;
pub mod grid;
pub mod kernels;
pub mod polynomial;
pub mod updater;

// Re-export main types for convenience
pub use basis::{BasisDesc, BasisKind, ModalBasis};
pub use error::GkError;
pub use field::Field;
pub use grid::{Range, RectGrid};
pub use kernels::{
    BcorrKernel, BiMaxwellianKernel, Edge, MomentKernel, MomentKind, QuadTable, SurfaceKernel,
    VelEdge,
};
pub use updater::{
    AlphaUpdater, BiMaxwellianProjection, BoundaryMomentUpdater, MomentUpdater, SurfaceUpdater,
};
