//! Basis descriptor: the configuration handed to kernel selection.

use crate::error::GkError;
use crate::grid::MAX_DIM;

/// Basis-function family.
///
/// `Tensor` is declared for forward compatibility but has no kernel
/// implementations yet; selecting kernels for it fails fast (see
/// [`crate::dispatch`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BasisKind {
    /// Serendipity family. For kinetic configurations at p=1 this is the
    /// hybrid set: linear in every direction plus one quadratic velocity
    /// index per velocity direction.
    Serendipity,
    /// Full tensor-product family (placeholder, no kernels).
    Tensor,
}

/// Descriptor for a phase-space basis: dimensionality, order, family.
///
/// `cdim` configuration-space directions come first, then `vdim`
/// velocity-space directions. A fluid (configuration-only) basis has
/// `vdim = 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BasisDesc {
    /// Number of configuration-space dimensions.
    pub cdim: usize,
    /// Number of velocity-space dimensions.
    pub vdim: usize,
    /// Polynomial order.
    pub poly_order: usize,
    /// Basis family.
    pub kind: BasisKind,
}

impl BasisDesc {
    /// Create a descriptor, validating dimensional bounds.
    ///
    /// Whether the combination has kernels is a separate question answered
    /// by [`crate::dispatch::is_supported`]; this only rejects shapes that
    /// no basis object could represent at all.
    pub fn new(
        cdim: usize,
        vdim: usize,
        poly_order: usize,
        kind: BasisKind,
    ) -> Result<Self, GkError> {
        let ndim = cdim + vdim;
        if cdim < 1 || ndim > MAX_DIM {
            return Err(GkError::dimension_mismatch(
                format!("1 <= cdim, cdim + vdim <= {}", MAX_DIM),
                format!("cdim = {}, vdim = {}", cdim, vdim),
            ));
        }
        if poly_order < 1 {
            return Err(GkError::dimension_mismatch(
                "poly_order >= 1",
                format!("poly_order = {}", poly_order),
            ));
        }
        Ok(Self {
            cdim,
            vdim,
            poly_order,
            kind,
        })
    }

    /// Total phase-space dimensionality.
    pub fn ndim(&self) -> usize {
        self.cdim + self.vdim
    }

    /// Descriptor for the configuration-space restriction of this basis.
    pub fn conf_desc(&self) -> BasisDesc {
        BasisDesc {
            cdim: self.cdim,
            vdim: 0,
            poly_order: self.poly_order,
            kind: self.kind,
        }
    }
}
