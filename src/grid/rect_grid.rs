//! Uniform rectangular phase-space grid.

use super::range::{Range, MAX_DIM};
use crate::error::GkError;

/// Uniform rectangular grid over `[lower, upper]^ndim` with `cells[d]`
/// cells per direction.
///
/// The grid is pure metadata: cell centers and spacings. Field storage and
/// ghost layers are handled by [`crate::field::Field`] over an extended
/// [`Range`].
#[derive(Clone, Debug)]
pub struct RectGrid {
    ndim: usize,
    lower: [f64; MAX_DIM],
    upper: [f64; MAX_DIM],
    cells: [i32; MAX_DIM],
    dx: [f64; MAX_DIM],
}

impl RectGrid {
    /// Create a grid from physical bounds and cell counts.
    pub fn new(lower: &[f64], upper: &[f64], cells: &[i32]) -> Result<Self, GkError> {
        let ndim = lower.len();
        if ndim == 0 || ndim > MAX_DIM || upper.len() != ndim || cells.len() != ndim {
            return Err(GkError::InvalidGrid(format!(
                "need 1..={} matching dimensions, got {}/{}/{}",
                MAX_DIM,
                lower.len(),
                upper.len(),
                cells.len()
            )));
        }

        let mut lo = [0.0; MAX_DIM];
        let mut up = [0.0; MAX_DIM];
        let mut nc = [0; MAX_DIM];
        let mut dx = [0.0; MAX_DIM];

        for d in 0..ndim {
            if upper[d] <= lower[d] {
                return Err(GkError::InvalidGrid(format!(
                    "inverted bounds in direction {}: [{}, {}]",
                    d, lower[d], upper[d]
                )));
            }
            if cells[d] < 1 {
                return Err(GkError::InvalidGrid(format!(
                    "need at least one cell in direction {}, got {}",
                    d, cells[d]
                )));
            }
            lo[d] = lower[d];
            up[d] = upper[d];
            nc[d] = cells[d];
            dx[d] = (upper[d] - lower[d]) / cells[d] as f64;
        }

        Ok(Self {
            ndim,
            lower: lo,
            upper: up,
            cells: nc,
            dx,
        })
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Number of cells in direction `d`.
    pub fn cells(&self, d: usize) -> i32 {
        self.cells[d]
    }

    /// Cell spacing in direction `d`.
    pub fn dx(&self, d: usize) -> f64 {
        self.dx[d]
    }

    /// Cell spacings as a slice (first `ndim` entries meaningful).
    pub fn dx_all(&self) -> &[f64] {
        &self.dx[..self.ndim]
    }

    /// Physical lower bound in direction `d`.
    pub fn lower(&self, d: usize) -> f64 {
        self.lower[d]
    }

    /// Physical upper bound in direction `d`.
    pub fn upper(&self, d: usize) -> f64 {
        self.upper[d]
    }

    /// Zero-based index range over all cells.
    pub fn cell_range(&self) -> Range {
        let lower = [0i32; MAX_DIM];
        let mut upper = [0i32; MAX_DIM];
        for d in 0..self.ndim {
            upper[d] = self.cells[d] - 1;
        }
        Range::new(&lower[..self.ndim], &upper[..self.ndim])
            .expect("grid cell counts are validated at construction")
    }

    /// Write the center coordinates of cell `idx` into `xc`.
    ///
    /// Ghost-cell indices (outside `0..cells`) extrapolate with the
    /// uniform spacing, which is what boundary sweeps need.
    pub fn cell_center(&self, idx: &[i32], xc: &mut [f64]) {
        for d in 0..self.ndim {
            xc[d] = self.lower[d] + (idx[d] as f64 + 0.5) * self.dx[d];
        }
    }
}
