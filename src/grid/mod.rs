//! Structured phase-space grids and index ranges.
//!
//! This module provides:
//! - [`Range`]: an N-dimensional rectangular index range with row-major
//!   iteration, ghost-layer extension, and skin (boundary-slab) sub-ranges
//! - [`RectGrid`]: a uniform rectangular grid with cell centers and
//!   spacings, covering both configuration and velocity directions

mod range;
mod rect_grid;

pub use range::{Range, RangeIter, MAX_DIM};
pub use rect_grid::RectGrid;
