//! N-dimensional rectangular index ranges.
//!
//! A `Range` is an inclusive box of integer multi-indices. Iteration is
//! row-major with the last index varying fastest; linear indexing follows
//! the same order, so a `Field` allocated over a range stores its cells in
//! iteration order.

use crate::error::GkError;

/// Maximum phase-space dimensionality (3 configuration + 3 velocity).
pub const MAX_DIM: usize = 6;

/// Inclusive N-dimensional index range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    ndim: usize,
    lower: [i32; MAX_DIM],
    upper: [i32; MAX_DIM],
}

impl Range {
    /// Create a range from inclusive lower/upper corners.
    pub fn new(lower: &[i32], upper: &[i32]) -> Result<Self, GkError> {
        let ndim = lower.len();
        if ndim == 0 || ndim > MAX_DIM || upper.len() != ndim {
            return Err(GkError::InvalidRange(format!(
                "need 1..={} matching dimensions, got {} and {}",
                MAX_DIM,
                ndim,
                upper.len()
            )));
        }
        for d in 0..ndim {
            if upper[d] < lower[d] {
                return Err(GkError::InvalidRange(format!(
                    "negative extent in direction {}: {}..={}",
                    d, lower[d], upper[d]
                )));
            }
        }
        let mut lo = [0; MAX_DIM];
        let mut up = [0; MAX_DIM];
        lo[..ndim].copy_from_slice(lower);
        up[..ndim].copy_from_slice(upper);
        Ok(Self {
            ndim,
            lower: lo,
            upper: up,
        })
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Inclusive lower corner in direction `d`.
    pub fn lower(&self, d: usize) -> i32 {
        self.lower[d]
    }

    /// Inclusive upper corner in direction `d`.
    pub fn upper(&self, d: usize) -> i32 {
        self.upper[d]
    }

    /// Number of indices along direction `d`.
    pub fn shape(&self, d: usize) -> usize {
        (self.upper[d] - self.lower[d] + 1) as usize
    }

    /// Total number of indices in the range.
    pub fn volume(&self) -> usize {
        (0..self.ndim).map(|d| self.shape(d)).product()
    }

    /// Whether `idx` lies inside the range.
    pub fn contains(&self, idx: &[i32]) -> bool {
        (0..self.ndim).all(|d| idx[d] >= self.lower[d] && idx[d] <= self.upper[d])
    }

    /// Whether `other` is fully contained in this range.
    pub fn contains_range(&self, other: &Range) -> bool {
        (0..self.ndim)
            .all(|d| other.lower[d] >= self.lower[d] && other.upper[d] <= self.upper[d])
    }

    /// Extend by `nlo`/`nup` ghost layers in every direction.
    pub fn extend_all(&self, nlo: i32, nup: i32) -> Range {
        let mut out = *self;
        for d in 0..self.ndim {
            out.lower[d] -= nlo;
            out.upper[d] += nup;
        }
        out
    }

    /// Extend by ghost layers in direction `d` only.
    pub fn extend(&self, d: usize, nlo: i32, nup: i32) -> Range {
        let mut out = *self;
        out.lower[d] -= nlo;
        out.upper[d] += nup;
        out
    }

    /// The thickness-one slab at the lower edge of direction `d`.
    pub fn lower_skin(&self, d: usize) -> Range {
        let mut out = *self;
        out.upper[d] = out.lower[d];
        out
    }

    /// The thickness-one slab at the upper edge of direction `d`.
    pub fn upper_skin(&self, d: usize) -> Range {
        let mut out = *self;
        out.lower[d] = out.upper[d];
        out
    }

    /// Row-major linear index of `idx` (last dimension fastest).
    pub fn linear_index(&self, idx: &[i32]) -> usize {
        debug_assert!(self.contains(idx), "index {:?} outside range", &idx[..self.ndim]);
        let mut lin = 0usize;
        for d in 0..self.ndim {
            lin = lin * self.shape(d) + (idx[d] - self.lower[d]) as usize;
        }
        lin
    }

    /// Inverse of [`Range::linear_index`].
    pub fn index_from_linear(&self, mut lin: usize, idx: &mut [i32]) {
        for d in (0..self.ndim).rev() {
            let s = self.shape(d);
            idx[d] = self.lower[d] + (lin % s) as i32;
            lin /= s;
        }
    }

    /// Iterate over all indices in row-major order.
    pub fn iter(&self) -> RangeIter {
        RangeIter {
            range: *self,
            next: self.lower,
            done: false,
        }
    }
}

/// Row-major iterator over a [`Range`], last index fastest.
pub struct RangeIter {
    range: Range,
    next: [i32; MAX_DIM],
    done: bool,
}

impl Iterator for RangeIter {
    type Item = [i32; MAX_DIM];

    fn next(&mut self) -> Option<[i32; MAX_DIM]> {
        if self.done {
            return None;
        }
        let current = self.next;

        // odometer increment
        let mut d = self.range.ndim;
        loop {
            if d == 0 {
                self.done = true;
                break;
            }
            d -= 1;
            if self.next[d] < self.range.upper[d] {
                self.next[d] += 1;
                break;
            }
            self.next[d] = self.range.lower[d];
        }

        Some(current)
    }
}
