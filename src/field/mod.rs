//! Per-cell coefficient storage over an index range.
//!
//! A `Field` holds a fixed number of components (modal coefficients) for
//! every cell of a [`Range`], stored contiguously in the range's row-major
//! iteration order. The clear, accumulate, and copy primitives are what
//! updaters use to prepare buffers before and after kernel sweeps; kernels
//! themselves never allocate.

use crate::error::GkError;
use crate::grid::Range;

/// Coefficient storage: `num_comp` doubles per cell of `range`.
#[derive(Clone, Debug)]
pub struct Field {
    data: Vec<f64>,
    range: Range,
    num_comp: usize,
}

impl Field {
    /// Allocate a zero-initialized field.
    pub fn new(range: Range, num_comp: usize) -> Result<Self, GkError> {
        if num_comp == 0 {
            return Err(GkError::InvalidShape(
                "field needs at least one component".into(),
            ));
        }
        Ok(Self {
            data: vec![0.0; range.volume() * num_comp],
            range,
            num_comp,
        })
    }

    /// The index range this field is allocated over.
    pub fn range(&self) -> &Range {
        &self.range
    }

    /// Components per cell.
    pub fn num_comp(&self) -> usize {
        self.num_comp
    }

    /// Coefficients of the cell at `idx`.
    pub fn cell(&self, idx: &[i32]) -> &[f64] {
        let start = self.range.linear_index(idx) * self.num_comp;
        &self.data[start..start + self.num_comp]
    }

    /// Mutable coefficients of the cell at `idx`.
    pub fn cell_mut(&mut self, idx: &[i32]) -> &mut [f64] {
        let start = self.range.linear_index(idx) * self.num_comp;
        &mut self.data[start..start + self.num_comp]
    }

    /// Set every component of every cell to `val`.
    pub fn clear(&mut self, val: f64) {
        self.data.fill(val);
    }

    /// Set every component to `val` on cells of `sub` only.
    ///
    /// `sub` must be contained in the field's range; cells outside `sub`
    /// are untouched.
    pub fn clear_range(&mut self, sub: &Range, val: f64) {
        debug_assert!(self.range.contains_range(sub));
        for idx in sub.iter() {
            self.cell_mut(&idx).fill(val);
        }
    }

    /// self += coeff * other, over the full (shared) range.
    pub fn accumulate(&mut self, coeff: f64, other: &Field) {
        assert_eq!(self.data.len(), other.data.len(), "field shapes must match");
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += coeff * *b;
        }
    }

    /// self += coeff * other on cells of `sub` only.
    ///
    /// The two fields may be allocated over different ranges as long as
    /// both contain `sub`.
    pub fn accumulate_range(&mut self, coeff: f64, other: &Field, sub: &Range) {
        debug_assert!(self.range.contains_range(sub));
        debug_assert!(other.range.contains_range(sub));
        assert_eq!(self.num_comp, other.num_comp, "component counts must match");
        for idx in sub.iter() {
            let src = other.cell(&idx);
            let dst = self.cell_mut(&idx);
            for (a, b) in dst.iter_mut().zip(src.iter()) {
                *a += coeff * *b;
            }
        }
    }

    /// Copy all coefficients from a field of identical shape.
    pub fn copy_from(&mut self, other: &Field) {
        assert_eq!(self.data.len(), other.data.len(), "field shapes must match");
        self.data.copy_from_slice(&other.data);
    }

    /// Raw contiguous storage, row-major cell order.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable raw storage.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_2x3(num_comp: usize) -> Field {
        let range = Range::new(&[0, 0], &[1, 2]).unwrap();
        Field::new(range, num_comp).unwrap()
    }

    #[test]
    fn test_cell_access() {
        let mut f = field_2x3(4);
        f.cell_mut(&[0, 0])[0] = 1.0;
        f.cell_mut(&[1, 2])[3] = 2.0;

        assert!((f.cell(&[0, 0])[0] - 1.0).abs() < 1e-14);
        assert!((f.cell(&[1, 2])[3] - 2.0).abs() < 1e-14);
        assert_eq!(f.data().len(), 6 * 4);
    }

    #[test]
    fn test_accumulate() {
        let mut a = field_2x3(2);
        let mut b = field_2x3(2);
        a.clear(1.0);
        b.clear(2.0);

        a.accumulate(0.5, &b); // 1 + 0.5 * 2 = 2
        for &v in a.data() {
            assert!((v - 2.0).abs() < 1e-14);
        }
    }

    #[test]
    fn test_range_ops_leave_outside_untouched() {
        let mut f = field_2x3(1);
        f.clear(1.0);

        let sub = f.range().lower_skin(0);
        f.clear_range(&sub, 5.0);

        assert!((f.cell(&[0, 1])[0] - 5.0).abs() < 1e-14);
        assert!((f.cell(&[1, 1])[0] - 1.0).abs() < 1e-14);

        let mut g = field_2x3(1);
        g.clear(10.0);
        f.accumulate_range(1.0, &g, &sub);
        assert!((f.cell(&[0, 0])[0] - 15.0).abs() < 1e-14);
        assert!((f.cell(&[1, 0])[0] - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_accumulate_range_different_parents() {
        // Accumulating from a ghost-extended field into an interior field
        let interior = Range::new(&[0, 0], &[3, 3]).unwrap();
        let extended = interior.extend_all(1, 1);

        let mut dst = Field::new(interior, 1).unwrap();
        let mut src = Field::new(extended, 1).unwrap();
        src.clear(3.0);

        dst.accumulate_range(2.0, &src, &interior);
        for idx in interior.iter() {
            assert!((dst.cell(&idx)[0] - 6.0).abs() < 1e-14);
        }
    }
}
