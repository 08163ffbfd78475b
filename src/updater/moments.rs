//! Moment sweep: reduces a phase-space range to configuration-space
//! moment expansions.

use crate::basis::BasisDesc;
use crate::dispatch;
use crate::error::GkError;
use crate::field::Field;
use crate::grid::{Range, RectGrid, MAX_DIM};
use crate::kernels::{MomentKernel, MomentKind};

/// Applies a moment kernel over a phase-space range, accumulating into a
/// configuration-space field.
pub struct MomentUpdater {
    grid: RectGrid,
    cdim: usize,
    kernel: MomentKernel,
}

impl MomentUpdater {
    /// Create the updater for one moment of a kinetic basis on `grid`.
    pub fn new(grid: &RectGrid, desc: &BasisDesc, kind: MomentKind) -> Result<Self, GkError> {
        if desc.vdim < 1 {
            return Err(GkError::InvalidShape(
                "moments need a velocity subspace".into(),
            ));
        }
        if grid.ndim() != desc.ndim() {
            return Err(GkError::dimension_mismatch(
                format!("grid ndim {}", desc.ndim()),
                format!("{}", grid.ndim()),
            ));
        }
        Ok(Self {
            grid: grid.clone(),
            cdim: desc.cdim,
            kernel: dispatch::moment_kernel(desc, kind),
        })
    }

    /// Output components per configuration cell.
    pub fn num_comp(&self) -> usize {
        self.kernel.num_comp()
    }

    /// The configuration-space restriction of a phase-space range.
    pub fn conf_range(&self, phase_range: &Range) -> Range {
        let lower: Vec<i32> = (0..self.cdim).map(|d| phase_range.lower(d)).collect();
        let upper: Vec<i32> = (0..self.cdim).map(|d| phase_range.upper(d)).collect();
        Range::new(&lower, &upper).expect("phase range restriction is well-formed")
    }

    /// Integrate `fin` over the velocity subspace of `phase_range`.
    ///
    /// `out` is a configuration-space field; the cells under
    /// `conf_range(phase_range)` are zeroed first, then each phase cell's
    /// contribution accumulates into its configuration column.
    pub fn advance(&self, phase_range: &Range, fin: &Field, out: &mut Field) {
        assert_eq!(out.num_comp(), self.kernel.num_comp(), "moment length");
        assert!(fin.range().contains_range(phase_range));

        let conf_range = self.conf_range(phase_range);
        out.clear_range(&conf_range, 0.0);

        let mut w = [0.0; MAX_DIM];
        let dxv = self.grid.dx_all().to_vec();
        for idx in phase_range.iter() {
            self.grid.cell_center(&idx, &mut w);
            let conf_idx = &idx[..self.cdim];
            self.kernel
                .calc(&w, &dxv, fin.cell(&idx), out.cell_mut(conf_idx));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::BasisKind;

    fn setup() -> (RectGrid, MomentUpdater, Field) {
        // 1x1v, v in [-2, 2]
        let grid = RectGrid::new(&[0.0, -2.0], &[1.0, 2.0], &[3, 4]).unwrap();
        let desc = BasisDesc::new(1, 1, 1, BasisKind::Serendipity).unwrap();
        let updater = MomentUpdater::new(&grid, &desc, MomentKind::M0).unwrap();

        // f = 1 in physical units: only the flat mode, coefficient 2
        // (the 2D constant basis function is 1/2)
        let mut fin = Field::new(grid.cell_range(), 6).unwrap();
        for idx in grid.cell_range().iter() {
            fin.cell_mut(&idx)[0] = 2.0;
        }
        (grid, updater, fin)
    }

    #[test]
    fn test_density_of_unit_distribution() {
        // n(x) = ∫ 1 dv = 4 over v ∈ [-2, 2]; as a 1D conf expansion the
        // flat coefficient is 4 * sqrt(2).
        let (grid, updater, fin) = setup();
        let range = grid.cell_range();
        let mut out = Field::new(updater.conf_range(&range), updater.num_comp()).unwrap();
        updater.advance(&range, &fin, &mut out);

        for i in 0..3 {
            let m0 = out.cell(&[i]);
            assert!(
                (m0[0] - 4.0 * 2.0_f64.sqrt()).abs() < 1e-13,
                "cell {}: {}",
                i,
                m0[0]
            );
            assert!(m0[1].abs() < 1e-13);
        }
    }

    #[test]
    fn test_advance_rezeroes_output() {
        let (grid, updater, fin) = setup();
        let range = grid.cell_range();
        let mut out = Field::new(updater.conf_range(&range), updater.num_comp()).unwrap();

        updater.advance(&range, &fin, &mut out);
        let first = out.cell(&[1]).to_vec();
        updater.advance(&range, &fin, &mut out);

        // not doubled: the sweep clears before accumulating
        for (a, b) in first.iter().zip(out.cell(&[1]).iter()) {
            assert!((a - b).abs() < 1e-14);
        }
    }
}
