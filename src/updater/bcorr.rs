//! Velocity-boundary moment-correction sweep.

use crate::basis::BasisDesc;
use crate::dispatch;
use crate::error::GkError;
use crate::field::Field;
use crate::grid::{Range, RectGrid};
use crate::kernels::{BcorrKernel, VelEdge};

/// Applies the boundary-correction kernel over the velocity-space skin
/// cells of a phase range, at both ends of every velocity direction.
pub struct BoundaryMomentUpdater {
    grid: RectGrid,
    cdim: usize,
    kernels: Vec<BcorrKernel>,
}

impl BoundaryMomentUpdater {
    /// Create the updater for a kinetic basis on `grid`.
    pub fn new(grid: &RectGrid, desc: &BasisDesc) -> Result<Self, GkError> {
        if desc.vdim < 1 {
            return Err(GkError::InvalidShape(
                "corrections need a velocity subspace".into(),
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
            kernels: dispatch::bcorr_kernels(desc),
        })
    }

    /// Output components per configuration cell: `vdim` momentum blocks
    /// plus the energy block.
    pub fn num_comp(&self) -> usize {
        self.kernels[0].num_comp()
    }

    /// Integrate the distribution's traces over all velocity-boundary
    /// faces of `phase_range`.
    ///
    /// The configuration cells under the range are zeroed first; each
    /// velocity direction's lower and upper skin slabs then accumulate
    /// their signed corrections, with the boundary speed taken from the
    /// grid's velocity extents.
    pub fn advance(&self, phase_range: &Range, fin: &Field, out: &mut Field) {
        assert_eq!(out.num_comp(), self.num_comp(), "correction length");
        assert!(fin.range().contains_range(phase_range));

        let conf_range = self.conf_range(phase_range);
        out.clear_range(&conf_range, 0.0);

        let dxv = self.grid.dx_all().to_vec();
        for (vdir, kernel) in self.kernels.iter().enumerate() {
            let d = self.cdim + vdir;
            for (skin, edge, vb) in [
                (phase_range.lower_skin(d), VelEdge::Lower, self.grid.lower(d)),
                (phase_range.upper_skin(d), VelEdge::Upper, self.grid.upper(d)),
            ] {
                for idx in skin.iter() {
                    let conf_idx = &idx[..self.cdim];
                    kernel.calc(&dxv, vb, edge, fin.cell(&idx), out.cell_mut(conf_idx));
                }
            }
        }
    }

    /// The configuration-space restriction of a phase-space range.
    pub fn conf_range(&self, phase_range: &Range) -> Range {
        let lower: Vec<i32> = (0..self.cdim).map(|d| phase_range.lower(d)).collect();
        let upper: Vec<i32> = (0..self.cdim).map(|d| phase_range.upper(d)).collect();
        Range::new(&lower, &upper).expect("phase range restriction is well-formed")
    }
}
