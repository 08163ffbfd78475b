//! Bi-Maxwellian projection sweep: fills a phase-space field from
//! configuration-space primitive moments.

use crate::basis::{BasisDesc, ModalBasis};
use crate::dispatch;
use crate::error::GkError;
use crate::field::Field;
use crate::grid::{Range, RectGrid, MAX_DIM};
use crate::kernels::BiMaxwellianKernel;

/// Applies the bi-Maxwellian projection kernel over a phase-space range.
pub struct BiMaxwellianProjection {
    grid: RectGrid,
    cdim: usize,
    kernel: BiMaxwellianKernel,
    num_basis: usize,
}

impl BiMaxwellianProjection {
    /// Create the updater for a kinetic basis on `grid`.
    pub fn new(grid: &RectGrid, desc: &BasisDesc) -> Result<Self, GkError> {
        if desc.vdim < 1 {
            return Err(GkError::InvalidShape(
                "projection needs a velocity subspace".into(),
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
            kernel: dispatch::proj_kernel(desc),
            num_basis: ModalBasis::from_desc(desc).num_basis(),
        })
    }

    /// Primitive-moment components per configuration cell.
    pub fn num_prim(&self) -> usize {
        self.kernel.num_prim()
    }

    /// The configuration-space restriction of a phase-space range.
    pub fn conf_range(&self, phase_range: &Range) -> Range {
        let lower: Vec<i32> = (0..self.cdim).map(|d| phase_range.lower(d)).collect();
        let upper: Vec<i32> = (0..self.cdim).map(|d| phase_range.upper(d)).collect();
        Range::new(&lower, &upper).expect("phase range restriction is well-formed")
    }

    /// Project the bi-Maxwellian of `prim_moms` onto every cell of
    /// `phase_range`, overwriting `fmax` there.
    pub fn advance(&self, phase_range: &Range, prim_moms: &Field, fmax: &mut Field) {
        assert_eq!(fmax.num_comp(), self.num_basis, "fmax coefficient length");
        assert_eq!(
            prim_moms.num_comp(),
            self.kernel.num_prim(),
            "primitive-moment length"
        );
        assert!(fmax.range().contains_range(phase_range));
        assert!(prim_moms
            .range()
            .contains_range(&self.conf_range(phase_range)));

        let mut w = [0.0; MAX_DIM];
        let dxv = self.grid.dx_all().to_vec();
        for idx in phase_range.iter() {
            self.grid.cell_center(&idx, &mut w);
            let conf_idx = &idx[..self.cdim];
            self.kernel
                .calc(&w, &dxv, prim_moms.cell(conf_idx), fmax.cell_mut(&idx));
        }
    }
}
