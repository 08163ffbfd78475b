//! Bi-Maxwellian projection onto the modal basis.
//!
//! Given the primitive moments of a species (density, parallel drift,
//! parallel and perpendicular thermal speeds squared) as configuration
//! expansions, the kernel evaluates the bi-Maxwellian
//!
//!   f(x, v) = n / (sqrt(2π vtpar²) (2π vtperp²)^((vdim-1)/2))
//!             · exp(-(v_par - u_par)²/(2 vtpar²) - |v_perp|²/(2 vtperp²))
//!
//! at the phase quadrature nodes and projects the nodal values onto the
//! phase basis. The parallel coordinate is the first velocity direction,
//! matching the moment kernels; `vdim = 1` reduces to a drifting
//! Maxwellian and ignores the perpendicular temperature block.

use super::quadrature::QuadTable;
use crate::basis::ModalBasis;
use std::f64::consts::PI;

/// Largest phase quadrature count (3^6 nodes for a 6-dimensional p2 rule).
const MAX_QUAD: usize = 729;
/// Largest configuration quadrature count (3^3).
const MAX_CONF_QUAD: usize = 27;

/// Bi-Maxwellian projection kernel for one phase basis.
///
/// The primitive-moment input stacks four configuration blocks of
/// `num_conf_basis` coefficients each: density, parallel drift, parallel
/// thermal speed squared, perpendicular thermal speed squared. The
/// moments must be physical (positive density and temperatures) on the
/// cells the kernel is applied to; the kernel does not guard against
/// unphysical input.
#[derive(Clone, Debug)]
pub struct BiMaxwellianKernel {
    cdim: usize,
    vdim: usize,
    num_conf: usize,
    /// Quadrature over the phase basis.
    quad: QuadTable,
    /// Quadrature over the configuration restriction; phase node `q` sees
    /// configuration node `q / num_vel`.
    conf_quad: QuadTable,
    /// Phase nodes per configuration node.
    num_vel: usize,
}

impl BiMaxwellianKernel {
    /// Build the kernel for a phase basis.
    pub fn new(basis: &ModalBasis) -> Self {
        assert!(basis.vdim >= 1, "projection needs a velocity subspace");

        let conf_basis = ModalBasis::new(basis.cdim, 0, basis.poly_order, basis.kind);
        let quad = QuadTable::new(basis);
        let conf_quad = QuadTable::new(&conf_basis);

        // same per-direction rules, so phase nodes group by conf node
        let num_vel = quad.num_nodes() / conf_quad.num_nodes();
        assert!(quad.num_nodes() <= MAX_QUAD && conf_quad.num_nodes() <= MAX_CONF_QUAD);

        Self {
            cdim: basis.cdim,
            vdim: basis.vdim,
            num_conf: conf_basis.num_basis(),
            quad,
            conf_quad,
            num_vel,
        }
    }

    /// Primitive-moment input length: four configuration blocks.
    pub fn num_prim(&self) -> usize {
        4 * self.num_conf
    }

    /// Configuration-basis size (block stride of the input).
    pub fn num_conf_basis(&self) -> usize {
        self.num_conf
    }

    /// Project the bi-Maxwellian of one cell, overwriting `fmax`.
    ///
    /// `w` and `dxv` are the phase-space cell center and widths;
    /// `prim_moms` the cell's primitive-moment blocks.
    pub fn calc(&self, w: &[f64], dxv: &[f64], prim_moms: &[f64], fmax: &mut [f64]) {
        let nc = self.num_conf;
        let ncq = self.conf_quad.num_nodes();

        // primitive moments at the configuration nodes
        let mut den = [0.0; MAX_CONF_QUAD];
        let mut upar = [0.0; MAX_CONF_QUAD];
        let mut vtpar_sq = [0.0; MAX_CONF_QUAD];
        let mut vtperp_sq = [0.0; MAX_CONF_QUAD];
        for qc in 0..ncq {
            let row = self.conf_quad.basis_at(qc);
            den[qc] = dot(&prim_moms[..nc], row);
            upar[qc] = dot(&prim_moms[nc..2 * nc], row);
            vtpar_sq[qc] = dot(&prim_moms[2 * nc..3 * nc], row);
            vtperp_sq[qc] = dot(&prim_moms[3 * nc..4 * nc], row);
        }

        let mut nodal = [0.0; MAX_QUAD];
        for q in 0..self.quad.num_nodes() {
            let qc = q / self.num_vel;
            let node = self.quad.ordinate(q);

            let amp = den[qc]
                / ((2.0 * PI * vtpar_sq[qc]).sqrt()
                    * (2.0 * PI * vtperp_sq[qc]).powf(0.5 * (self.vdim - 1) as f64));

            let d0 = self.cdim;
            let vpar = w[d0] + 0.5 * dxv[d0] * node[d0];
            let mut expo = -(vpar - upar[qc]) * (vpar - upar[qc]) / (2.0 * vtpar_sq[qc]);
            for j in 1..self.vdim {
                let d = self.cdim + j;
                let vperp = w[d] + 0.5 * dxv[d] * node[d];
                expo -= vperp * vperp / (2.0 * vtperp_sq[qc]);
            }

            nodal[q] = amp * expo.exp();
        }
        self.quad.project(&nodal[..self.quad.num_nodes()], fmax);
    }
}

#[inline]
fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
