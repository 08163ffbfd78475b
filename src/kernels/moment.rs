//! Velocity-space moment kernels.
//!
//! A moment kernel integrates a phase-space expansion over the velocity
//! subspace against the configuration basis, producing the modal
//! coefficients of a configuration-space moment. The quadrature rule of
//! [`QuadTable`] is exact for every weight here (polynomial degree in each
//! velocity direction stays below twice the node count), so the results
//! match the closed-form coefficients of hand-generated moment kernels to
//! rounding.

use super::quadrature::QuadTable;
use crate::basis::ModalBasis;

/// Which velocity moment to take.
///
/// `M1`, `M2Par` and `M3Par` weight with the first (parallel) velocity
/// coordinate; `M2` sums squares over all velocity directions.
/// `ThreeMoments` stacks M0, M1 and M2 into one output buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MomentKind {
    M0,
    M1,
    M2,
    M2Par,
    M3Par,
    ThreeMoments,
}

impl MomentKind {
    /// Output components for a configuration basis of `num_conf_basis`
    /// functions.
    pub fn num_comp(&self, num_conf_basis: usize) -> usize {
        match self {
            MomentKind::ThreeMoments => 3 * num_conf_basis,
            _ => num_conf_basis,
        }
    }
}

/// Moment kernel for one phase basis.
#[derive(Clone, Debug)]
pub struct MomentKernel {
    kind: MomentKind,
    cdim: usize,
    vdim: usize,
    num_conf: usize,
    /// Quadrature over the phase basis.
    quad: QuadTable,
    /// Configuration basis at the configuration coordinates of each phase
    /// node (node-major).
    conf_at_ords: Vec<Vec<f64>>,
}

impl MomentKernel {
    /// Build the kernel for a phase basis.
    pub fn new(basis: &ModalBasis, kind: MomentKind) -> Self {
        assert!(basis.vdim >= 1, "moments need a velocity subspace");

        let conf_basis = ModalBasis::new(basis.cdim, 0, basis.poly_order, basis.kind);
        let quad = QuadTable::new(basis);

        let num_conf = conf_basis.num_basis();
        let conf_at_ords = (0..quad.num_nodes())
            .map(|q| {
                let xc = &quad.ordinate(q)[..basis.cdim];
                (0..num_conf).map(|k| conf_basis.eval_basis(k, xc)).collect()
            })
            .collect();

        Self {
            kind,
            cdim: basis.cdim,
            vdim: basis.vdim,
            num_conf,
            quad,
            conf_at_ords,
        }
    }

    /// Output-buffer length.
    pub fn num_comp(&self) -> usize {
        self.kind.num_comp(self.num_conf)
    }

    /// Configuration-basis size.
    pub fn num_conf_basis(&self) -> usize {
        self.num_conf
    }

    /// Accumulate the moment of one cell into `out`.
    ///
    /// `w` and `dxv` are the phase-space cell center and widths; `f` the
    /// phase expansion. Physical velocity at a node is
    /// `w[cdim+j] + (dxv[cdim+j]/2) η_j`.
    pub fn calc(&self, w: &[f64], dxv: &[f64], f: &[f64], out: &mut [f64]) {
        let ndim = self.cdim + self.vdim;
        let vol_fact: f64 = (self.cdim..ndim).map(|d| dxv[d] / 2.0).product();

        let mut v = [0.0; 3];
        for q in 0..self.quad.num_nodes() {
            let node = self.quad.ordinate(q);
            let f_q: f64 = f
                .iter()
                .zip(self.quad.basis_at(q).iter())
                .map(|(c, b)| c * b)
                .sum();
            let fw = vol_fact * self.quad.weight(q) * f_q;

            for j in 0..self.vdim {
                let d = self.cdim + j;
                v[j] = w[d] + 0.5 * dxv[d] * node[d];
            }
            let v_sq: f64 = v[..self.vdim].iter().map(|x| x * x).sum();

            let conf_row = &self.conf_at_ords[q];
            match self.kind {
                MomentKind::M0 => {
                    for (o, c) in out.iter_mut().zip(conf_row.iter()) {
                        *o += fw * c;
                    }
                }
                MomentKind::M1 => {
                    for (o, c) in out.iter_mut().zip(conf_row.iter()) {
                        *o += fw * v[0] * c;
                    }
                }
                MomentKind::M2 => {
                    for (o, c) in out.iter_mut().zip(conf_row.iter()) {
                        *o += fw * v_sq * c;
                    }
                }
                MomentKind::M2Par => {
                    for (o, c) in out.iter_mut().zip(conf_row.iter()) {
                        *o += fw * v[0] * v[0] * c;
                    }
                }
                MomentKind::M3Par => {
                    for (o, c) in out.iter_mut().zip(conf_row.iter()) {
                        *o += fw * v[0] * v[0] * v[0] * c;
                    }
                }
                MomentKind::ThreeMoments => {
                    let nc = self.num_conf;
                    for (k, c) in conf_row.iter().enumerate() {
                        out[k] += fw * c;
                        out[nc + k] += fw * v[0] * c;
                        out[2 * nc + k] += fw * v_sq * c;
                    }
                }
            }
        }
    }
}
