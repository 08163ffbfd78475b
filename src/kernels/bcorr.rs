//! Boundary-integral moment corrections at velocity-space edges.
//!
//! Collision operators of Lenard-Bernstein type conserve momentum and
//! energy only up to the distribution leaking through the velocity-grid
//! boundary. The correction kernel integrates the trace of `f` over a
//! velocity boundary face against the configuration basis, signed by the
//! outward normal. The output stacks one momentum block per velocity
//! direction followed by a single energy block shared by all directions;
//! the energy weight is the boundary speed times the momentum integrand.

use super::quadrature::QuadTable;
use crate::basis::ModalBasis;

/// Which end of the velocity grid a boundary face sits at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VelEdge {
    Lower,
    Upper,
}

/// Boundary-correction kernel for one velocity direction of one basis.
#[derive(Clone, Debug)]
pub struct BcorrKernel {
    cdim: usize,
    vdim: usize,
    /// Velocity direction of the boundary face (0-based within velocity).
    vdir: usize,
    num_conf: usize,
    /// Quadrature over the face (surface basis across `cdim + vdir`).
    quad: QuadTable,
    /// Volume basis traces at each face node, ξ_dir = -1 (node-major).
    skin_lower: Vec<Vec<f64>>,
    /// Volume basis traces at each face node, ξ_dir = +1.
    skin_upper: Vec<Vec<f64>>,
    /// Configuration basis at the configuration coordinates of each face
    /// node.
    conf_at_ords: Vec<Vec<f64>>,
}

impl BcorrKernel {
    /// Build the kernel for velocity direction `vdir` of a phase basis.
    pub fn new(basis: &ModalBasis, vdir: usize) -> Self {
        assert!(vdir < basis.vdim, "velocity direction out of bounds");
        let dir = basis.cdim + vdir;

        let surf_basis = basis.surface_basis(dir);
        let quad = QuadTable::new(&surf_basis);
        let conf_basis = ModalBasis::new(basis.cdim, 0, basis.poly_order, basis.kind);

        let ndim = basis.ndim();
        let num_basis = basis.num_basis();
        let num_conf = conf_basis.num_basis();

        let mut skin_lower = Vec::with_capacity(quad.num_nodes());
        let mut skin_upper = Vec::with_capacity(quad.num_nodes());
        let mut conf_at_ords = Vec::with_capacity(quad.num_nodes());
        let mut xi = vec![0.0; ndim];
        for q in 0..quad.num_nodes() {
            let face = quad.ordinate(q);
            for (d, slot) in xi.iter_mut().enumerate() {
                *slot = match d.cmp(&dir) {
                    std::cmp::Ordering::Less => face[d],
                    std::cmp::Ordering::Equal => 0.0,
                    std::cmp::Ordering::Greater => face[d - 1],
                };
            }
            xi[dir] = -1.0;
            skin_lower.push((0..num_basis).map(|k| basis.eval_basis(k, &xi)).collect());
            xi[dir] = 1.0;
            skin_upper.push((0..num_basis).map(|k| basis.eval_basis(k, &xi)).collect());

            let xc = &xi[..basis.cdim];
            conf_at_ords.push((0..num_conf).map(|k| conf_basis.eval_basis(k, xc)).collect());
        }

        Self {
            cdim: basis.cdim,
            vdim: basis.vdim,
            vdir,
            num_conf,
            quad,
            skin_lower,
            skin_upper,
            conf_at_ords,
        }
    }

    /// Output length: `vdim` momentum blocks plus the energy block.
    pub fn num_comp(&self) -> usize {
        (self.vdim + 1) * self.num_conf
    }

    /// Configuration-basis size (block stride of the output).
    pub fn num_conf_basis(&self) -> usize {
        self.num_conf
    }

    /// Accumulate the corrections from one boundary cell into `out`.
    ///
    /// `vboundary` is the physical velocity at the boundary face (negative
    /// at the lower edge of a symmetric grid); `f` the boundary cell's
    /// phase expansion. The momentum correction lands in block `vdir` of
    /// `out`, the energy correction in the final block; kernels for the
    /// other velocity directions fill the remaining momentum blocks and
    /// add into the same energy block.
    pub fn calc(&self, dxv: &[f64], vboundary: f64, edge: VelEdge, f: &[f64], out: &mut [f64]) {
        let ndim = self.cdim + self.vdim;
        // face measure over the velocity dims tangent to the face
        let ds: f64 = (self.cdim..ndim)
            .filter(|&d| d != self.cdim + self.vdir)
            .map(|d| dxv[d] / 2.0)
            .product();

        let (sign, skin) = match edge {
            VelEdge::Lower => (-1.0, &self.skin_lower),
            VelEdge::Upper => (1.0, &self.skin_upper),
        };

        let nc = self.num_conf;
        let mom_off = self.vdir * nc;
        let energy_off = self.vdim * nc;
        for q in 0..self.quad.num_nodes() {
            let f_q: f64 = f
                .iter()
                .zip(skin[q].iter())
                .map(|(c, b)| c * b)
                .sum();
            let fw = sign * ds * self.quad.weight(q) * f_q;

            let conf_row = &self.conf_at_ords[q];
            for (k, c) in conf_row.iter().enumerate() {
                out[mom_off + k] += fw * c;
                out[energy_off + k] += vboundary * fw * c;
            }
        }
    }
}
