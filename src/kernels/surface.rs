//! Upwinded surface-flux kernel.
//!
//! For a face normal to direction `dir`, the kernel evaluates the phase
//! velocity `alpha` at the face quadrature nodes, selects the upwind trace
//! of `f` per node by the sign of `alpha`, projects the nodal product onto
//! the surface basis to get the numerical flux `Ghat`, and accumulates the
//! divergence into the volume expansion through the trace coefficients.
//!
//! Sign convention per node: `alpha > 0` takes the lower-side cell's trace
//! (its upper face, ξ_dir = +1); `alpha <= 0` takes the upper-side cell's
//! trace (its lower face, ξ_dir = -1). Ties go to the upper side, so both
//! cells adjacent to a face always agree on the selected value and the
//! face flux telescopes exactly.

use super::quadrature::QuadTable;
use crate::basis::ModalBasis;

/// Largest surface-basis size across the supported bases (3x3v p2
/// serendipity has 112 surface modes).
const MAX_SURF_BASIS: usize = 112;
/// Largest face quadrature count (3^5 nodes for 3x3v p2).
const MAX_SURF_QUAD: usize = 243;

/// Which domain boundary a skin cell sits at.
///
/// `Lower` means the skin cell is the first interior cell in `dir`; the
/// boundary kernel then updates its upper (interior-facing) face, with the
/// neighbor above supplying the other trace. The outermost face gets no
/// flux. `Upper` is the mirror image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Lower,
    Upper,
}

/// Precomputed surface-update tables for one direction of one basis.
#[derive(Clone, Debug)]
pub struct SurfaceKernel {
    dir: usize,
    num_basis: usize,
    num_surf: usize,
    num_quad: usize,
    /// Quadrature over the surface basis.
    quad: QuadTable,
    /// Volume basis at each face node with ξ_dir = -1 (node-major).
    skin_lower: Vec<Vec<f64>>,
    /// Volume basis at each face node with ξ_dir = +1.
    skin_upper: Vec<Vec<f64>>,
    /// Per volume mode: trace coefficient on ξ_dir = -1 (sign included).
    trace_lower: Vec<f64>,
    /// Per volume mode: trace coefficient on ξ_dir = +1.
    trace_upper: Vec<f64>,
    /// Per volume mode: index of its trace in the surface basis.
    surf_index: Vec<usize>,
}

impl SurfaceKernel {
    /// Build the tables for faces normal to `dir` of `basis`.
    pub fn new(basis: &ModalBasis, dir: usize) -> Self {
        assert!(dir < basis.ndim(), "surface direction out of bounds");

        let surf_basis = basis.surface_basis(dir);
        let quad = QuadTable::new(&surf_basis);

        let num_basis = basis.num_basis();
        let num_surf = surf_basis.num_basis();
        let num_quad = quad.num_nodes();
        assert!(num_surf <= MAX_SURF_BASIS && num_quad <= MAX_SURF_QUAD);

        let ndim = basis.ndim();
        let mut skin_lower = Vec::with_capacity(num_quad);
        let mut skin_upper = Vec::with_capacity(num_quad);
        let mut xi = vec![0.0; ndim];
        for q in 0..num_quad {
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
        }

        let trace_lower = (0..num_basis)
            .map(|k| basis.trace_coeff(k, dir, false))
            .collect();
        let trace_upper = (0..num_basis)
            .map(|k| basis.trace_coeff(k, dir, true))
            .collect();
        let surf_index = (0..num_basis)
            .map(|k| basis.surface_index(&surf_basis, k, dir))
            .collect();

        Self {
            dir,
            num_basis,
            num_surf,
            num_quad,
            quad,
            skin_lower,
            skin_upper,
            trace_lower,
            trace_upper,
            surf_index,
        }
    }

    /// The direction this kernel's faces are normal to.
    pub fn dir(&self) -> usize {
        self.dir
    }

    /// Surface-basis size (length of an `alpha` or `Ghat` vector).
    pub fn num_surf_basis(&self) -> usize {
        self.num_surf
    }

    /// Number of face quadrature nodes.
    pub fn num_quad(&self) -> usize {
        self.num_quad
    }

    /// The face quadrature table.
    pub fn quad(&self) -> &QuadTable {
        &self.quad
    }

    /// Per-node sign of a surface expansion of `alpha`; writes ±1.0 into
    /// `sgn` and returns true when the sign is uniform over the face.
    pub fn alpha_signs(&self, alpha: &[f64], sgn: &mut [f64]) -> bool {
        let mut pos = false;
        let mut neg = false;
        for q in 0..self.num_quad {
            let a = dot(alpha, self.quad.basis_at(q));
            if a > 0.0 {
                sgn[q] = 1.0;
                pos = true;
            } else {
                sgn[q] = -1.0;
                neg = true;
            }
        }
        !(pos && neg)
    }

    /// Upwind flux projection for one face: `f_lo` and `f_up` are the
    /// volume expansions of the cells below and above the face.
    fn upwind_ghat(&self, alpha: &[f64], f_lo: &[f64], f_up: &[f64], ghat: &mut [f64]) {
        let mut nodal = [0.0; MAX_SURF_QUAD];
        for q in 0..self.num_quad {
            let a = dot(alpha, self.quad.basis_at(q));
            let f_val = if a > 0.0 {
                dot(f_lo, &self.skin_upper[q])
            } else {
                dot(f_up, &self.skin_lower[q])
            };
            nodal[q] = a * f_val;
        }
        self.quad.project(&nodal[..self.num_quad], ghat);
    }

    /// Interior-cell update: both faces in `dir`.
    ///
    /// `alpha_lo`/`alpha_up` are surface expansions of the phase velocity
    /// on the cell's lower and upper faces; `f_l`, `f_c`, `f_r` the volume
    /// expansions of the cell and its neighbors. Accumulates into `out`.
    /// The return value is a CFL-frequency hook; this kernel reports 0.
    pub fn surf(
        &self,
        dxv: &[f64],
        alpha_lo: &[f64],
        alpha_up: &[f64],
        f_l: &[f64],
        f_c: &[f64],
        f_r: &[f64],
        out: &mut [f64],
    ) -> f64 {
        let mut ghat_lo = [0.0; MAX_SURF_BASIS];
        let mut ghat_up = [0.0; MAX_SURF_BASIS];
        self.upwind_ghat(alpha_lo, f_l, f_c, &mut ghat_lo);
        self.upwind_ghat(alpha_up, f_c, f_r, &mut ghat_up);

        let rdx2 = 2.0 / dxv[self.dir];
        for i in 0..self.num_basis {
            let s = self.surf_index[i];
            out[i] += rdx2 * (self.trace_lower[i] * ghat_lo[s] - self.trace_upper[i] * ghat_up[s]);
        }
        0.0
    }

    /// Skin-cell update at a domain boundary: only the interior-facing
    /// face in `dir` carries flux; the outermost face gets none.
    ///
    /// `f_skin` is the skin cell, `f_edge` its interior neighbor across
    /// the updated face. Accumulates into `out`; returns 0 (CFL hook).
    pub fn boundary_surf(
        &self,
        dxv: &[f64],
        alpha: &[f64],
        f_skin: &[f64],
        f_edge: &[f64],
        edge: Edge,
        out: &mut [f64],
    ) -> f64 {
        let mut ghat = [0.0; MAX_SURF_BASIS];
        let rdx2 = 2.0 / dxv[self.dir];

        match edge {
            Edge::Lower => {
                // skin sits below the face
                self.upwind_ghat(alpha, f_skin, f_edge, &mut ghat);
                for i in 0..self.num_basis {
                    out[i] -= rdx2 * self.trace_upper[i] * ghat[self.surf_index[i]];
                }
            }
            Edge::Upper => {
                self.upwind_ghat(alpha, f_edge, f_skin, &mut ghat);
                for i in 0..self.num_basis {
                    out[i] += rdx2 * self.trace_lower[i] * ghat[self.surf_index[i]];
                }
            }
        }
        0.0
    }
}

#[inline]
fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
