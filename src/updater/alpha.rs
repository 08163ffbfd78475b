//! Surface expansion of the canonical phase-space flux velocity.
//!
//! For canonical coordinates `(z, p)` with Hamiltonian expansion `H`, the
//! phase velocity is `alpha = {z_d, H}`: in a configuration direction
//! `+∂H/∂p_d`, in a velocity direction `-∂H/∂z_d`, each scaled by the
//! conjugate direction's reference-cell factor `2/dx`. The updater traces
//! these onto cell faces and stores each cell's **lower**-face expansion;
//! the upper-face expansion of cell `i` is the lower-face expansion of
//! cell `i + e_d`, so both cells sharing a face read the same expansion
//! and the upwind sign test agrees on the two sides by construction.

use crate::basis::{BasisDesc, ModalBasis};
use crate::dispatch;
use crate::error::GkError;
use crate::field::Field;
use crate::grid::{Range, RectGrid};
use crate::kernels::SurfaceKernel;

/// Computes lower-face alpha expansions, per-node signs, and the
/// constant-sign flag for every direction.
pub struct AlphaUpdater {
    grid: RectGrid,
    cdim: usize,
    kernels: Vec<SurfaceKernel>,
    /// Per direction: ∂φ_k/∂ξ_conj at each lower-face node (node-major).
    face_grad: Vec<Vec<Vec<f64>>>,
    num_basis: usize,
}

impl AlphaUpdater {
    /// Create the updater for a canonical phase basis on `grid`.
    ///
    /// Canonical coordinates come in conjugate pairs, so the descriptor
    /// must have `cdim == vdim`.
    pub fn new(grid: &RectGrid, desc: &BasisDesc) -> Result<Self, GkError> {
        if desc.cdim != desc.vdim {
            return Err(GkError::dimension_mismatch(
                "cdim == vdim (conjugate pairs)",
                format!("cdim = {}, vdim = {}", desc.cdim, desc.vdim),
            ));
        }
        if grid.ndim() != desc.ndim() {
            return Err(GkError::dimension_mismatch(
                format!("grid ndim {}", desc.ndim()),
                format!("{}", grid.ndim()),
            ));
        }

        let basis = ModalBasis::from_desc(desc);
        let kernels = dispatch::surf_kernels(desc);
        let ndim = basis.ndim();
        let num_basis = basis.num_basis();

        let mut face_grad = Vec::with_capacity(ndim);
        for (dir, kernel) in kernels.iter().enumerate() {
            let conj = conjugate(desc.cdim, dir);
            let mut rows = Vec::with_capacity(kernel.num_quad());
            let mut xi = vec![0.0; ndim];
            for q in 0..kernel.num_quad() {
                let face = kernel.quad().ordinate(q);
                for (d, slot) in xi.iter_mut().enumerate() {
                    *slot = match d.cmp(&dir) {
                        std::cmp::Ordering::Less => face[d],
                        std::cmp::Ordering::Equal => -1.0,
                        std::cmp::Ordering::Greater => face[d - 1],
                    };
                }
                rows.push(
                    (0..num_basis)
                        .map(|k| basis.eval_basis_grad(k, conj, &xi))
                        .collect(),
                );
            }
            face_grad.push(rows);
        }

        Ok(Self {
            grid: grid.clone(),
            cdim: desc.cdim,
            kernels,
            face_grad,
            num_basis,
        })
    }

    /// The per-direction surface kernels (shared tables with the surface
    /// updater).
    pub fn kernels(&self) -> &[SurfaceKernel] {
        &self.kernels
    }

    /// Compute alpha on the lower face of every cell of `range`, for every
    /// direction.
    ///
    /// `alpha_surf[d]` receives the surface expansion (length: direction
    /// `d`'s surface-basis size), `sgn_alpha[d]` the per-quadrature-node
    /// signs (±1), and `const_sgn[d]` a single 1.0/0.0 flag for whether
    /// the sign is uniform over the face. Sweep an extended range when
    /// skin-cell upper faces are needed: the face between cells `i` and
    /// `i + e_d` is stored at `i + e_d`.
    pub fn advance(
        &self,
        range: &Range,
        hamil: &Field,
        alpha_surf: &mut [Field],
        sgn_alpha: &mut [Field],
        const_sgn: &mut [Field],
    ) {
        let ndim = self.grid.ndim();
        assert_eq!(hamil.num_comp(), self.num_basis, "hamiltonian length");
        assert_eq!(alpha_surf.len(), ndim);
        assert_eq!(sgn_alpha.len(), ndim);
        assert_eq!(const_sgn.len(), ndim);
        assert!(hamil.range().contains_range(range));

        let max_quad = self.kernels.iter().map(|k| k.num_quad()).max().unwrap_or(1);
        let max_surf = self
            .kernels
            .iter()
            .map(|k| k.num_surf_basis())
            .max()
            .unwrap_or(1);
        let mut nodal = vec![0.0; max_quad];
        let mut alpha = vec![0.0; max_surf];

        for idx in range.iter() {
            let h = hamil.cell(&idx);
            for (dir, kernel) in self.kernels.iter().enumerate() {
                let conj = conjugate(self.cdim, dir);
                let scale = if dir < self.cdim {
                    2.0 / self.grid.dx(conj)
                } else {
                    -2.0 / self.grid.dx(conj)
                };

                let nq = kernel.num_quad();
                let ns = kernel.num_surf_basis();
                for (q, row) in self.face_grad[dir].iter().enumerate() {
                    nodal[q] = scale
                        * h.iter().zip(row.iter()).map(|(c, g)| c * g).sum::<f64>();
                }
                kernel.quad().project(&nodal[..nq], &mut alpha[..ns]);

                alpha_surf[dir].cell_mut(&idx).copy_from_slice(&alpha[..ns]);
                let uniform = kernel.alpha_signs(&alpha[..ns], sgn_alpha[dir].cell_mut(&idx));
                const_sgn[dir].cell_mut(&idx)[0] = if uniform { 1.0 } else { 0.0 };
            }
        }
    }
}

/// The conjugate coordinate of direction `dir` in a canonical layout.
fn conjugate(cdim: usize, dir: usize) -> usize {
    if dir < cdim {
        cdim + dir
    } else {
        dir - cdim
    }
}
