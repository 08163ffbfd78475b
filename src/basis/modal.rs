//! Orthonormal modal basis over the reference cell [-1, 1]^d.
//!
//! Basis functions are tensor products of normalized Legendre polynomials,
//!
//!   φ_m(ξ) = Π_i sqrt((2 m_i + 1)/2) P_{m_i}(ξ_i)
//!
//! restricted to a family-dependent multi-index set:
//! - serendipity: superlinear degree (sum of m_i with m_i >= 2) at most p
//! - p1 hybrid (kinetic p=1): all-linear indices plus, per velocity
//!   direction, a single quadratic index with the rest linear
//! - tensor: the full {0..p}^d box
//!
//! Orthonormality makes every mass matrix the identity, so nodal→modal
//! projection reduces to quadrature against basis values at the nodes.

use super::descriptor::{BasisDesc, BasisKind};
use crate::polynomial::{legendre, legendre_derivative};

/// Modal basis: enumerated multi-indices plus evaluation routines.
///
/// A zero-dimensional basis (the surface basis of a 1D volume basis) is a
/// single constant mode with value 1.
#[derive(Clone, Debug)]
pub struct ModalBasis {
    /// Configuration-space dimensions (leading).
    pub cdim: usize,
    /// Velocity-space dimensions (trailing).
    pub vdim: usize,
    /// Polynomial order.
    pub poly_order: usize,
    /// Basis family.
    pub kind: BasisKind,
    /// Multi-indices, one per basis function, graded ordering.
    modes: Vec<Vec<usize>>,
    /// Per-mode product of 1D normalization factors sqrt((2m+1)/2).
    norms: Vec<f64>,
}

impl ModalBasis {
    /// Build the modal basis for a descriptor.
    pub fn from_desc(desc: &BasisDesc) -> Self {
        Self::new(desc.cdim, desc.vdim, desc.poly_order, desc.kind)
    }

    /// Build a modal basis from raw shape parameters.
    ///
    /// Unlike [`BasisDesc::new`] this accepts `cdim = 0` so that surface
    /// restrictions of low-dimensional bases can be represented.
    pub fn new(cdim: usize, vdim: usize, poly_order: usize, kind: BasisKind) -> Self {
        let ndim = cdim + vdim;
        let mut modes = enumerate_modes(cdim, vdim, poly_order, kind);
        sort_graded(&mut modes);

        let norms = modes
            .iter()
            .map(|m| {
                m.iter()
                    .map(|&k| ((2 * k + 1) as f64 / 2.0).sqrt())
                    .product()
            })
            .collect();

        debug_assert!(modes.iter().all(|m| m.len() == ndim));

        Self {
            cdim,
            vdim,
            poly_order,
            kind,
            modes,
            norms,
        }
    }

    /// Total dimensionality.
    pub fn ndim(&self) -> usize {
        self.cdim + self.vdim
    }

    /// Number of basis functions (coefficient-vector length).
    pub fn num_basis(&self) -> usize {
        self.modes.len()
    }

    /// Multi-index of basis function `k`.
    pub fn mode(&self, k: usize) -> &[usize] {
        &self.modes[k]
    }

    /// Largest 1D degree appearing in direction `dir` across all modes.
    pub fn max_degree(&self, dir: usize) -> usize {
        self.modes.iter().map(|m| m[dir]).max().unwrap_or(0)
    }

    /// Evaluate basis function `k` at reference coordinates `xi`.
    pub fn eval_basis(&self, k: usize, xi: &[f64]) -> f64 {
        let m = &self.modes[k];
        let mut val = self.norms[k];
        for (d, &deg) in m.iter().enumerate() {
            val *= legendre(deg, xi[d]);
        }
        val
    }

    /// Evaluate ∂φ_k/∂ξ_dir at reference coordinates `xi`.
    pub fn eval_basis_grad(&self, k: usize, dir: usize, xi: &[f64]) -> f64 {
        let m = &self.modes[k];
        let mut val = self.norms[k];
        for (d, &deg) in m.iter().enumerate() {
            if d == dir {
                val *= legendre_derivative(deg, xi[d]);
            } else {
                val *= legendre(deg, xi[d]);
            }
        }
        val
    }

    /// Evaluate an expansion Σ c_k φ_k at reference coordinates `xi`.
    pub fn eval(&self, coeffs: &[f64], xi: &[f64]) -> f64 {
        (0..self.num_basis())
            .map(|k| coeffs[k] * self.eval_basis(k, xi))
            .sum()
    }

    /// Trace coefficient of basis function `k` on the face ξ_dir = ±1.
    ///
    /// The trace of φ_k factorizes as c · φ' where φ' is the surface basis
    /// function with index `k`'s multi-index stripped of `dir`, and
    /// c = sqrt((2m+1)/2) (±1)^m for normal-direction degree m. Returns c.
    pub fn trace_coeff(&self, k: usize, dir: usize, upper: bool) -> f64 {
        let m = self.modes[k][dir];
        let norm = ((2 * m + 1) as f64 / 2.0).sqrt();
        if upper || m % 2 == 0 {
            norm
        } else {
            -norm
        }
    }

    /// Surface restriction: the same-family basis over all directions
    /// except `dir`. Traces of volume basis functions onto the face
    /// ξ_dir = ±1 live exactly in this space.
    pub fn surface_basis(&self, dir: usize) -> ModalBasis {
        assert!(dir < self.ndim(), "Surface direction out of bounds");
        let (scdim, svdim) = if dir < self.cdim {
            (self.cdim - 1, self.vdim)
        } else {
            (self.cdim, self.vdim - 1)
        };
        ModalBasis::new(scdim, svdim, self.poly_order, self.kind)
    }

    /// Index into the surface basis of the trace of volume mode `k`
    /// across direction `dir`.
    pub fn surface_index(&self, surf: &ModalBasis, k: usize, dir: usize) -> usize {
        let stripped: Vec<usize> = self.modes[k]
            .iter()
            .enumerate()
            .filter(|&(d, _)| d != dir)
            .map(|(_, &deg)| deg)
            .collect();
        surf.modes
            .iter()
            .position(|m| *m == stripped)
            .expect("Trace of a volume mode must exist in the surface basis")
    }
}

/// Enumerate the multi-index set for a family.
fn enumerate_modes(cdim: usize, vdim: usize, poly_order: usize, kind: BasisKind) -> Vec<Vec<usize>> {
    let ndim = cdim + vdim;
    if ndim == 0 {
        return vec![vec![]];
    }

    match kind {
        BasisKind::Tensor => box_modes(ndim, poly_order),
        BasisKind::Serendipity => {
            if poly_order == 1 && vdim > 0 {
                hybrid_modes(cdim, vdim)
            } else {
                serendipity_modes(ndim, poly_order)
            }
        }
    }
}

/// All indices in {0..=p}^ndim.
fn box_modes(ndim: usize, p: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    let mut m = vec![0usize; ndim];
    loop {
        out.push(m.clone());
        // odometer increment, last dimension fastest
        let mut d = ndim;
        loop {
            if d == 0 {
                return out;
            }
            d -= 1;
            if m[d] < p {
                m[d] += 1;
                break;
            }
            m[d] = 0;
        }
    }
}

/// Serendipity: indices in {0..=p}^ndim with superlinear degree <= p.
fn serendipity_modes(ndim: usize, p: usize) -> Vec<Vec<usize>> {
    box_modes(ndim, p)
        .into_iter()
        .filter(|m| {
            let superlinear: usize = m.iter().filter(|&&k| k >= 2).sum();
            superlinear <= p
        })
        .collect()
}

/// p1 hybrid for kinetic bases: {0,1}^ndim plus, for each velocity
/// direction, indices with that direction quadratic and the rest linear.
fn hybrid_modes(cdim: usize, vdim: usize) -> Vec<Vec<usize>> {
    let ndim = cdim + vdim;
    let mut out = box_modes(ndim, 1);
    for v in cdim..ndim {
        for mut m in box_modes(ndim - 1, 1) {
            m.insert(v, 2);
            out.push(m);
        }
    }
    out
}

/// Graded ordering: total degree ascending, then lexicographic descending
/// (so x precedes v at equal degree, matching the conventional layout).
fn sort_graded(modes: &mut [Vec<usize>]) {
    modes.sort_by(|a, b| {
        let da: usize = a.iter().sum();
        let db: usize = b.iter().sum();
        da.cmp(&db).then_with(|| b.cmp(a))
    });
}
