//! Quadrature tables: ordinates, weights, basis values at ordinates, and
//! the nodal→modal projection matrix.
//!
//! The tensor-product Gauss-Legendre rule uses (max degree + 1) points per
//! direction, which integrates products of two basis functions exactly.
//! With an orthonormal basis the projection is then just quadrature
//! against basis values; the Gram matrix solve below removes the residual
//! rounding asymmetry and keeps the construction correct even if a basis
//! family with a non-identity Gram matrix is added later.

use crate::basis::ModalBasis;
use faer::{linalg::solvers::Solve, Mat};

/// Precomputed quadrature table over a modal basis.
///
/// Built once at updater construction; immutable and `Send + Sync`
/// afterwards. A zero-dimensional basis (surface of a 1D volume) gets a
/// single unit-weight node.
#[derive(Clone, Debug)]
pub struct QuadTable {
    /// Ordinates, node-major; each entry has `basis.ndim()` coordinates.
    ords: Vec<Vec<f64>>,
    /// Quadrature weights, one per node.
    weights: Vec<f64>,
    /// Basis values at ordinates, node-major rows of length `num_basis`.
    basis_at_ords: Vec<Vec<f64>>,
    /// Projection matrix, basis-major rows of length `num_nodes`:
    /// modal[k] = Σ_q proj[k][q] * nodal[q].
    modal_proj: Vec<Vec<f64>>,
}

impl QuadTable {
    /// Build the table for a basis, with (max degree + 1) Gauss-Legendre
    /// points per direction.
    pub fn new(basis: &ModalBasis) -> Self {
        let ndim = basis.ndim();
        let nb = basis.num_basis();

        // Per-direction 1D rules
        let mut nodes_1d = Vec::with_capacity(ndim);
        let mut weights_1d = Vec::with_capacity(ndim);
        for d in 0..ndim {
            let nq = basis.max_degree(d) + 1;
            let nd = crate::polynomial::gauss_legendre_nodes(nq);
            let wd = crate::polynomial::gauss_legendre_weights(nq, &nd);
            nodes_1d.push(nd);
            weights_1d.push(wd);
        }

        // Tensor product, last dimension fastest
        let mut ords = vec![vec![]];
        let mut weights = vec![1.0];
        for d in 0..ndim {
            let mut next_ords = Vec::with_capacity(ords.len() * nodes_1d[d].len());
            let mut next_weights = Vec::with_capacity(weights.len() * nodes_1d[d].len());
            for (ord, &w) in ords.iter().zip(weights.iter()) {
                for (i, &x) in nodes_1d[d].iter().enumerate() {
                    let mut o = ord.clone();
                    o.push(x);
                    next_ords.push(o);
                    next_weights.push(w * weights_1d[d][i]);
                }
            }
            ords = next_ords;
            weights = next_weights;
        }

        let num_nodes = ords.len();
        let basis_at_ords: Vec<Vec<f64>> = ords
            .iter()
            .map(|xi| (0..nb).map(|k| basis.eval_basis(k, xi)).collect())
            .collect();

        // Gram-solved projection: solve (Bᵀ W B) X = Bᵀ W
        let mut gram = Mat::<f64>::zeros(nb, nb);
        let mut rhs = Mat::<f64>::zeros(nb, num_nodes);
        for q in 0..num_nodes {
            let row = &basis_at_ords[q];
            for a in 0..nb {
                rhs[(a, q)] = weights[q] * row[a];
                for b in 0..nb {
                    gram[(a, b)] += weights[q] * row[a] * row[b];
                }
            }
        }

        let lu = gram.as_ref().full_piv_lu();
        let solved = lu.solve(&rhs);

        let modal_proj: Vec<Vec<f64>> = (0..nb)
            .map(|k| (0..num_nodes).map(|q| solved[(k, q)]).collect())
            .collect();

        Self {
            ords,
            weights,
            basis_at_ords,
            modal_proj,
        }
    }

    /// Number of quadrature nodes.
    pub fn num_nodes(&self) -> usize {
        self.ords.len()
    }

    /// Coordinates of node `q`.
    pub fn ordinate(&self, q: usize) -> &[f64] {
        &self.ords[q]
    }

    /// Weight of node `q`.
    pub fn weight(&self, q: usize) -> f64 {
        self.weights[q]
    }

    /// Basis values at node `q` (length `num_basis`).
    pub fn basis_at(&self, q: usize) -> &[f64] {
        &self.basis_at_ords[q]
    }

    /// Evaluate an expansion at every node.
    pub fn eval_at_nodes(&self, coeffs: &[f64], out: &mut [f64]) {
        for (q, row) in self.basis_at_ords.iter().enumerate() {
            out[q] = row.iter().zip(coeffs.iter()).map(|(b, c)| b * c).sum();
        }
    }

    /// Project nodal values back onto the modal basis.
    pub fn project(&self, nodal: &[f64], modal: &mut [f64]) {
        for (k, row) in self.modal_proj.iter().enumerate() {
            modal[k] = row.iter().zip(nodal.iter()).map(|(p, v)| p * v).sum();
        }
    }
}
