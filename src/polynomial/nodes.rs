//! Gauss-Legendre nodes and weights.
//!
//! The n-point Gauss-Legendre rule uses the roots of P_n(x) and is exact
//! for polynomials of degree up to 2n-1. Surface upwinding evaluates the
//! flux velocity at interior tensor-product nodes, so the open (Gauss)
//! rule is the right one here: no node ever sits on a cell corner, and the
//! sign test is well defined at every node.

use super::legendre::{legendre_and_derivative, legendre_derivative};
use std::f64::consts::PI;

/// Compute the n-point Gauss-Legendre nodes on [-1, 1].
///
/// Uses Newton iteration on P_n(x) starting from Chebyshev guesses
/// x_j = -cos(π (j + 3/4) / (n + 1/2)).
pub fn gauss_legendre_nodes(n: usize) -> Vec<f64> {
    assert!(n >= 1, "Need at least one quadrature node");

    if n == 1 {
        return vec![0.0];
    }

    let mut nodes = Vec::with_capacity(n);

    for j in 0..n {
        // Chebyshev-based initial guess for the j-th root of P_n
        let mut x = -(PI * (j as f64 + 0.75) / (n as f64 + 0.5)).cos();

        for _ in 0..100 {
            let (p, dp) = legendre_and_derivative(n, x);
            let update = p / dp;

            x -= update;

            if update.abs() < 1e-15 {
                break;
            }
        }

        nodes.push(x);
    }

    // Enforce exact symmetry: average mirrored pairs
    for j in 0..n / 2 {
        let avg = 0.5 * (nodes[j] - nodes[n - 1 - j]);
        nodes[j] = avg;
        nodes[n - 1 - j] = -avg;
    }
    if n % 2 == 1 {
        nodes[n / 2] = 0.0;
    }

    nodes
}

/// Compute the Gauss-Legendre weights for the given nodes.
///
/// w_j = 2 / ((1 - x_j^2) [P'_n(x_j)]^2)
pub fn gauss_legendre_weights(n: usize, nodes: &[f64]) -> Vec<f64> {
    assert_eq!(nodes.len(), n, "Need n nodes for the n-point rule");

    nodes
        .iter()
        .map(|&x| {
            let dp = legendre_derivative(n, x);
            2.0 / ((1.0 - x * x) * dp * dp)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::legendre;

    #[test]
    fn test_nodes_count_and_interior() {
        for n in 1..=6 {
            let nodes = gauss_legendre_nodes(n);
            assert_eq!(nodes.len(), n);
            for &x in &nodes {
                assert!(x > -1.0 && x < 1.0, "Gauss nodes are interior");
            }
        }
    }

    #[test]
    fn test_nodes_are_roots() {
        for n in 1..=6 {
            let nodes = gauss_legendre_nodes(n);
            for &x in &nodes {
                assert!(
                    legendre(n, x).abs() < 1e-13,
                    "Node {} should be a root of P_{}",
                    x,
                    n
                );
            }
        }
    }

    #[test]
    fn test_nodes_symmetry() {
        for n in 1..=6 {
            let nodes = gauss_legendre_nodes(n);
            for j in 0..n / 2 {
                assert!((nodes[j] + nodes[n - 1 - j]).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn test_weights_sum() {
        // Weights sum to the interval length 2
        for n in 1..=6 {
            let nodes = gauss_legendre_nodes(n);
            let weights = gauss_legendre_weights(n, &nodes);
            let sum: f64 = weights.iter().sum();
            assert!((sum - 2.0).abs() < 1e-13, "Got {}", sum);
        }
    }

    #[test]
    fn test_known_two_point_rule() {
        // n = 2: nodes ±1/sqrt(3), weights 1
        let nodes = gauss_legendre_nodes(2);
        let weights = gauss_legendre_weights(2, &nodes);
        let r = 1.0 / 3.0_f64.sqrt();
        assert!((nodes[0] + r).abs() < 1e-14);
        assert!((nodes[1] - r).abs() < 1e-14);
        assert!((weights[0] - 1.0).abs() < 1e-14);
        assert!((weights[1] - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_quadrature_exactness() {
        // n points integrate monomials up to degree 2n-1 exactly
        for n in 1..=5 {
            let nodes = gauss_legendre_nodes(n);
            let weights = gauss_legendre_weights(n, &nodes);

            for k in 0..=(2 * n - 1) {
                let exact = if k % 2 == 0 { 2.0 / (k + 1) as f64 } else { 0.0 };
                let numerical: f64 = nodes
                    .iter()
                    .zip(weights.iter())
                    .map(|(&x, &w)| w * x.powi(k as i32))
                    .sum();
                assert!(
                    (numerical - exact).abs() < 1e-13,
                    "n={}, degree {}: expected {}, got {}",
                    n,
                    k,
                    exact,
                    numerical
                );
            }
        }
    }
}
