//! Surface-update sweep: applies the upwinded surface kernel over a grid
//! range, direction by direction.

use crate::basis::{BasisDesc, ModalBasis};
use crate::dispatch;
use crate::error::GkError;
use crate::field::Field;
use crate::grid::{RectGrid, MAX_DIM};
use crate::kernels::{Edge, SurfaceKernel};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Applies surface-flux updates for a set of directions.
///
/// Kernels are selected once at construction; `advance` walks the grid's
/// cell range, gathers the neighbor expansions for each face, and
/// accumulates the divergence contribution into the right-hand side.
pub struct SurfaceUpdater {
    grid: RectGrid,
    update_dirs: Vec<usize>,
    kernels: Vec<SurfaceKernel>,
    num_basis: usize,
}

impl SurfaceUpdater {
    /// Create an updater for `update_dirs` of a basis on `grid`.
    ///
    /// Returns an error for malformed direction lists; an unsupported
    /// basis descriptor panics in kernel selection (see
    /// [`crate::dispatch`]).
    pub fn new(grid: &RectGrid, desc: &BasisDesc, update_dirs: &[usize]) -> Result<Self, GkError> {
        if grid.ndim() != desc.ndim() {
            return Err(GkError::dimension_mismatch(
                format!("grid ndim {}", desc.ndim()),
                format!("{}", grid.ndim()),
            ));
        }
        if update_dirs.is_empty() {
            return Err(GkError::InvalidShape(
                "need at least one update direction".into(),
            ));
        }
        for (i, &d) in update_dirs.iter().enumerate() {
            if d >= desc.ndim() {
                return Err(GkError::InvalidShape(format!(
                    "update direction {} out of bounds for ndim {}",
                    d,
                    desc.ndim()
                )));
            }
            if update_dirs[..i].contains(&d) {
                return Err(GkError::InvalidShape(format!(
                    "duplicate update direction {}",
                    d
                )));
            }
        }

        let kernels = update_dirs
            .iter()
            .map(|&d| dispatch::surf_kernel(desc, d))
            .collect();
        let num_basis = ModalBasis::from_desc(desc).num_basis();

        Ok(Self {
            grid: grid.clone(),
            update_dirs: update_dirs.to_vec(),
            kernels,
            num_basis,
        })
    }

    /// Coefficient-vector length per cell.
    pub fn num_basis(&self) -> usize {
        self.num_basis
    }

    /// The per-direction kernels, parallel to the construction-time
    /// direction list.
    pub fn kernels(&self) -> &[SurfaceKernel] {
        &self.kernels
    }

    /// Accumulate all directions' surface contributions into `rhs`.
    ///
    /// `alpha_surf` holds one field per update direction, each storing the
    /// lower-face surface expansion of the phase velocity per cell (cell
    /// `i + e_d` holds the expansion of cell `i`'s upper face). `fin` and
    /// `rhs` are phase expansions over ranges containing the grid's cell
    /// range. Contributions are additive; the caller zeroes `rhs` before
    /// the first sweep. Returns the largest advisory value any kernel
    /// reported.
    pub fn advance(&self, alpha_surf: &[Field], fin: &Field, rhs: &mut Field) -> f64 {
        self.check_shapes(alpha_surf, fin, rhs);

        let range = self.grid.cell_range();
        let dxv = self.grid.dx_all();
        let mut omega = 0.0_f64;

        for idx in range.iter() {
            let out = rhs.cell_mut(&idx);
            for (pos, kernel) in self.kernels.iter().enumerate() {
                omega = omega.max(cell_update(
                    kernel,
                    self.update_dirs[pos],
                    &range,
                    dxv,
                    &alpha_surf[pos],
                    fin,
                    &idx,
                    out,
                ));
            }
        }
        omega
    }

    /// Parallel variant of [`SurfaceUpdater::advance`]: per-cell
    /// contributions are computed independently and merged afterwards.
    #[cfg(feature = "parallel")]
    pub fn advance_parallel(&self, alpha_surf: &[Field], fin: &Field, rhs: &mut Field) -> f64 {
        self.check_shapes(alpha_surf, fin, rhs);

        let range = self.grid.cell_range();
        let dxv = self.grid.dx_all();
        let nb = self.num_basis;

        let contributions: Vec<f64> = (0..range.volume())
            .into_par_iter()
            .flat_map_iter(|lin| {
                let mut idx = [0i32; MAX_DIM];
                range.index_from_linear(lin, &mut idx);

                let mut out = vec![0.0; nb];
                for (pos, kernel) in self.kernels.iter().enumerate() {
                    cell_update(
                        kernel,
                        self.update_dirs[pos],
                        &range,
                        dxv,
                        &alpha_surf[pos],
                        fin,
                        &idx,
                        &mut out,
                    );
                }
                out
            })
            .collect();

        for (lin, idx) in range.iter().enumerate() {
            let dst = rhs.cell_mut(&idx);
            let src = &contributions[lin * nb..(lin + 1) * nb];
            for (a, b) in dst.iter_mut().zip(src.iter()) {
                *a += *b;
            }
        }
        0.0
    }

    fn check_shapes(&self, alpha_surf: &[Field], fin: &Field, rhs: &mut Field) {
        assert_eq!(
            alpha_surf.len(),
            self.update_dirs.len(),
            "one alpha field per update direction"
        );
        assert_eq!(fin.num_comp(), self.num_basis, "fin coefficient length");
        assert_eq!(rhs.num_comp(), self.num_basis, "rhs coefficient length");
        for (pos, kernel) in self.kernels.iter().enumerate() {
            assert_eq!(
                alpha_surf[pos].num_comp(),
                kernel.num_surf_basis(),
                "alpha field {} surface length",
                pos
            );
        }
        let range = self.grid.cell_range();
        assert!(fin.range().contains_range(&range));
        assert!(rhs.range().contains_range(&range));
    }
}

/// One cell's contribution for one direction. Skin cells at a domain edge
/// get a boundary update on their interior face only; interior cells get
/// both faces.
#[allow(clippy::too_many_arguments)]
fn cell_update(
    kernel: &SurfaceKernel,
    dir: usize,
    range: &crate::grid::Range,
    dxv: &[f64],
    alpha: &Field,
    fin: &Field,
    idx: &[i32; MAX_DIM],
    out: &mut [f64],
) -> f64 {
    let at_lower = idx[dir] == range.lower(dir);
    let at_upper = idx[dir] == range.upper(dir);
    if at_lower && at_upper {
        // single cell in this direction: both faces are domain boundaries
        return 0.0;
    }

    let mut idx_lo = *idx;
    idx_lo[dir] -= 1;
    let mut idx_up = *idx;
    idx_up[dir] += 1;

    if at_lower {
        kernel.boundary_surf(
            dxv,
            alpha.cell(&idx_up),
            fin.cell(idx),
            fin.cell(&idx_up),
            Edge::Lower,
            out,
        )
    } else if at_upper {
        kernel.boundary_surf(
            dxv,
            alpha.cell(idx),
            fin.cell(idx),
            fin.cell(&idx_lo),
            Edge::Upper,
            out,
        )
    } else {
        kernel.surf(
            dxv,
            alpha.cell(idx),
            alpha.cell(&idx_up),
            fin.cell(&idx_lo),
            fin.cell(idx),
            fin.cell(&idx_up),
            out,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::BasisKind;

    fn setup_1x1v() -> (RectGrid, BasisDesc, SurfaceUpdater) {
        let grid = RectGrid::new(&[0.0, -2.0], &[1.0, 2.0], &[4, 4]).unwrap();
        let desc = BasisDesc::new(1, 1, 1, BasisKind::Serendipity).unwrap();
        let updater = SurfaceUpdater::new(&grid, &desc, &[0]).unwrap();
        (grid, desc, updater)
    }

    /// alpha fields (lower-edge storage) for a velocity-independent
    /// constant advection speed in direction 0.
    fn const_alpha_fields(grid: &RectGrid, updater: &SurfaceUpdater, speed: f64) -> Vec<Field> {
        updater
            .kernels()
            .iter()
            .map(|k| {
                let mut f = Field::new(grid.cell_range(), k.num_surf_basis()).unwrap();
                for idx in grid.cell_range().iter() {
                    // constant over the face: only the flat mode
                    f.cell_mut(&idx)[0] = speed * 2.0_f64.sqrt();
                }
                f
            })
            .collect()
    }

    #[test]
    fn test_total_mass_is_conserved() {
        // Fluxes telescope across interior faces and the domain edges get
        // none, so the sum of cell-average updates is zero.
        let (grid, _, updater) = setup_1x1v();
        let range = grid.cell_range();
        let nb = updater.num_basis();

        let mut fin = Field::new(range, nb).unwrap();
        for (i, idx) in range.iter().enumerate() {
            for k in 0..nb {
                fin.cell_mut(&idx)[k] = 0.3 + 0.1 * ((i + k) % 5) as f64;
            }
        }
        let alpha = const_alpha_fields(&grid, &updater, 1.2);

        let mut rhs = Field::new(range, nb).unwrap();
        updater.advance(&alpha, &fin, &mut rhs);

        let dx0 = grid.dx(0);
        let total: f64 = range.iter().map(|idx| rhs.cell(&idx)[0] * dx0).sum();
        assert!(total.abs() < 1e-12, "net mass change {}", total);
    }

    #[test]
    fn test_uniform_state_no_average_tendency() {
        // Uniform f with uniform alpha: every face carries the same flux,
        // so each interior cell's average (mode 0) update cancels between
        // its two faces.
        let (grid, _, updater) = setup_1x1v();
        let range = grid.cell_range();
        let nb = updater.num_basis();

        let mut fin = Field::new(range, nb).unwrap();
        for idx in range.iter() {
            fin.cell_mut(&idx)[0] = 1.7;
        }
        let alpha = const_alpha_fields(&grid, &updater, -0.8);

        let mut rhs = Field::new(range, nb).unwrap();
        updater.advance(&alpha, &fin, &mut rhs);

        for i in 1..3 {
            for j in 0..4 {
                assert!(rhs.cell(&[i, j])[0].abs() < 1e-13, "cell ({}, {})", i, j);
            }
        }
    }

    #[test]
    fn test_rejects_bad_directions() {
        let grid = RectGrid::new(&[0.0, -2.0], &[1.0, 2.0], &[4, 4]).unwrap();
        let desc = BasisDesc::new(1, 1, 1, BasisKind::Serendipity).unwrap();

        assert!(SurfaceUpdater::new(&grid, &desc, &[]).is_err());
        assert!(SurfaceUpdater::new(&grid, &desc, &[2]).is_err());
        assert!(SurfaceUpdater::new(&grid, &desc, &[0, 0]).is_err());
    }

    #[test]
    fn test_grid_basis_dimension_mismatch() {
        let grid = RectGrid::new(&[0.0], &[1.0], &[4]).unwrap();
        let desc = BasisDesc::new(1, 1, 1, BasisKind::Serendipity).unwrap();
        assert!(SurfaceUpdater::new(&grid, &desc, &[0]).is_err());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_serial() {
        let (grid, _, updater) = setup_1x1v();
        let range = grid.cell_range();
        let nb = updater.num_basis();

        let mut fin = Field::new(range, nb).unwrap();
        for (i, idx) in range.iter().enumerate() {
            for k in 0..nb {
                fin.cell_mut(&idx)[k] = (0.17 * (i * nb + k) as f64).sin();
            }
        }
        let alpha = const_alpha_fields(&grid, &updater, 0.9);

        let mut serial = Field::new(range, nb).unwrap();
        let mut parallel = Field::new(range, nb).unwrap();
        updater.advance(&alpha, &fin, &mut serial);
        updater.advance_parallel(&alpha, &fin, &mut parallel);

        for idx in range.iter() {
            for k in 0..nb {
                assert!((serial.cell(&idx)[k] - parallel.cell(&idx)[k]).abs() < 1e-14);
            }
        }
    }
}
