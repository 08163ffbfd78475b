//! Conservation, upwinding, and scaling properties of the surface-update
//! machinery.

use kinetic_dg::{
    dispatch, AlphaUpdater, BasisDesc, BasisKind, Edge, Field, ModalBasis, QuadTable, RectGrid,
    SurfaceUpdater,
};

fn desc_1x1v() -> BasisDesc {
    BasisDesc::new(1, 1, 1, BasisKind::Serendipity).unwrap()
}

/// Surface expansion of a constant alpha for a kernel's face.
fn const_alpha(num_surf: usize, ndim_surf: usize, val: f64) -> Vec<f64> {
    let mut alpha = vec![0.0; num_surf];
    alpha[0] = val * 2.0_f64.powi(ndim_surf as i32).sqrt();
    alpha
}

#[test]
fn test_shared_face_flux_telescopes() {
    // The two kernel calls on either side of a face read the same alpha
    // and the same pair of cell expansions, so their cell-average
    // contributions must be equal and opposite.
    let kernel = dispatch::surf_kernel(&desc_1x1v(), 0);
    let nb = 6;

    let mut alpha = vec![0.0; kernel.num_surf_basis()];
    alpha[0] = 1.1;
    alpha[1] = -0.6;
    alpha[2] = 0.2; // sign varies across the face

    let f_lo: Vec<f64> = (0..nb).map(|k| 0.9 - 0.07 * k as f64).collect();
    let f_up: Vec<f64> = (0..nb).map(|k| 0.2 + 0.11 * k as f64).collect();
    let dxv = [0.4, 1.3];

    let mut out_lo = vec![0.0; nb];
    let mut out_up = vec![0.0; nb];
    kernel.boundary_surf(&dxv, &alpha, &f_lo, &f_up, Edge::Lower, &mut out_lo);
    kernel.boundary_surf(&dxv, &alpha, &f_up, &f_lo, Edge::Upper, &mut out_up);

    assert!(
        (out_lo[0] + out_up[0]).abs() < 1e-13,
        "flux leaving the lower cell must enter the upper cell: {} vs {}",
        out_lo[0],
        out_up[0]
    );
}

#[test]
fn test_upwind_consistency_with_garbage_downwind() {
    // Strictly positive alpha: only the skin side is read, so NaN in the
    // downwind cell must not affect the result.
    let kernel = dispatch::surf_kernel(&desc_1x1v(), 1);
    let nb = 6;

    let alpha = const_alpha(kernel.num_surf_basis(), 1, 2.5);
    let f_skin: Vec<f64> = (0..nb).map(|k| 1.0 - 0.1 * k as f64).collect();
    let dxv = [1.0, 0.8];

    let mut reference = vec![0.0; nb];
    kernel.boundary_surf(&dxv, &alpha, &f_skin, &vec![0.0; nb], Edge::Lower, &mut reference);

    let mut polluted = vec![0.0; nb];
    kernel.boundary_surf(
        &dxv,
        &alpha,
        &f_skin,
        &vec![f64::NAN; nb],
        Edge::Lower,
        &mut polluted,
    );

    for k in 0..nb {
        assert!(polluted[k].is_finite());
        assert!((reference[k] - polluted[k]).abs() < 1e-14, "mode {}", k);
    }
}

#[test]
fn test_zero_inputs_zero_output() {
    let kernel = dispatch::surf_kernel(&desc_1x1v(), 0);
    let nb = 6;
    let ns = kernel.num_surf_basis();

    let mut out = vec![0.0; nb];
    kernel.surf(
        &[1.0, 1.0],
        &vec![0.0; ns],
        &vec![0.0; ns],
        &vec![0.0; nb],
        &vec![0.0; nb],
        &vec![0.0; nb],
        &mut out,
    );
    assert!(out.iter().all(|&v| v == 0.0));
}

#[test]
fn test_output_scales_inversely_with_width() {
    let kernel = dispatch::surf_kernel(&desc_1x1v(), 0);
    let nb = 6;

    let alpha = const_alpha(kernel.num_surf_basis(), 1, -0.7);
    let f_skin: Vec<f64> = (0..nb).map(|k| 0.5 + 0.08 * k as f64).collect();
    let f_edge: Vec<f64> = (0..nb).map(|k| 0.04 * k as f64).collect();

    let mut out = vec![0.0; nb];
    let mut out_double = vec![0.0; nb];
    kernel.boundary_surf(&[0.5, 1.0], &alpha, &f_skin, &f_edge, Edge::Upper, &mut out);
    kernel.boundary_surf(&[1.0, 1.0], &alpha, &f_skin, &f_edge, Edge::Upper, &mut out_double);

    for k in 0..nb {
        assert!(
            (out[k] - 2.0 * out_double[k]).abs() < 1e-13,
            "mode {}: {} vs {}",
            k,
            out[k],
            out_double[k]
        );
    }
}

#[test]
fn test_advection_moves_downstream() {
    // A pulse in one x-cell with positive advection speed loses mass to
    // its upper neighbor only.
    let grid = RectGrid::new(&[0.0, -1.0], &[1.0, 1.0], &[4, 1]).unwrap();
    let desc = desc_1x1v();
    let updater = SurfaceUpdater::new(&grid, &desc, &[0]).unwrap();
    let range = grid.cell_range();

    let mut fin = Field::new(range, 6).unwrap();
    fin.cell_mut(&[1, 0])[0] = 2.0;

    let kernel = &updater.kernels()[0];
    let mut alpha = Field::new(range, kernel.num_surf_basis()).unwrap();
    for idx in range.iter() {
        alpha.cell_mut(&idx)[0] = 1.0 * 2.0_f64.sqrt();
    }

    let mut rhs = Field::new(range, 6).unwrap();
    updater.advance(&[alpha], &fin, &mut rhs);

    assert!(rhs.cell(&[1, 0])[0] < -1e-10, "source cell must drain");
    assert!(rhs.cell(&[2, 0])[0] > 1e-10, "downstream cell must fill");
    assert!(rhs.cell(&[0, 0])[0].abs() < 1e-13, "upstream cell untouched");
    assert!(rhs.cell(&[3, 0])[0].abs() < 1e-13, "far cell untouched");

    // exact balance between the pair
    assert!((rhs.cell(&[1, 0])[0] + rhs.cell(&[2, 0])[0]).abs() < 1e-13);
}

#[test]
fn test_free_streaming_pipeline_conserves_mass() {
    // Full pipeline: Hamiltonian → AlphaUpdater → SurfaceUpdater. With
    // zero flux through the domain edges, the summed cell-average tendency
    // vanishes.
    let grid = RectGrid::new(&[0.0, -2.0], &[1.0, 2.0], &[4, 4]).unwrap();
    let desc = desc_1x1v();
    let basis = ModalBasis::from_desc(&desc);
    let range = grid.cell_range();

    let alpha_updater = AlphaUpdater::new(&grid, &desc).unwrap();
    let surf_updater = SurfaceUpdater::new(&grid, &desc, &[0, 1]).unwrap();

    // H = v^2/2 per cell, projected exactly
    let quad = QuadTable::new(&basis);
    let mut hamil = Field::new(range, basis.num_basis()).unwrap();
    let mut xc = [0.0; 2];
    let mut nodal = vec![0.0; quad.num_nodes()];
    for idx in range.iter() {
        grid.cell_center(&idx, &mut xc);
        for q in 0..quad.num_nodes() {
            let v = xc[1] + 0.5 * grid.dx(1) * quad.ordinate(q)[1];
            nodal[q] = 0.5 * v * v;
        }
        quad.project(&nodal, hamil.cell_mut(&idx));
    }

    let mut alpha: Vec<Field> = alpha_updater
        .kernels()
        .iter()
        .map(|k| Field::new(range, k.num_surf_basis()).unwrap())
        .collect();
    let mut sgn: Vec<Field> = alpha_updater
        .kernels()
        .iter()
        .map(|k| Field::new(range, k.num_quad()).unwrap())
        .collect();
    let mut cs: Vec<Field> = alpha_updater
        .kernels()
        .iter()
        .map(|_| Field::new(range, 1).unwrap())
        .collect();
    alpha_updater.advance(&range, &hamil, &mut alpha, &mut sgn, &mut cs);

    // an uneven but smooth-ish distribution
    let mut fin = Field::new(range, basis.num_basis()).unwrap();
    for (i, idx) in range.iter().enumerate() {
        fin.cell_mut(&idx)[0] = 1.0 + 0.3 * (0.7 * i as f64).sin();
        fin.cell_mut(&idx)[1] = 0.05 * (1.1 * i as f64).cos();
    }

    let mut rhs = Field::new(range, basis.num_basis()).unwrap();
    surf_updater.advance(&alpha, &fin, &mut rhs);

    let total: f64 = range.iter().map(|idx| rhs.cell(&idx)[0]).sum();
    assert!(total.abs() < 1e-12, "net mass tendency {}", total);
}
