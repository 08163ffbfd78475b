//! Closed-enumeration dispatch behavior.

use kinetic_dg::{dispatch, BasisDesc, BasisKind, ModalBasis};

#[test]
fn test_supported_table_has_no_holes() {
    for &(cdim, vdim) in &dispatch::SUPPORTED_DIMS {
        for poly_order in [1, 2] {
            let desc = BasisDesc::new(cdim, vdim, poly_order, BasisKind::Serendipity).unwrap();
            assert!(dispatch::is_supported(&desc));

            let kernels = dispatch::surf_kernels(&desc);
            assert_eq!(kernels.len(), cdim + vdim);
            for kernel in &kernels {
                assert!(kernel.num_surf_basis() >= 1);
                assert!(kernel.num_quad() >= 1);
            }
        }
    }
}

#[test]
fn test_3x3v_p1_sizes() {
    // The hybrid 3x3v p1 basis: 160 volume modes; a velocity-direction
    // face has 64 surface modes and 72 quadrature nodes.
    let desc = BasisDesc::new(3, 3, 1, BasisKind::Serendipity).unwrap();
    assert_eq!(ModalBasis::from_desc(&desc).num_basis(), 160);

    let kernel = dispatch::surf_kernel(&desc, 5);
    assert_eq!(kernel.num_surf_basis(), 64);
    assert_eq!(kernel.num_quad(), 72);
}

#[test]
#[should_panic(expected = "no kernels")]
fn test_unsupported_dimension_pair_aborts() {
    let desc = BasisDesc::new(3, 2, 1, BasisKind::Serendipity).unwrap();
    dispatch::surf_kernels(&desc);
}

#[test]
#[should_panic(expected = "no kernels")]
fn test_unsupported_poly_order_aborts() {
    let desc = BasisDesc::new(2, 2, 3, BasisKind::Serendipity).unwrap();
    dispatch::surf_kernels(&desc);
}

#[test]
#[should_panic(expected = "tensor-basis kernels are not available")]
fn test_tensor_family_is_a_placeholder() {
    let desc = BasisDesc::new(2, 2, 1, BasisKind::Tensor).unwrap();
    dispatch::surf_kernels(&desc);
}

#[test]
fn test_is_supported_never_panics() {
    for cdim in 0..=4 {
        for vdim in 0..=4 {
            for poly_order in 1..=3 {
                for kind in [BasisKind::Serendipity, BasisKind::Tensor] {
                    if let Ok(desc) = BasisDesc::new(cdim, vdim, poly_order, kind) {
                        // answer is irrelevant here; the query must not abort
                        let _ = dispatch::is_supported(&desc);
                    }
                }
            }
        }
    }
}
