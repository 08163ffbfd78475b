//! Kernel selection.
//!
//! The kernel set is a closed enumeration over (cdim, vdim, poly_order,
//! basis family), mirroring the dispatch tables of generated-kernel DG
//! codes: every supported combination routes to a concrete kernel, and
//! everything else fails fast at selection time. Selection happens once,
//! at updater construction; callers hold the selected kernels by value
//! and the hot path never consults these tables.
//!
//! Unsupported combinations panic rather than return an error: a missing
//! kernel is a build-configuration mistake, not a runtime condition to
//! recover from, and silently substituting a different kernel would
//! corrupt results.

use crate::basis::{BasisDesc, BasisKind, ModalBasis};
use crate::kernels::{BcorrKernel, BiMaxwellianKernel, MomentKernel, MomentKind, SurfaceKernel};

/// Supported (cdim, vdim) pairs: pure configuration space for fluid
/// equations plus the kinetic phase-space layouts.
pub const SUPPORTED_DIMS: [(usize, usize); 9] = [
    (1, 0),
    (2, 0),
    (3, 0),
    (1, 1),
    (1, 2),
    (1, 3),
    (2, 2),
    (2, 3),
    (3, 3),
];

/// Whether a descriptor has kernels, without panicking.
pub fn is_supported(desc: &BasisDesc) -> bool {
    matches!(desc.kind, BasisKind::Serendipity)
        && (1..=2).contains(&desc.poly_order)
        && SUPPORTED_DIMS.contains(&(desc.cdim, desc.vdim))
}

/// Select the modal basis backing a descriptor's kernels.
///
/// Panics on any combination outside the supported enumeration.
fn phase_basis(desc: &BasisDesc) -> ModalBasis {
    if desc.kind == BasisKind::Tensor {
        // declared but not generated
        panic!(
            "tensor-basis kernels are not available ({}x{}v poly order {})",
            desc.cdim, desc.vdim, desc.poly_order
        );
    }
    match (desc.cdim, desc.vdim, desc.poly_order) {
        (1, 0, 1 | 2)
        | (2, 0, 1 | 2)
        | (3, 0, 1 | 2)
        | (1, 1, 1 | 2)
        | (1, 2, 1 | 2)
        | (1, 3, 1 | 2)
        | (2, 2, 1 | 2)
        | (2, 3, 1 | 2)
        | (3, 3, 1 | 2) => ModalBasis::from_desc(desc),
        _ => panic!(
            "no kernels for {}x{}v poly order {}",
            desc.cdim, desc.vdim, desc.poly_order
        ),
    }
}

/// Surface kernels for every direction of a basis, in direction order.
pub fn surf_kernels(desc: &BasisDesc) -> Vec<SurfaceKernel> {
    let basis = phase_basis(desc);
    (0..basis.ndim())
        .map(|dir| SurfaceKernel::new(&basis, dir))
        .collect()
}

/// Surface kernel for one direction.
pub fn surf_kernel(desc: &BasisDesc, dir: usize) -> SurfaceKernel {
    let basis = phase_basis(desc);
    assert!(dir < basis.ndim(), "direction {} out of bounds", dir);
    SurfaceKernel::new(&basis, dir)
}

/// Moment kernel for a kinetic basis.
pub fn moment_kernel(desc: &BasisDesc, kind: MomentKind) -> MomentKernel {
    assert!(desc.vdim >= 1, "moments need a velocity subspace");
    MomentKernel::new(&phase_basis(desc), kind)
}

/// Bi-Maxwellian projection kernel for a kinetic basis.
pub fn proj_kernel(desc: &BasisDesc) -> BiMaxwellianKernel {
    assert!(desc.vdim >= 1, "projection needs a velocity subspace");
    BiMaxwellianKernel::new(&phase_basis(desc))
}

/// Boundary-correction kernels for every velocity direction.
pub fn bcorr_kernels(desc: &BasisDesc) -> Vec<BcorrKernel> {
    assert!(desc.vdim >= 1, "corrections need a velocity subspace");
    let basis = phase_basis(desc);
    (0..basis.vdim)
        .map(|vdir| BcorrKernel::new(&basis, vdir))
        .collect()
}
