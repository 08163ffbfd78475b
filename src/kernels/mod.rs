//! Numerical kernels: the per-cell computational bodies applied by the
//! updaters in [`crate::updater`].
//!
//! - [`quadrature`]: precomputed ordinate/weight/basis-at-ordinate tables
//!   and the nodal→modal projection
//! - [`surface`]: the upwinded surface-flux kernel (the core of the crate)
//! - [`moment`]: velocity-space moment kernels
//! - [`bcorr`]: boundary-integral moment corrections at velocity edges
//! - [`proj`]: bi-Maxwellian projection from primitive moments
//!
//! Kernels are pure functions over caller-owned buffers: they allocate
//! nothing, hold no mutable state, and are freely shared across threads.

pub mod bcorr;
pub mod moment;
pub mod proj;
pub mod quadrature;
pub mod surface;

pub use bcorr::{BcorrKernel, VelEdge};
pub use moment::{MomentKernel, MomentKind};
pub use proj::BiMaxwellianKernel;
pub use quadrature::QuadTable;
pub use surface::{Edge, SurfaceKernel};
