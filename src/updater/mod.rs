//! Stateful updaters: each owns a kernel set selected at construction plus
//! grid metadata, and exposes an "apply across a range" entry point that
//! gathers per-cell buffers and delegates to the kernels.
//!
//! Updaters validate configuration once, in `new`; the sweep itself
//! trusts its inputs (sizes are fixed by the basis descriptor) and does
//! per-cell work without allocation beyond a few reused scratch buffers.

pub mod alpha;
pub mod bcorr;
pub mod moments;
pub mod proj;
pub mod surf;

pub use alpha::AlphaUpdater;
pub use bcorr::BoundaryMomentUpdater;
pub use moments::MomentUpdater;
pub use proj::BiMaxwellianProjection;
pub use surf::SurfaceUpdater;
