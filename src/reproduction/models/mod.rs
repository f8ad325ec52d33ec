//! reproduction::models — orchestration across regions and publication.
//!
//! - [`dynamic_r`]: runs the per-region pipeline for a whole case table and
//!   assembles the immutable [`DynamicRResult`].
//! - [`store`]: versioned snapshot store with atomic publish and the
//!   [`CaseFeed`] seam for external data acquisition.

pub mod dynamic_r;
pub mod store;

pub use self::dynamic_r::{DynamicRResult, RegionRCurve, compute_dynamic_r, compute_region};
pub use self::store::{CaseFeed, DynamicRSnapshot, DynamicRStore};
