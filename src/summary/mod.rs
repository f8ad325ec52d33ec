//! summary — simple post-estimation summaries of smoothed Rt curves.
//!
//! Purpose
//! -------
//! Offer the windowed mean / standard-error summaries consumed by rendering
//! layers, without any confidence-interval modelling beyond that.
//!
//! Key behaviors
//! -------------
//! - [`WindowStats`]: mean, SEM, and count of a set of windowed Rt values.
//! - [`compare_around`] / [`compare_regions`]: before/after a reference date.
//! - [`average_r`]: one mean Rt per region for map shading.
//! - [`RT_BASELINE`]: the Rt = 1 reference line drawn by consumers.
//!
//! Conventions
//! -----------
//! - Inputs are the curves of a [`DynamicRResult`](crate::reproduction::DynamicRResult);
//!   nothing here recomputes estimates.
//! - Lookup failures reuse [`RtError`](crate::reproduction::RtError).

pub mod window_stats;

pub use self::window_stats::{
    RT_BASELINE, ReferenceComparison, WindowStats, average_r, compare_around, compare_regions,
};

pub mod prelude {
    pub use super::window_stats::{
        RT_BASELINE, ReferenceComparison, WindowStats, average_r, compare_around, compare_regions,
    };
}
