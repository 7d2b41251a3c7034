//! Mixing plans for Yliluoma's ordered dithering.
//!
//! A mixing plan says "show palette entry `second` on a `ratio` share of
//! the pixels in a region and entry `first` on the rest". The
//! [`MixingPlanTable`] enumerates every pair at every ratio a threshold
//! matrix of the given order can express, and picks the plan whose blend
//! best matches a pixel.

mod plan_table;

pub use plan_table::{MixingEntry, MixingPlan, MixingPlanTable};
