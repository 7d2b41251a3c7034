//! Hither - dither images onto fixed color palettes
//!
//! Command line front end for the `palette-dither` crate.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
