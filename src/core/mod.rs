//! Core option types, defaults and attribute resolution.

pub mod camera;
pub mod constants;
pub mod geo;
pub mod options;
pub mod resolver;
