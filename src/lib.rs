//! # maplet-options
//!
//! Initialization options for a maplet map surface.
//!
//! A [`MapOptions`] value collects everything the map surface needs before the
//! first frame: the initial camera, zoom and pitch bounds, placement of the
//! compass/logo/attribution controls, gesture toggles, rendering mode, local
//! ideograph fonts and action-journal diagnostics.
//!
//! Values are produced in one of two ways:
//!
//! - [`MapOptions::default`] followed by fluent `with_*` setters
//! - [`Resolver`] (or [`MapOptions::from_attributes`]) from a declarative
//!   [`Attributes`] source and a display density
//!
//! and can be moved across a process boundary with [`MapOptions::to_bytes`] /
//! [`MapOptions::from_bytes`].

pub mod core;
pub mod data;
pub mod prelude;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    camera::CameraPosition,
    geo::LatLng,
    options::MapOptions,
    resolver::{resolve, Resolver},
};

pub use crate::data::{
    attributes::{AttrValue, Attributes},
    transfer::{decode, encode},
};

pub use crate::ui::{
    elements::{Gravity, Margins},
    fonts::{FontSelection, FontValidator, SystemFonts},
    icon::CompassImage,
    style::Color,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// A transfer byte stream could not be turned back into options.
    #[error("Malformed map options: {0}")]
    MalformedAggregate(String),

    /// Options could not be written, e.g. because they exceed the transfer size limit.
    #[error("Cannot encode map options: {0}")]
    Encode(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Error type alias for convenience
pub type Error = MapError;
