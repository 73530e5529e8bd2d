//! Prelude module for common maplet-options types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use maplet_options::prelude::*;`

pub use crate::core::{
    camera::CameraPosition,
    geo::LatLng,
    options::MapOptions,
    resolver::{resolve, Resolver},
};

pub use crate::data::{
    attributes::{keys, AttrValue, Attributes},
    transfer::{decode, encode},
};

pub use crate::ui::{
    elements::{Gravity, Margins},
    fonts::{FontSelection, FontValidator, SystemFonts},
    icon::CompassImage,
    style::Color,
};

pub use crate::{MapError, Result};
