//! Values consumed by the map's UI controls: placement, colors, fonts and the compass glyph.

pub mod elements;
pub mod fonts;
pub mod icon;
pub mod style;

pub use elements::{Gravity, Margins};
pub use fonts::{FontSelection, FontValidator, SystemFonts};
pub use icon::CompassImage;
pub use style::Color;
