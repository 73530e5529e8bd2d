use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Initial camera pose of the map surface.
///
/// The pose is opaque to the options layer: it is stored, compared and
/// transferred as a whole, never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraPosition {
    /// Geographic location the camera looks at
    pub target: LatLng,
    /// Zoom level
    pub zoom: f64,
    /// Pitch in degrees, 0 looks straight down
    pub tilt: f64,
    /// Rotation in degrees clockwise from north
    pub bearing: f64,
    /// Viewport padding (left, top, right, bottom) in device pixels
    pub padding: [f64; 4],
}

impl CameraPosition {
    pub fn new(target: LatLng, zoom: f64) -> Self {
        Self {
            target,
            zoom,
            ..Self::default()
        }
    }

    pub fn with_tilt(mut self, tilt: f64) -> Self {
        self.tilt = tilt;
        self
    }

    pub fn with_bearing(mut self, bearing: f64) -> Self {
        self.bearing = bearing;
        self
    }

    pub fn with_padding(mut self, padding: [f64; 4]) -> Self {
        self.padding = padding;
        self
    }

    /// Bit patterns of every float in the pose, in field order.
    ///
    /// Zeroes are folded so that `0.0` and `-0.0` (which compare equal) hash alike.
    pub(crate) fn float_bits(&self) -> [u64; 9] {
        let bits = |v: f64| if v == 0.0 { 0 } else { v.to_bits() };
        [
            bits(self.target.lat),
            bits(self.target.lng),
            bits(self.zoom),
            bits(self.tilt),
            bits(self.bearing),
            bits(self.padding[0]),
            bits(self.padding[1]),
            bits(self.padding[2]),
            bits(self.padding[3]),
        ]
    }
}
