use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// Margins of a map control: left, top, right, bottom in device pixels.
pub type Margins = [i32; 4];

/// Placement of a map control inside the map surface.
///
/// A bit set with the same values as the platform's layout gravity, so integer
/// attribute values keep their meaning. `START`/`END` follow layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Gravity(pub i32);

impl Gravity {
    pub const NONE: Gravity = Gravity(0);
    pub const CENTER_HORIZONTAL: Gravity = Gravity(0x01);
    pub const LEFT: Gravity = Gravity(0x03);
    pub const RIGHT: Gravity = Gravity(0x05);
    pub const CENTER_VERTICAL: Gravity = Gravity(0x10);
    pub const CENTER: Gravity = Gravity(0x11);
    pub const TOP: Gravity = Gravity(0x30);
    pub const BOTTOM: Gravity = Gravity(0x50);
    pub const START: Gravity = Gravity(0x0080_0003);
    pub const END: Gravity = Gravity(0x0080_0005);

    pub fn bits(self) -> i32 {
        self.0
    }

    pub fn contains(self, other: Gravity) -> bool {
        self.0 & other.0 == other.0
    }

    /// Parses `|`-separated flag names such as `"bottom|start"`.
    ///
    /// Returns `None` if any name is unknown or the string is empty.
    pub fn parse(value: &str) -> Option<Gravity> {
        let mut gravity = Gravity::NONE;
        for name in value.split('|') {
            let flag = match name.trim().to_ascii_lowercase().as_str() {
                "top" => Gravity::TOP,
                "bottom" => Gravity::BOTTOM,
                "left" => Gravity::LEFT,
                "right" => Gravity::RIGHT,
                "start" => Gravity::START,
                "end" => Gravity::END,
                "center" => Gravity::CENTER,
                "center_vertical" => Gravity::CENTER_VERTICAL,
                "center_horizontal" => Gravity::CENTER_HORIZONTAL,
                _ => return None,
            };
            gravity = gravity | flag;
        }
        Some(gravity)
    }
}

impl BitOr for Gravity {
    type Output = Gravity;

    fn bitor(self, rhs: Gravity) -> Gravity {
        Gravity(self.0 | rhs.0)
    }
}

impl From<i32> for Gravity {
    fn from(bits: i32) -> Self {
        Gravity(bits)
    }
}
