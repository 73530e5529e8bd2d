//! Declarative attributes the resolver reads map options from.
//!
//! An [`Attributes`] value is a flat, string-keyed set of typed values, the
//! way a layout file declares them for a map view. Keys are listed in [`keys`].
//! It can be built in code or loaded from a JSON document:
//!
//! ```json
//! {
//!   "api_base_uri": { "string": "https://tiles.example" },
//!   "ui_compass_gravity": { "string": "top|start" },
//!   "ui_compass_margin_left": { "dimension": 24.0 },
//!   "ui_attribution_tint_color": { "string": "#FF3366" },
//!   "prefetch_zoom_delta": { "int": 2 }
//! }
//! ```
//!
//! Getters are lenient where the platform is (an int is accepted where a
//! float is asked for), and report anything else as absent.

use crate::{
    ui::{elements::Gravity, style::Color},
    Result,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attribute names understood by the resolver.
pub mod keys {
    pub const CAMERA_TARGET_LAT: &str = "camera_target_lat";
    pub const CAMERA_TARGET_LNG: &str = "camera_target_lng";
    pub const CAMERA_ZOOM: &str = "camera_zoom";
    pub const CAMERA_TILT: &str = "camera_tilt";
    pub const CAMERA_BEARING: &str = "camera_bearing";
    pub const CAMERA_ZOOM_MIN: &str = "camera_zoom_min";
    pub const CAMERA_ZOOM_MAX: &str = "camera_zoom_max";
    pub const CAMERA_PITCH_MIN: &str = "camera_pitch_min";
    pub const CAMERA_PITCH_MAX: &str = "camera_pitch_max";

    /// Deprecated alias of [`API_BASE_URI`].
    pub const API_BASE_URL: &str = "api_base_url";
    pub const API_BASE_URI: &str = "api_base_uri";

    pub const UI_ZOOM_GESTURES: &str = "ui_zoom_gestures";
    pub const UI_SCROLL_GESTURES: &str = "ui_scroll_gestures";
    pub const UI_HORIZONTAL_SCROLL_GESTURES: &str = "ui_horizontal_scroll_gestures";
    pub const UI_ROTATE_GESTURES: &str = "ui_rotate_gestures";
    pub const UI_TILT_GESTURES: &str = "ui_tilt_gestures";
    pub const UI_DOUBLE_TAP_GESTURES: &str = "ui_double_tap_gestures";
    pub const UI_QUICK_ZOOM_GESTURES: &str = "ui_quick_zoom_gestures";

    pub const UI_COMPASS: &str = "ui_compass";
    pub const UI_COMPASS_GRAVITY: &str = "ui_compass_gravity";
    pub const UI_COMPASS_MARGIN_LEFT: &str = "ui_compass_margin_left";
    pub const UI_COMPASS_MARGIN_TOP: &str = "ui_compass_margin_top";
    pub const UI_COMPASS_MARGIN_RIGHT: &str = "ui_compass_margin_right";
    pub const UI_COMPASS_MARGIN_BOTTOM: &str = "ui_compass_margin_bottom";
    pub const UI_COMPASS_FADE_FACING_NORTH: &str = "ui_compass_fade_facing_north";
    pub const UI_COMPASS_DRAWABLE: &str = "ui_compass_drawable";

    pub const UI_LOGO: &str = "ui_logo";
    pub const UI_LOGO_GRAVITY: &str = "ui_logo_gravity";
    pub const UI_LOGO_MARGIN_LEFT: &str = "ui_logo_margin_left";
    pub const UI_LOGO_MARGIN_TOP: &str = "ui_logo_margin_top";
    pub const UI_LOGO_MARGIN_RIGHT: &str = "ui_logo_margin_right";
    pub const UI_LOGO_MARGIN_BOTTOM: &str = "ui_logo_margin_bottom";

    pub const UI_ATTRIBUTION: &str = "ui_attribution";
    pub const UI_ATTRIBUTION_GRAVITY: &str = "ui_attribution_gravity";
    pub const UI_ATTRIBUTION_MARGIN_LEFT: &str = "ui_attribution_margin_left";
    pub const UI_ATTRIBUTION_MARGIN_TOP: &str = "ui_attribution_margin_top";
    pub const UI_ATTRIBUTION_MARGIN_RIGHT: &str = "ui_attribution_margin_right";
    pub const UI_ATTRIBUTION_MARGIN_BOTTOM: &str = "ui_attribution_margin_bottom";
    pub const UI_ATTRIBUTION_TINT_COLOR: &str = "ui_attribution_tint_color";

    pub const RENDER_TEXTURE_MODE: &str = "render_texture_mode";
    pub const RENDER_TEXTURE_TRANSLUCENT_SURFACE: &str = "render_texture_translucent_surface";
    /// Deprecated; superseded by [`PREFETCH_ZOOM_DELTA`].
    pub const ENABLE_TILE_PREFETCH: &str = "enable_tile_prefetch";
    pub const PREFETCH_ZOOM_DELTA: &str = "prefetch_zoom_delta";
    pub const ENABLE_Z_MEDIA_OVERLAY: &str = "enable_z_media_overlay";
    pub const PIXEL_RATIO: &str = "pixel_ratio";
    pub const FOREGROUND_LOAD_COLOR: &str = "foreground_load_color";

    pub const LOCAL_IDEOGRAPH_ENABLED: &str = "local_ideograph_enabled";
    pub const LOCAL_IDEOGRAPH_FONT_FAMILY: &str = "local_ideograph_font_family";
    pub const LOCAL_IDEOGRAPH_FONT_FAMILIES: &str = "local_ideograph_font_families";

    pub const CROSS_SOURCE_COLLISIONS: &str = "cross_source_collisions";

    pub const ACTION_JOURNAL_ENABLED: &str = "action_journal_enabled";
    pub const ACTION_JOURNAL_LOG_FILE_SIZE: &str = "action_journal_log_file_size";
    pub const ACTION_JOURNAL_LOG_FILE_COUNT: &str = "action_journal_log_file_count";
    pub const ACTION_JOURNAL_RENDERING_REPORT_INTERVAL: &str =
        "action_journal_rendering_report_interval";
}

/// A single declared attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    /// A length already converted to device pixels
    Dimension(f32),
    /// Packed ARGB
    Color(u32),
    String(String),
    StringArray(Vec<String>),
    /// Encoded image bytes (PNG)
    Drawable(Vec<u8>),
}

impl AttrValue {
    fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Bool(_) => "bool",
            AttrValue::Int(_) => "int",
            AttrValue::Float(_) => "float",
            AttrValue::Dimension(_) => "dimension",
            AttrValue::Color(_) => "color",
            AttrValue::String(_) => "string",
            AttrValue::StringArray(_) => "string_array",
            AttrValue::Drawable(_) => "drawable",
        }
    }
}

/// Declared attributes of a map view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    values: HashMap<String, AttrValue>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads attributes from a JSON object of externally tagged values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add an attribute, replacing any previous value under `key`
    pub fn with(mut self, key: impl Into<String>, value: AttrValue) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: AttrValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            AttrValue::Bool(v) => Some(*v),
            other => mismatch(key, "bool", other),
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.get(key)? {
            AttrValue::Int(v) => match i32::try_from(*v) {
                Ok(v) => Some(v),
                Err(_) => {
                    log::warn!("attribute {} = {} does not fit an int, ignoring", key, v);
                    None
                }
            },
            other => mismatch(key, "int", other),
        }
    }

    pub fn get_long(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            AttrValue::Int(v) => Some(*v),
            other => mismatch(key, "int", other),
        }
    }

    pub fn get_float(&self, key: &str) -> Option<f32> {
        match self.get(key)? {
            AttrValue::Float(v) => Some(*v as f32),
            AttrValue::Int(v) => Some(*v as f32),
            other => mismatch(key, "float", other),
        }
    }

    /// A length in device pixels
    pub fn get_dimension(&self, key: &str) -> Option<f32> {
        match self.get(key)? {
            AttrValue::Dimension(v) => Some(*v),
            AttrValue::Float(v) => Some(*v as f32),
            AttrValue::Int(v) => Some(*v as f32),
            other => mismatch(key, "dimension", other),
        }
    }

    pub fn get_color(&self, key: &str) -> Option<Color> {
        match self.get(key)? {
            AttrValue::Color(v) => Some(Color(*v)),
            AttrValue::Int(v) => match u32::try_from(*v) {
                Ok(v) => Some(Color(v)),
                // Negative ints are ARGB values written as signed 32-bit numbers.
                Err(_) => i32::try_from(*v).ok().map(|v| Color(v as u32)),
            },
            AttrValue::String(s) => {
                let color = Color::parse_hex(s);
                if color.is_none() {
                    log::warn!("attribute {} = {:?} is not a color, ignoring", key, s);
                }
                color
            }
            other => mismatch(key, "color", other),
        }
    }

    pub fn get_gravity(&self, key: &str) -> Option<Gravity> {
        match self.get(key)? {
            AttrValue::Int(v) => i32::try_from(*v).ok().map(Gravity),
            AttrValue::String(s) => {
                let gravity = Gravity::parse(s);
                if gravity.is_none() {
                    log::warn!("attribute {} = {:?} is not a gravity, ignoring", key, s);
                }
                gravity
            }
            other => mismatch(key, "gravity", other),
        }
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            AttrValue::String(v) => Some(v.as_str()),
            other => mismatch(key, "string", other),
        }
    }

    pub fn get_string_array(&self, key: &str) -> Option<&[String]> {
        match self.get(key)? {
            AttrValue::StringArray(v) => Some(v.as_slice()),
            other => mismatch(key, "string_array", other),
        }
    }

    /// Encoded image bytes
    pub fn get_drawable(&self, key: &str) -> Option<&[u8]> {
        match self.get(key)? {
            AttrValue::Drawable(v) => Some(v.as_slice()),
            other => mismatch(key, "drawable", other),
        }
    }
}

fn mismatch<T>(key: &str, expected: &str, found: &AttrValue) -> Option<T> {
    log::warn!(
        "attribute {} should be {} but is {}, ignoring",
        key,
        expected,
        found.type_name()
    );
    None
}
