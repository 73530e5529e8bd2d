//! Resolution of map options from declarative attributes.
//!
//! Every field resolves with the same precedence, lowest first:
//!
//! 1. the compiled default
//! 2. the value declared under the field's current key
//!
//! Two fields also have a deprecated key (`api_base_url`, `enable_tile_prefetch`).
//! The deprecated value is applied first and the current key, when declared,
//! overrides it.
//!
//! Control margins left undeclared default to a constant in dp scaled by the
//! display density; declared margins are device pixels and are used as is.
//! Resolution never fails: missing or mistyped attributes fall back to the
//! default.

use crate::{
    core::{
        camera::CameraPosition,
        constants::{
            ATTRIBUTION_LEFT_MARGIN_DP, DEFAULT_ACTION_JOURNAL_FILE_COUNT,
            DEFAULT_ACTION_JOURNAL_FILE_SIZE, DEFAULT_ACTION_JOURNAL_REPORT_INTERVAL,
            DEFAULT_FONT, DEFAULT_PREFETCH_ZOOM_DELTA, MAXIMUM_PITCH, MAXIMUM_ZOOM,
            MINIMUM_PITCH, MINIMUM_ZOOM, UNSET_MARGIN_DP,
        },
        geo::LatLng,
        options::MapOptions,
    },
    data::attributes::{keys, Attributes},
    ui::{
        elements::{Gravity, Margins},
        fonts::{FontValidator, SystemFonts},
        icon::CompassImage,
        style::Color,
    },
};
use std::path::PathBuf;

/// Resolves [`MapOptions`] from [`Attributes`] using the generic system fonts.
pub fn resolve(attrs: &Attributes, density: f32) -> MapOptions {
    Resolver::new().resolve(attrs, density)
}

impl MapOptions {
    /// Options declared by `attrs` on a display with the given density.
    pub fn from_attributes(attrs: &Attributes, density: f32) -> Self {
        resolve(attrs, density)
    }
}

/// Turns declared attributes into map options.
pub struct Resolver<'a> {
    fonts: &'a dyn FontValidator,
    files_dir: Option<PathBuf>,
}

impl Default for Resolver<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Resolver<'a> {
    pub fn new() -> Self {
        Self {
            fonts: SystemFonts::shared(),
            files_dir: None,
        }
    }

    /// Validate ideograph fonts against `fonts` instead of the generic families
    pub fn with_fonts(mut self, fonts: &'a dyn FontValidator) -> Self {
        self.fonts = fonts;
        self
    }

    /// Application files directory; becomes the default action-journal path
    pub fn with_files_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.files_dir = Some(dir.into());
        self
    }

    #[allow(deprecated)]
    pub fn resolve(&self, attrs: &Attributes, density: f32) -> MapOptions {
        log::debug!(
            "resolving map options from {} attributes at density {}",
            attrs.len(),
            density
        );

        let mut options = MapOptions::new();
        if let Some(dir) = &self.files_dir {
            options = options.with_action_journal_path(dir.to_string_lossy());
        }

        options = options
            .with_camera(camera(attrs))
            .with_api_base_url(attrs.get_string(keys::API_BASE_URL).map(str::to_owned));
        if let Some(uri) = attrs.get_string(keys::API_BASE_URI).filter(|s| !s.is_empty()) {
            options = options.with_api_base_uri(uri);
        }

        let flag = |key: &str, default: bool| attrs.get_bool(key).unwrap_or(default);
        let float = |key: &str, default: f64| attrs.get_float(key).map_or(default, f64::from);
        let gravity = |key: &str, default: Gravity| attrs.get_gravity(key).unwrap_or(default);

        options = options
            .with_zoom_gestures_enabled(flag(keys::UI_ZOOM_GESTURES, true))
            .with_scroll_gestures_enabled(flag(keys::UI_SCROLL_GESTURES, true))
            .with_horizontal_scroll_gestures_enabled(flag(keys::UI_HORIZONTAL_SCROLL_GESTURES, true))
            .with_rotate_gestures_enabled(flag(keys::UI_ROTATE_GESTURES, true))
            .with_tilt_gestures_enabled(flag(keys::UI_TILT_GESTURES, true))
            .with_double_tap_gestures_enabled(flag(keys::UI_DOUBLE_TAP_GESTURES, true))
            .with_quick_zoom_gestures_enabled(flag(keys::UI_QUICK_ZOOM_GESTURES, true))
            .with_max_zoom(float(keys::CAMERA_ZOOM_MAX, MAXIMUM_ZOOM))
            .with_min_zoom(float(keys::CAMERA_ZOOM_MIN, MINIMUM_ZOOM))
            .with_max_pitch(float(keys::CAMERA_PITCH_MAX, MAXIMUM_PITCH))
            .with_min_pitch(float(keys::CAMERA_PITCH_MIN, MINIMUM_PITCH));

        options = options
            .with_compass_enabled(flag(keys::UI_COMPASS, true))
            .with_compass_gravity(gravity(keys::UI_COMPASS_GRAVITY, Gravity::TOP | Gravity::END))
            .with_compass_margins(margins(
                attrs,
                density,
                [
                    keys::UI_COMPASS_MARGIN_LEFT,
                    keys::UI_COMPASS_MARGIN_TOP,
                    keys::UI_COMPASS_MARGIN_RIGHT,
                    keys::UI_COMPASS_MARGIN_BOTTOM,
                ],
                UNSET_MARGIN_DP,
            ))
            .with_compass_fades_when_facing_north(flag(keys::UI_COMPASS_FADE_FACING_NORTH, true));
        if let Some(image) = compass_image(attrs) {
            options = options.with_compass_image(image);
        }

        options = options
            .with_logo_enabled(flag(keys::UI_LOGO, true))
            .with_logo_gravity(gravity(keys::UI_LOGO_GRAVITY, Gravity::BOTTOM | Gravity::START))
            .with_logo_margins(margins(
                attrs,
                density,
                [
                    keys::UI_LOGO_MARGIN_LEFT,
                    keys::UI_LOGO_MARGIN_TOP,
                    keys::UI_LOGO_MARGIN_RIGHT,
                    keys::UI_LOGO_MARGIN_BOTTOM,
                ],
                UNSET_MARGIN_DP,
            ));

        options = options
            .with_attribution_tint_color(attrs.get_color(keys::UI_ATTRIBUTION_TINT_COLOR))
            .with_attribution_enabled(flag(keys::UI_ATTRIBUTION, true))
            .with_attribution_gravity(gravity(
                keys::UI_ATTRIBUTION_GRAVITY,
                Gravity::BOTTOM | Gravity::START,
            ))
            .with_attribution_margins(margins(
                attrs,
                density,
                [
                    keys::UI_ATTRIBUTION_MARGIN_LEFT,
                    keys::UI_ATTRIBUTION_MARGIN_TOP,
                    keys::UI_ATTRIBUTION_MARGIN_RIGHT,
                    keys::UI_ATTRIBUTION_MARGIN_BOTTOM,
                ],
                ATTRIBUTION_LEFT_MARGIN_DP,
            ));

        // The legacy switch only turns prefetching off when no delta is declared.
        let prefetches_tiles = flag(keys::ENABLE_TILE_PREFETCH, true);
        let legacy_delta = if prefetches_tiles { DEFAULT_PREFETCH_ZOOM_DELTA } else { 0 };
        let prefetch_zoom_delta = match attrs.get_int(keys::PREFETCH_ZOOM_DELTA) {
            Some(delta) => u32::try_from(delta).unwrap_or_else(|_| {
                log::warn!("negative prefetch zoom delta {} ignored", delta);
                legacy_delta
            }),
            None => legacy_delta,
        };

        options = options
            .with_texture_mode(flag(keys::RENDER_TEXTURE_MODE, false))
            .with_translucent_texture_surface(flag(keys::RENDER_TEXTURE_TRANSLUCENT_SURFACE, false))
            .with_prefetches_tiles(prefetches_tiles)
            .with_prefetch_zoom_delta(prefetch_zoom_delta)
            .with_render_surface_on_top(flag(keys::ENABLE_Z_MEDIA_OVERLAY, false))
            .with_local_ideograph_font_family_enabled(flag(keys::LOCAL_IDEOGRAPH_ENABLED, true));

        let font = match attrs.get_string_array(keys::LOCAL_IDEOGRAPH_FONT_FAMILIES) {
            Some(families) => self.fonts.select_families(families),
            None => self.fonts.select_family(
                attrs
                    .get_string(keys::LOCAL_IDEOGRAPH_FONT_FAMILY)
                    .unwrap_or(DEFAULT_FONT),
            ),
        };

        options
            .with_local_ideograph_font(font)
            .with_pixel_ratio(attrs.get_float(keys::PIXEL_RATIO).unwrap_or(0.0))
            .with_foreground_load_color(
                attrs
                    .get_color(keys::FOREGROUND_LOAD_COLOR)
                    .unwrap_or(Color::LIGHT_GRAY),
            )
            .with_cross_source_collisions(flag(keys::CROSS_SOURCE_COLLISIONS, true))
            .with_action_journal_enabled(flag(keys::ACTION_JOURNAL_ENABLED, false))
            .with_action_journal_log_file_size(
                attrs
                    .get_long(keys::ACTION_JOURNAL_LOG_FILE_SIZE)
                    .unwrap_or(DEFAULT_ACTION_JOURNAL_FILE_SIZE),
            )
            .with_action_journal_log_file_count(
                attrs
                    .get_long(keys::ACTION_JOURNAL_LOG_FILE_COUNT)
                    .unwrap_or(DEFAULT_ACTION_JOURNAL_FILE_COUNT),
            )
            .with_action_journal_rendering_report_interval(
                attrs
                    .get_int(keys::ACTION_JOURNAL_RENDERING_REPORT_INTERVAL)
                    .unwrap_or(DEFAULT_ACTION_JOURNAL_REPORT_INTERVAL),
            )
    }
}

fn camera(attrs: &Attributes) -> CameraPosition {
    let value = |key: &str| attrs.get_float(key).map_or(0.0, f64::from);
    let mut target = LatLng::new(value(keys::CAMERA_TARGET_LAT), value(keys::CAMERA_TARGET_LNG));
    if !target.is_valid() {
        log::warn!("camera target {:?} out of range, normalizing", target);
        target = target.normalized();
    }
    CameraPosition::new(target, value(keys::CAMERA_ZOOM))
        .with_tilt(value(keys::CAMERA_TILT))
        .with_bearing(value(keys::CAMERA_BEARING))
}

/// Declared margins in device pixels; unset sides use `UNSET_MARGIN_DP`,
/// except the left side, which uses `left_dp`.
fn margins(attrs: &Attributes, density: f32, sides: [&str; 4], left_dp: f32) -> Margins {
    let mut out = [0; 4];
    for (i, key) in sides.iter().enumerate() {
        let default_dp = if i == 0 { left_dp } else { UNSET_MARGIN_DP };
        out[i] = attrs.get_dimension(key).unwrap_or(default_dp * density) as i32;
    }
    out
}

fn compass_image(attrs: &Attributes) -> Option<CompassImage> {
    let bytes = attrs.get_drawable(keys::UI_COMPASS_DRAWABLE)?;
    match CompassImage::decode(bytes) {
        Ok(image) => Some(image),
        Err(e) => {
            log::warn!("compass drawable could not be decoded, using the bundled glyph: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::attributes::AttrValue;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_empty_attributes_resolve_to_defaults() {
        init_logger();
        let options = resolve(&Attributes::new(), 1.0);

        assert_eq!(options.camera(), Some(&CameraPosition::default()));
        assert_eq!(options.compass_margins(), Some([4, 4, 4, 4]));
        assert_eq!(options.logo_margins(), Some([4, 4, 4, 4]));
        assert_eq!(options.attribution_margins(), Some([92, 4, 4, 4]));
        assert!(options.attribution_tint_color().is_none());
        assert_eq!(options.foreground_load_color(), Color::LIGHT_GRAY);
        assert!(options.api_base_uri().is_none());
        assert_eq!(options.prefetch_zoom_delta(), DEFAULT_PREFETCH_ZOOM_DELTA);
        assert_eq!(options.local_ideograph_font_family(), Some(DEFAULT_FONT));
        assert!(options.compass_image().is_none());
        assert_eq!(options.action_journal_path(), "");
    }

    #[test]
    fn test_current_api_key_overrides_deprecated() {
        let attrs = Attributes::new()
            .with(keys::API_BASE_URL, AttrValue::String("https://old.example".into()))
            .with(keys::API_BASE_URI, AttrValue::String("https://new.example".into()));
        assert_eq!(resolve(&attrs, 1.0).api_base_uri(), Some("https://new.example"));

        let attrs = Attributes::new()
            .with(keys::API_BASE_URL, AttrValue::String("https://old.example".into()));
        assert_eq!(resolve(&attrs, 1.0).api_base_uri(), Some("https://old.example"));
    }

    #[test]
    fn test_empty_current_api_key_keeps_deprecated() {
        let attrs = Attributes::new()
            .with(keys::API_BASE_URL, AttrValue::String("https://old.example".into()))
            .with(keys::API_BASE_URI, AttrValue::String(String::new()));
        assert_eq!(resolve(&attrs, 1.0).api_base_uri(), Some("https://old.example"));
    }

    #[test]
    fn test_density_scaled_margins() {
        let options = resolve(&Attributes::new(), 2.0);

        assert_eq!(options.compass_margins(), Some([8, 8, 8, 8]));
        assert_eq!(options.logo_margins(), Some([8, 8, 8, 8]));
        assert_eq!(options.attribution_margins(), Some([184, 8, 8, 8]));
    }

    #[test]
    fn test_declared_margins_are_not_rescaled() {
        let attrs = Attributes::new()
            .with(keys::UI_COMPASS_MARGIN_TOP, AttrValue::Dimension(30.0))
            .with(keys::UI_ATTRIBUTION_MARGIN_LEFT, AttrValue::Dimension(10.7));
        let options = resolve(&attrs, 3.0);

        assert_eq!(options.compass_margins(), Some([12, 30, 12, 12]));
        assert_eq!(options.attribution_margins(), Some([10, 12, 12, 12]));
    }

    #[test]
    fn test_tint_color_sentinel_distinction() {
        let unset = resolve(&Attributes::new(), 1.0);
        let explicit = resolve(
            &Attributes::new().with(keys::UI_ATTRIBUTION_TINT_COLOR, AttrValue::Color(0xFF00_0000)),
            1.0,
        );

        assert_eq!(unset.attribution_tint_color(), None);
        assert_eq!(explicit.attribution_tint_color(), Some(Color(0xFF00_0000)));
        assert_ne!(unset, explicit);
    }

    #[test]
    fn test_font_family_list_takes_precedence() {
        let fonts = SystemFonts::new().install("Noto Sans CJK");
        let attrs = Attributes::new()
            .with(
                keys::LOCAL_IDEOGRAPH_FONT_FAMILIES,
                AttrValue::StringArray(vec!["Missing".into(), "Noto Sans CJK".into()]),
            )
            .with(keys::LOCAL_IDEOGRAPH_FONT_FAMILY, AttrValue::String("serif".into()));
        let options = Resolver::new().with_fonts(&fonts).resolve(&attrs, 1.0);

        assert_eq!(options.local_ideograph_font_family(), Some("Noto Sans CJK"));
        assert_eq!(options.local_ideograph_font_families().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_font_family_fallbacks() {
        let empty_list = Attributes::new().with(
            keys::LOCAL_IDEOGRAPH_FONT_FAMILIES,
            AttrValue::StringArray(Vec::new()),
        );
        assert_eq!(
            resolve(&empty_list, 1.0).local_ideograph_font_family(),
            Some(DEFAULT_FONT)
        );

        let uninstalled = Attributes::new().with(
            keys::LOCAL_IDEOGRAPH_FONT_FAMILY,
            AttrValue::String("Nowhere Sans".into()),
        );
        assert_eq!(
            resolve(&uninstalled, 1.0).local_ideograph_font_family(),
            Some(DEFAULT_FONT)
        );

        let installed = Attributes::new()
            .with(keys::LOCAL_IDEOGRAPH_FONT_FAMILY, AttrValue::String("serif".into()));
        assert_eq!(
            resolve(&installed, 1.0).local_ideograph_font_family(),
            Some("serif")
        );
    }

    #[test]
    fn test_ideograph_flag_does_not_change_family() {
        let attrs = Attributes::new()
            .with(keys::LOCAL_IDEOGRAPH_ENABLED, AttrValue::Bool(false))
            .with(keys::LOCAL_IDEOGRAPH_FONT_FAMILY, AttrValue::String("serif".into()));
        let options = resolve(&attrs, 1.0);

        assert!(!options.is_local_ideograph_font_family_enabled());
        assert!(options.local_ideograph_font_family().is_none());
        assert_eq!(
            options
                .with_local_ideograph_font_family_enabled(true)
                .local_ideograph_font_family(),
            Some("serif")
        );
    }

    #[test]
    #[allow(deprecated)]
    fn test_prefetch_precedence() {
        let legacy_off =
            Attributes::new().with(keys::ENABLE_TILE_PREFETCH, AttrValue::Bool(false));
        let options = resolve(&legacy_off, 1.0);
        assert!(!options.prefetches_tiles());
        assert_eq!(options.prefetch_zoom_delta(), 0);

        let both = legacy_off.with(keys::PREFETCH_ZOOM_DELTA, AttrValue::Int(2));
        let options = resolve(&both, 1.0);
        assert!(!options.prefetches_tiles());
        assert_eq!(options.prefetch_zoom_delta(), 2);
        assert!(options.is_prefetch_enabled());

        let negative = Attributes::new().with(keys::PREFETCH_ZOOM_DELTA, AttrValue::Int(-3));
        assert_eq!(resolve(&negative, 1.0).prefetch_zoom_delta(), DEFAULT_PREFETCH_ZOOM_DELTA);
    }

    #[test]
    fn test_mistyped_attributes_fall_back() {
        init_logger();
        let attrs = Attributes::new()
            .with(keys::UI_COMPASS, AttrValue::String("false".into()))
            .with(keys::CAMERA_ZOOM_MAX, AttrValue::Bool(true))
            .with(keys::UI_LOGO_GRAVITY, AttrValue::String("diagonal".into()))
            .with(keys::UI_COMPASS_DRAWABLE, AttrValue::Drawable(vec![1, 2, 3]));
        let options = resolve(&attrs, 1.0);

        assert!(options.compass_enabled());
        assert_eq!(options.max_zoom(), MAXIMUM_ZOOM);
        assert_eq!(options.logo_gravity(), Gravity::BOTTOM | Gravity::START);
        assert!(options.compass_image().is_none());
    }

    #[test]
    fn test_camera_and_bounds_from_attributes() {
        let attrs = Attributes::new()
            .with(keys::CAMERA_TARGET_LAT, AttrValue::Float(40.0))
            .with(keys::CAMERA_TARGET_LNG, AttrValue::Float(-74.0))
            .with(keys::CAMERA_ZOOM, AttrValue::Int(9))
            .with(keys::CAMERA_BEARING, AttrValue::Float(45.0))
            .with(keys::CAMERA_ZOOM_MIN, AttrValue::Float(3.0))
            .with(keys::CAMERA_PITCH_MAX, AttrValue::Float(30.0));
        let options = resolve(&attrs, 1.0);

        let camera = options.camera().copied().unwrap_or_default();
        assert_eq!(camera.target, LatLng::new(40.0, -74.0));
        assert_eq!(camera.zoom, 9.0);
        assert_eq!(camera.bearing, 45.0);
        assert_eq!(camera.tilt, 0.0);
        assert_eq!(options.min_zoom(), 3.0);
        assert_eq!(options.max_pitch(), 30.0);
    }

    #[test]
    fn test_files_dir_becomes_journal_path() {
        let options = Resolver::new()
            .with_files_dir("/data/app/files")
            .resolve(&Attributes::new(), 1.0);
        assert_eq!(options.action_journal_path(), "/data/app/files");
    }

    #[test]
    fn test_resolve_does_not_mutate_input() {
        let attrs = Attributes::new()
            .with(keys::UI_LOGO, AttrValue::Bool(false))
            .with(keys::PIXEL_RATIO, AttrValue::Float(1.5));
        let before = attrs.clone();

        let first = resolve(&attrs, 2.0);
        let second = resolve(&attrs, 2.0);
        assert_eq!(attrs, before);
        assert_eq!(first, second);
        assert!(!first.logo_enabled());
        assert_eq!(first.pixel_ratio(), 1.5);
    }
}
