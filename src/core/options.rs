//! The map options aggregate.
//!
//! [`MapOptions`] is a flat value holding every setting the map surface reads
//! at start-up. It is built once (empty, or from attributes), optionally
//! adjusted through the fluent `with_*` setters, and then handed to the map
//! surface by value.
//!
//! Setters accept any value of the field's type. Ranges such as
//! `min_zoom <= max_zoom` or a non-negative pixel ratio are the caller's
//! responsibility.

use crate::{
    core::{
        camera::CameraPosition,
        constants::{
            DEFAULT_ACTION_JOURNAL_FILE_COUNT, DEFAULT_ACTION_JOURNAL_FILE_SIZE,
            DEFAULT_ACTION_JOURNAL_REPORT_INTERVAL, DEFAULT_PREFETCH_ZOOM_DELTA, MAXIMUM_PITCH,
            MAXIMUM_ZOOM, MINIMUM_PITCH, MINIMUM_ZOOM,
        },
    },
    ui::{
        elements::{Gravity, Margins},
        fonts::FontSelection,
        icon::CompassImage,
        style::Color,
    },
};
use std::hash::{Hash, Hasher};

/// Settings used to initialize a map surface.
///
/// Equality compares every stored field exactly (floats by value, margins
/// element-wise). [`Hash`] is consistent with it and is derived from
/// [`MapOptions::stable_hash`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub(crate) camera: Option<CameraPosition>,
    pub(crate) debug_active: bool,

    pub(crate) min_zoom: f64,
    pub(crate) max_zoom: f64,
    pub(crate) min_pitch: f64,
    pub(crate) max_pitch: f64,

    pub(crate) compass_enabled: bool,
    pub(crate) compass_gravity: Gravity,
    pub(crate) compass_margins: Option<Margins>,
    pub(crate) compass_fade_facing_north: bool,
    pub(crate) compass_image: Option<CompassImage>,

    pub(crate) logo_enabled: bool,
    pub(crate) logo_gravity: Gravity,
    pub(crate) logo_margins: Option<Margins>,

    pub(crate) attribution_enabled: bool,
    pub(crate) attribution_gravity: Gravity,
    pub(crate) attribution_margins: Option<Margins>,
    pub(crate) attribution_tint_color: Option<Color>,

    pub(crate) rotate_gestures_enabled: bool,
    pub(crate) scroll_gestures_enabled: bool,
    pub(crate) horizontal_scroll_gestures_enabled: bool,
    pub(crate) tilt_gestures_enabled: bool,
    pub(crate) zoom_gestures_enabled: bool,
    pub(crate) double_tap_gestures_enabled: bool,
    pub(crate) quick_zoom_gestures_enabled: bool,

    pub(crate) texture_mode: bool,
    pub(crate) translucent_texture_surface: bool,
    pub(crate) foreground_load_color: Color,
    pub(crate) render_surface_on_top: bool,
    pub(crate) pixel_ratio: f32,

    // Stored independently of the delta; see `with_prefetches_tiles`.
    pub(crate) prefetches_tiles: bool,
    pub(crate) prefetch_zoom_delta: u32,

    pub(crate) api_base_uri: Option<String>,

    pub(crate) local_ideograph_font_family_enabled: bool,
    pub(crate) local_ideograph_font_family: Option<String>,
    pub(crate) local_ideograph_font_families: Option<Vec<String>>,

    pub(crate) cross_source_collisions: bool,

    pub(crate) action_journal_enabled: bool,
    pub(crate) action_journal_path: String,
    pub(crate) action_journal_log_file_size: i64,
    pub(crate) action_journal_log_file_count: i64,
    pub(crate) action_journal_rendering_report_interval: i32,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            camera: None,
            debug_active: false,
            min_zoom: MINIMUM_ZOOM,
            max_zoom: MAXIMUM_ZOOM,
            min_pitch: MINIMUM_PITCH,
            max_pitch: MAXIMUM_PITCH,
            compass_enabled: true,
            compass_gravity: Gravity::TOP | Gravity::END,
            compass_margins: None,
            compass_fade_facing_north: true,
            compass_image: None,
            logo_enabled: true,
            logo_gravity: Gravity::BOTTOM | Gravity::START,
            logo_margins: None,
            attribution_enabled: true,
            attribution_gravity: Gravity::BOTTOM | Gravity::START,
            attribution_margins: None,
            attribution_tint_color: None,
            rotate_gestures_enabled: true,
            scroll_gestures_enabled: true,
            horizontal_scroll_gestures_enabled: true,
            tilt_gestures_enabled: true,
            zoom_gestures_enabled: true,
            double_tap_gestures_enabled: true,
            quick_zoom_gestures_enabled: true,
            texture_mode: false,
            translucent_texture_surface: false,
            foreground_load_color: Color::TRANSPARENT,
            render_surface_on_top: false,
            pixel_ratio: 0.0,
            prefetches_tiles: true,
            prefetch_zoom_delta: DEFAULT_PREFETCH_ZOOM_DELTA,
            api_base_uri: None,
            local_ideograph_font_family_enabled: true,
            local_ideograph_font_family: None,
            local_ideograph_font_families: None,
            cross_source_collisions: true,
            action_journal_enabled: false,
            action_journal_path: String::new(),
            action_journal_log_file_size: DEFAULT_ACTION_JOURNAL_FILE_SIZE,
            action_journal_log_file_count: DEFAULT_ACTION_JOURNAL_FILE_COUNT,
            action_journal_rendering_report_interval: DEFAULT_ACTION_JOURNAL_REPORT_INTERVAL,
        }
    }
}

impl MapOptions {
    /// Options holding only compiled defaults.
    pub fn new() -> Self {
        Self::default()
    }

    // Camera

    /// Set the initial camera pose
    pub fn with_camera(mut self, camera: CameraPosition) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn camera(&self) -> Option<&CameraPosition> {
        self.camera.as_ref()
    }

    /// Enable the debug overlay (tile borders, collision boxes)
    pub fn with_debug_active(mut self, active: bool) -> Self {
        self.debug_active = active;
        self
    }

    pub fn debug_active(&self) -> bool {
        self.debug_active
    }

    // Zoom and pitch bounds

    /// Set the lowest zoom level the camera may reach
    pub fn with_min_zoom(mut self, min_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self
    }

    /// Set the highest zoom level the camera may reach
    pub fn with_max_zoom(mut self, max_zoom: f64) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    /// Set the minimum camera pitch in degrees
    pub fn with_min_pitch(mut self, min_pitch: f64) -> Self {
        self.min_pitch = min_pitch;
        self
    }

    /// Set the maximum camera pitch in degrees
    pub fn with_max_pitch(mut self, max_pitch: f64) -> Self {
        self.max_pitch = max_pitch;
        self
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    pub fn min_pitch(&self) -> f64 {
        self.min_pitch
    }

    pub fn max_pitch(&self) -> f64 {
        self.max_pitch
    }

    // Compass

    /// Show or hide the compass
    pub fn with_compass_enabled(mut self, enabled: bool) -> Self {
        self.compass_enabled = enabled;
        self
    }

    /// Set where the compass is anchored
    pub fn with_compass_gravity(mut self, gravity: Gravity) -> Self {
        self.compass_gravity = gravity;
        self
    }

    /// Set compass margins (left, top, right, bottom) in device pixels
    pub fn with_compass_margins(mut self, margins: Margins) -> Self {
        self.compass_margins = Some(margins);
        self
    }

    /// Fade the compass out while the map faces north
    pub fn with_compass_fades_when_facing_north(mut self, fades: bool) -> Self {
        self.compass_fade_facing_north = fades;
        self
    }

    /// Replace the bundled compass glyph
    pub fn with_compass_image(mut self, image: CompassImage) -> Self {
        self.compass_image = Some(image);
        self
    }

    pub fn compass_enabled(&self) -> bool {
        self.compass_enabled
    }

    pub fn compass_gravity(&self) -> Gravity {
        self.compass_gravity
    }

    pub fn compass_margins(&self) -> Option<Margins> {
        self.compass_margins
    }

    pub fn compass_fade_facing_north(&self) -> bool {
        self.compass_fade_facing_north
    }

    pub fn compass_image(&self) -> Option<&CompassImage> {
        self.compass_image.as_ref()
    }

    // Logo

    /// Show or hide the logo
    pub fn with_logo_enabled(mut self, enabled: bool) -> Self {
        self.logo_enabled = enabled;
        self
    }

    /// Set where the logo is anchored
    pub fn with_logo_gravity(mut self, gravity: Gravity) -> Self {
        self.logo_gravity = gravity;
        self
    }

    /// Set logo margins (left, top, right, bottom) in device pixels
    pub fn with_logo_margins(mut self, margins: Margins) -> Self {
        self.logo_margins = Some(margins);
        self
    }

    pub fn logo_enabled(&self) -> bool {
        self.logo_enabled
    }

    pub fn logo_gravity(&self) -> Gravity {
        self.logo_gravity
    }

    pub fn logo_margins(&self) -> Option<Margins> {
        self.logo_margins
    }

    // Attribution

    /// Show or hide the attribution button
    pub fn with_attribution_enabled(mut self, enabled: bool) -> Self {
        self.attribution_enabled = enabled;
        self
    }

    /// Set where the attribution button is anchored
    pub fn with_attribution_gravity(mut self, gravity: Gravity) -> Self {
        self.attribution_gravity = gravity;
        self
    }

    /// Set attribution margins (left, top, right, bottom) in device pixels
    pub fn with_attribution_margins(mut self, margins: Margins) -> Self {
        self.attribution_margins = Some(margins);
        self
    }

    /// Tint the attribution button. `None` keeps the platform's default tint.
    pub fn with_attribution_tint_color(mut self, color: Option<Color>) -> Self {
        self.attribution_tint_color = color;
        self
    }

    pub fn attribution_enabled(&self) -> bool {
        self.attribution_enabled
    }

    pub fn attribution_gravity(&self) -> Gravity {
        self.attribution_gravity
    }

    pub fn attribution_margins(&self) -> Option<Margins> {
        self.attribution_margins
    }

    pub fn attribution_tint_color(&self) -> Option<Color> {
        self.attribution_tint_color
    }

    // Gestures

    /// Enable two-finger rotation
    pub fn with_rotate_gestures_enabled(mut self, enabled: bool) -> Self {
        self.rotate_gestures_enabled = enabled;
        self
    }

    /// Enable panning
    pub fn with_scroll_gestures_enabled(mut self, enabled: bool) -> Self {
        self.scroll_gestures_enabled = enabled;
        self
    }

    /// Enable horizontal panning; has no effect while panning is off
    pub fn with_horizontal_scroll_gestures_enabled(mut self, enabled: bool) -> Self {
        self.horizontal_scroll_gestures_enabled = enabled;
        self
    }

    /// Enable tilting
    pub fn with_tilt_gestures_enabled(mut self, enabled: bool) -> Self {
        self.tilt_gestures_enabled = enabled;
        self
    }

    /// Enable pinch zoom
    pub fn with_zoom_gestures_enabled(mut self, enabled: bool) -> Self {
        self.zoom_gestures_enabled = enabled;
        self
    }

    /// Enable zoom on double tap
    pub fn with_double_tap_gestures_enabled(mut self, enabled: bool) -> Self {
        self.double_tap_gestures_enabled = enabled;
        self
    }

    /// Enable quick zoom (double tap and drag)
    pub fn with_quick_zoom_gestures_enabled(mut self, enabled: bool) -> Self {
        self.quick_zoom_gestures_enabled = enabled;
        self
    }

    pub fn rotate_gestures_enabled(&self) -> bool {
        self.rotate_gestures_enabled
    }

    pub fn scroll_gestures_enabled(&self) -> bool {
        self.scroll_gestures_enabled
    }

    pub fn horizontal_scroll_gestures_enabled(&self) -> bool {
        self.horizontal_scroll_gestures_enabled
    }

    pub fn tilt_gestures_enabled(&self) -> bool {
        self.tilt_gestures_enabled
    }

    pub fn zoom_gestures_enabled(&self) -> bool {
        self.zoom_gestures_enabled
    }

    pub fn double_tap_gestures_enabled(&self) -> bool {
        self.double_tap_gestures_enabled
    }

    pub fn quick_zoom_gestures_enabled(&self) -> bool {
        self.quick_zoom_gestures_enabled
    }

    // Rendering

    /// Render into a texture instead of a dedicated surface
    pub fn with_texture_mode(mut self, texture_mode: bool) -> Self {
        self.texture_mode = texture_mode;
        self
    }

    /// Let views behind the map show through; only meaningful in texture mode
    pub fn with_translucent_texture_surface(mut self, translucent: bool) -> Self {
        self.translucent_texture_surface = translucent;
        self
    }

    /// Color shown while the style is loading
    pub fn with_foreground_load_color(mut self, color: Color) -> Self {
        self.foreground_load_color = color;
        self
    }

    /// Place the render surface above other windows (media overlay)
    pub fn with_render_surface_on_top(mut self, on_top: bool) -> Self {
        self.render_surface_on_top = on_top;
        self
    }

    /// Override the device pixel ratio; `0.0` uses the system's
    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    pub fn texture_mode(&self) -> bool {
        self.texture_mode
    }

    pub fn translucent_texture_surface(&self) -> bool {
        self.translucent_texture_surface
    }

    pub fn foreground_load_color(&self) -> Color {
        self.foreground_load_color
    }

    pub fn render_surface_on_top(&self) -> bool {
        self.render_surface_on_top
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    // Tile prefetch

    /// Legacy prefetch switch.
    ///
    /// Stored and transferred on its own; it does not change
    /// [`prefetch_zoom_delta`](Self::prefetch_zoom_delta), which is what
    /// actually gates prefetching. Callers that toggled this flag to disable
    /// prefetching should set a delta of `0` instead.
    #[deprecated(note = "use `with_prefetch_zoom_delta`; a delta of 0 disables prefetching")]
    pub fn with_prefetches_tiles(mut self, enabled: bool) -> Self {
        self.prefetches_tiles = enabled;
        self
    }

    /// Number of zoom levels below the current one to prefetch; `0` disables prefetching
    pub fn with_prefetch_zoom_delta(mut self, delta: u32) -> Self {
        self.prefetch_zoom_delta = delta;
        self
    }

    #[deprecated(note = "use `prefetch_zoom_delta`")]
    pub fn prefetches_tiles(&self) -> bool {
        self.prefetches_tiles
    }

    pub fn prefetch_zoom_delta(&self) -> u32 {
        self.prefetch_zoom_delta
    }

    pub fn is_prefetch_enabled(&self) -> bool {
        self.prefetch_zoom_delta > 0
    }

    // API endpoint

    /// Base URI of the tile/style API. Shares storage with the deprecated URL alias.
    pub fn with_api_base_uri(mut self, uri: impl Into<String>) -> Self {
        self.api_base_uri = Some(uri.into());
        self
    }

    /// Clear the base URI so the platform's default endpoint is used
    pub fn without_api_base_uri(mut self) -> Self {
        self.api_base_uri = None;
        self
    }

    #[deprecated(note = "use `with_api_base_uri` or `without_api_base_uri`")]
    pub fn with_api_base_url(mut self, url: Option<String>) -> Self {
        self.api_base_uri = url;
        self
    }

    pub fn api_base_uri(&self) -> Option<&str> {
        self.api_base_uri.as_deref()
    }

    #[deprecated(note = "use `api_base_uri`")]
    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_uri.as_deref()
    }

    // Local ideograph fonts

    /// Rasterize CJK glyphs locally instead of downloading them
    pub fn with_local_ideograph_font_family_enabled(mut self, enabled: bool) -> Self {
        self.local_ideograph_font_family_enabled = enabled;
        self
    }

    /// Use a validated font for local ideographs.
    ///
    /// A selection made from a single name clears any previously stored candidate list.
    pub fn with_local_ideograph_font(mut self, font: FontSelection) -> Self {
        let (family, candidates) = font.into_parts();
        self.local_ideograph_font_family = Some(family);
        self.local_ideograph_font_families = candidates;
        self
    }

    /// The font family for local ideographs, or `None` while local ideographs are disabled.
    ///
    /// Disabling hides the family without forgetting it.
    pub fn local_ideograph_font_family(&self) -> Option<&str> {
        if self.local_ideograph_font_family_enabled {
            self.local_ideograph_font_family.as_deref()
        } else {
            None
        }
    }

    pub fn local_ideograph_font_families(&self) -> Option<&[String]> {
        self.local_ideograph_font_families.as_deref()
    }

    pub fn is_local_ideograph_font_family_enabled(&self) -> bool {
        self.local_ideograph_font_family_enabled
    }

    // Collision detection

    /// Let symbols from different sources collide with each other
    pub fn with_cross_source_collisions(mut self, enabled: bool) -> Self {
        self.cross_source_collisions = enabled;
        self
    }

    pub fn cross_source_collisions(&self) -> bool {
        self.cross_source_collisions
    }

    // Action journal

    /// Record user and map actions to a rolling journal
    pub fn with_action_journal_enabled(mut self, enabled: bool) -> Self {
        self.action_journal_enabled = enabled;
        self
    }

    /// Directory the rolling journal files are written to
    pub fn with_action_journal_path(mut self, path: impl Into<String>) -> Self {
        self.action_journal_path = path.into();
        self
    }

    /// Size of one journal file in bytes
    pub fn with_action_journal_log_file_size(mut self, size: i64) -> Self {
        self.action_journal_log_file_size = size;
        self
    }

    /// Set how many journal files are kept
    pub fn with_action_journal_log_file_count(mut self, count: i64) -> Self {
        self.action_journal_log_file_count = count;
        self
    }

    /// Seconds between rendering reports
    pub fn with_action_journal_rendering_report_interval(mut self, seconds: i32) -> Self {
        self.action_journal_rendering_report_interval = seconds;
        self
    }

    pub fn action_journal_enabled(&self) -> bool {
        self.action_journal_enabled
    }

    pub fn action_journal_path(&self) -> &str {
        &self.action_journal_path
    }

    pub fn action_journal_log_file_size(&self) -> i64 {
        self.action_journal_log_file_size
    }

    pub fn action_journal_log_file_count(&self) -> i64 {
        self.action_journal_log_file_count
    }

    pub fn action_journal_rendering_report_interval(&self) -> i32 {
        self.action_journal_rendering_report_interval
    }

    /// Upper bound of journal data kept on disk. Informational only.
    pub fn action_journal_total_size(&self) -> i64 {
        self.action_journal_log_file_size
            .saturating_mul(self.action_journal_log_file_count)
    }

    /// Order-dependent hash of every field: `h = h * 31 + field_hash`.
    ///
    /// Deterministic across runs, unlike `std`'s randomly seeded hasher.
    pub fn stable_hash(&self) -> u64 {
        let mut h = StableHasher::default();
        match &self.camera {
            Some(camera) => camera.float_bits().iter().for_each(|bits| h.mix(*bits)),
            None => h.mix(0),
        }
        h.mix(self.debug_active as u64);
        h.mix(float_bits(self.min_zoom));
        h.mix(float_bits(self.max_zoom));
        h.mix(float_bits(self.min_pitch));
        h.mix(float_bits(self.max_pitch));

        h.mix(self.compass_enabled as u64);
        h.mix(self.compass_gravity.bits() as u64);
        h.mix_hashed(&self.compass_margins);
        h.mix(self.compass_fade_facing_north as u64);
        h.mix_hashed(&self.compass_image);

        h.mix(self.logo_enabled as u64);
        h.mix(self.logo_gravity.bits() as u64);
        h.mix_hashed(&self.logo_margins);

        h.mix(self.attribution_enabled as u64);
        h.mix(self.attribution_gravity.bits() as u64);
        h.mix_hashed(&self.attribution_margins);
        h.mix_hashed(&self.attribution_tint_color);

        h.mix(self.rotate_gestures_enabled as u64);
        h.mix(self.scroll_gestures_enabled as u64);
        h.mix(self.horizontal_scroll_gestures_enabled as u64);
        h.mix(self.tilt_gestures_enabled as u64);
        h.mix(self.zoom_gestures_enabled as u64);
        h.mix(self.double_tap_gestures_enabled as u64);
        h.mix(self.quick_zoom_gestures_enabled as u64);

        h.mix(self.texture_mode as u64);
        h.mix(self.translucent_texture_surface as u64);
        h.mix(self.foreground_load_color.argb() as u64);
        h.mix(self.render_surface_on_top as u64);
        h.mix(float_bits(self.pixel_ratio as f64));

        h.mix(self.prefetches_tiles as u64);
        h.mix(self.prefetch_zoom_delta as u64);
        h.mix_hashed(&self.api_base_uri);

        h.mix(self.local_ideograph_font_family_enabled as u64);
        h.mix_hashed(&self.local_ideograph_font_family);
        h.mix_hashed(&self.local_ideograph_font_families);

        h.mix(self.cross_source_collisions as u64);

        h.mix(self.action_journal_enabled as u64);
        h.mix_hashed(&self.action_journal_path);
        h.mix(self.action_journal_log_file_size as u64);
        h.mix(self.action_journal_log_file_count as u64);
        h.mix(self.action_journal_rendering_report_interval as u64);
        h.finish()
    }
}

impl Hash for MapOptions {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.stable_hash());
    }
}

// Equal floats must hash alike, so both zeroes share one pattern.
fn float_bits(value: f64) -> u64 {
    if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

#[derive(Default)]
struct StableHasher(u64);

impl StableHasher {
    fn mix(&mut self, field: u64) {
        self.0 = self.0.wrapping_mul(31).wrapping_add(field);
    }

    fn mix_hashed<T: Hash>(&mut self, field: &T) {
        self.mix(fxhash::hash64(field));
    }

    fn finish(&self) -> u64 {
        self.0
    }
}
