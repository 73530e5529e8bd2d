//! Binary transfer of map options across a process boundary.
//!
//! The layout is fixed and mirrors the declaration order of [`Wire`]:
//!
//! | # | Field | Encoding |
//! |---|---|---|
//! | 1 | camera | option tag + 9 × f64 |
//! | 2 | debug active | u8 |
//! | 3 | compass: enabled, gravity, margins, fade facing north, image | u8, i32, margins, u8, option tag + (u32, u32, u64 len + bytes) |
//! | 4 | logo: enabled, gravity, margins | u8, i32, margins |
//! | 5 | attribution: enabled, gravity, margins, tint color | u8, i32, margins, option tag + u32 |
//! | 6 | min/max zoom, min/max pitch | 4 × f64 |
//! | 7 | rotate, scroll, horizontal scroll, tilt, zoom, double tap, quick zoom gestures | 7 × u8 |
//! | 8 | api base uri | option tag + u64 len + utf-8 |
//! | 9 | texture mode, translucent surface, prefetches tiles, prefetch zoom delta, render on top | u8, u8, u8, u32, u8 |
//! | 10 | ideographs: enabled, family, families | u8, option string, option (u64 len + strings) |
//! | 11 | pixel ratio, foreground load color, cross source collisions | f32, u32, u8 |
//! | 12 | action journal: enabled, path, file size, file count, report interval | u8, string, i64, i64, i32 |
//!
//! Margins are an option tag followed by a u64 length and that many i32s; the
//! length must be 4. Integers are little endian, booleans are a single 0/1
//! byte. A stream that is truncated, carries trailing bytes or breaks any of
//! these rules is rejected as a whole with [`MapError::MalformedAggregate`].

use crate::{
    core::{camera::CameraPosition, options::MapOptions},
    ui::{
        elements::{Gravity, Margins},
        icon::CompassImage,
        style::Color,
    },
    MapError, Result,
};
use bincode::Options;
use serde::{Deserialize, Serialize};

/// Upper bound for a single encoded options value.
const MAX_TRANSFER_BYTES: u64 = 64 * 1024 * 1024;

fn codec(limit: u64) -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
        .with_limit(limit)
}

/// Serializes `options` into the transfer layout.
///
/// The encoded value may not exceed 64 MiB. Only a very large compass image
/// can reach that (about 4096 x 4096 pixels); such options fail with
/// [`MapError::Encode`].
pub fn encode(options: &MapOptions) -> Result<Vec<u8>> {
    encode_within(options, MAX_TRANSFER_BYTES)
}

fn encode_within(options: &MapOptions, limit: u64) -> Result<Vec<u8>> {
    let bytes = codec(limit)
        .serialize(&Wire::from(options))
        .map_err(|e| MapError::Encode(e.to_string()))?;
    log::debug!("encoded map options into {} bytes", bytes.len());
    Ok(bytes)
}

/// Restores options written by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<MapOptions> {
    let wire: Wire = codec(MAX_TRANSFER_BYTES).deserialize(bytes).map_err(|e| {
        log::warn!("rejected map options stream of {} bytes: {}", bytes.len(), e);
        MapError::MalformedAggregate(e.to_string())
    })?;
    MapOptions::try_from(wire)
}

impl MapOptions {
    /// Encodes these options for transfer; see [`encode`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        encode(self)
    }

    /// Decodes options from a transfer stream; see [`decode`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        decode(bytes)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WireBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Field order here is the wire order.
#[derive(Debug, Serialize, Deserialize)]
struct Wire {
    camera: Option<CameraPosition>,
    debug_active: bool,

    compass_enabled: bool,
    compass_gravity: i32,
    compass_margins: Option<Vec<i32>>,
    compass_fade_facing_north: bool,
    compass_image: Option<WireBitmap>,

    logo_enabled: bool,
    logo_gravity: i32,
    logo_margins: Option<Vec<i32>>,

    attribution_enabled: bool,
    attribution_gravity: i32,
    attribution_margins: Option<Vec<i32>>,
    attribution_tint_color: Option<u32>,

    min_zoom: f64,
    max_zoom: f64,
    min_pitch: f64,
    max_pitch: f64,

    rotate_gestures_enabled: bool,
    scroll_gestures_enabled: bool,
    horizontal_scroll_gestures_enabled: bool,
    tilt_gestures_enabled: bool,
    zoom_gestures_enabled: bool,
    double_tap_gestures_enabled: bool,
    quick_zoom_gestures_enabled: bool,

    api_base_uri: Option<String>,
    texture_mode: bool,
    translucent_texture_surface: bool,
    prefetches_tiles: bool,
    prefetch_zoom_delta: u32,
    render_surface_on_top: bool,
    local_ideograph_font_family_enabled: bool,
    local_ideograph_font_family: Option<String>,
    local_ideograph_font_families: Option<Vec<String>>,
    pixel_ratio: f32,
    foreground_load_color: u32,
    cross_source_collisions: bool,

    action_journal_enabled: bool,
    action_journal_path: String,
    action_journal_log_file_size: i64,
    action_journal_log_file_count: i64,
    action_journal_rendering_report_interval: i32,
}

impl From<&MapOptions> for Wire {
    fn from(o: &MapOptions) -> Self {
        Self {
            camera: o.camera,
            debug_active: o.debug_active,
            compass_enabled: o.compass_enabled,
            compass_gravity: o.compass_gravity.bits(),
            compass_margins: o.compass_margins.map(Vec::from),
            compass_fade_facing_north: o.compass_fade_facing_north,
            compass_image: o.compass_image.as_ref().map(|image| WireBitmap {
                width: image.width(),
                height: image.height(),
                pixels: image.pixels().to_vec(),
            }),
            logo_enabled: o.logo_enabled,
            logo_gravity: o.logo_gravity.bits(),
            logo_margins: o.logo_margins.map(Vec::from),
            attribution_enabled: o.attribution_enabled,
            attribution_gravity: o.attribution_gravity.bits(),
            attribution_margins: o.attribution_margins.map(Vec::from),
            attribution_tint_color: o.attribution_tint_color.map(Color::argb),
            min_zoom: o.min_zoom,
            max_zoom: o.max_zoom,
            min_pitch: o.min_pitch,
            max_pitch: o.max_pitch,
            rotate_gestures_enabled: o.rotate_gestures_enabled,
            scroll_gestures_enabled: o.scroll_gestures_enabled,
            horizontal_scroll_gestures_enabled: o.horizontal_scroll_gestures_enabled,
            tilt_gestures_enabled: o.tilt_gestures_enabled,
            zoom_gestures_enabled: o.zoom_gestures_enabled,
            double_tap_gestures_enabled: o.double_tap_gestures_enabled,
            quick_zoom_gestures_enabled: o.quick_zoom_gestures_enabled,
            api_base_uri: o.api_base_uri.clone(),
            texture_mode: o.texture_mode,
            translucent_texture_surface: o.translucent_texture_surface,
            prefetches_tiles: o.prefetches_tiles,
            prefetch_zoom_delta: o.prefetch_zoom_delta,
            render_surface_on_top: o.render_surface_on_top,
            local_ideograph_font_family_enabled: o.local_ideograph_font_family_enabled,
            local_ideograph_font_family: o.local_ideograph_font_family.clone(),
            local_ideograph_font_families: o.local_ideograph_font_families.clone(),
            pixel_ratio: o.pixel_ratio,
            foreground_load_color: o.foreground_load_color.argb(),
            cross_source_collisions: o.cross_source_collisions,
            action_journal_enabled: o.action_journal_enabled,
            action_journal_path: o.action_journal_path.clone(),
            action_journal_log_file_size: o.action_journal_log_file_size,
            action_journal_log_file_count: o.action_journal_log_file_count,
            action_journal_rendering_report_interval: o.action_journal_rendering_report_interval,
        }
    }
}

impl TryFrom<Wire> for MapOptions {
    type Error = MapError;

    fn try_from(w: Wire) -> Result<Self> {
        let compass_image = match w.compass_image {
            Some(bitmap) => Some(
                CompassImage::from_rgba(bitmap.width, bitmap.height, bitmap.pixels).ok_or_else(
                    || {
                        MapError::MalformedAggregate(format!(
                            "compass image pixels do not match {}x{}",
                            bitmap.width, bitmap.height
                        ))
                    },
                )?,
            ),
            None => None,
        };

        Ok(MapOptions {
            camera: w.camera,
            debug_active: w.debug_active,
            min_zoom: w.min_zoom,
            max_zoom: w.max_zoom,
            min_pitch: w.min_pitch,
            max_pitch: w.max_pitch,
            compass_enabled: w.compass_enabled,
            compass_gravity: Gravity(w.compass_gravity),
            compass_margins: margins("compass", w.compass_margins)?,
            compass_fade_facing_north: w.compass_fade_facing_north,
            compass_image,
            logo_enabled: w.logo_enabled,
            logo_gravity: Gravity(w.logo_gravity),
            logo_margins: margins("logo", w.logo_margins)?,
            attribution_enabled: w.attribution_enabled,
            attribution_gravity: Gravity(w.attribution_gravity),
            attribution_margins: margins("attribution", w.attribution_margins)?,
            attribution_tint_color: w.attribution_tint_color.map(Color),
            rotate_gestures_enabled: w.rotate_gestures_enabled,
            scroll_gestures_enabled: w.scroll_gestures_enabled,
            horizontal_scroll_gestures_enabled: w.horizontal_scroll_gestures_enabled,
            tilt_gestures_enabled: w.tilt_gestures_enabled,
            zoom_gestures_enabled: w.zoom_gestures_enabled,
            double_tap_gestures_enabled: w.double_tap_gestures_enabled,
            quick_zoom_gestures_enabled: w.quick_zoom_gestures_enabled,
            texture_mode: w.texture_mode,
            translucent_texture_surface: w.translucent_texture_surface,
            foreground_load_color: Color(w.foreground_load_color),
            render_surface_on_top: w.render_surface_on_top,
            pixel_ratio: w.pixel_ratio,
            prefetches_tiles: w.prefetches_tiles,
            prefetch_zoom_delta: w.prefetch_zoom_delta,
            api_base_uri: w.api_base_uri,
            local_ideograph_font_family_enabled: w.local_ideograph_font_family_enabled,
            local_ideograph_font_family: w.local_ideograph_font_family,
            local_ideograph_font_families: w.local_ideograph_font_families,
            cross_source_collisions: w.cross_source_collisions,
            action_journal_enabled: w.action_journal_enabled,
            action_journal_path: w.action_journal_path,
            action_journal_log_file_size: w.action_journal_log_file_size,
            action_journal_log_file_count: w.action_journal_log_file_count,
            action_journal_rendering_report_interval: w.action_journal_rendering_report_interval,
        })
    }
}

fn margins(control: &str, margins: Option<Vec<i32>>) -> Result<Option<Margins>> {
    match margins {
        None => Ok(None),
        Some(values) => Margins::try_from(values.as_slice()).map(Some).map_err(|_| {
            MapError::MalformedAggregate(format!(
                "{} margins hold {} values, expected 4",
                control,
                values.len()
            ))
        }),
    }
}
