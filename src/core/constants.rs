//! Compiled defaults for map options.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Lowest zoom level the camera may reach.
pub const MINIMUM_ZOOM: f64 = 0.0;

/// Highest zoom level the camera may reach.
pub const MAXIMUM_ZOOM: f64 = 25.5;

/// Lowest camera pitch in degrees.
pub const MINIMUM_PITCH: f64 = 0.0;

/// Highest camera pitch in degrees.
pub const MAXIMUM_PITCH: f64 = 60.0;

/// Margin (in dp) used for any control side the attributes leave unset.
pub const UNSET_MARGIN_DP: f32 = 4.0;

/// Left margin (in dp) of the attribution control, leaving room for the logo badge.
pub const ATTRIBUTION_LEFT_MARGIN_DP: f32 = 92.0;

/// Number of zoom levels below the current one whose tiles are prefetched.
pub const DEFAULT_PREFETCH_ZOOM_DELTA: u32 = 4;

/// Generic family used when no requested ideograph font is installed.
pub const DEFAULT_FONT: &str = "sans-serif";

/// Size of a single rolling action-journal file in bytes.
pub const DEFAULT_ACTION_JOURNAL_FILE_SIZE: i64 = 1024 * 1024;

/// Number of rolling action-journal files kept.
pub const DEFAULT_ACTION_JOURNAL_FILE_COUNT: i64 = 5;

/// Seconds between rendering reports written to the action journal.
pub const DEFAULT_ACTION_JOURNAL_REPORT_INTERVAL: i32 = 60;
