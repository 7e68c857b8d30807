// Device Authorization Portal - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Device Authorization Portal";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "DeviceAuth";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Storage
// =============================================================================

/// Name of the durable slot holding the serialised request collection.
/// The `_v1` suffix names the payload shape; there is no in-band version.
pub const STORAGE_SLOT_NAME: &str = "device_requests_v1";

/// File name of the storage slot inside the platform data directory.
pub const STORAGE_FILE_NAME: &str = "device_requests_v1.json";

// =============================================================================
// Export
// =============================================================================

/// Default file name offered by the CSV export dialog.
pub const DEFAULT_CSV_EXPORT_NAME: &str = "device-requests.csv";

/// Default file name offered by the JSON export dialog.
pub const DEFAULT_JSON_EXPORT_NAME: &str = "device-requests.json";

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// How long the "request submitted" banner stays visible (seconds).
pub const SUBMIT_BANNER_SECS: u64 = 4;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted values for `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
