// Device Authorization Portal - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for portal data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/deviceauth/ or %APPDATA%\DeviceAuth\config\)
    pub config_dir: PathBuf,

    /// Data directory holding the request storage file.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Default location of the request storage file.
    pub fn storage_file(&self) -> PathBuf {
        self.data_dir.join(constants::STORAGE_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[storage]` section.
    pub storage: StorageSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[export]` section.
    pub export: ExportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[storage]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Override for the request storage file path.
    pub data_file: Option<String>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// File name offered by the CSV export dialog.
    pub csv_file_name: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Storage file override (None = platform data directory).
    pub data_file: Option<PathBuf>,

    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Body font size in points.
    pub font_size: f32,

    /// File name offered by the CSV export dialog.
    pub csv_file_name: String,

    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            csv_file_name: constants::DEFAULT_CSV_EXPORT_NAME.to_string(),
            log_level: None,
            log_file: None,
        }
    }
}

/// Path of config.toml inside the platform config directory.
pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(constants::CONFIG_FILE_NAME)
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with a warning;
/// the application still starts.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let path = config_path(config_dir);

    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    match read_raw_config(&path) {
        Ok(raw) => {
            tracing::info!(path = %path.display(), "Loaded config.toml");
            validate_config(raw)
        }
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            (AppConfig::default(), vec![msg])
        }
    }
}

fn read_raw_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Validate each raw field, accumulating one warning per rejected value.
pub fn validate_config(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut rejected: Vec<ConfigError> = Vec::new();

    // -- Storage: data_file --
    if let Some(file) = raw.storage.data_file {
        if !file.trim().is_empty() {
            config.data_file = Some(PathBuf::from(file));
        }
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => rejected.push(ConfigError::ValueOutOfRange {
                field: "ui.theme".to_string(),
                value: other.to_string(),
                expected: "\"dark\" or \"light\"".to_string(),
            }),
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            rejected.push(ConfigError::ValueOutOfRange {
                field: "ui.font_size".to_string(),
                value: size.to_string(),
                expected: format!("{}-{}", constants::MIN_FONT_SIZE, constants::MAX_FONT_SIZE),
            });
        }
    }

    // -- Export: csv_file_name --
    if let Some(name) = raw.export.csv_file_name {
        if name.trim().is_empty() || name.contains(['/', '\\']) {
            rejected.push(ConfigError::ValueOutOfRange {
                field: "export.csv_file_name".to_string(),
                value: name,
                expected: "a bare file name".to_string(),
            });
        } else {
            config.csv_file_name = name;
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            rejected.push(ConfigError::ValueOutOfRange {
                field: "logging.level".to_string(),
                value: level,
                expected: constants::VALID_LOG_LEVELS.join(", "),
            });
        }
    }

    // -- Logging: file --
    if let Some(file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file);
        }
    }

    let warnings: Vec<String> = rejected
        .iter()
        .map(|e| format!("{e}. Using default."))
        .collect();

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let config_dir = dir.path().join("deviceauth");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join(constants::CONFIG_FILE_NAME), body).unwrap();
        config_dir
    }

    #[test]
    fn test_config_path_stays_inside_app_config_dir() {
        let paths = PlatformPaths::resolve();
        let path = config_path(&paths.config_dir);
        assert_eq!(path.parent(), Some(paths.config_dir.as_path()));
        assert!(path.ends_with(constants::CONFIG_FILE_NAME));
    }

    #[test]
    fn test_config_in_parent_dir_is_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(constants::CONFIG_FILE_NAME),
            "[storage]\ndata_file = \"/elsewhere/requests.json\"\n",
        )
        .unwrap();
        let config_dir = dir.path().join("deviceauth");
        std::fs::create_dir_all(&config_dir).unwrap();

        let (config, warnings) = load_config(&config_dir);
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_file_gives_defaults_without_warnings() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(&dir.path().join("deviceauth"));
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_config_is_applied() {
        let dir = TempDir::new().unwrap();
        let config_dir = write_config(
            &dir,
            r#"
            [storage]
            data_file = "/srv/requests.json"

            [ui]
            theme = "light"
            font_size = 16.0

            [export]
            csv_file_name = "q1-requests.csv"

            [logging]
            level = "debug"
            "#,
        );

        let (config, warnings) = load_config(&config_dir);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.data_file, Some(PathBuf::from("/srv/requests.json")));
        assert!(!config.dark_mode);
        assert_eq!(config.font_size, 16.0);
        assert_eq!(config.csv_file_name, "q1-requests.csv");
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_warn_and_fall_back() {
        let dir = TempDir::new().unwrap();
        let config_dir = write_config(
            &dir,
            r#"
            [ui]
            theme = "purple"
            font_size = 99.0

            [logging]
            level = "loud"
            "#,
        );

        let (config, warnings) = load_config(&config_dir);
        assert_eq!(warnings.len(), 3);
        assert!(config.dark_mode);
        assert_eq!(config.font_size, constants::DEFAULT_FONT_SIZE);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_unparseable_file_warns_and_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config_dir = write_config(&dir, "[ui\ntheme = ");
        let (config, warnings) = load_config(&config_dir);
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Config parse error"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = TempDir::new().unwrap();
        let config_dir = write_config(&dir, "[future]\nflag = true\n");
        let (_, warnings) = load_config(&config_dir);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_export_name_with_path_separator_rejected() {
        let raw = RawConfig {
            export: ExportSection {
                csv_file_name: Some("../out.csv".to_string()),
            },
            ..Default::default()
        };
        let (config, warnings) = validate_config(raw);
        assert_eq!(config.csv_file_name, constants::DEFAULT_CSV_EXPORT_NAME);
        assert_eq!(warnings.len(), 1);
    }
}
