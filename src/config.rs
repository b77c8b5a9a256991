//! Front-end settings loaded from TOML.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;

const MAX_SETTINGS_FILE_BYTES: u64 = 1_048_576; // 1 MiB

/// How values are printed.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Fixed number of decimals for numeric values
    pub precision: Option<usize>,
    /// Also print each cell's contents
    pub show_contents: bool,
    /// Printed in place of an evaluation error
    pub error_marker: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            precision: None,
            show_contents: false,
            error_marker: "#ERR!".to_string(),
        }
    }
}

/// Load settings from `settings_file`, or from the user config directory.
///
/// Never fails: problems are returned as warnings and defaults are used.
pub fn load_settings(settings_file: Option<&PathBuf>) -> (Settings, Vec<String>) {
    let mut warnings = Vec::new();
    let Some(path) = settings_file.cloned().or_else(user_settings_path) else {
        return (Settings::default(), warnings);
    };

    if !path.exists() {
        if settings_file.is_some() {
            warnings.push(format!("Settings file not found: {}", path.display()));
        }
        return (Settings::default(), warnings);
    }

    let settings = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_SETTINGS_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_SETTINGS_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => match parse_settings(&content) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                    None
                }
            },
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                None
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            None
        }
    };

    (settings.unwrap_or_default(), warnings)
}

fn parse_settings(content: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(content)
}

fn user_settings_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "cellsheet")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("settings.toml");
    Some(path)
}
