//! Editor settings from `settings.toml`.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use theatre_grid_core::EditorSettings;

/// Load settings from `settings_file`, or from the user config dir when no
/// file is given. Problems are reported as warnings and fall back to the
/// defaults; a missing user file is not a problem.
pub fn load_settings(settings_file: Option<&Path>) -> (EditorSettings, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let config_path = settings_file
        .map(Path::to_path_buf)
        .or_else(user_settings_path);

    let Some(path) = config_path else {
        return (EditorSettings::default(), warnings);
    };
    if !path.exists() {
        if settings_file.is_some() {
            warnings.push(format!("Settings file not found: {}", path.display()));
        }
        return (EditorSettings::default(), warnings);
    }

    let settings = match std::fs::read_to_string(&path) {
        Ok(content) => match parse_settings(&content) {
            Ok(settings) => settings,
            Err(err) => {
                warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                EditorSettings::default()
            }
        },
        Err(err) => {
            warnings.push(format!("Failed to read {}: {}", path.display(), err));
            EditorSettings::default()
        }
    };
    warnings.extend(sanity_warnings(&settings));
    (settings, warnings)
}

fn parse_settings(content: &str) -> Result<EditorSettings, toml::de::Error> {
    toml::from_str(content)
}

fn sanity_warnings(settings: &EditorSettings) -> Vec<String> {
    let mut warnings = Vec::new();
    if settings.default_column_width < settings.min_column_width {
        warnings.push(format!(
            "default_column_width {} is below min_column_width {}",
            settings.default_column_width, settings.min_column_width
        ));
    }
    if settings.default_row_height < settings.min_row_height {
        warnings.push(format!(
            "default_row_height {} is below min_row_height {}",
            settings.default_row_height, settings.min_row_height
        ));
    }
    warnings
}

fn user_settings_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "theatre-grid")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("settings.toml");
    Some(path)
}
