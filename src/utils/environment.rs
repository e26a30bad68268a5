use std::path::PathBuf;

/// Directory name used under the platform config and data directories
pub const APP_DIR_NAME: &str = "deep-search";

const CONFIG_FILENAME: &str = "config.toml";

/// Default config file location
/// - Linux: `~/.config/deep-search/config.toml`
/// - macOS: `~/Library/Application Support/deep-search/config.toml`
/// - Windows: `%APPDATA%\deep-search\config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILENAME))
}

/// Default directory holding the search history file
/// - Linux: `~/.local/share/deep-search/`
/// - macOS: `~/Library/Application Support/deep-search/`
/// - Windows: `%APPDATA%\deep-search\`
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME))
}
