use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (poster cache, log file)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Input layout the carousel adapts its navigation affordances to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPreference {
    /// Pointer when mouse capture is available
    #[default]
    Auto,
    /// Hover-capable: arrows appear once the row is interacted with
    Pointer,
    /// No hover concept: arrows are always available
    Touch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Navigation affordance layout
    #[serde(default)]
    pub layout: LayoutPreference,
    /// Download and draw poster images
    #[serde(default = "default_true")]
    pub image_preview: bool,
    /// Theme name
    #[serde(default = "default_theme_name")]
    pub theme: String,
    /// Smooth scrolling configuration
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            layout: LayoutPreference::default(),
            image_preview: default_true(),
            theme: default_theme_name(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curve applied to smooth scroll and entrance transitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the transition
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate row scrolling instead of jumping
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Duration of one smoothed scroll transition
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve for scroll transitions
    #[serde(default)]
    pub easing: EasingType,
    /// Fraction of the viewport width moved per directional command
    #[serde(default = "default_step_fraction")]
    pub step_fraction: f64,
    /// Frame rate while an animation is in flight
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            step_fraction: default_step_fraction(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Card width in layout units (terminal columns)
    #[serde(default = "default_card_width")]
    pub card_width: f64,
    /// Space between cards in layout units
    #[serde(default = "default_card_gutter")]
    pub card_gutter: f64,
    /// Delay between successive cards of a row entrance
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,
    /// Entrance delay of the first row
    #[serde(default = "default_row_entrance_delay_ms")]
    pub row_entrance_delay_ms: u64,
    /// Extra entrance delay for each following row
    #[serde(default = "default_row_delay_step_ms")]
    pub row_delay_step_ms: u64,
    /// Duration of a single card's entrance
    #[serde(default = "default_entrance_duration_ms")]
    pub entrance_duration_ms: u64,
    /// Image shown when a poster cannot be loaded
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            card_width: default_card_width(),
            card_gutter: default_card_gutter(),
            stagger_ms: default_stagger_ms(),
            row_entrance_delay_ms: default_row_entrance_delay_ms(),
            row_delay_step_ms: default_row_delay_step_ms(),
            entrance_duration_ms: default_entrance_duration_ms(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

/// Where the page payload comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    /// Built-in deterministic fixture data
    #[default]
    Mock,
    /// JSON payload on disk
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: CatalogKind,
    /// JSON payload path (for the file source)
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Simulated fetch latency of the mock source
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Seed for generated ratings and watch progress
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: CatalogKind::default(),
            path: None,
            latency_ms: default_latency_ms(),
            seed: default_seed(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "<S-Left>" (Shift+Left), "<CR>" (Enter), "<Esc>", "<Tab>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Focus the previous card in the row
    #[serde(default = "default_key_card_left")]
    pub card_left: String,
    /// Focus the next card in the row
    #[serde(default = "default_key_card_right")]
    pub card_right: String,
    /// Focus the row above
    #[serde(default = "default_key_row_up")]
    pub row_up: String,
    /// Focus the row below
    #[serde(default = "default_key_row_down")]
    pub row_down: String,
    /// Scroll the focused row left by one step
    #[serde(default = "default_key_scroll_left")]
    pub scroll_left: String,
    /// Scroll the focused row right by one step
    #[serde(default = "default_key_scroll_right")]
    pub scroll_right: String,
    /// Jump to the first row
    #[serde(default = "default_key_first_row")]
    pub first_row: String,
    /// Jump to the last row
    #[serde(default = "default_key_last_row")]
    pub last_row: String,
    /// Activate the play affordance of the focused card
    #[serde(default = "default_key_select")]
    pub select: String,
    /// Reload the page payload
    #[serde(default = "default_key_reload")]
    pub reload: String,
    /// Refresh row data in place, without replaying entrances
    #[serde(default = "default_key_refresh")]
    pub refresh: String,
    /// Toggle pointer/touch layout
    #[serde(default = "default_key_toggle_layout")]
    pub toggle_layout: String,
    /// Show the help overlay
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            card_left: default_key_card_left(),
            card_right: default_key_card_right(),
            row_up: default_key_row_up(),
            row_down: default_key_row_down(),
            scroll_left: default_key_scroll_left(),
            scroll_right: default_key_scroll_right(),
            first_row: default_key_first_row(),
            last_row: default_key_last_row(),
            select: default_key_select(),
            reload: default_key_reload(),
            refresh: default_key_refresh(),
            toggle_layout: default_key_toggle_layout(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_card_left() -> String { "h".to_string() }
fn default_key_card_right() -> String { "l".to_string() }
fn default_key_row_up() -> String { "k".to_string() }
fn default_key_row_down() -> String { "j".to_string() }
fn default_key_scroll_left() -> String { "H".to_string() }
fn default_key_scroll_right() -> String { "L".to_string() }
fn default_key_first_row() -> String { "gg".to_string() }
fn default_key_last_row() -> String { "G".to_string() }
fn default_key_select() -> String { "<CR>".to_string() }
fn default_key_reload() -> String { "r".to_string() }
fn default_key_refresh() -> String { "R".to_string() }
fn default_key_toggle_layout() -> String { "t".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cinerow")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_theme_name() -> String {
    "cinema".to_string()
}

fn default_scroll_duration() -> u64 {
    300
}

fn default_step_fraction() -> f64 {
    0.7
}

fn default_animation_fps() -> u32 {
    60
}

fn default_card_width() -> f64 {
    18.0
}

fn default_card_gutter() -> f64 {
    2.0
}

fn default_stagger_ms() -> u64 {
    50
}

fn default_row_entrance_delay_ms() -> u64 {
    200
}

fn default_row_delay_step_ms() -> u64 {
    100
}

fn default_entrance_duration_ms() -> u64 {
    300
}

fn default_placeholder_image() -> String {
    "https://via.placeholder.com/300x450?text=No+Image".to_string()
}

fn default_latency_ms() -> u64 {
    800
}

fn default_seed() -> u64 {
    2024
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaulting when it is absent
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/cinerow/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("cinerow")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("cinerow.log")
    }

    /// Poster disk cache directory
    pub fn poster_cache_dir(&self) -> PathBuf {
        self.data_dir().join("posters")
    }

    /// Catalog file path (with tilde expansion)
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog.path.as_deref().map(expand_tilde)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert!(config.ui.scroll.smooth_enabled);
        assert!((config.ui.scroll.step_fraction - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.carousel.stagger_ms, 50);
        assert_eq!(config.carousel.row_entrance_delay_ms, 200);
        assert_eq!(config.catalog.source, CatalogKind::Mock);
        assert_eq!(config.keymap.select, "<CR>");
    }

    #[test]
    fn test_partial_document() {
        let config = AppConfig::from_toml(
            r#"
            [ui]
            layout = "touch"

            [ui.scroll]
            easing = "ease_out"
            smooth_enabled = false

            [catalog]
            source = "file"
            path = "/tmp/page.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.ui.layout, LayoutPreference::Touch);
        assert_eq!(config.ui.scroll.easing, EasingType::EaseOut);
        assert!(!config.ui.scroll.smooth_enabled);
        assert_eq!(config.ui.scroll.animation_duration_ms, 300);
        assert_eq!(config.catalog.source, CatalogKind::File);
        assert_eq!(config.catalog_path(), Some(PathBuf::from("/tmp/page.json")));
    }

    #[test]
    fn test_invalid_document_is_config_error() {
        let err = AppConfig::from_toml("[ui]\nlayout = 7").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_round_trip_defaults() {
        let content = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let config = AppConfig::from_toml(&content).unwrap();
        assert_eq!(config.carousel.card_width, 18.0);
        assert_eq!(config.keymap.first_row, "gg");
    }
}
