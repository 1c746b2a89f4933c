use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::nav::TabDescriptor;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Row height per column of cell width. Terminal cells are roughly twice
    /// as tall as they are wide, so a square image needs half as many rows.
    #[serde(default = "default_cell_vertical_scale")]
    pub cell_vertical_scale: f64,
    /// Tab underline animation
    #[serde(default)]
    pub indicator: IndicatorConfig,
    /// Swipeable content pager
    #[serde(default)]
    pub pager: PagerConfig,
    /// Outer (vertical) smooth scrolling
    #[serde(default)]
    pub scroll: ScrollConfig,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            cell_vertical_scale: default_cell_vertical_scale(),
            indicator: IndicatorConfig::default(),
            pager: PagerConfig::default(),
            scroll: ScrollConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Easing curve used by every animation in the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingType {
    /// Jump at the end
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

/// Outer list smooth scrolling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Lines moved per step when smooth scrolling is off
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_indicator_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Underline width as a fraction of one tab cell (0, 1]
    #[serde(default = "default_indicator_width_ratio")]
    pub width_ratio: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_indicator_duration(),
            easing: EasingType::default(),
            width_ratio: default_indicator_width_ratio(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Fraction of a page a drag must cover before release commits to the
    /// neighbouring page
    #[serde(default = "default_commit_threshold")]
    pub commit_threshold: f64,
    #[serde(default = "default_settle_duration")]
    pub settle_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            commit_threshold: default_commit_threshold(),
            settle_duration_ms: default_settle_duration(),
            easing: EasingType::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either a bare theme name or a table with `name` and `colors`
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Optional color overrides, hex strings ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub bg0: Option<String>,
    pub bg1: Option<String>,
    pub bg2: Option<String>,
    pub fg0: Option<String>,
    pub fg1: Option<String>,
    pub accent: Option<String>,
    /// Tab underline
    pub indicator: Option<String>,
    /// Inactive tab icons and secondary labels
    pub muted: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
    pub info: Option<String>,
}

/// Static profile data shown in the header. Supplied as plain data,
/// never computed by the screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_display_name")]
    pub display_name: String,
    #[serde(default = "default_bio")]
    pub bio: String,
    #[serde(default = "default_avatar_url")]
    pub avatar_url: String,
    #[serde(default = "default_count")]
    pub posts: u64,
    #[serde(default = "default_count")]
    pub followers: u64,
    #[serde(default = "default_count")]
    pub following: u64,
    #[serde(default = "default_highlight_count")]
    pub highlight_count: usize,
    #[serde(default = "default_highlight_image_url")]
    pub highlight_image_url: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            display_name: default_display_name(),
            bio: default_bio(),
            avatar_url: default_avatar_url(),
            posts: default_count(),
            followers: default_count(),
            following: default_count(),
            highlight_count: default_highlight_count(),
            highlight_image_url: default_highlight_image_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Items generated per category
    #[serde(default = "default_items_per_category")]
    pub items_per_category: usize,
    /// Grid columns
    #[serde(default = "default_columns")]
    pub columns: u16,
    /// Image URL template, `{n}` is replaced by `offset + index`
    #[serde(default = "default_image_template")]
    pub image_template: String,
    /// Categories in tab order
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryConfig>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            items_per_category: default_items_per_category(),
            columns: default_columns(),
            image_template: default_image_template(),
            categories: default_categories(),
        }
    }
}

/// One content category: its tab plus the parameters of its grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub icon: String,
    /// Added to the item index to pick the image
    #[serde(default)]
    pub offset: u32,
    /// Cell height / cell width
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: f64,
}

impl CategoryConfig {
    pub fn tab(&self) -> TabDescriptor {
        TabDescriptor::new(&self.key, &self.title, &self.icon)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Fixed delay of the placeholder refresh
    #[serde(default = "default_refresh_delay")]
    pub delay_ms: u64,
    /// Rows of overscroll at the top that trigger a refresh
    #[serde(default = "default_pull_threshold")]
    pub pull_threshold: u16,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_refresh_delay(),
            pull_threshold: default_pull_threshold(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "<S-g>" (Shift+g), "<CR>" (Enter), "<Esc>", "<Tab>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,

    // Tabs (taps)
    /// Activate the next tab
    #[serde(default = "default_key_next_tab")]
    pub next_tab: String,
    /// Activate the previous tab
    #[serde(default = "default_key_prev_tab")]
    pub prev_tab: String,

    // Content pager (swipes)
    /// Swipe to the next pane
    #[serde(default = "default_key_swipe_next")]
    pub swipe_next: String,
    /// Swipe to the previous pane
    #[serde(default = "default_key_swipe_prev")]
    pub swipe_prev: String,

    // Outer scroll
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
    #[serde(default = "default_key_scroll_half_down")]
    pub scroll_half_down: String,
    #[serde(default = "default_key_scroll_half_up")]
    pub scroll_half_up: String,
    #[serde(default = "default_key_scroll_page_down")]
    pub scroll_page_down: String,
    #[serde(default = "default_key_scroll_page_up")]
    pub scroll_page_up: String,
    /// Jump to top
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    /// Jump to bottom
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,

    // Highlight strip
    #[serde(default = "default_key_highlights_left")]
    pub highlights_left: String,
    #[serde(default = "default_key_highlights_right")]
    pub highlights_right: String,

    /// Pull-to-refresh equivalent
    #[serde(default = "default_key_refresh")]
    pub refresh: String,
    /// Show key help
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next_tab: default_key_next_tab(),
            prev_tab: default_key_prev_tab(),
            swipe_next: default_key_swipe_next(),
            swipe_prev: default_key_swipe_prev(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
            scroll_half_down: default_key_scroll_half_down(),
            scroll_half_up: default_key_scroll_half_up(),
            scroll_page_down: default_key_scroll_page_down(),
            scroll_page_up: default_key_scroll_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            highlights_left: default_key_highlights_left(),
            highlights_right: default_key_highlights_right(),
            refresh: default_key_refresh(),
            help: default_key_help(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_next_tab() -> String { "<Tab>".to_string() }
fn default_key_prev_tab() -> String { "<S-Tab>".to_string() }
fn default_key_swipe_next() -> String { "l".to_string() }
fn default_key_swipe_prev() -> String { "h".to_string() }
fn default_key_scroll_down() -> String { "j".to_string() }
fn default_key_scroll_up() -> String { "k".to_string() }
fn default_key_scroll_half_down() -> String { "<C-d>".to_string() }
fn default_key_scroll_half_up() -> String { "<C-u>".to_string() }
fn default_key_scroll_page_down() -> String { "<C-f>".to_string() }
fn default_key_scroll_page_up() -> String { "<C-b>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_highlights_left() -> String { "<".to_string() }
fn default_key_highlights_right() -> String { ">".to_string() }
fn default_key_refresh() -> String { "r".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
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

fn default_cell_vertical_scale() -> f64 {
    0.5
}

fn default_scroll_duration() -> u64 {
    150
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u32 {
    60
}

fn default_indicator_duration() -> u64 {
    250
}

fn default_indicator_width_ratio() -> f64 {
    0.5
}

fn default_commit_threshold() -> f64 {
    0.5
}

fn default_settle_duration() -> u64 {
    200
}

fn default_display_name() -> String {
    "John Doe".to_string()
}

fn default_bio() -> String {
    "Lorem ipsum dolor sit amet consectetur adipisicing elit. Quisquam, quos.".to_string()
}

fn default_avatar_url() -> String {
    "https://picsum.photos/200/200".to_string()
}

fn default_count() -> u64 {
    100
}

fn default_highlight_count() -> usize {
    10
}

fn default_highlight_image_url() -> String {
    "https://picsum.photos/100/100".to_string()
}

fn default_items_per_category() -> usize {
    21
}

fn default_columns() -> u16 {
    3
}

fn default_image_template() -> String {
    "https://picsum.photos/200/200?random={n}".to_string()
}

fn default_aspect_ratio() -> f64 {
    1.0
}

fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig {
            key: "grid".to_string(),
            title: "Posts".to_string(),
            icon: "grid-on".to_string(),
            offset: 1,
            aspect_ratio: 1.0,
        },
        CategoryConfig {
            key: "reels".to_string(),
            title: "Reels".to_string(),
            icon: "video-library".to_string(),
            offset: 50,
            aspect_ratio: 2.0,
        },
        CategoryConfig {
            key: "tagged".to_string(),
            title: "Tagged".to_string(),
            icon: "tag".to_string(),
            offset: 100,
            aspect_ratio: 1.0,
        },
    ]
}

fn default_refresh_delay() -> u64 {
    2000
}

fn default_pull_threshold() -> u16 {
    3
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
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Reject values the screen cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.content.categories.is_empty() {
            return Err(crate::Error::Config(
                "at least one content category is required".to_string(),
            ));
        }
        if self.content.columns == 0 {
            return Err(crate::Error::Config("content.columns must be at least 1".to_string()));
        }
        if let Some(bad) = self
            .content
            .categories
            .iter()
            .find(|c| !(c.aspect_ratio.is_finite() && c.aspect_ratio > 0.0))
        {
            return Err(crate::Error::Config(format!(
                "category '{}' has an invalid aspect_ratio",
                bad.key
            )));
        }
        let ratio = self.ui.indicator.width_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(crate::Error::Config(
                "ui.indicator.width_ratio must be in (0, 1]".to_string(),
            ));
        }
        let threshold = self.ui.pager.commit_threshold;
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(crate::Error::Config(
                "ui.pager.commit_threshold must be in (0, 1)".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/folio/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("folio")
            .join("config.toml")
    }

    /// Log file written while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("folio.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
