use phf::phf_map;
use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use xdg::BaseDirectories;

/// File name of the stored values under the XDG data home
const DEFAULT_STORAGE_FILE: &str = "values.toml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    /// Tree description to load; the bundled demo tree when unset
    pub tree_file: Option<String>,
    /// Values file; `values.toml` under the XDG data home when unset
    pub storage_file: Option<String>,
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color_optional")]
    pub header_fg: Option<Color>,
    /// Draw check marks and arrows with unicode glyphs instead of ASCII
    pub use_unicode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            tree_file: None,
            storage_file: None,
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            selection_fg: Color::Rgb(255, 165, 0), // Orange
            header_fg: None,
            use_unicode: true,
        }
    }
}

impl ThemeConfig {
    /// Section header color, 30% darker than the selection color if not set
    pub fn header_fg(&self) -> Color {
        self.header_fg
            .unwrap_or_else(|| darken_color(self.selection_fg, 0.7))
    }

    pub fn display(&self) -> DisplayConfig {
        DisplayConfig {
            use_unicode: self.use_unicode,
            selection_fg: self.selection_fg,
            header_fg: self.header_fg(),
            muted_fg: Color::DarkGray,
        }
    }
}

/// Resolved colors and glyph choice handed to the widgets
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub use_unicode: bool,
    pub selection_fg: Color,
    pub header_fg: Color,
    /// Footers, placeholders and disabled rows
    pub muted_fg: Color,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        ThemeConfig::default().display()
    }
}

impl Config {
    /// Resolved values file path
    pub fn storage_path(&self) -> Option<PathBuf> {
        match &self.storage_file {
            Some(path) => Some(PathBuf::from(path)),
            None => get_data_path(),
        }
    }
}

/// Darken a color by a given factor (0.0 = black, 1.0 = original)
fn darken_color(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let r = (r as f32 * factor) as u8;
            let g = (g as f32 * factor) as u8;
            let b = (b as f32 * factor) as u8;
            Color::Rgb(r, g, b)
        }
        other => other,
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", s)))
}

fn deserialize_color_optional<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(color_str) => {
            let color = parse_color(&color_str)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", color_str)))?;
            Ok(Some(color))
        }
        None => Ok(None),
    }
}

static NAMED_COLORS: phf::Map<&'static str, Color> = phf_map! {
    "black" => Color::Black,
    "red" => Color::Red,
    "green" => Color::Green,
    "yellow" => Color::Yellow,
    "blue" => Color::Blue,
    "magenta" => Color::Magenta,
    "cyan" => Color::Cyan,
    "gray" => Color::Gray,
    "grey" => Color::Gray,
    "darkgray" => Color::DarkGray,
    "darkgrey" => Color::DarkGray,
    "lightred" => Color::LightRed,
    "lightgreen" => Color::LightGreen,
    "lightyellow" => Color::LightYellow,
    "lightblue" => Color::LightBlue,
    "lightmagenta" => Color::LightMagenta,
    "lightcyan" => Color::LightCyan,
    "white" => Color::White,
    "orange" => Color::Rgb(255, 165, 0),
};

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: "red", "blue", "cyan", "orange", etc.
/// - Hex colors: "#FF6600", "#f60"
/// - RGB tuples: "255,165,0"
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    if let Some(color) = NAMED_COLORS.get(s.as_str()) {
        return Some(*color);
    }

    if let Some(hex) = s.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        } else if hex.len() == 3 {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        }
    }

    if s.contains(',') {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() == 3 {
            let r = parts[0].trim().parse::<u8>().ok()?;
            let g = parts[1].trim().parse::<u8>().ok()?;
            let b = parts[2].trim().parse::<u8>().ok()?;
            return Some(Color::Rgb(r, g, b));
        }
    }

    None
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

pub fn get_data_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let data_home = xdg_dirs.get_data_home()?;
    Some(data_home.join(DEFAULT_STORAGE_FILE))
}

pub fn read() -> Config {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Config::default(),
    };

    if !config_path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };

    toml::from_str(&content).unwrap_or_else(|_| Config::default())
}
