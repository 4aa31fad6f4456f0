pub mod colors;
pub mod style;

pub use colors::Color;
pub use style::WindowStyle;

use graph_config::ThemeConfig;

/// Compiled chart theme derived from [`ThemeConfig`].
///
/// All colors are pre-parsed from hex strings into normalised `[0, 1]` RGBA.
/// Calling [`Theme::from_config`] is infallible: invalid color strings fall
/// back to safe defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub border:     Color,
    pub grid:       Color,
    pub text:       Color,
    pub title:      Color,
    pub line:       Color,
    /// Area fill under the overall line, alpha already applied.
    pub fill:       Color,
    /// Per-core line colors.  Never empty.
    pub palette:    Vec<Color>,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        let palette: Vec<Color> = cfg
            .core_palette
            .iter()
            .filter_map(|hex| Color::from_hex(hex))
            .collect();
        let palette = if palette.is_empty() {
            default_palette()
        } else {
            palette
        };

        Self {
            background: Color::from_hex(&cfg.background).unwrap_or(Color::BACKGROUND),
            border:     Color::from_hex(&cfg.border).unwrap_or(Color::BORDER),
            grid:       Color::from_hex(&cfg.grid).unwrap_or(Color::GRID),
            text:       Color::from_hex(&cfg.text).unwrap_or(Color::TEXT),
            title:      Color::from_hex(&cfg.title).unwrap_or(Color::TITLE),
            line:       Color::from_hex(&cfg.line).unwrap_or(Color::LINE),
            fill: Color::from_hex(&cfg.fill)
                .unwrap_or(Color::FILL)
                .with_alpha(cfg.fill_opacity),
            palette,
        }
    }

    /// Line color for `core_index`, cycling through the palette.
    pub fn core_color(&self, core_index: usize) -> Color {
        self.palette[core_index % self.palette.len()]
    }

    /// Window chrome colors matching the chart.
    pub fn window_style(&self) -> WindowStyle {
        WindowStyle {
            background: self.background,
            foreground: self.title,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

fn default_palette() -> Vec<Color> {
    ThemeConfig::default()
        .core_palette
        .iter()
        .filter_map(|hex| Color::from_hex(hex))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_colors_cycle() {
        let theme = Theme::default();
        let n = theme.palette.len();
        assert_eq!(n, 20);
        for i in 0..3 * n {
            assert_eq!(theme.core_color(i), theme.core_color(i + n));
        }
        assert_ne!(theme.core_color(0), theme.core_color(1));
    }

    #[test]
    fn invalid_colors_fall_back() {
        let cfg = ThemeConfig {
            line: "not-a-color".into(),
            core_palette: vec!["nope".into()],
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&cfg);
        assert_eq!(theme.line, Color::LINE);
        assert_eq!(theme.palette, default_palette());
    }

    #[test]
    fn fill_uses_configured_opacity() {
        let cfg = ThemeConfig { fill_opacity: 0.5, ..ThemeConfig::default() };
        assert_eq!(Theme::from_config(&cfg).fill.a, 0.5);
    }

    #[test]
    fn short_palette_still_cycles() {
        let cfg = ThemeConfig {
            core_palette: vec!["#ff0000".into(), "#00ff00".into()],
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&cfg);
        assert_eq!(theme.core_color(2), Color::rgb8(0xff, 0, 0));
        assert_eq!(theme.core_color(5), Color::rgb8(0, 0xff, 0));
    }
}
