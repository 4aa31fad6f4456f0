use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Root configuration structure parsed from `cpugraph.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Sampling and history settings.
    pub monitor: MonitorConfig,
    /// Canvas dimensions.
    pub window: WindowConfig,
    /// Chart colors.
    pub theme: ThemeConfig,
}

/// Sampling, history and view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Update interval in milliseconds.
    pub interval_ms: u64,
    /// Length of the visible history window in seconds.
    pub history_secs: u64,
    /// Start in per-core view.
    pub per_core: bool,
    /// Maximum cores shown in per-core view (`0` = all).
    pub max_cores: usize,
    /// Which sampling backend to use.
    pub sampler: SamplerPreference,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_ms:  500,
            history_secs: 60,
            per_core:     false,
            max_cores:    0,
            sampler:      SamplerPreference::Auto,
        }
    }
}

/// Sampling backend preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SamplerPreference {
    /// `sysinfo` where supported, else the Linux `/proc/stat` reader.
    #[default]
    Auto,
    Sysinfo,
    ProcStat,
}

impl FromStr for SamplerPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto"                   => Ok(Self::Auto),
            "sysinfo"                => Ok(Self::Sysinfo),
            "proc-stat" | "procstat" => Ok(Self::ProcStat),
            other => Err(format!(
                "unknown sampler '{other}' (expected auto, sysinfo or proc-stat)"
            )),
        }
    }
}

impl fmt::Display for SamplerPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto     => "auto",
            Self::Sysinfo  => "sysinfo",
            Self::ProcStat => "proc-stat",
        })
    }
}

/// Canvas size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width:  u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width:  900,
            height: 345,
        }
    }
}

/// Chart colors as hex strings (`#RRGGBB` or `#RRGGBBAA`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Canvas background.
    pub background: String,
    /// Plot border and time-axis ticks.
    pub border: String,
    /// Horizontal gridlines.
    pub grid: String,
    /// Axis and legend labels.
    pub text: String,
    /// Chart title.
    pub title: String,
    /// Overall usage line.
    pub line: String,
    /// Area under the overall line.
    pub fill: String,
    /// Opacity of the area fill (0.0 – 1.0).
    pub fill_opacity: f32,
    /// Per-core line colors, assigned cyclically by core index.
    pub core_palette: Vec<String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background:   "#0f1115".to_string(),
            border:       "#2a2f3a".to_string(),
            grid:         "#1c2029".to_string(),
            text:         "#9aa0aa".to_string(),
            title:        "#d7dde7".to_string(),
            line:         "#6fa8ff".to_string(),
            fill:         "#264b8a".to_string(),
            fill_opacity: 0.25,
            core_palette: [
                "#6fa8ff", "#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4",
                "#feca57", "#ff9ff3", "#54a0ff", "#5f27cd", "#00d2d3",
                "#ff9f43", "#10ac84", "#a55eea", "#26de81", "#fd79a8",
                "#fdcb6e", "#6c5ce7", "#fd9644", "#e17055", "#74b9ff",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}
