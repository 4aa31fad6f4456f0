//! Iced window for `cpugraph`.
//!
//! Owns the application loop and wires together:
//! - the sampling timer (one `Tick` per configured interval)
//! - keyboard shortcuts
//! - the config file watcher (live theme reload)

pub mod canvas;
pub mod monitor;

pub use monitor::{ChartData, Monitor, INITIAL_STATUS};

use crate::canvas::ChartCanvas;
use chrono::Local;
use futures::channel::mpsc::Sender;
use graph_config::{load as load_config, AppConfig, ConfigWatcher, ThemeConfig};
use graph_core::{
    event::Message as AppMessage, CpuData, CpuSource, GraphError, Result, RunState, ViewMode,
};
use graph_theme::Theme;
use iced::{
    keyboard::{self, key::Named, Key, Modifiers},
    widget::{button, column, container, row, text, Canvas},
    Alignment, Element, Length, Size, Subscription, Task,
};
use std::{path::PathBuf, sync::Mutex, time::Duration};
use tracing::{debug, info, warn};

/// Height reserved below the chart for the status line and buttons.
const CONTROLS_HEIGHT: f32 = 80.0;

type BoxedSource = Box<dyn CpuSource + Send>;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Open the monitor window and run until it is closed.
///
/// `config` is the effective configuration (command-line overrides applied);
/// `file_config` is what `config_path` held at startup, the baseline that
/// live reloads are compared against.
pub fn run<S>(
    config: AppConfig,
    file_config: AppConfig,
    config_path: PathBuf,
    sampler: S,
) -> iced::Result
where
    S: CpuSource + Send + 'static,
{
    let size = Size::new(
        config.window.width as f32,
        config.window.height as f32 + CONTROLS_HEIGHT,
    );

    // `boot` may be called more than once by the runtime; the sampler can only
    // be handed over the first time.
    let slot: Mutex<Option<BoxedSource>> = Mutex::new(Some(Box::new(sampler)));
    let boot = move || {
        let source = slot
            .lock()
            .ok()
            .and_then(|mut guard| guard.take())
            .unwrap_or_else(|| {
                warn!("CPU sampler already handed to an earlier window; sampling is unavailable");
                Box::new(Unavailable)
            });
        App::new(source, config.clone(), file_config.clone(), config_path.clone())
    };

    iced::application(boot, App::update, App::view)
        .title("CPU Utilization Monitor")
        .subscription(App::subscription)
        .style(App::style)
        .window_size(size)
        .resizable(false)
        .run()
}

// ── Message ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Message {
    /// Propagate a core event-bus message.
    App(AppMessage),
    KeyEvent(keyboard::Event),
}

/// Map a key press to its shortcut, if any.
///
/// Shortcuts ignore presses with Ctrl/Alt/Logo held so they don't shadow
/// system bindings.
pub fn shortcut(key: &Key, modifiers: Modifiers) -> Option<AppMessage> {
    if modifiers.control() || modifiers.alt() || modifiers.logo() {
        return None;
    }
    match key {
        Key::Named(Named::Space) => Some(AppMessage::TogglePause),
        Key::Character(c) => match c.to_ascii_lowercase().as_str() {
            "c" => Some(AppMessage::Clear),
            "v" => Some(AppMessage::ToggleView),
            "q" => Some(AppMessage::Quit),
            _ => None,
        },
        _ => None,
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

struct App {
    monitor:     Monitor<BoxedSource>,
    theme:       Theme,
    config:      AppConfig,
    /// Config file contents at startup, without command-line overrides.
    file_config: AppConfig,
    config_path: PathBuf,
}

impl App {
    fn new(
        source: BoxedSource,
        config: AppConfig,
        file_config: AppConfig,
        config_path: PathBuf,
    ) -> (Self, Task<Message>) {
        let app = Self {
            monitor: Monitor::new(source, &config.monitor),
            theme: Theme::from_config(&config.theme),
            config,
            file_config,
            config_path,
        };
        info!(
            "monitoring every {} ms over {} s",
            app.config.monitor.interval_ms, app.config.monitor.history_secs
        );

        // Sample straight away instead of waiting a full interval.
        (app, Task::done(Message::App(AppMessage::Tick)))
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::App(msg) => self.handle_app(msg),
            Message::KeyEvent(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                match shortcut(&key, modifiers) {
                    Some(msg) => self.handle_app(msg),
                    None => Task::none(),
                }
            }
            Message::KeyEvent(_) => Task::none(),
        }
    }

    fn handle_app(&mut self, msg: AppMessage) -> Task<Message> {
        match msg {
            AppMessage::Tick => {
                self.monitor.on_tick(Local::now().time());
            }
            AppMessage::TogglePause => {
                self.monitor.toggle_pause();
            }
            AppMessage::Clear => self.monitor.clear(),
            AppMessage::ToggleView => {
                self.monitor.toggle_view();
            }
            AppMessage::Quit => {
                info!("quit requested");
                return iced::exit();
            }
            AppMessage::ConfigReloaded => self.reload_config(),
        }
        Task::none()
    }

    /// Apply the theme from a changed config file; everything else is fixed
    /// for the lifetime of the process.
    fn reload_config(&mut self) {
        match load_config(&self.config_path) {
            Ok(file) => {
                let (theme, ignored) = reload(&self.file_config, file);
                if ignored {
                    warn!("Config reload: only [theme] changes apply while running; restart for the rest");
                }
                info!("Config reloaded");
                self.theme = Theme::from_config(&theme);
                self.file_config.theme = theme.clone();
                self.config.theme = theme;
            }
            Err(e) => warn!("Config reload failed: {e}"),
        }
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let chart = Canvas::new(ChartCanvas {
            data:  self.monitor.chart_data(),
            theme: &self.theme,
        })
        .width(Length::Fixed(self.config.window.width as f32))
        .height(Length::Fixed(self.config.window.height as f32));

        let pause_label = match self.monitor.run_state() {
            RunState::Running => "Pause",
            RunState::Paused  => "Resume",
        };
        let view_label = match self.monitor.view() {
            ViewMode::Overall => "Per-Core",
            ViewMode::PerCore => "Overall",
        };

        let controls = row![
            control(pause_label, AppMessage::TogglePause),
            control("Clear", AppMessage::Clear),
            control(view_label, AppMessage::ToggleView),
            control("Quit", AppMessage::Quit),
        ]
        .spacing(8);

        let status = text(self.monitor.status())
            .size(13.0)
            .font(iced::Font::MONOSPACE);

        container(
            column![chart, status, controls]
                .spacing(8)
                .align_x(Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        let interval = Duration::from_millis(self.config.monitor.interval_ms);
        let tick = iced::time::every(interval).map(|_| Message::App(AppMessage::Tick));

        Subscription::batch([
            tick,
            keyboard::listen().map(Message::KeyEvent),
            Subscription::run_with(self.config_path.clone(), config_stream),
        ])
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        self.theme.window_style().to_iced()
    }
}

/// Split a reloaded config file against the startup baseline.
///
/// Returns the theme to apply and whether `[monitor]` or `[window]` changed,
/// which only takes effect after a restart.
fn reload(baseline: &AppConfig, file: AppConfig) -> (ThemeConfig, bool) {
    let ignored = file.monitor != baseline.monitor || file.window != baseline.window;
    (file.theme, ignored)
}

fn control(label: &str, msg: AppMessage) -> Element<'_, Message> {
    button(text(label).size(14.0))
        .on_press(Message::App(msg))
        .width(Length::Fixed(90.0))
        .into()
}

// ── Subscription streams ──────────────────────────────────────────────────────

/// Watches the config file for writes and sends `ConfigReloaded`.
fn config_stream(path: &PathBuf) -> impl iced::futures::Stream<Item = Message> {
    let path = path.clone();
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let (watcher, mut rx) = ConfigWatcher::spawn(&path);
        debug!("forwarding changes to {}", watcher.path().display());

        while rx.recv().await.is_some() {
            let _ = sender.try_send(Message::App(AppMessage::ConfigReloaded));
        }

        // Watcher gave up (e.g. config directory missing); stall rather than end.
        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Stand-in when the sampler has already been handed to an earlier boot.
struct Unavailable;

impl CpuSource for Unavailable {
    fn sample_overall(&mut self) -> Result<f32> {
        Err(GraphError::Sampler("CPU sampler is no longer available".into()))
    }

    fn sample_all(&mut self, _core_limit: usize) -> Result<CpuData> {
        self.sample_overall().map(CpuData::overall_only)
    }

    fn core_count(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(c: &str) -> Key {
        Key::Character(c.into())
    }

    #[test]
    fn shortcuts_map_to_actions() {
        let none = Modifiers::empty();
        assert_eq!(shortcut(&Key::Named(Named::Space), none), Some(AppMessage::TogglePause));
        assert_eq!(shortcut(&ch("c"), none), Some(AppMessage::Clear));
        assert_eq!(shortcut(&ch("v"), none), Some(AppMessage::ToggleView));
        assert_eq!(shortcut(&ch("q"), none), Some(AppMessage::Quit));
        assert_eq!(shortcut(&ch("x"), none), None);
    }

    #[test]
    fn shortcuts_accept_shift() {
        assert_eq!(shortcut(&ch("Q"), Modifiers::SHIFT), Some(AppMessage::Quit));
    }

    #[test]
    fn shortcuts_ignore_system_modifiers() {
        assert_eq!(shortcut(&ch("q"), Modifiers::CTRL), None);
        assert_eq!(shortcut(&ch("c"), Modifiers::ALT), None);
    }

    #[test]
    fn reload_applies_theme_only() {
        let baseline = AppConfig::default();
        let mut file = AppConfig::default();
        file.theme.line = "#ff0000".into();
        file.monitor.interval_ms = 2000;

        let (theme, ignored) = reload(&baseline, file);
        assert_eq!(theme.line, "#ff0000");
        assert!(ignored);
    }

    #[test]
    fn theme_edit_with_cli_overrides_is_not_flagged() {
        // Startup file plus `-i 1000 -w 1200`: the effective config differs
        // from the file, but reloads compare against the file.
        let baseline = AppConfig::default();
        let mut effective = baseline.clone();
        effective.monitor.interval_ms = 1000;
        effective.window.width = 1200;

        let mut file = baseline.clone();
        file.theme.fill_opacity = 0.5;

        let (theme, ignored) = reload(&baseline, file);
        assert_eq!(theme.fill_opacity, 0.5);
        assert!(!ignored);
        assert_ne!(effective.monitor, baseline.monitor);
    }

    #[test]
    fn unchanged_file_reloads_quietly() {
        let baseline = AppConfig::default();
        let (theme, ignored) = reload(&baseline, baseline.clone());
        assert_eq!(theme, baseline.theme);
        assert!(!ignored);
    }

    #[test]
    fn unavailable_source_reports_error() {
        let mut source = Unavailable;
        assert!(matches!(source.sample_all(0), Err(GraphError::Sampler(_))));
    }
}
