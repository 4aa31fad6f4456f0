/// All messages (events) that can flow through the application.
///
/// Sources:
/// - Timer subscription  → `Tick`
/// - Control buttons     → `TogglePause`, `Clear`, `ToggleView`, `Quit`
/// - Config watcher task → `ConfigReloaded`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    // ── Timer ─────────────────────────────────────────────────────────────────
    /// Fires once per configured interval; samples and redraws when running.
    Tick,

    // ── User actions ──────────────────────────────────────────────────────────
    /// Pause / resume button.
    TogglePause,
    /// Clear button: zeroes every history.
    Clear,
    /// Per-Core / Overall button.
    ToggleView,
    /// Quit button: closes the window.
    Quit,

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk; triggers a live theme reload.
    ConfigReloaded,
}
