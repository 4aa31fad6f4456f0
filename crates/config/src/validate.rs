use crate::schema::AppConfig;
use graph_core::{GraphError, Result};

pub const MIN_INTERVAL_MS:  u64   = 100;
pub const MAX_INTERVAL_MS:  u64   = 10_000;
pub const MIN_HISTORY_SECS: u64   = 10;
pub const MAX_HISTORY_SECS: u64   = 3_600;
pub const MIN_WIDTH:        u32   = 400;
pub const MIN_HEIGHT:       u32   = 200;
pub const MAX_CORES:        usize = 64;

/// Check every bounded setting, reporting the first violation.
pub fn validate(config: &AppConfig) -> Result<()> {
    let monitor = &config.monitor;
    let window = &config.window;

    if monitor.interval_ms < MIN_INTERVAL_MS {
        return Err(invalid(format!(
            "update interval must be at least {MIN_INTERVAL_MS}ms for a responsive UI"
        )));
    }
    if monitor.interval_ms > MAX_INTERVAL_MS {
        return Err(invalid(format!(
            "update interval should not exceed {MAX_INTERVAL_MS}ms"
        )));
    }
    if monitor.history_secs < MIN_HISTORY_SECS {
        return Err(invalid(format!(
            "time window must be at least {MIN_HISTORY_SECS} seconds"
        )));
    }
    if monitor.history_secs > MAX_HISTORY_SECS {
        return Err(invalid(format!(
            "time window should not exceed 1 hour ({MAX_HISTORY_SECS} seconds)"
        )));
    }
    if window.width < MIN_WIDTH {
        return Err(invalid(format!("canvas width must be at least {MIN_WIDTH} pixels")));
    }
    if window.height < MIN_HEIGHT {
        return Err(invalid(format!("canvas height must be at least {MIN_HEIGHT} pixels")));
    }
    if monitor.max_cores > MAX_CORES {
        return Err(invalid(format!(
            "maximum cores display limit is {MAX_CORES} (0 shows all cores)"
        )));
    }
    if !(0.0..=1.0).contains(&config.theme.fill_opacity) {
        return Err(invalid("theme fill_opacity must be between 0.0 and 1.0".to_string()));
    }

    Ok(())
}

fn invalid(msg: String) -> GraphError {
    GraphError::Config(msg)
}
