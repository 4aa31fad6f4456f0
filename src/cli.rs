use clap::Parser;
use graph_config::{AppConfig, SamplerPreference};
use std::path::PathBuf;

/// Real-time CPU utilization graph.
#[derive(Debug, Parser)]
#[command(name = "cpugraph", version, about)]
pub struct Cli {
    /// Update interval in milliseconds (100-10000)
    #[arg(short, long, value_name = "MS")]
    pub interval: Option<u64>,

    /// Time window to display in seconds (10-3600)
    #[arg(short, long = "time-window", value_name = "SECONDS")]
    pub time_window: Option<u64>,

    /// Canvas width in pixels (at least 400)
    #[arg(short, long, value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Canvas height in pixels (at least 200)
    #[arg(long, value_name = "PIXELS")]
    pub height: Option<u32>,

    /// Start in per-core view
    #[arg(long)]
    pub per_core: bool,

    /// Maximum number of cores to display, 0 for all (0-64)
    #[arg(long, value_name = "N")]
    pub max_cores: Option<usize>,

    /// CPU sampling backend: auto, sysinfo or proc-stat
    #[arg(long, value_name = "MODE")]
    pub sampler: Option<SamplerPreference>,

    /// Config file path (defaults to $XDG_CONFIG_HOME/cpugraph/cpugraph.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Overlay flags that were given on the command line onto `config`.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(ms) = self.interval {
            config.monitor.interval_ms = ms;
        }
        if let Some(secs) = self.time_window {
            config.monitor.history_secs = secs;
        }
        if let Some(w) = self.width {
            config.window.width = w;
        }
        if let Some(h) = self.height {
            config.window.height = h;
        }
        if self.per_core {
            config.monitor.per_core = true;
        }
        if let Some(n) = self.max_cores {
            config.monitor.max_cores = n;
        }
        if let Some(pref) = self.sampler {
            config.monitor.sampler = pref;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use graph_config::validate;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cpugraph").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_flags_keep_config_values() {
        let mut config = AppConfig::default();
        config.monitor.interval_ms = 250;
        parse(&[]).apply(&mut config);
        assert_eq!(config.monitor.interval_ms, 250);
        assert_eq!(config.window, AppConfig::default().window);
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&[
            "-i", "1000", "-t", "120", "-w", "1200", "--height", "400",
            "--per-core", "--max-cores", "8", "--sampler", "proc-stat",
        ]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.monitor.interval_ms, 1000);
        assert_eq!(config.monitor.history_secs, 120);
        assert_eq!(config.window.width, 1200);
        assert_eq!(config.window.height, 400);
        assert!(config.monitor.per_core);
        assert_eq!(config.monitor.max_cores, 8);
        assert_eq!(config.monitor.sampler, SamplerPreference::ProcStat);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn out_of_range_flag_fails_validation() {
        let mut config = AppConfig::default();
        parse(&["--interval", "50"]).apply(&mut config);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn unknown_sampler_is_rejected() {
        let args = ["cpugraph", "--sampler", "magic"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn config_path_is_taken_verbatim() {
        let cli = parse(&["-c", "/tmp/custom.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/custom.toml")));
    }
}
