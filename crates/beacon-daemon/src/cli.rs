use std::path::PathBuf;

use clap::Parser;

use beacon_core::config::CliOverrides;

#[derive(Debug, Parser)]
#[command(name = "beacond")]
#[command(version, about = "Uptime monitor and incident engine", long_about = None)]
pub struct Cli {
    /// Path to beacon.toml
    #[arg(short, long, env = "BEACON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog of components and monitors to load at startup
    #[arg(long, env = "BEACON_CATALOG")]
    pub catalog: PathBuf,

    /// Run a single tick, print its report as JSON, and exit
    #[arg(long)]
    pub once: bool,

    /// Print the status page JSON after each tick
    #[arg(long)]
    pub status_page: bool,

    #[arg(long)]
    pub tick_interval_secs: Option<u64>,

    #[arg(long)]
    pub max_concurrent_checks: Option<usize>,

    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            tick_interval_secs: self.tick_interval_secs,
            max_concurrent_checks: self.max_concurrent_checks,
            log_level: self.log_level.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_become_overrides() {
        let cli = Cli::parse_from([
            "beacond",
            "--catalog",
            "catalog.toml",
            "--once",
            "--tick-interval-secs",
            "15",
            "--log-level",
            "debug",
        ]);
        assert!(cli.once);
        let overrides = cli.overrides();
        assert_eq!(overrides.tick_interval_secs, Some(15));
        assert_eq!(overrides.max_concurrent_checks, None);
        assert_eq!(overrides.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn catalog_is_required() {
        assert!(Cli::try_parse_from(["beacond", "--once"]).is_err());
    }
}
