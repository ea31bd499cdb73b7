//! Command-line argument parsing.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{ConfigError, DashConfig};

pub fn build_cli() -> Command {
    Command::new("fleetdash")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal status board for a waste-collection fleet")
        .long_about(
            "fleetdash polls the fleet server for truck, dumpster and map snapshots and \
             shows each on its own screen. Screens refresh on a fixed interval; press r \
             to refresh the active screen immediately.",
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .short('u')
                .help("Server URL that relative screen URLs are joined onto"),
        )
        .arg(
            Arg::new("interval-ms")
                .long("interval-ms")
                .short('i')
                .help("Poll interval in milliseconds for screens without their own")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("timeout-ms")
                .long("timeout-ms")
                .help("Per-request timeout in milliseconds")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("screen")
                .long("screen")
                .short('s')
                .help("Mount only this screen (repeatable, keeps the given order)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML config file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write logs here instead of the cache directory")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("once")
                .long("once")
                .help("Fetch every screen once, print it and exit")
                .action(ArgAction::SetTrue),
        )
}

/// Parsed command-line flags. Every field is an override; `None` keeps
/// whatever the config file and environment set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub base_url: Option<String>,
    pub interval_ms: Option<u64>,
    pub timeout_ms: Option<u64>,
    pub screens: Vec<String>,
    pub config: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub once: bool,
}

impl Args {
    /// Parse the process arguments, exiting with usage on error.
    pub fn parse() -> Self {
        Self::from_matches(&build_cli().get_matches())
    }

    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = build_cli().try_get_matches_from(args)?;
        Ok(Self::from_matches(&matches))
    }

    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            base_url: matches.get_one::<String>("base-url").cloned(),
            interval_ms: matches.get_one::<u64>("interval-ms").copied(),
            timeout_ms: matches.get_one::<u64>("timeout-ms").copied(),
            screens: matches
                .get_many::<String>("screen")
                .map(|ids| ids.cloned().collect())
                .unwrap_or_default(),
            config: matches.get_one::<PathBuf>("config").cloned(),
            log_file: matches.get_one::<PathBuf>("log-file").cloned(),
            once: matches.get_flag("once"),
        }
    }

    /// Layer these flags over `config`, the highest-precedence step.
    pub fn apply(&self, mut config: DashConfig) -> Result<DashConfig, ConfigError> {
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.as_str());
        }
        if let Some(ms) = self.interval_ms {
            config = config.with_interval(Duration::from_millis(ms));
        }
        if let Some(ms) = self.timeout_ms {
            config = config.with_http_timeout(Duration::from_millis(ms));
        }
        if let Some(path) = &self.log_file {
            config = config.with_log_file(path.as_path());
        }
        config.select_screens(&self.screens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["fleetdash"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]), Args::default());
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&[
            "--base-url",
            "http://pi:5000",
            "-i",
            "500",
            "--timeout-ms",
            "2000",
            "--screen",
            "map",
            "-s",
            "trucks",
            "--config",
            "/tmp/fleet.toml",
            "--log-file",
            "/tmp/fleet.log",
            "--once",
        ]);
        assert_eq!(args.base_url.as_deref(), Some("http://pi:5000"));
        assert_eq!(args.interval_ms, Some(500));
        assert_eq!(args.timeout_ms, Some(2000));
        assert_eq!(args.screens, vec!["map", "trucks"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/fleet.toml")));
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/fleet.log")));
        assert!(args.once);
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(Args::try_parse_from(["fleetdash", "--interval-ms", "0"]).is_err());
    }

    #[test]
    fn test_non_numeric_interval_rejected() {
        assert!(Args::try_parse_from(["fleetdash", "--interval-ms", "fast"]).is_err());
    }

    #[test]
    fn test_apply_overrides_config() {
        let config = parse(&["--base-url", "http://pi:5000", "-i", "250", "-s", "dumpsters"])
            .apply(DashConfig::default())
            .unwrap();
        assert_eq!(config.base_url, "http://pi:5000");
        assert_eq!(config.interval, Duration::from_millis(250));
        assert_eq!(config.screen_ids(), vec!["dumpsters"]);
    }

    #[test]
    fn test_apply_timeout_and_log_file() {
        let config = parse(&["--timeout-ms", "1500", "--log-file", "/tmp/fleet.log"])
            .apply(DashConfig::default())
            .unwrap();
        assert_eq!(config.http_timeout, Some(Duration::from_millis(1500)));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/fleet.log")));
    }

    #[test]
    fn test_apply_unknown_screen() {
        let err = parse(&["--screen", "bins"])
            .apply(DashConfig::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownScreen { .. }));
    }

    #[test]
    fn test_cli_is_well_formed() {
        build_cli().debug_assert();
    }
}
