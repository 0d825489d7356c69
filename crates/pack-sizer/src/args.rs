use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use pack_config::Config;
use tracing::Subscriber;
use tracing_subscriber::{registry::LookupSpan, Layer};

mod log;

pub(crate) use log::LogLevel;

use self::log::LogStyle;

const DEFAULT_CONFIG_PATH: &str = "./pack-sizer.toml";

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug, Parser)]
#[command(name = "Pack Sizer", version)]
/// Calculates which packs to ship so an order is filled with the fewest items and packs
pub struct Args {
    /// IP address on which the server will listen for incoming connections. Defaults to 127.0.0.1:8080.
    #[arg(short, long)]
    pub listen_address: Option<SocketAddr>,
    /// Path to the TOML configuration file. Defaults to ./pack-sizer.toml, which may be absent.
    #[arg(long, short, env = "PACK_SIZER_CONFIG_PATH")]
    pub config: Option<PathBuf>,
    /// Set the logging level
    #[arg(long = "log", env = "PACK_SIZER_LOG")]
    pub log_level: Option<LogLevel>,
    /// Set the style of log output
    #[arg(long, env = "PACK_SIZER_LOG_STYLE", value_enum, default_value = "text")]
    log_style: LogStyle,
}

pub(crate) fn parse() -> Args {
    Args::parse()
}

impl Args {
    /// Loads the configuration. A missing file is an error only when the path was given explicitly.
    pub fn config(&self) -> anyhow::Result<Config> {
        match self.config {
            Some(ref path) => load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => load(Path::new(DEFAULT_CONFIG_PATH)),
            None => Ok(Config::default()),
        }
    }

    pub fn log_format<S>(&self) -> BoxedLayer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync,
    {
        let layer = tracing_subscriber::fmt::layer();

        match self.log_style {
            // for interactive terminals we provide colored output
            LogStyle::Text if atty::is(atty::Stream::Stdout) => layer.with_ansi(true).boxed(),
            // for server logs, colors are off
            LogStyle::Text => layer.with_ansi(false).boxed(),
            LogStyle::Json => layer.json().boxed(),
        }
    }
}

fn load(path: &Path) -> anyhow::Result<Config> {
    Config::load(path).with_context(|| format!("loading configuration from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn args(arguments: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("pack-sizer").chain(arguments.iter().copied())).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn listen_address() {
        let args = args(&["--listen-address", "0.0.0.0:9000"]);

        assert_eq!(Some("0.0.0.0:9000".parse().unwrap()), args.listen_address);
    }

    #[test]
    fn log_level_and_style() {
        let args = args(&["--log", "debug", "--log-style", "json"]);

        assert_eq!(Some(LogLevel::Debug), args.log_level);
        assert_eq!(LogStyle::Json, args.log_style);
    }

    #[test]
    fn text_logs_by_default() {
        assert_eq!(LogStyle::Text, args(&[]).log_style);
    }

    #[test]
    fn unknown_log_level() {
        let result = Args::try_parse_from(["pack-sizer", "--log", "loud"]);

        assert!(result.is_err());
    }

    #[test]
    fn explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("packs.toml");

        std::fs::write(&path, "[pack_sizes]\ndefaults = [23, 31, 53]\n").unwrap();

        let args = args(&["--config", path.to_str().unwrap()]);
        let config = args.config().unwrap();

        let sizes: Vec<u64> = config.pack_sizes.defaults.iter().map(|size| size.get()).collect();
        assert_eq!(vec![23, 31, 53], sizes);
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let args = args(&["--config", path.to_str().unwrap()]);
        let error = args.config().unwrap_err();

        assert!(error.to_string().starts_with("loading configuration from"), "{error}");
    }

    #[test]
    fn invalid_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("packs.toml");

        std::fs::write(&path, "[pack_sizes]\ndefaults = [-1]\n").unwrap();

        let args = args(&["--config", path.to_str().unwrap()]);

        assert!(args.config().is_err());
    }
}
