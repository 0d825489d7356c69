use clap::ValueEnum;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum LogLevel {
    /// Completely disables logging
    Off,
    /// Only errors from the pack sizer crates
    Error,
    /// Warnings and errors from the pack sizer crates
    Warn,
    /// Info, warning and error messages from the pack sizer crates
    #[default]
    Info,
    /// Debug messages from the pack sizer crates and HTTP request traces
    Debug,
    /// Trace, debug, info, warning and error messages from all dependencies
    Trace,
}

impl LogLevel {
    pub(crate) fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "pack_sizer=error,pack_server=error,pack_config=error,pack_sizing=error,off",
            LogLevel::Warn => "pack_sizer=warn,pack_server=warn,pack_config=warn,pack_sizing=warn,off",
            LogLevel::Info => "pack_sizer=info,pack_server=info,pack_config=info,pack_sizing=info,off",
            LogLevel::Debug => {
                "pack_sizer=debug,pack_server=debug,pack_config=debug,pack_sizing=debug,tower_http=debug,off"
            }
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(super) enum LogStyle {
    /// Standard text
    Text,
    /// JSON objects
    Json,
}
