use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Show warnings only.
    #[default]
    Default,
    /// Suppress all log output.
    Quiet,
    /// Show debug messages, including the target of each event.
    Verbose,
}

impl Level {
    /// `--quiet` wins over `--verbose`.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Level::Quiet,
            (true, false) => Level::Verbose,
            (false, false) => Level::Default,
        }
    }

    /// Filter directive used when `RUST_LOG` is unset.
    pub fn default_directive(self) -> &'static str {
        match self {
            Level::Default => "git_release=warn",
            Level::Quiet => "off",
            Level::Verbose => "git_release=debug",
        }
    }
}

/// Configure `tracing` based on the given [`Level`], taking into account the `RUST_LOG` environment
/// variable.
///
/// Events are written to stderr so that stdout only carries the release output.
pub fn setup_logging(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.default_directive()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(level == Level::Verbose)
                .with_writer(std::io::stderr),
        )
        .init();
}
