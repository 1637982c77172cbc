use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_tree::HierarchicalLayer;
use tracing_tree::time::Uptime;

use unwheel_static::EnvVars;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Level {
    /// Show warnings, such as markers that couldn't be evaluated.
    #[default]
    Default,
    /// Suppress all output except errors.
    Quiet,
    /// Show all messages, including debug messages.
    Verbose,
}

/// Configure `tracing` based on the given [`Level`], taking into account the `RUST_LOG` environment
/// variable.
///
/// The [`Level`] picks the default filters, which `RUST_LOG` overrides. [`Level::Verbose`] renders
/// the span tree with uptimes and targets, the other levels print bare messages.
pub(crate) fn setup_logging(level: Level) -> anyhow::Result<()> {
    match level {
        Level::Default | Level::Quiet => {
            let default = if level == Level::Quiet {
                LevelFilter::OFF
            } else {
                LevelFilter::WARN
            };
            let filter = EnvFilter::builder()
                .with_default_directive(default.into())
                .with_env_var(EnvVars::RUST_LOG)
                .from_env_lossy();

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .without_time()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        Level::Verbose => {
            // Show `DEBUG` messages from the unwheel crates, but allow `RUST_LOG` to override.
            let filter = match EnvFilter::builder()
                .with_env_var(EnvVars::RUST_LOG)
                .try_from_env()
            {
                Ok(filter) => filter,
                Err(_) => EnvFilter::try_new("unwheel=debug")?,
            };

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    HierarchicalLayer::default()
                        .with_targets(true)
                        .with_timer(Uptime::default())
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
    Ok(())
}
