use std::path::PathBuf;
use std::process::ExitCode;

use anstream::eprintln;
use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use tracing::debug;

use unwheel::{BuildFile, ErrorKind, Wheel};
use unwheel_interpreter::{detect_markers, find_default_python, read_markers};
use unwheel_marker::MarkerEnvironment;
use unwheel_static::EnvVars;

use crate::logging::{Level, setup_logging};

mod logging;

/// Expand a Python wheel and write a `BUILD` file describing it.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// The wheel to expand.
    #[arg(long)]
    whl: PathBuf,

    /// The label of the file that defines the `requirement` macro, e.g.
    /// `@pip//:requirements.bzl`.
    #[arg(long)]
    requirements: String,

    /// The directory to expand the wheel into.
    #[arg(long, default_value = ".")]
    directory: PathBuf,

    /// Declare a library for the given extra; may be provided more than once.
    #[arg(long)]
    extras: Vec<String>,

    /// The Python interpreter whose environment markers are evaluated.
    ///
    /// Defaults to the first `python3` or `python` on the `PATH`.
    #[arg(long, env = EnvVars::UNWHEEL_PYTHON)]
    python: Option<PathBuf>,

    /// A JSON file with the marker environment, used instead of querying an interpreter.
    #[arg(long, env = EnvVars::UNWHEEL_MARKER_ENV)]
    marker_env: Option<PathBuf>,

    /// Do not print any output.
    #[arg(long, short, conflicts_with = "verbose")]
    quiet: bool,

    /// Use verbose output.
    #[arg(long, short, conflicts_with = "quiet")]
    verbose: bool,
}

#[derive(Copy, Clone)]
enum ExitStatus {
    /// The command succeeded.
    Success,

    /// The command failed for a reason other than the wheel or the destination.
    Error,

    /// The command failed with an error from the wheel or the destination.
    Wheel(ErrorKind),
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => Self::from(0),
            ExitStatus::Error => Self::from(1),
            ExitStatus::Wheel(ErrorKind::MalformedName) => Self::from(3),
            ExitStatus::Wheel(ErrorKind::ArchiveRead) => Self::from(4),
            ExitStatus::Wheel(ErrorKind::MetadataParse) => Self::from(5),
            ExitStatus::Wheel(ErrorKind::Write) => Self::from(6),
        }
    }
}

impl ExitStatus {
    fn from_error(err: &anyhow::Error) -> Self {
        err.chain()
            .find_map(|cause| cause.downcast_ref::<unwheel::Error>())
            .map_or(Self::Error, |err| Self::Wheel(err.kind()))
    }
}

/// Pick the marker environment: an explicit file, then an explicit interpreter, then the
/// interpreter on the `PATH`.
fn marker_environment(cli: &Cli) -> Result<MarkerEnvironment> {
    if let Some(marker_env) = &cli.marker_env {
        return read_markers(marker_env).with_context(|| {
            format!(
                "Failed to load the marker environment from `{}`",
                marker_env.display()
            )
        });
    }
    let python = match &cli.python {
        Some(python) => python.clone(),
        None => find_default_python()?,
    };
    detect_markers(&python).with_context(|| {
        format!(
            "Failed to detect the marker environment of `{}`",
            python.display()
        )
    })
}

fn write_build_file(
    wheel: &Wheel,
    cli: &Cli,
    markers: &MarkerEnvironment,
) -> Result<PathBuf, unwheel::Error> {
    let dependencies = wheel.dependencies(None, markers)?;
    let extras = cli
        .extras
        .iter()
        .map(|extra| Ok((extra.clone(), wheel.dependencies(Some(extra.as_str()), markers)?)))
        .collect::<Result<Vec<_>, unwheel::Error>>()?;
    BuildFile::new(&cli.requirements, dependencies, extras).write(&cli.directory)
}

fn run(cli: &Cli) -> Result<()> {
    let markers = marker_environment(cli)?;
    debug!(
        "Evaluating markers for {} on {}",
        markers.python_full_version().string,
        markers.sys_platform()
    );

    let wheel = Wheel::new(&cli.whl);
    wheel.expand(&cli.directory)?;
    let path = write_build_file(&wheel, cli, &markers)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Level::Quiet
    } else if cli.verbose {
        Level::Verbose
    } else {
        Level::Default
    };

    let result = setup_logging(level).and_then(|()| run(&cli));
    match result {
        Ok(()) => ExitStatus::Success.into(),
        Err(err) => {
            let status = ExitStatus::from_error(&err);
            let mut causes = err.chain();
            if let Some(error) = causes.next() {
                eprintln!("{}: {}", "error".red().bold(), error);
            }
            for err in causes {
                eprintln!("  {}: {}", "Caused by".red().bold(), err);
            }
            status.into()
        }
    }
}
