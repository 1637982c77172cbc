//! Determine the [`MarkerEnvironment`] that requirement markers are evaluated against.
//!
//! The environment is either queried from a Python interpreter or read from a JSON file with the
//! same shape as the interpreter's answer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use crate::markers::{detect_markers, read_markers};
pub use crate::python_query::find_default_python;

mod markers;
mod python_query;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to find a Python interpreter; neither `python3` nor `python` is in `PATH`")]
    NoPythonInstalled,
    #[error("Failed to run `{}`", python.display())]
    PythonSubcommandLaunch {
        python: PathBuf,
        #[source]
        err: io::Error,
    },
    #[error("{message}:\n--- stdout:\n{stdout}\n--- stderr:\n{stderr}\n---")]
    PythonSubcommandOutput {
        message: String,
        stdout: String,
        stderr: String,
    },
    #[error("Failed to read the marker environment from `{}`", path.display())]
    MarkersFile {
        path: PathBuf,
        #[source]
        err: io::Error,
    },
    #[error("Invalid marker environment in `{source_name}`")]
    MarkersJson {
        source_name: String,
        #[source]
        err: serde_json::Error,
    },
}
