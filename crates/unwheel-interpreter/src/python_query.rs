use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::Error;

/// Pick the interpreter to query when the user didn't name one: the first `python3` (or, failing
/// that, `python`) on `PATH`.
#[instrument]
pub fn find_default_python() -> Result<PathBuf, Error> {
    let python = if cfg!(windows) {
        which::which("python.exe").or_else(|_| which::which("python3.exe"))
    } else {
        which::which("python3").or_else(|_| which::which("python"))
    }
    .map_err(|_| Error::NoPythonInstalled)?;
    debug!("Using default Python interpreter: {}", python.display());
    Ok(python)
}
