use std::path::Path;
use std::process::Command;

use tracing::{debug, instrument};

use unwheel_marker::MarkerEnvironment;

use crate::Error;

/// Return the [`MarkerEnvironment`] of the given Python executable.
#[instrument(skip_all, fields(python = %python.display()))]
pub fn detect_markers(python: &Path) -> Result<MarkerEnvironment, Error> {
    debug!("Detecting markers for {}", python.display());
    let output = Command::new(python)
        .args(["-c", CAPTURE_MARKERS_SCRIPT])
        .output()
        .map_err(|err| Error::PythonSubcommandLaunch {
            python: python.to_path_buf(),
            err,
        })?;

    if !output.status.success() {
        return Err(Error::PythonSubcommandOutput {
            message: format!(
                "Querying Python at `{}` failed with status {}",
                python.display(),
                output.status,
            ),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    serde_json::from_slice::<MarkerEnvironment>(&output.stdout).map_err(|err| Error::MarkersJson {
        source_name: python.display().to_string(),
        err,
    })
}

/// Read a [`MarkerEnvironment`] from a JSON file, e.g. one captured on another machine.
pub fn read_markers(path: &Path) -> Result<MarkerEnvironment, Error> {
    let contents = fs_err::read(path).map_err(|err| Error::MarkersFile {
        path: path.to_path_buf(),
        err,
    })?;
    serde_json::from_slice::<MarkerEnvironment>(&contents).map_err(|err| Error::MarkersJson {
        source_name: path.display().to_string(),
        err,
    })
}

const CAPTURE_MARKERS_SCRIPT: &str = "
import os
import sys
import platform
import json
def format_full_version(info):
    version = '{0.major}.{0.minor}.{0.micro}'.format(info)
    kind = info.releaselevel
    if kind != 'final':
        version += kind[0] + str(info.serial)
    return version

if hasattr(sys, 'implementation'):
    implementation_version = format_full_version(sys.implementation.version)
    implementation_name = sys.implementation.name
else:
    implementation_version = '0'
    implementation_name = ''
bindings = {
    'implementation_name': implementation_name,
    'implementation_version': implementation_version,
    'os_name': os.name,
    'platform_machine': platform.machine(),
    'platform_python_implementation': platform.python_implementation(),
    'platform_release': platform.release(),
    'platform_system': platform.system(),
    'platform_version': platform.version(),
    'python_full_version': platform.python_version(),
    'python_version': '.'.join(platform.python_version_tuple()[:2]),
    'sys_platform': sys.platform,
}
json.dump(bindings, sys.stdout)
sys.stdout.flush()
";
