//! Expand a wheel archive into a directory.
//!
//! Zip archives don't restore file modes on extraction, so members that were executable when the
//! wheel was built (console scripts, bundled binaries) get their execute bits back here, with the
//! group and other bits following the process umask.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, instrument, trace, warn};
use zip::ZipArchive;
use zip::result::ZipError;

pub use crate::umask::Umask;

mod umask;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read wheel archive `{}`", path.display())]
    ArchiveRead {
        path: PathBuf,
        #[source]
        err: ZipError,
    },
    #[error("Failed to decompress `{member}` from `{}`", path.display())]
    Decompress {
        path: PathBuf,
        member: String,
        #[source]
        err: io::Error,
    },
    #[error("Failed to write `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        err: io::Error,
    },
}

impl Error {
    /// Whether the archive itself (rather than the destination) was at fault.
    pub fn is_archive_error(&self) -> bool {
        matches!(self, Self::ArchiveRead { .. } | Self::Decompress { .. })
    }
}

/// Unzip the wheel at `path` into `destination`, creating the destination if needed.
///
/// Members whose names escape the destination are skipped. Existing files are overwritten, so
/// expanding the same wheel twice yields the same tree.
#[instrument(skip_all, fields(wheel = %path.display(), destination = %destination.display()))]
pub fn unzip(path: &Path, destination: &Path, umask: Umask) -> Result<(), Error> {
    // Open the archive before touching the destination, a missing wheel leaves no trace.
    let file = fs_err::File::open(path).map_err(|err| Error::ArchiveRead {
        path: path.to_path_buf(),
        err: ZipError::Io(err),
    })?;
    let mut archive = ZipArchive::new(file).map_err(|err| Error::ArchiveRead {
        path: path.to_path_buf(),
        err,
    })?;

    fs_err::create_dir_all(destination).map_err(|err| Error::Write {
        path: destination.to_path_buf(),
        err,
    })?;

    let mut buffer = Vec::new();
    let mut extracted = 0usize;
    for index in 0..archive.len() {
        let mut file = archive.by_index(index).map_err(|err| Error::ArchiveRead {
            path: path.to_path_buf(),
            err,
        })?;

        let Some(relative) = file.enclosed_name() else {
            warn!("Skipping unsafe member `{}`", file.name());
            continue;
        };
        let target = destination.join(relative);

        if file.name().ends_with(['/', '\\']) {
            trace!("Creating directory {}", target.display());
            fs_err::create_dir_all(&target).map_err(|err| Error::Write {
                path: target.clone(),
                err,
            })?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs_err::create_dir_all(parent).map_err(|err| Error::Write {
                path: parent.to_path_buf(),
                err,
            })?;
        }

        // Decompress fully first, so a corrupt member is reported against the archive.
        buffer.clear();
        file.read_to_end(&mut buffer)
            .map_err(|err| Error::Decompress {
                path: path.to_path_buf(),
                member: file.name().to_string(),
                err,
            })?;
        trace!("Writing {} ({} bytes)", target.display(), buffer.len());
        fs_err::write(&target, &buffer).map_err(|err| Error::Write {
            path: target.clone(),
            err,
        })?;

        #[cfg(unix)]
        if let Some(mode) = file.unix_mode() {
            restore_executable(&target, mode, umask)?;
        }
        extracted += 1;
    }

    #[cfg(not(unix))]
    let _ = umask;

    debug!("Extracted {extracted} files");
    Ok(())
}

/// Regular file type bits of `st_mode`.
#[cfg(unix)]
const S_IFMT: u32 = 0o170_000;
#[cfg(unix)]
const S_IFREG: u32 = 0o100_000;

/// Make `target` executable if the archived mode says it's an executable regular file.
#[cfg(unix)]
fn restore_executable(target: &Path, mode: u32, umask: Umask) -> Result<(), Error> {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    if mode & S_IFMT != S_IFREG || mode & 0o111 == 0 {
        return Ok(());
    }
    let executable = umask.executable_mode();
    trace!("Setting mode {executable:o} on {}", target.display());
    fs_err::set_permissions(target, Permissions::from_mode(executable)).map_err(|err| {
        Error::Write {
            path: target.to_path_buf(),
            err,
        }
    })
}
