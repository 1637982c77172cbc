//! Expand a Python wheel and describe it for a build graph.
//!
//! [`Wheel`] ties the pipeline together: the identity comes from the filename, the metadata and
//! dependencies from the `.dist-info` directory, and [`Wheel::expand`] unpacks the archive.
//! [`BuildFile`] renders the `BUILD` file the `unwheel` binary writes next to the expanded files.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::instrument;

use unwheel_extract::{Umask, unzip};
use unwheel_identity::{IdentityError, WheelIdentity};
use unwheel_marker::MarkerEvaluator;
use unwheel_metadata::{Metadata, read_metadata};
use unwheel_resolver::resolve_dependencies;

pub use crate::build_file::BuildFile;

mod build_file;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Metadata(#[from] unwheel_metadata::Error),
    #[error(transparent)]
    Extract(#[from] unwheel_extract::Error),
    #[error("Failed to write `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}

/// What went wrong, independent of which step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The filename doesn't look like `{distribution}-{version}-...`.
    MalformedName,
    /// The archive is missing, unreadable, or has no metadata.
    ArchiveRead,
    /// The metadata exists but couldn't be decoded.
    MetadataParse,
    /// The destination couldn't be written.
    Write,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Identity(_) => ErrorKind::MalformedName,
            Self::Metadata(err) if err.is_parse_error() => ErrorKind::MetadataParse,
            Self::Metadata(_) => ErrorKind::ArchiveRead,
            Self::Extract(err) if err.is_archive_error() => ErrorKind::ArchiveRead,
            Self::Extract(_) | Self::Write { .. } => ErrorKind::Write,
        }
    }
}

/// A wheel archive on disk.
///
/// Nothing is cached: every accessor goes back to the filename or the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wheel {
    path: PathBuf,
}

impl Wheel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The final component of the path, e.g. `foo-1.0-py3-none-any.whl`.
    pub fn basename(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default()
    }

    pub fn identity(&self) -> Result<WheelIdentity, Error> {
        Ok(WheelIdentity::from_basename(&self.basename())?)
    }

    pub fn distribution(&self) -> Result<String, Error> {
        Ok(self.identity()?.distribution().to_string())
    }

    pub fn version(&self) -> Result<String, Error> {
        Ok(self.identity()?.version().to_string())
    }

    /// A name unique to the distribution and version, usable as a repository name.
    pub fn repository_suffix(&self) -> Result<String, Error> {
        Ok(self.identity()?.repository_suffix())
    }

    pub fn metadata(&self) -> Result<Metadata, Error> {
        let identity = self.identity()?;
        Ok(read_metadata(&self.path, &identity)?)
    }

    /// The distribution name declared in the metadata, which may differ in case from the
    /// filename.
    pub fn name(&self) -> Result<Option<String>, Error> {
        Ok(self.metadata()?.name().map(ToString::to_string))
    }

    pub fn extras(&self) -> Result<Vec<String>, Error> {
        Ok(self.metadata()?.extras().to_vec())
    }

    /// The sorted names of the runtime dependencies, for the base package (`extra` is `None`) or
    /// for a single extra.
    pub fn dependencies(
        &self,
        extra: Option<&str>,
        evaluator: &impl MarkerEvaluator,
    ) -> Result<Vec<String>, Error> {
        let metadata = self.metadata()?;
        Ok(resolve_dependencies(&metadata, extra, evaluator))
    }

    /// Unpack the wheel into `directory`, with the current umask deciding the mode of
    /// executables.
    pub fn expand(&self, directory: &Path) -> Result<(), Error> {
        self.expand_with_umask(directory, Umask::current())
    }

    #[instrument(skip_all, fields(wheel = %self.path.display()))]
    pub fn expand_with_umask(&self, directory: &Path, umask: Umask) -> Result<(), Error> {
        Ok(unzip(&self.path, directory, umask)?)
    }
}
