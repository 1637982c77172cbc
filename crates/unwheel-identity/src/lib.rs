//! Derive the identity of a wheel from its filename.
//!
//! See <https://packaging.python.org/en/latest/specifications/binary-distribution-format/#file-name-convention>:
//! `{distribution}-{version}(-{build tag})?-{python tag}-{abi tag}-{platform tag}.whl`.
//!
//! Only the first two components are interpreted. The remaining components (and the extension)
//! are ignored, which lets the parser accept any archive that follows the naming convention.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

use crate::split::MemchrSplitter;

mod split;

/// The characters that are not allowed in a repository name and are replaced with `_`.
const ESCAPED_CHARACTERS: [char; 3] = ['-', '.', '+'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error(
        "The archive filename `{filename}` is malformed: expected at least a distribution and a version separated by `-`"
    )]
    MalformedName { filename: String },
}

/// The distribution name and version of a wheel, as encoded in its filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WheelIdentity {
    distribution: String,
    version: String,
}

impl WheelIdentity {
    /// Create a [`WheelIdentity`] from its components.
    pub fn new(distribution: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            distribution: distribution.into(),
            version: version.into(),
        }
    }

    /// Parse the identity from an archive basename (e.g., `foo-1.2.3-py3-none-any.whl`).
    pub fn from_basename(basename: &str) -> Result<Self, IdentityError> {
        let mut splitter = MemchrSplitter::split(basename, b'-');

        let (Some(distribution), Some(version)) = (splitter.next(), splitter.next()) else {
            return Err(IdentityError::MalformedName {
                filename: basename.to_string(),
            });
        };

        Ok(Self::new(distribution, version))
    }

    /// The distribution name, i.e., the first `-`-delimited component of the filename.
    pub fn distribution(&self) -> &str {
        &self.distribution
    }

    /// The version, i.e., the second `-`-delimited component of the filename.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the canonical suffix of the build-graph repository for this package, e.g.,
    /// `pypi__google_cloud_0_27_0` for `google_cloud-0.27.0-py2.py3-none-any.whl`.
    pub fn repository_suffix(&self) -> String {
        format!("pypi__{}_{}", self.distribution, self.version).replace(ESCAPED_CHARACTERS, "_")
    }

    /// Returns the name of the `.dist-info` directory within the wheel, e.g.,
    /// `google_cloud-0.27.0.dist-info`.
    pub fn dist_info_dir(&self) -> String {
        format!("{}-{}.dist-info", self.distribution, self.version)
    }
}

impl FromStr for WheelIdentity {
    type Err = IdentityError;

    fn from_str(basename: &str) -> Result<Self, Self::Err> {
        Self::from_basename(basename)
    }
}

impl Display for WheelIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.distribution, self.version)
    }
}
