//! Locate and decode the metadata in a wheel's `.dist-info` directory.
//!
//! Two encodings are supported:
//! - `metadata.json` (PEP 426), which carries the requirement groups and extras, and
//! - `METADATA` (core metadata), from which only the distribution name is read.
//!
//! `metadata.json` is preferred; `METADATA` is only consulted if the archive has no
//! `metadata.json`.

use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, instrument};
use zip::ZipArchive;
use zip::result::ZipError;

use unwheel_identity::WheelIdentity;

pub use crate::flat::{FlatMetadataError, parse_flat_metadata};
pub use crate::metadata::{FlatMetadata, Metadata, RequirementGroup, RichMetadata};

mod flat;
mod metadata;

/// The PEP 426 metadata file.
const METADATA_JSON: &str = "metadata.json";
/// The core metadata file.
const METADATA: &str = "METADATA";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read wheel archive `{}`", path.display())]
    ArchiveRead {
        path: PathBuf,
        #[source]
        err: ZipError,
    },
    #[error("Failed to read `{member}` from `{}`", path.display())]
    MemberRead {
        path: PathBuf,
        member: String,
        #[source]
        err: ZipError,
    },
    #[error("Failed to decompress `{member}` from `{}`", path.display())]
    Io {
        path: PathBuf,
        member: String,
        #[source]
        err: io::Error,
    },
    #[error(
        "The wheel `{}` contains neither `{dist_info}/metadata.json` nor `{dist_info}/METADATA`",
        path.display()
    )]
    MissingMetadata { path: PathBuf, dist_info: String },
    #[error("Failed to parse `{member}` from `{}`", path.display())]
    MetadataParse {
        path: PathBuf,
        member: String,
        #[source]
        err: MetadataParseError,
    },
    #[error("No `Name:` field in `{member}` from `{}`", path.display())]
    MissingName { path: PathBuf, member: String },
}

impl Error {
    /// Whether the metadata was found but couldn't be decoded.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::MetadataParse { .. } | Self::MissingName { .. })
    }
}

#[derive(Debug, Error)]
pub enum MetadataParseError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Read the metadata of the wheel at `path`.
///
/// Looks for `{dist_info}/metadata.json` first and falls back to `{dist_info}/METADATA` when the
/// archive has no such member. Any other failure to read `metadata.json` is an error.
#[instrument(skip_all, fields(wheel = %path.display()))]
pub fn read_metadata(path: &Path, identity: &WheelIdentity) -> Result<Metadata, Error> {
    let file = fs_err::File::open(path).map_err(|err| Error::ArchiveRead {
        path: path.to_path_buf(),
        err: ZipError::Io(err),
    })?;
    let mut archive = ZipArchive::new(file).map_err(|err| Error::ArchiveRead {
        path: path.to_path_buf(),
        err,
    })?;
    read_archive_metadata(&mut archive, path, identity)
}

/// Like [`read_metadata`], for an archive that's already open. `path` is only used in errors.
pub fn read_archive_metadata<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &Path,
    identity: &WheelIdentity,
) -> Result<Metadata, Error> {
    let dist_info = identity.dist_info_dir();

    let json_member = format!("{dist_info}/{METADATA_JSON}");
    if let Some(contents) = read_member(archive, path, &json_member)? {
        let metadata = serde_json::from_slice::<RichMetadata>(&contents).map_err(|err| {
            Error::MetadataParse {
                path: path.to_path_buf(),
                member: json_member.clone(),
                err: MetadataParseError::Json(err),
            }
        })?;
        return Ok(Metadata::Rich(metadata));
    }

    let flat_member = format!("{dist_info}/{METADATA}");
    debug!("No `{json_member}` in wheel, falling back to `{flat_member}`");
    let Some(contents) = read_member(archive, path, &flat_member)? else {
        return Err(Error::MissingMetadata {
            path: path.to_path_buf(),
            dist_info,
        });
    };
    let text = String::from_utf8(contents).map_err(|err| Error::MetadataParse {
        path: path.to_path_buf(),
        member: flat_member.clone(),
        err: MetadataParseError::Utf8(err),
    })?;
    let metadata = parse_flat_metadata(&text).map_err(|_| Error::MissingName {
        path: path.to_path_buf(),
        member: flat_member,
    })?;
    Ok(Metadata::Flat(metadata))
}

/// Read a member into memory, returning `None` if the archive has no member by that name.
fn read_member<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &Path,
    member: &str,
) -> Result<Option<Vec<u8>>, Error> {
    let mut file = match archive.by_name(member) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(err) => {
            return Err(Error::MemberRead {
                path: path.to_path_buf(),
                member: member.to_string(),
                err,
            });
        }
    };
    let mut contents = Vec::with_capacity(usize::try_from(file.size()).unwrap_or(0));
    file.read_to_end(&mut contents).map_err(|err| Error::Io {
        path: path.to_path_buf(),
        member: member.to_string(),
        err,
    })?;
    Ok(Some(contents))
}
