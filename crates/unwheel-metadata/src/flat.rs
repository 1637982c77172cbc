use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::metadata::FlatMetadata;

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Name: (.*)").expect("the name regex is valid"));

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlatMetadataError {
    #[error("No `Name:` field found")]
    MissingName,
}

/// Extract the distribution name from core metadata text.
///
/// The first `Name: ` anywhere in the text wins; the value runs to the end of that line.
pub fn parse_flat_metadata(text: &str) -> Result<FlatMetadata, FlatMetadataError> {
    let captures = NAME
        .captures(text)
        .ok_or(FlatMetadataError::MissingName)?;
    let name = &captures[1];
    let name = name.strip_suffix('\r').unwrap_or(name);
    Ok(FlatMetadata {
        name: name.to_string(),
    })
}
