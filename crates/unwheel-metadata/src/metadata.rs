use serde::Deserialize;

/// A group of requirements from `run_requires`, shared by an optional extra and an optional
/// environment marker.
///
/// ```json
/// {"extra": "socks", "environment": "sys_platform == 'win32'", "requires": ["win-inet-pton"]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RequirementGroup {
    pub extra: Option<String>,
    pub environment: Option<String>,
    #[serde(default)]
    pub requires: Vec<String>,
}

/// The subset of PEP 426 `metadata.json` the resolver consumes. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RichMetadata {
    pub name: Option<String>,
    #[serde(default)]
    pub run_requires: Vec<RequirementGroup>,
    #[serde(default)]
    pub extras: Vec<String>,
}

/// What can be recovered from a core metadata (`METADATA`) file: only the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatMetadata {
    pub name: String,
}

/// The metadata of a wheel, in whichever encoding the archive carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Metadata {
    Rich(RichMetadata),
    Flat(FlatMetadata),
}

impl Metadata {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Rich(metadata) => metadata.name.as_deref(),
            Self::Flat(metadata) => Some(&metadata.name),
        }
    }

    /// The extras the distribution declares; always empty for `METADATA`.
    pub fn extras(&self) -> &[String] {
        match self {
            Self::Rich(metadata) => &metadata.extras,
            Self::Flat(_) => &[],
        }
    }

    /// The runtime requirement groups; always empty for `METADATA`.
    pub fn run_requires(&self) -> &[RequirementGroup] {
        match self {
            Self::Rich(metadata) => &metadata.run_requires,
            Self::Flat(_) => &[],
        }
    }
}
