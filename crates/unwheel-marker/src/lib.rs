//! PEP 508 environment markers, as attached to the `run_requires` groups of wheel metadata.
//!
//! Parsing and evaluation come from `uv-pep508`; this crate narrows them down to the question the
//! resolver asks: does a marker string apply in a given environment?

use std::str::FromStr;

use thiserror::Error;

pub use uv_normalize::ExtraName;
pub use uv_pep508::{
    MarkerEnvironment, MarkerEnvironmentBuilder, MarkerTree, Pep508Error, StringVersion,
};

/// A marker attached to a requirement group that can't be evaluated at all.
///
/// Unlike a lossy comparison (which evaluates to `false` with a warning), this means the marker
/// was not understood, so the caller has to decide what to do with the group.
#[derive(Error, Debug)]
#[error("Failed to evaluate marker `{marker}`")]
pub struct UnevaluableMarker {
    marker: String,
    #[source]
    err: Pep508Error,
}

impl UnevaluableMarker {
    pub fn new(marker: impl Into<String>, err: Pep508Error) -> Self {
        Self {
            marker: marker.into(),
            err,
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }
}

/// Decides whether an environment marker applies.
///
/// `extras` are the extras active for `extra == '...'` comparisons.
pub trait MarkerEvaluator {
    fn evaluate(&self, marker: &str, extras: &[String]) -> Result<bool, UnevaluableMarker>;
}

impl MarkerEvaluator for MarkerEnvironment {
    fn evaluate(&self, marker: &str, extras: &[String]) -> Result<bool, UnevaluableMarker> {
        let tree =
            MarkerTree::from_str(marker).map_err(|err| UnevaluableMarker::new(marker, err))?;
        // An extra that isn't a valid name can never be matched by a marker.
        let extras = extras
            .iter()
            .filter_map(|extra| ExtraName::from_str(extra).ok())
            .collect::<Vec<_>>();
        Ok(tree.evaluate(self, &extras))
    }
}

impl<T: MarkerEvaluator + ?Sized> MarkerEvaluator for &T {
    fn evaluate(&self, marker: &str, extras: &[String]) -> Result<bool, UnevaluableMarker> {
        (**self).evaluate(marker, extras)
    }
}
