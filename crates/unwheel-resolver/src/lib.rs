//! Turn the requirement groups of a wheel into the set of distributions it depends on.
//!
//! Only names are produced: version constraints are dropped, and no attempt is made to find
//! versions that satisfy them.

use std::collections::BTreeSet;

use tracing::{instrument, trace, warn};

use unwheel_marker::MarkerEvaluator;
use unwheel_metadata::{Metadata, RequirementGroup};

/// The characters that end the distribution name in a requirement string, e.g. `bar (>=1.0)` or
/// `baz>=2`.
const NAME_TERMINATORS: [char; 6] = [' ', '<', '>', '=', '(', ')'];

/// Returns the sorted, deduplicated names of the distributions required when `extra` is requested
/// (or no extra, for `None`) in the environment described by `markers`.
///
/// A group contributes when its `extra` is exactly `extra` (an absent extra only matches `None`)
/// and its environment marker, if any, evaluates to `true`. Markers are evaluated without any
/// active extra, so `extra == '...'` inside a marker never holds; the group's `extra` field does
/// the selecting. Groups whose marker can't be evaluated are skipped with a warning.
#[instrument(skip_all, fields(extra = extra.unwrap_or_default()))]
pub fn resolve_dependencies(
    metadata: &Metadata,
    extra: Option<&str>,
    markers: &impl MarkerEvaluator,
) -> Vec<String> {
    let mut dependencies = BTreeSet::new();
    for group in metadata.run_requires() {
        if group.extra.as_deref() != extra {
            continue;
        }
        if !applies(group, markers) {
            continue;
        }
        for requirement in &group.requires {
            dependencies.insert(requirement_name(requirement).to_string());
        }
    }
    dependencies.into_iter().collect()
}

/// Whether the environment marker of `group` holds; a group without a marker always applies.
fn applies(group: &RequirementGroup, markers: &impl MarkerEvaluator) -> bool {
    let Some(environment) = group.environment.as_deref() else {
        return true;
    };
    match markers.evaluate(environment, &[]) {
        Ok(true) => true,
        Ok(false) => {
            trace!("Skipping requirements for `{environment}`");
            false
        }
        Err(err) => {
            let mut message = format!("Ignoring requirements for unsupported marker: {err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                message.push_str(&format!("\n  Caused by: {cause}"));
                source = cause.source();
            }
            warn!("{message}");
            false
        }
    }
}

/// The distribution name at the start of a requirement string, e.g. `bar` for `bar (>=1.0)`.
///
/// Extras are kept, so `bar[socks]>=1` yields `bar[socks]`.
pub fn requirement_name(requirement: &str) -> &str {
    requirement
        .split(NAME_TERMINATORS)
        .next()
        .unwrap_or(requirement)
}
