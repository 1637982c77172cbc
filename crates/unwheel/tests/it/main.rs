//! The integration tests of the `unwheel` binary, compiled as a single test crate.

pub(crate) mod common;

mod expand;
mod failures;
