/// Declares all environment variables read by `unwheel`.
pub struct EnvVars;

impl EnvVars {
    /// Equivalent to the `--python` command-line argument. The Python interpreter queried for
    /// the marker environment.
    pub const UNWHEEL_PYTHON: &'static str = "UNWHEEL_PYTHON";

    /// Equivalent to the `--marker-env` command-line argument. A JSON file with the marker
    /// environment to evaluate requirement markers against, instead of querying an interpreter.
    pub const UNWHEEL_MARKER_ENV: &'static str = "UNWHEEL_MARKER_ENV";

    /// Log filter directives, e.g. `unwheel=trace`.
    pub const RUST_LOG: &'static str = "RUST_LOG";
}
