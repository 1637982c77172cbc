use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::Error;

/// The `BUILD` file describing an expanded wheel.
///
/// It declares a `pkg` library with the wheel's sources, data and base dependencies, plus one
/// library per requested extra that adds the extra's dependencies on top of `pkg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFile {
    /// The label of the file defining the `requirement` macro.
    requirements: String,
    dependencies: Vec<String>,
    extras: Vec<(String, Vec<String>)>,
}

impl BuildFile {
    pub fn new(
        requirements: impl Into<String>,
        dependencies: Vec<String>,
        extras: Vec<(String, Vec<String>)>,
    ) -> Self {
        Self {
            requirements: requirements.into(),
            dependencies,
            extras,
        }
    }

    /// Write the file as `BUILD` into `directory`, returning its path.
    pub fn write(&self, directory: &Path) -> Result<PathBuf, Error> {
        let path = directory.join("BUILD");
        debug!("Writing {}", path.display());
        fs_err::write(&path, self.to_string()).map_err(|err| Error::Write {
            path: path.clone(),
            err,
        })?;
        Ok(path)
    }
}

/// `requirement("name")` labels, joined without spaces. Extras brackets are dropped since the
/// label names the whole distribution.
fn requirement_labels(dependencies: &[String]) -> String {
    dependencies
        .iter()
        .map(|dependency| {
            let name = dependency.split('[').next().unwrap_or(dependency);
            format!("requirement(\"{name}\")")
        })
        .collect::<Vec<_>>()
        .join(",")
}

impl Display for BuildFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            r#"
package(default_visibility = ["//visibility:public"])

load("@rules_python//python:defs.bzl", "py_library")
load("{requirements}", "requirement")

py_library(
    name = "pkg",
    srcs = glob(["**/*.py"], allow_empty = True),
    data = glob(["**/*"], exclude=["**/*.py", "**/* *", "BUILD", "WORKSPACE"]),
    # This makes this directory a top-level in the python import
    # search path for anything that depends on this.
    imports = ["."],
    deps = [{dependencies}],
)
"#,
            requirements = self.requirements,
            dependencies = requirement_labels(&self.dependencies),
        )?;

        for (index, (extra, dependencies)) in self.extras.iter().enumerate() {
            if index > 0 {
                f.write_str("\n\n")?;
            }
            write!(
                f,
                r#"py_library(
    name = "{extra}",
    deps = [
        ":pkg",{deps}
    ],
)"#,
                deps = requirement_labels(dependencies),
            )?;
        }
        Ok(())
    }
}
