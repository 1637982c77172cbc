use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use unwheel_static::EnvVars;

/// A Linux marker environment, so results don't depend on the Python on the test machine.
pub(crate) const MARKER_ENV: &str = r#"{
    "implementation_name": "cpython",
    "implementation_version": "3.12.1",
    "os_name": "posix",
    "platform_machine": "x86_64",
    "platform_python_implementation": "CPython",
    "platform_release": "6.5.0",
    "platform_system": "Linux",
    "platform_version": "",
    "python_full_version": "3.12.1",
    "python_version": "3.12",
    "sys_platform": "linux"
}"#;

pub(crate) struct TestContext {
    pub(crate) temp_dir: TempDir,
    pub(crate) marker_env: PathBuf,
}

impl TestContext {
    pub(crate) fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let marker_env = temp_dir.child("markers.json");
        marker_env.write_str(MARKER_ENV).unwrap();
        Self {
            marker_env: marker_env.to_path_buf(),
            temp_dir,
        }
    }

    /// Build a wheel from `(name, contents, unix mode)` members.
    pub(crate) fn wheel(&self, filename: &str, members: &[(&str, &str, u32)]) -> PathBuf {
        let path = self.temp_dir.child(filename).to_path_buf();
        let mut writer = ZipWriter::new(fs_err::File::create(&path).unwrap());
        for (name, contents, mode) in members {
            let options = SimpleFileOptions::default().unix_permissions(*mode);
            writer.start_file(*name, options).unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    /// The `unwheel` command expanding `wheel` into `directory`.
    pub(crate) fn command(&self, wheel: &Path, directory: &Path) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_unwheel"));
        command
            .arg("--whl")
            .arg(wheel)
            .arg("--requirements")
            .arg("@pip//:requirements.bzl")
            .arg("--directory")
            .arg(directory)
            .env(EnvVars::UNWHEEL_MARKER_ENV, &self.marker_env)
            .env_remove(EnvVars::RUST_LOG)
            .env_remove(EnvVars::UNWHEEL_PYTHON)
            .env("NO_COLOR", "1")
            .current_dir(self.temp_dir.path());
        command
    }
}
