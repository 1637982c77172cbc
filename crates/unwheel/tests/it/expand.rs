use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use indoc::indoc;
use predicates::prelude::*;

use unwheel_static::EnvVars;

use crate::common::TestContext;

const METADATA_JSON: &str = indoc! {r#"
    {
        "name": "foo",
        "version": "1.0",
        "extras": ["socks"],
        "run_requires": [
            {"requires": ["requests (>=2.0)", "six"]},
            {"extra": "socks", "requires": ["PySocks[win] (>=1.5.6)"]},
            {"environment": "sys_platform == 'win32'", "requires": ["pywin32"]},
            {"environment": "python_version >= '3.8'", "requires": ["typing-extensions>=4"]}
        ]
    }
"#};

#[test]
fn expand_and_describe() {
    let context = TestContext::new();
    let wheel = context.wheel(
        "foo-1.0-py3-none-any.whl",
        &[
            ("foo/__init__.py", "", 0o644),
            ("foo-1.0.data/scripts/foo", "#!python\n", 0o755),
            ("foo-1.0.dist-info/metadata.json", METADATA_JSON, 0o644),
        ],
    );
    let out = context.temp_dir.child("out");

    context
        .command(&wheel, out.path())
        .arg("--extras")
        .arg("socks")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    out.child("foo/__init__.py").assert(predicate::path::is_file());
    out.child("foo-1.0.data/scripts/foo").assert("#!python\n");

    let build = fs_err::read_to_string(out.child("BUILD").path()).unwrap();
    assert!(
        build.contains(
            r#"deps = [requirement("requests"),requirement("six"),requirement("typing-extensions")],"#
        ),
        "{build}"
    );
    assert!(
        build.contains(indoc! {r#"
            py_library(
                name = "socks",
                deps = [
                    ":pkg",requirement("PySocks")
                ],
            )"#}),
        "{build}"
    );
    assert!(!build.contains("pywin32"), "{build}");
}

#[cfg(unix)]
#[test]
fn restores_executables() {
    use std::os::unix::fs::PermissionsExt;

    let context = TestContext::new();
    let wheel = context.wheel(
        "foo-1.0-py3-none-any.whl",
        &[
            ("foo/__init__.py", "", 0o644),
            ("foo-1.0.data/scripts/foo", "#!python\n", 0o755),
            ("foo-1.0.dist-info/METADATA", "Name: foo\n", 0o644),
        ],
    );
    let out = context.temp_dir.child("out");

    // Twice, to check that expanding over an earlier expansion is stable.
    for _ in 0..2 {
        context.command(&wheel, out.path()).assert().success();

        let script = fs_err::metadata(out.child("foo-1.0.data/scripts/foo").path()).unwrap();
        assert_eq!(script.permissions().mode() & 0o111, 0o111);
        let module = fs_err::metadata(out.child("foo/__init__.py").path()).unwrap();
        assert_eq!(module.permissions().mode() & 0o111, 0);
    }
}

#[test]
fn flat_metadata_has_no_dependencies() {
    let context = TestContext::new();
    let wheel = context.wheel(
        "foo-1.0-py3-none-any.whl",
        &[(
            "foo-1.0.dist-info/METADATA",
            "Metadata-Version: 2.1\nName: foo\nRequires-Dist: bar\n",
            0o644,
        )],
    );
    let out = context.temp_dir.child("out");

    context.command(&wheel, out.path()).assert().success();

    out.child("BUILD")
        .assert(predicate::str::contains("deps = [],"))
        .assert(predicate::str::contains("load(\"@pip//:requirements.bzl\", \"requirement\")"));
}

#[test]
fn unevaluable_marker_is_skipped() {
    let context = TestContext::new();
    let wheel = context.wheel(
        "foo-1.0-py3-none-any.whl",
        &[(
            "foo-1.0.dist-info/metadata.json",
            r#"{"run_requires": [
                {"requires": ["six"]},
                {"environment": "sys_platform = 'linux'", "requires": ["broken"]}
            ]}"#,
            0o644,
        )],
    );
    let out = context.temp_dir.child("out");

    context
        .command(&wheel, out.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Failed to evaluate marker `sys_platform = 'linux'`",
        ));

    out.child("BUILD")
        .assert(predicate::str::contains(r#"deps = [requirement("six")],"#));
}

#[test]
fn quiet_suppresses_warnings() {
    let context = TestContext::new();
    let wheel = context.wheel(
        "foo-1.0-py3-none-any.whl",
        &[(
            "foo-1.0.dist-info/metadata.json",
            r#"{"run_requires": [{"environment": "os_name ==", "requires": ["broken"]}]}"#,
            0o644,
        )],
    );
    let out = context.temp_dir.child("out");

    context
        .command(&wheel, out.path())
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn log_filter_from_environment() {
    let context = TestContext::new();
    let wheel = context.wheel(
        "foo-1.0-py3-none-any.whl",
        &[("foo-1.0.dist-info/metadata.json", METADATA_JSON, 0o644)],
    );
    let out = context.temp_dir.child("out");

    context
        .command(&wheel, out.path())
        .env(EnvVars::RUST_LOG, "unwheel=debug")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Evaluating markers for 3.12.1 on linux",
        ));

    // Without `RUST_LOG`, only warnings are shown.
    context
        .command(&wheel, context.temp_dir.child("quiet").path())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
