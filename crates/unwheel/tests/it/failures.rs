use std::process::Command;

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;

use crate::common::TestContext;

#[test]
fn malformed_name() {
    let context = TestContext::new();
    let wheel = context.wheel("foo.whl", &[("foo.py", "", 0o644)]);
    let out = context.temp_dir.child("out");

    // The archive is expanded before the metadata is read.
    context
        .command(&wheel, out.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("error: "));
}

#[test]
fn missing_archive() {
    let context = TestContext::new();
    let wheel = context.temp_dir.child("foo-1.0-py3-none-any.whl");
    let out = context.temp_dir.child("out");

    context
        .command(wheel.path(), out.path())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Failed to read wheel archive"));

    out.assert(predicate::path::missing());
}

#[test]
fn missing_metadata() {
    let context = TestContext::new();
    let wheel = context.wheel("foo-1.0-py3-none-any.whl", &[("foo.py", "", 0o644)]);
    let out = context.temp_dir.child("out");

    context
        .command(&wheel, out.path())
        .assert()
        .code(4)
        .stderr(predicate::str::contains(
            "contains neither `foo-1.0.dist-info/metadata.json` nor `foo-1.0.dist-info/METADATA`",
        ));
}

#[test]
fn broken_metadata() {
    let context = TestContext::new();
    let wheel = context.wheel(
        "foo-1.0-py3-none-any.whl",
        &[("foo-1.0.dist-info/metadata.json", "{", 0o644)],
    );
    let out = context.temp_dir.child("out");

    context
        .command(&wheel, out.path())
        .assert()
        .code(5)
        .stderr(predicate::str::contains(
            "Failed to parse `foo-1.0.dist-info/metadata.json`",
        ))
        .stderr(predicate::str::contains("Caused by: "));
}

#[test]
fn destination_is_a_file() {
    let context = TestContext::new();
    let wheel = context.wheel(
        "foo-1.0-py3-none-any.whl",
        &[("foo-1.0.dist-info/METADATA", "Name: foo\n", 0o644)],
    );
    let out = context.temp_dir.child("out");
    out.write_str("").unwrap();

    context.command(&wheel, out.path()).assert().code(6);
}

#[test]
fn missing_marker_environment() {
    let context = TestContext::new();
    let wheel = context.wheel(
        "foo-1.0-py3-none-any.whl",
        &[("foo-1.0.dist-info/METADATA", "Name: foo\n", 0o644)],
    );
    let out = context.temp_dir.child("out");

    // The flag takes precedence over `UNWHEEL_MARKER_ENV`.
    context
        .command(&wheel, out.path())
        .arg("--marker-env")
        .arg(context.temp_dir.child("missing.json").path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Failed to load the marker environment",
        ));

    // Nothing is expanded without a marker environment.
    out.assert(predicate::path::missing());
}

#[test]
fn requires_wheel() {
    Command::new(env!("CARGO_BIN_EXE_unwheel"))
        .arg("--requirements")
        .arg("@pip//:requirements.bzl")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--whl"));
}
