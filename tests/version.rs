use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn version_is_semver_like() {
    let ver = env!("CARGO_PKG_VERSION");
    assert!(ver.split('.').count() >= 2);
}

#[test]
fn version_flag_prints_package_version() {
    let mut cmd = Command::cargo_bin("webpconv").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("webpconv "))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
