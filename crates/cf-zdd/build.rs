use std::process::Command;

use chrono::Utc;

/// Release-profile builds report the bare package version; other builds
/// append the commit (when built from a git checkout) and the build time.
fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-env-changed=PROFILE");

    let version = env!("CARGO_PKG_VERSION");
    let release = std::env::var("PROFILE").is_ok_and(|profile| profile == "release");

    let version_string = if release {
        version.to_owned()
    } else {
        let stamp = Utc::now().format("%Y%m%d%H%M%S");
        match head_commit() {
            Some(hash) => format!("{version}+{hash}.{stamp}"),
            None => format!("{version}+{stamp}"),
        }
    };

    println!("cargo:rustc-env=CF_ZDD_VERSION={version_string}");
}

fn head_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=10", "HEAD"])
        .output()
        .ok()?;

    output
        .status
        .success()
        .then(|| String::from_utf8(output.stdout).ok())
        .flatten()
        .map(|hash| hash.trim().to_owned())
        .filter(|hash| !hash.is_empty())
}
