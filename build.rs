use std::process::{Command, Output};

fn git(args: &[&str]) -> Option<Output> {
    Command::new("git").args(args).output().ok()
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let hash = git(&["rev-parse", "--short", "HEAD"])
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_default();

    // Release builds report the crate version, everything else dev@<hash>.
    let on_tag = git(&["describe", "--exact-match", "--tags", "HEAD"])
        .is_some_and(|o| o.status.success());

    println!("cargo:rustc-env=GIT_HASH={hash}");
    println!("cargo:rustc-env=ON_RELEASE_TAG={on_tag}");
}
