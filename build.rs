use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn main() {
    // Build counter lives in OUT_DIR so the source tree stays untouched
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap_or_else(|_| ".".to_string()));
    let build_file = out_dir.join("BUILD_NUMBER");
    let build_number: u64 = fs::read_to_string(&build_file)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);

    let new_build = build_number + 1;
    if let Err(e) = fs::write(&build_file, new_build.to_string()) {
        println!("cargo:warning=could not record build number: {}", e);
    }

    let profile = env::var("PROFILE").unwrap_or_else(|_| "debug".to_string());
    let is_release = profile == "release";

    let version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.1.0".to_string());

    // Get git commit hash if available
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=PAWPAD_VERSION={}", version);
    println!("cargo:rustc-env=PAWPAD_BUILD={}", new_build);
    println!("cargo:rustc-env=PAWPAD_PROFILE={}", if is_release { "release" } else { "development" });
    println!("cargo:rustc-env=PAWPAD_GIT_HASH={}", git_hash);

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PROFILE");
}
