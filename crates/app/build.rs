use std::env;
use std::process::Command;

fn repository_version() -> String {
    if let Ok(val) = env::var("CI_BUILD_REF") {
        if !val.is_empty() {
            return val;
        }
    }

    match Command::new("git")
        .args(["describe", "--always", "--dirty", "--long", "--tags"])
        .output()
    {
        Ok(output) if output.status.success() => String::from_utf8(output.stdout)
            .unwrap_or_else(|_| "unknown".to_string())
            .trim()
            .to_string(),
        _ => env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "unknown".to_string()),
    }
}

fn rust_version() -> String {
    match Command::new("rustc").args(["--version"]).output() {
        Ok(output) if output.status.success() => String::from_utf8(output.stdout)
            .unwrap_or_else(|_| "unknown".to_string())
            .trim()
            .to_string(),
        _ => "unknown".to_string(),
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");

    println!(
        "cargo:rustc-env=BUILD_PROFILE={}",
        env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string())
    );
    println!("cargo:rustc-env=REPO_VERSION={}", repository_version());
    println!(
        "cargo:rustc-env=BUILD_TIMESTAMP={}",
        chrono::Utc::now().to_rfc3339()
    );
    println!("cargo:rustc-env=RUST_VERSION={}", rust_version());
}
