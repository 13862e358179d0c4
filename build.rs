use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use chrono::Utc;

// Runs a command and returns its trimmed stdout, or "unknown" when the
// command is missing or fails (e.g. building from a source tarball).
fn run_command(args: &[&str]) -> String {
    Command::new(args[0])
        .args(&args[1..])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    let out_dir = env::var("OUT_DIR").expect("cargo always sets OUT_DIR");
    let dest_path = PathBuf::from(out_dir).join("version.rs");

    let git_hash = run_command(&["git", "log", "-1", "--pretty=format:%H"]);
    let git_branch = run_command(&["git", "branch", "--show-current"]);
    let git_commit_date = run_command(&["git", "log", "-1", "--pretty=format:%as"]);
    let git_is_dirty = match run_command(&["git", "status", "--porcelain"]).as_str() {
        "unknown" => "clean",
        _ => "dirty",
    };
    let build_date = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

    fs::write(
        &dest_path,
        format!(
            r#"
#[allow(dead_code)]
pub const GIT_HASH: &str = "{}";
#[allow(dead_code)]
pub const GIT_BRANCH: &str = "{}";
#[allow(dead_code)]
pub const GIT_COMMIT_DATE: &str = "{}";
#[allow(dead_code)]
pub const GIT_IS_DIRTY: &str = "{}";
#[allow(dead_code)]
pub const BUILD_DATE: &str = "{}";
"#,
            git_hash, git_branch, git_commit_date, git_is_dirty, build_date
        ),
    )
    .expect("Failed to write version.rs");

    println!("cargo:rerun-if-changed=build.rs");
}
