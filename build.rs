use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    let git_hash = command_stdout("git", &["rev-parse", "--short", "HEAD"])
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    emit("HASH", &git_hash);

    let git_status = match command_stdout("git", &["status", "--porcelain"]) {
        Some(changes) if changes.is_empty() => "clean",
        Some(_) => "dirty",
        None => "unknown",
    };
    emit("STATUS", git_status);

    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    emit("TIMESTAMP", &timestamp);

    emit(
        "TARGET",
        &env::var("TARGET").unwrap_or_else(|_| "unknown-target".to_string()),
    );
    emit(
        "PROFILE",
        &env::var("PROFILE").unwrap_or_else(|_| "unknown-profile".to_string()),
    );

    let rustc = command_stdout("rustc", &["--version"]).unwrap_or_else(|| "unknown".to_string());
    emit("RUSTC", &rustc);
}

fn emit(suffix: &str, value: &str) {
    println!("cargo:rustc-env=EXPENSE_FORECAST_BUILD_{suffix}={value}");
}

fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
