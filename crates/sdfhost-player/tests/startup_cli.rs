use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const SHADER_FILES: [&str; 4] = ["sdf.wgsl", "sdf_shadow.wgsl", "raster.wgsl", "composite.wgsl"];

/// Smallest valid WebAssembly binary: magic and version, no sections.
const EMPTY_MODULE: &[u8] = b"\0asm\x01\0\0\0";

fn write_shaders(dir: &Path) {
    for name in SHADER_FILES {
        fs::write(dir.join(name), "@vertex fn vs_main() {}\n").unwrap();
    }
}

fn run(args: &[&OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sdfhost"))
        .env_remove("SDFHOST_MODULE")
        .env_remove("SDFHOST_SHADERS")
        .env("SDFHOST_LOG", "off")
        .args(args)
        .output()
        .expect("failed to run sdfhost")
}

#[test]
fn missing_shader_reports_file_and_fails() {
    let root = TempDir::new().unwrap();
    let module = root.path().join("game.wasm");
    fs::write(&module, EMPTY_MODULE).unwrap();

    let output = run(&[module.as_os_str(), OsStr::new("--shaders"), root.path().as_os_str()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: "), "stderr: {stderr}");
    assert!(stderr.contains("sdf.wgsl"), "stderr: {stderr}");
}

#[test]
fn module_without_exports_fails_before_window() {
    let root = TempDir::new().unwrap();
    write_shaders(root.path());
    let module = root.path().join("game.wasm");
    fs::write(&module, EMPTY_MODULE).unwrap();

    let output = run(&[module.as_os_str(), OsStr::new("--shaders"), root.path().as_os_str()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing export") || stderr.contains("`setup`"), "stderr: {stderr}");
}

#[test]
fn unreadable_module_fails() {
    let root = TempDir::new().unwrap();
    write_shaders(root.path());
    let module = root.path().join("absent.wasm");

    let output = run(&[module.as_os_str(), OsStr::new("--shaders"), root.path().as_os_str()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("absent.wasm"), "stderr: {stderr}");
}

#[test]
fn invalid_size_is_a_usage_error() {
    let output = run(&[OsStr::new("game.wasm"), OsStr::new("--size"), OsStr::new("wide")]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--size"));
}
