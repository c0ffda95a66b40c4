//! Integration tests for the pixelmatch CLI.

use std::fs;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use image::{Rgba, RgbaImage};

fn pixelmatch_bin() -> &'static str {
    env!("CARGO_BIN_EXE_pixelmatch")
}

/// Create temp directory for test files.
fn temp_dir() -> PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("pixelmatch-test-{}-{}", std::process::id(), id));
    fs::create_dir_all(&dir).expect("Failed to create temp dir");
    dir
}

/// Write a black PNG with the given pixels painted white.
fn write_png(path: &Path, width: u32, height: u32, white: &[(u32, u32)]) {
    let mut img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
    for &(x, y) in white {
        img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
    }
    img.save(path).expect("Failed to write PNG");
}

fn run<P: AsRef<OsStr>>(args: &[P]) -> Output {
    Command::new(pixelmatch_bin())
        .args(args)
        .output()
        .expect("Failed to run pixelmatch")
}

#[test]
fn test_identical_images() {
    let dir = temp_dir();
    let a = dir.join("a.png");
    let b = dir.join("b.png");
    write_png(&a, 4, 4, &[]);
    write_png(&b, 4, 4, &[]);

    let output = run(&[&a, &b]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("There are 0 pixels different"), "{}", stdout);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_differences_still_exit_zero() {
    let dir = temp_dir();
    let a = dir.join("a.png");
    let b = dir.join("b.png");
    write_png(&a, 4, 4, &[]);
    write_png(&b, 4, 4, &[(1, 1), (2, 3)]);

    let output = run(&[&a, &b]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("There are 2 pixels different"), "{}", stdout);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_writes_diff_image() {
    let dir = temp_dir();
    let a = dir.join("a.png");
    let b = dir.join("b.png");
    let diff = dir.join("diff.png");
    write_png(&a, 4, 4, &[]);
    write_png(&b, 4, 4, &[(3, 0)]);

    let output = Command::new(pixelmatch_bin())
        .arg("--output")
        .arg(&diff)
        .args([&a, &b])
        .output()
        .expect("Failed to run pixelmatch");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());

    let written = image::open(&diff).expect("diff image").to_rgba8();
    assert_eq!(written.dimensions(), (4, 4));
    assert_eq!(written.get_pixel(3, 0), &Rgba([255, 0, 0, 255]));
    assert_eq!(written.get_pixel(0, 0), &Rgba([229, 229, 229, 255]));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_dimension_mismatch_fails() {
    let dir = temp_dir();
    let a = dir.join("a.png");
    let b = dir.join("b.png");
    write_png(&a, 10, 10, &[]);
    write_png(&b, 10, 11, &[]);

    let output = run(&[&a, &b]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("image dimensions do not match"), "{}", stderr);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_file_fails() {
    let dir = temp_dir();
    let a = dir.join("a.png");
    write_png(&a, 4, 4, &[]);

    let output = run(&[&a, &dir.join("missing.png")]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read"), "{}", stderr);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_invalid_threshold_fails() {
    let dir = temp_dir();
    let a = dir.join("a.png");
    write_png(&a, 4, 4, &[]);

    let output = Command::new(pixelmatch_bin())
        .args(["--threshold", "1.5"])
        .args([&a, &a])
        .output()
        .expect("Failed to run pixelmatch");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid option threshold"), "{}", stderr);

    fs::remove_dir_all(&dir).ok();
}
