mod common;

use assert_cmd::Command;
use assert_fs::prelude::*;
use common::{create_gallery, create_temp_directory, snapshot, write_jpeg, write_text};
use image::GenericImageView;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn squeeze() -> Command {
    Command::cargo_bin("gallery-squeeze").unwrap()
}

fn leftover_temp_files(root: &Path) -> Vec<String> {
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".temp"))
        .collect()
}

#[test]
fn test_cli_help() {
    squeeze()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--gallery-dir"))
        .stdout(predicate::str::contains("--max-size"));
}

#[test]
fn test_missing_gallery_directory_fails() {
    let temp_dir = create_temp_directory();
    let missing = temp_dir.path().join("images").join("gallery");

    squeeze()
        .arg("--gallery-dir")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Directory not found"));

    assert!(!missing.exists());
}

#[test]
fn test_default_gallery_dir_missing_fails() {
    let temp_dir = create_temp_directory();
    squeeze().current_dir(temp_dir.path()).assert().failure();
}

#[test]
fn test_gallery_without_images_fails() {
    let temp_dir = assert_fs::TempDir::new().unwrap();
    temp_dir.child("readme.txt").write_str("hello").unwrap();
    temp_dir.child("scan.tif").write_binary(b"II*\0").unwrap();

    squeeze()
        .arg("--gallery-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No image files found"));

    temp_dir.child("readme.txt").assert("hello");
}

#[test]
fn test_invalid_quality_rejected() {
    let temp_dir = create_temp_directory();
    create_gallery(temp_dir.path());

    for quality in ["0", "101", "abc"] {
        squeeze()
            .arg("--gallery-dir")
            .arg(temp_dir.path())
            .args(["--quality", quality])
            .assert()
            .failure();
    }
}

#[test]
fn test_dry_run_touches_nothing() {
    let temp_dir = create_temp_directory();
    let images = create_gallery(temp_dir.path());
    let before = snapshot(&images);

    squeeze()
        .arg("--gallery-dir")
        .arg(temp_dir.path())
        .args(["--max-size", "0.001", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("needs compression"))
        .stdout(predicate::str::contains("found 3 image files"));

    assert_eq!(snapshot(&images), before);
}

#[test]
fn test_small_files_are_left_alone() {
    let temp_dir = create_temp_directory();
    let images = create_gallery(temp_dir.path());
    let before = snapshot(&images);

    squeeze()
        .arg("--gallery-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("already small enough"))
        .stdout(predicate::str::contains("3/3 files processed successfully"));

    let after = snapshot(&images);
    for ((bytes_before, _), (bytes_after, _)) in before.iter().zip(after.iter()) {
        assert_eq!(bytes_before, bytes_after);
    }
}

#[test]
fn test_oversized_files_are_compressed_in_place() {
    let temp_dir = create_temp_directory();
    let images = create_gallery(temp_dir.path());
    let dims_before: Vec<(u32, u32)> = images
        .iter()
        .map(|p| image::open(p).unwrap().dimensions())
        .collect();

    squeeze()
        .arg("--gallery-dir")
        .arg(temp_dir.path())
        .args(["--max-size", "0.0001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quality: 35"))
        .stdout(predicate::str::contains("3/3 files processed successfully"))
        .stdout(predicate::str::contains("Saved to").not());

    for (path, dims) in images.iter().zip(dims_before) {
        let reopened = image::open(path).unwrap();
        assert_eq!(reopened.dimensions(), dims, "{:?}", path);
        assert!(!reopened.color().has_alpha(), "{:?}", path);
    }

    let png_bytes = fs::read(temp_dir.path().join("logo.png")).unwrap();
    assert_eq!(image::guess_format(&png_bytes).unwrap(), image::ImageFormat::Png);
    assert!(leftover_temp_files(temp_dir.path()).is_empty());
    assert_eq!(
        fs::read(temp_dir.path().join("notes.txt")).unwrap(),
        b"not an image"
    );
}

#[test]
fn test_corrupt_file_does_not_stop_the_run() {
    let temp_dir = create_temp_directory();
    let broken = write_text(&temp_dir.path().join("broken.jpg"), b"garbage");
    let good = write_jpeg(&temp_dir.path().join("good.jpg"), 64, 64);

    squeeze()
        .arg("--gallery-dir")
        .arg(temp_dir.path())
        .args(["--max-size", "0.0001"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to process broken.jpg"))
        .stdout(predicate::str::contains("1/2 files processed successfully"))
        .stdout(predicate::str::contains("% across successful files"));

    assert_eq!(fs::read(&broken).unwrap(), b"garbage");
    assert_eq!(image::open(&good).unwrap().dimensions(), (64, 64));
}

#[test]
fn test_output_dir_keeps_originals() {
    let temp_dir = create_temp_directory();
    let gallery = temp_dir.path().join("gallery");
    fs::create_dir(&gallery).unwrap();
    let images = create_gallery(&gallery);
    let before = snapshot(&images);
    let out = temp_dir.path().join("squeezed");

    squeeze()
        .arg("--gallery-dir")
        .arg(&gallery)
        .args(["--max-size", "0.0001", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to: "))
        .stdout(predicate::str::contains("squeezed"));

    assert_eq!(snapshot(&images), before);
    for image_path in &images {
        let relative = image_path.strip_prefix(&gallery).unwrap();
        let written = out.join(relative);
        assert!(written.is_file(), "missing {:?}", written);
        assert_eq!(
            image::open(&written).unwrap().dimensions(),
            image::open(image_path).unwrap().dimensions()
        );
    }
}

#[test]
fn test_quiet_mode_prints_nothing_on_success() {
    let temp_dir = create_temp_directory();
    create_gallery(temp_dir.path());

    squeeze()
        .arg("--gallery-dir")
        .arg(temp_dir.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
