#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

/// Pseudo-random pixels: large after encoding, so they exceed small budgets.
pub fn noisy_image(width: u32, height: u32, seed: u32) -> RgbImage {
    let mut state = seed | 1;
    RgbImage::from_fn(width, height, |_, _| {
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xFF) as u8
        };
        Rgb([next(), next(), next()])
    })
}

pub fn write_jpeg(path: &Path, width: u32, height: u32) -> PathBuf {
    DynamicImage::ImageRgb8(noisy_image(width, height, width ^ height))
        .save_with_format(path, image::ImageFormat::Jpeg)
        .unwrap();
    path.to_path_buf()
}

/// PNG whose left half is fully transparent and right half opaque noise.
pub fn write_transparent_png(path: &Path, width: u32, height: u32) -> PathBuf {
    let noise = noisy_image(width, height, 0x9E37_79B9);
    RgbaImage::from_fn(width, height, |x, y| {
        if x < width / 2 {
            Rgba([0, 0, 0, 0])
        } else {
            let [r, g, b] = noise.get_pixel(x, y).0;
            Rgba([r, g, b, 255])
        }
    })
    .save_with_format(path, image::ImageFormat::Png)
    .unwrap();
    path.to_path_buf()
}

pub fn write_text(path: &Path, contents: &[u8]) -> PathBuf {
    File::create(path).unwrap().write_all(contents).unwrap();
    path.to_path_buf()
}

/// A small gallery: one JPEG and one PNG at the root, one JPEG nested, and
/// a text file that must be ignored.
pub fn create_gallery(root: &Path) -> Vec<PathBuf> {
    let nested = root.join("albums").join("2024");
    fs::create_dir_all(&nested).unwrap();

    write_text(&root.join("notes.txt"), b"not an image");
    vec![
        write_jpeg(&root.join("cover.jpg"), 96, 64),
        write_transparent_png(&root.join("logo.png"), 64, 32),
        write_jpeg(&nested.join("beach.JPEG"), 80, 80),
    ]
}

pub fn snapshot(paths: &[PathBuf]) -> Vec<(Vec<u8>, std::time::SystemTime)> {
    paths
        .iter()
        .map(|p| (fs::read(p).unwrap(), fs::metadata(p).unwrap().modified().unwrap()))
        .collect()
}
