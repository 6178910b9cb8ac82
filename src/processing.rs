use crate::artifact::ImageArtifact;
use crate::constants::{
    DEFAULT_MAX_SIZE_MIB, DEFAULT_QUALITY, LADDER_FLOOR_QUALITY, LIBDEFLATER_HIGH_LEVEL,
    MAX_QUALITY, MIN_QUALITY, PNG_OPTIMIZATION_PRESET, QUALITY_LADDER_LEN, QUALITY_LADDER_TAIL,
    TEMP_FILE_SUFFIX,
};
use crate::error::{CompressionError, Result};
use crate::formats::OutputFormat;
use crate::utils::{calculate_compression_ratio, format_file_size, mib_to_bytes};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use oxipng::{Deflaters, Options, StripChunks};
use std::fs::{self, File};
use std::io::{self, BufWriter, Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionOptions {
    pub quality: u8,
    pub max_size_bytes: u64,
}

impl CompressionOptions {
    pub fn new(quality: Option<u8>, max_size_mib: Option<f64>) -> Result<Self> {
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(CompressionError::InvalidQuality(quality));
        }

        let max_size_mib = max_size_mib.unwrap_or(DEFAULT_MAX_SIZE_MIB);
        if !max_size_mib.is_finite() || max_size_mib <= 0.0 {
            return Err(CompressionError::InvalidMaxSize(max_size_mib));
        }

        Ok(Self {
            quality,
            max_size_bytes: mib_to_bytes(max_size_mib),
        })
    }

    /// True when a file of `size` bytes is already within budget.
    pub fn fits(&self, size: u64) -> bool {
        size <= self.max_size_bytes
    }
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            max_size_bytes: mib_to_bytes(DEFAULT_MAX_SIZE_MIB),
        }
    }
}

/// What the compressor ended up doing with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionAction {
    /// Already within budget; bytes left as they were.
    Skipped,
    PngOptimized,
    JpegReencoded,
}

/// One encode attempt on the quality ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityProbe {
    pub quality: u8,
    pub size: u64,
}

/// Result of successfully processing one file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub original_size: u64,
    pub compressed_size: u64,
    pub dimensions: (u32, u32),
    /// Accepted JPEG quality; `None` for PNG output and skipped files.
    pub quality: Option<u8>,
    pub action: CompressionAction,
    /// Every JPEG probe in the order it ran.
    pub probes: Vec<QualityProbe>,
}

impl CompressionReport {
    pub fn compression_ratio(&self) -> f64 {
        calculate_compression_ratio(self.original_size, self.compressed_size)
    }
}

/// The full probe order: the requested quality followed by the fixed tail.
///
/// No deduplication: a requested quality that is already on the tail is
/// probed twice.
pub fn quality_ladder(requested: u8) -> [u8; QUALITY_LADDER_LEN] {
    let mut ladder = [requested; QUALITY_LADDER_LEN];
    ladder[1..].copy_from_slice(&QUALITY_LADDER_TAIL);
    ladder
}

/// Shrinks one image file below `options.max_size_bytes` without resizing it.
///
/// The result is written to `output`, or back over `input` when no output is
/// given. On error nothing has been written, apart from the case where the
/// final write itself fails part way.
pub fn compress_file(
    input: &Path,
    output: Option<&Path>,
    options: &CompressionOptions,
) -> Result<CompressionReport> {
    let output = output.unwrap_or(input);

    let mut artifact = ImageArtifact::decode(input)?;
    artifact.apply_orientation();
    artifact.normalize_color();

    let original_size = fs::metadata(input)?.len();
    let dimensions = artifact.original_dimensions();
    crate::verbose!(
        "{:?}: {}x{} {:?}, {}",
        input,
        dimensions.0,
        dimensions.1,
        artifact.color(),
        format_file_size(original_size)
    );

    let mut report = CompressionReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        original_size,
        compressed_size: original_size,
        dimensions,
        quality: None,
        action: CompressionAction::Skipped,
        probes: Vec::new(),
    };

    if options.fits(original_size) {
        if output != input {
            ensure_parent_dir(output)?;
            fs::copy(input, output)?;
        }
        return Ok(report);
    }

    ensure_parent_dir(output)?;

    let format = OutputFormat::for_input(input);
    crate::verbose!("{:?}: over budget, re-encoding as {}", input, format);
    match format {
        OutputFormat::Png => {
            let optimized = encode_optimized_png(artifact.image(), input)?;
            write_bytes(output, &optimized)?;
            report.action = CompressionAction::PngOptimized;
        }
        OutputFormat::Jpeg => {
            let (accepted, probes) = probe_quality_ladder(artifact.image(), output, options)?;
            write_from_temp(&accepted.temp, output)?;
            report.quality = Some(accepted.quality);
            report.probes = probes;
            report.action = CompressionAction::JpegReencoded;
            // accepted.temp is removed when it goes out of scope here
        }
    }

    report.compressed_size = fs::metadata(output)?.len();
    Ok(report)
}

struct JpegProbe {
    quality: u8,
    size: u64,
    temp: NamedTempFile,
}

/// Walks the quality ladder until a probe fits the budget or the floor
/// quality is reached. Rejected probes are deleted as soon as the next one
/// replaces them.
fn probe_quality_ladder(
    img: &DynamicImage,
    output: &Path,
    options: &CompressionOptions,
) -> Result<(JpegProbe, Vec<QualityProbe>)> {
    let ladder = quality_ladder(options.quality);
    let (upper, last) = ladder.split_at(ladder.len() - 1);
    let floor = last[0];
    let mut probes = Vec::with_capacity(ladder.len());

    for &quality in upper {
        let probe = encode_jpeg_probe(img, quality, output)?;
        probes.push(QualityProbe {
            quality,
            size: probe.size,
        });
        crate::verbose!("quality {} -> {}", quality, format_file_size(probe.size));

        if options.fits(probe.size) || quality == LADDER_FLOOR_QUALITY {
            return Ok((probe, probes));
        }
    }

    let probe = encode_jpeg_probe(img, floor, output)?;
    probes.push(QualityProbe {
        quality: floor,
        size: probe.size,
    });
    crate::verbose!("quality {} -> {} (floor)", floor, format_file_size(probe.size));
    Ok((probe, probes))
}

fn encode_jpeg_probe(img: &DynamicImage, quality: u8, output: &Path) -> Result<JpegProbe> {
    let prefix = format!(
        ".{}.",
        output
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    );
    let mut temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(TEMP_FILE_SUFFIX)
        .tempfile_in(parent_dir(output))?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
        img.write_with_encoder(encoder)
            .map_err(|source| CompressionError::Encode {
                path: output.to_path_buf(),
                source,
            })?;
        writer.flush()?;
    }

    let size = temp.as_file().metadata()?.len();
    Ok(JpegProbe {
        quality,
        size,
        temp,
    })
}

fn encode_optimized_png(img: &DynamicImage, input: &Path) -> Result<Vec<u8>> {
    let mut encoded = Vec::new();
    img.write_to(&mut Cursor::new(&mut encoded), OutputFormat::Png.to_image_format())
        .map_err(|source| CompressionError::Encode {
            path: input.to_path_buf(),
            source,
        })?;

    let mut oxipng_options = Options::from_preset(PNG_OPTIMIZATION_PRESET);
    oxipng_options.deflate = Deflaters::Libdeflater {
        compression: LIBDEFLATER_HIGH_LEVEL,
    };
    oxipng_options.strip = StripChunks::Safe;

    oxipng::optimize_from_memory(&encoded, &oxipng_options)
        .map_err(|e| CompressionError::PngOptimization(e.to_string()))
}

/// Truncates and rewrites `output`, keeping its permissions when it exists.
fn write_bytes(output: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(output)?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(())
}

fn write_from_temp(temp: &NamedTempFile, output: &Path) -> Result<()> {
    let mut source = temp.reopen()?;
    let mut file = File::create(output)?;
    io::copy(&mut source, &mut file)?;
    file.flush()?;
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    let parent = parent_dir(path);
    fs::create_dir_all(parent)
        .map_err(|_| CompressionError::DirectoryCreationFailed(parent.to_path_buf()))
}
