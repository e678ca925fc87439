//! Mech-Mind DLK export reading
//!
//! The DLK export is a fixed directory layout: images under
//! `modules/0/dataset`, the ROI placement under `modules/0/model/color_roi.json`
//! and one annotation record per image under `modules/0/model/data`. Records
//! are matched to images by file stem.

use glob::glob;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::types::{get_image_extensions_set, DatasetEntry, DlkRecord, RoiConfig};
use crate::utils::read_and_parse_json;

const IMAGE_SUBDIR: &str = "modules/0/dataset";
const ROI_CONFIG_FILE: &str = "modules/0/model/color_roi.json";
const ANNOTATION_SUBDIR: &str = "modules/0/model/data";

/// Verify that the input directory matches the DLK export layout.
///
/// Each missing piece produces its own error message so the user can tell a
/// wrong path from a truncated export.
pub fn check_dlk_layout(input_dir: &Path) -> io::Result<()> {
    if !input_dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Input directory not found: {}", input_dir.display()),
        ));
    }

    let image_dir = input_dir.join(IMAGE_SUBDIR);
    if !image_dir.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Image directory not found: {}", image_dir.display()),
        ));
    }

    let roi_config_path = input_dir.join(ROI_CONFIG_FILE);
    if !roi_config_path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("ROI config file not found: {}", roi_config_path.display()),
        ));
    }

    let annotation_dir = input_dir.join(ANNOTATION_SUBDIR);
    if !annotation_dir.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!(
                "Annotation directory not found: {}",
                annotation_dir.display()
            ),
        ));
    }

    info!(
        "Found Mech-Mind DLK dataset directory {}",
        input_dir.display()
    );
    Ok(())
}

/// Read the ROI placement from the DLK model configuration.
///
/// The file holds a JSON array; only the first entry is used.
pub fn read_roi_config(input_dir: &Path) -> io::Result<RoiConfig> {
    let path = input_dir.join(ROI_CONFIG_FILE);
    let configs: Vec<RoiConfig> = read_and_parse_json(&path)?;
    configs.into_iter().next().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("ROI config file {} is empty", path.display()),
        )
    })
}

/// Collect the image files of the export, sorted by path for stable enumeration.
fn collect_images(input_dir: &Path) -> io::Result<Vec<PathBuf>> {
    let image_dir = input_dir.join(IMAGE_SUBDIR);
    let extensions = get_image_extensions_set();

    let pattern = format!("{}/*", image_dir.display());
    let mut images: Vec<PathBuf> = glob(&pattern)
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Failed to read image glob pattern: {}", e),
            )
        })?
        .filter_map(|entry| entry.ok())
        .filter(|path| {
            path.extension()
                .map(|ext| extensions.contains(&ext.to_string_lossy().to_lowercase()))
                .unwrap_or(false)
        })
        .collect();

    if images.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("No image files found in {}", image_dir.display()),
        ));
    }

    images.sort();
    Ok(images)
}

/// Parse every annotation record, keyed by file stem.
fn read_annotations(input_dir: &Path) -> io::Result<HashMap<String, DlkRecord>> {
    let annotation_dir = input_dir.join(ANNOTATION_SUBDIR);

    let pattern = format!("{}/*.json", annotation_dir.display());
    let mut paths: Vec<PathBuf> = glob(&pattern)
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Failed to read annotation glob pattern: {}", e),
            )
        })?
        .filter_map(|entry| entry.ok())
        .collect();

    if paths.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("No annotation files found in {}", annotation_dir.display()),
        ));
    }

    paths.sort();
    let mut records = HashMap::new();
    for path in paths {
        let record: DlkRecord = read_and_parse_json(&path)?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Invalid annotation file name: {}", path.display()),
                )
            })?
            .to_string();
        records.insert(stem, record);
    }

    Ok(records)
}

/// Read the DLK export and pair images with their annotation records.
///
/// Images without a record are kept as entries with no annotations; records
/// without an image are logged and dropped.
pub fn read_dlk_dataset(input_dir: &Path) -> io::Result<Vec<DatasetEntry>> {
    let images = collect_images(input_dir)?;
    let mut records = read_annotations(input_dir)?;

    let mut entries = Vec::with_capacity(images.len());
    for image_path in images {
        let record = image_path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|stem| records.remove(stem));
        if record.is_none() {
            debug!(
                "No annotation record for image {}",
                image_path.display()
            );
        }
        entries.push(DatasetEntry { image_path, record });
    }

    let mut unmatched: Vec<&String> = records.keys().collect();
    unmatched.sort();
    for stem in unmatched {
        warn!("Annotation record '{}' has no matching image; skipping", stem);
    }

    Ok(entries)
}
