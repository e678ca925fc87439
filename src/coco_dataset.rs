//! COCO dataset assembly pipeline
//!
//! Walks the paired DLK entries in a single pass, copies the images into the
//! output tree and accumulates the three COCO tables in memory before
//! serializing them once at the end of the run.

use log::info;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use crate::coco::{CategoryRegistry, CocoFile, Image};
use crate::conversion::convert_record;
use crate::dlk_dataset::{read_dlk_dataset, read_roi_config};
use crate::types::ConversionStats;
use crate::utils::{create_output_directory, create_progress_bar, read_image_dimensions};

/// Annotation file name expected by the Superb AI COCO importer.
pub const INSTANCES_FILE: &str = "instances_train2017.json";

/// Struct to hold the paths to the output directories for the COCO dataset
#[derive(Debug)]
pub struct CocoOutputDirs {
    pub images_dir: PathBuf,
    pub annotations_dir: PathBuf,
}

/// Set up the directory structure for COCO dataset output.
///
/// An existing output directory is deleted and recreated.
pub fn setup_coco_output_directories(output_dir: &Path) -> io::Result<CocoOutputDirs> {
    create_output_directory(output_dir)?;
    let images_dir = create_output_directory(&output_dir.join("data"))?;
    let annotations_dir = create_output_directory(&output_dir.join("annotations"))?;

    Ok(CocoOutputDirs {
        images_dir,
        annotations_dir,
    })
}

/// Main COCO dataset processing pipeline
pub fn process_coco_dataset(
    input_dir: &Path,
    output_dirs: &CocoOutputDirs,
) -> Result<ConversionStats, Box<dyn std::error::Error>> {
    let roi_config = read_roi_config(input_dir)?;
    let entries = read_dlk_dataset(input_dir)?;
    info!("Read {} dataset entries.", entries.len());

    let mut coco = CocoFile::default();
    let mut categories = CategoryRegistry::default();
    let mut next_annotation_id: u32 = 1;
    let mut stats = ConversionStats::default();

    let pb = create_progress_bar(entries.len() as u64, "Convert");
    for (index, entry) in entries.iter().enumerate() {
        let image_id = (index + 1) as u32;
        let (width, height) = read_image_dimensions(&entry.image_path)?;
        let file_name = copy_image_for_coco(&entry.image_path, &output_dirs.images_dir)?;
        coco.images.push(Image::new(image_id, file_name, width, height));

        match &entry.record {
            Some(record) => {
                let annotations = convert_record(
                    record,
                    image_id,
                    width,
                    height,
                    &roi_config,
                    &mut categories,
                    &mut next_annotation_id,
                )
                .map_err(|e| format!("{}: {}", entry.image_path.display(), e))?;
                stats.annotations_written += annotations.len();
                coco.annotations.extend(annotations);
                stats.images_converted += 1;
            }
            None => stats.background_images += 1,
        }
        pb.inc(1);
    }
    pb.finish_with_message("Conversion complete");

    coco.categories = categories.into_categories();
    stats.categories = coco.categories.len();

    write_coco_file(&coco, &output_dirs.annotations_dir.join(INSTANCES_FILE))?;
    Ok(stats)
}

/// Copy an input image into the output data directory, returning the file
/// name recorded in the COCO images table.
fn copy_image_for_coco(image_path: &Path, images_dir: &Path) -> io::Result<String> {
    let file_name = image_path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid file name: {:?}", image_path),
            )
        })?;
    let sanitized = sanitize_filename::sanitize(file_name);
    fs::copy(image_path, images_dir.join(&sanitized))?;
    Ok(sanitized)
}

/// Serialize the accumulated COCO tables to one pretty-printed JSON file.
fn write_coco_file(coco: &CocoFile, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, coco)?;
    info!("Wrote {}", path.display());
    Ok(())
}
