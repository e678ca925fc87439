use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::OnceLock;

// Image formats produced by DLK exports
pub const IMG_FORMATS: &[&str] = &["jpg", "jpeg", "png"];

// Precomputed HashSet of image extensions for fast lookup
pub static IMAGE_EXTENSIONS_SET: OnceLock<HashSet<String>> = OnceLock::new();

/// Get the image extensions set
pub fn get_image_extensions_set() -> &'static HashSet<String> {
    IMAGE_EXTENSIONS_SET.get_or_init(|| IMG_FORMATS.iter().map(|ext| ext.to_lowercase()).collect())
}

/// ROI placement stored alongside a DLK model, expressed as ratios of the full frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiConfig {
    pub start_x_ratio: f64,
    pub start_y_ratio: f64,
    pub width_ratio: f64,
    pub height_ratio: f64,
}

impl RoiConfig {
    /// Resolve the ratios against concrete image dimensions. Offsets truncate
    /// to whole pixels.
    pub fn to_pixel_roi(&self, width: u32, height: u32) -> PixelRoi {
        PixelRoi {
            x: (width as f64 * self.start_x_ratio).floor(),
            y: (height as f64 * self.start_y_ratio).floor(),
            width: (width as f64 * self.width_ratio).floor(),
            height: (height as f64 * self.height_ratio).floor(),
        }
    }
}

/// ROI resolved to pixel coordinates for one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRoi {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

// An OpenCV-style contour: a list of points, each point wrapped in a
// single-element array, e.g. [[[x1, y1]], [[x2, y2]], ...]
pub type Contour = Vec<Vec<Vec<f64>>>;

/// A single labeled object in a DLK annotation record.
///
/// `bndbox` is `[x, y, width, height]` relative to the ROI origin; contour
/// points are relative to the bounding-box origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DlkObject {
    pub label: String,
    pub bndbox: [f64; 4],
    pub contours: Vec<Contour>,
}

/// One DLK annotation record, parsed from `modules/0/model/data/<stem>.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DlkRecord {
    #[serde(default)]
    pub objects: Vec<DlkObject>,
}

/// An input image paired with its annotation record, ready for conversion.
/// `record` is `None` for images without an annotation file.
#[derive(Debug, Clone)]
pub struct DatasetEntry {
    pub image_path: PathBuf,
    pub record: Option<DlkRecord>,
}

// Struct to hold conversion statistics
#[derive(Debug, Default, Clone)]
pub struct ConversionStats {
    pub images_converted: usize,
    pub background_images: usize,
    pub annotations_written: usize,
    pub categories: usize,
}

impl ConversionStats {
    pub fn print_summary(&self) {
        log::info!("=== Conversion Summary ===");
        log::info!("Images converted: {}", self.images_converted);
        log::info!("Annotations written: {}", self.annotations_written);
        log::info!("Categories: {}", self.categories);
        if self.background_images > 0 {
            log::warn!(
                "Images without annotation records (kept with no annotations): {}",
                self.background_images
            );
        }
    }
}
