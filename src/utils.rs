use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, BufReader};
use std::path::Path;

/// Read and parse a JSON file, attaching the file path to any error.
pub fn read_and_parse_json<T>(path: &Path) -> io::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let file = fs::File::open(path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("Failed to open JSON file {}: {}", path.display(), e),
        )
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Failed to parse JSON {}: {}", path.display(), e),
        )
    })
}

/// Read image dimensions from the file header without decoding the full image.
pub fn read_image_dimensions(path: &Path) -> io::Result<(u32, u32)> {
    let size = imagesize::size(path).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Failed to read image dimensions from {}: {}",
                path.display(),
                e
            ),
        )
    })?;
    Ok((size.width as u32, size.height as u32))
}

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
                label
            ))
            .progress_chars("#>-"),
    );
    pb
}

/// Safely create output directories and return their paths
pub fn create_output_directory(path: &Path) -> io::Result<std::path::PathBuf> {
    if path.exists() {
        log::warn!(
            "Directory {:?} already exists. Deleting and recreating it.",
            path
        );
        fs::remove_dir_all(path).and_then(|_| fs::create_dir_all(path))?;
    } else {
        fs::create_dir_all(path)?;
    }
    Ok(path.to_path_buf())
}
