//! Zip packaging of the converted dataset for upload.

use glob::glob;
use log::info;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Package the output directory as `<output>.zip` next to it.
///
/// Entries are prefixed with the directory's base name so the archive
/// unpacks into a single folder.
pub fn archive_dataset(output_dir: &Path) -> io::Result<PathBuf> {
    let base_name = output_dir
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid output directory name: {:?}", output_dir),
            )
        })?
        .to_string();
    let zip_path = output_dir.with_extension("zip");

    let file = File::create(&zip_path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let pattern = format!("{}/**/*", output_dir.display());
    for entry in glob(&pattern).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Failed to read archive glob pattern: {}", e),
        )
    })? {
        let path = entry.map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(output_dir).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("File {} is outside the output directory: {}", path.display(), e),
            )
        })?;
        let entry_name = format!(
            "{}/{}",
            base_name,
            relative.to_string_lossy().replace('\\', "/")
        );

        writer
            .start_file(entry_name, options)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let mut source = File::open(&path)?;
        io::copy(&mut source, &mut writer)?;
    }

    writer
        .finish()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    info!("Wrote archive {}", zip_path.display());
    Ok(zip_path)
}
