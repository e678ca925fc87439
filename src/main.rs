use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

use mm2superbai::{
    archive_dataset, check_dlk_layout, process_coco_dataset, setup_coco_output_directories, Args,
};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let input_dir = PathBuf::from(&args.input);
    let output_dir = PathBuf::from(&args.output);

    if let Err(e) = check_dlk_layout(&input_dir) {
        error!("{}", e);
        std::process::exit(1);
    }

    info!("Starting Mech-Mind DLK to COCO conversion process...");

    let output_dirs = match setup_coco_output_directories(&output_dir) {
        Ok(dirs) => dirs,
        Err(e) => {
            error!("Failed to set up output directories: {}", e);
            std::process::exit(1);
        }
    };

    let stats = match process_coco_dataset(&input_dir, &output_dirs) {
        Ok(stats) => stats,
        Err(e) => {
            error!("Failed to convert dataset: {}", e);
            std::process::exit(1);
        }
    };
    stats.print_summary();

    if !args.no_archive {
        match archive_dataset(&output_dir) {
            Ok(zip_path) => info!("Packaged dataset at {}", zip_path.display()),
            Err(e) => {
                error!("Failed to package dataset: {}", e);
                std::process::exit(1);
            }
        }
    }

    info!("COCO conversion process completed successfully.");
}
