use clap::Parser;

/// Command-line arguments parser for converting Mech-Mind DLK exports to COCO format.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Directory containing the Mech-Mind DLK format dataset
    #[arg(short = 'i', long = "input", default_value = "mm_data")]
    pub input: String,

    /// Directory to write the COCO format dataset to
    #[arg(short = 'o', long = "output", default_value = "output")]
    pub output: String,

    /// Skip packaging the output directory as a zip archive
    #[arg(long = "no-archive")]
    pub no_archive: bool,
}
