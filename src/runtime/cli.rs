use std::path::PathBuf;

use clap::Parser;

/// Play a folder of albums, one track after another.
#[derive(Debug, Parser)]
#[command(name = "albumdeck", version, about)]
pub struct Cli {
    /// Directory holding one sub-directory per album. Falls back to
    /// `library.root` from the config, then the current directory.
    pub music_dir: Option<PathBuf>,

    /// Album (directory name) to select at startup.
    #[arg(long)]
    pub album: Option<String>,

    /// Print the catalog and exit instead of starting the player.
    #[arg(long)]
    pub list: bool,
}
