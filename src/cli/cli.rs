use std::path::PathBuf;

use clap::Parser;

use crate::application::data::{LogLevel, PlatformArg};
use crate::config::SETTINGS_FILE_NAME;

/// Create directory structures from a `.tree` file.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Source file describing the tree (preferably with a .tree extension)
    pub source: PathBuf,

    /// Where to create the tree structure
    #[clap(default_value = ".")]
    pub destination: PathBuf,

    /// Leave files that already exist untouched
    #[clap(long, short, conflicts_with = "overwrite")]
    pub skip: bool,

    /// Truncate files that already exist
    #[clap(long, short)]
    pub overwrite: bool,

    /// Validate names against this platform instead of the host
    #[clap(long, value_enum)]
    pub platform: Option<PlatformArg>,

    /// Settings file providing defaults for the options above
    #[clap(long, short, default_value = SETTINGS_FILE_NAME)]
    pub config: PathBuf,

    /// Print messages without colors
    #[clap(long)]
    pub no_color: bool,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}
