use std::path::PathBuf;

use maketree::builder::BuildPolicy;
use maketree::validator::PlatformPolicy;

use crate::cli::Cli;
use crate::config::Settings;

/// Everything a run needs, after merging flags, settings, and defaults.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub policy: BuildPolicy,
    pub platform: PlatformPolicy,
    pub no_color: bool,
}

impl RuntimeConfig {
    pub fn resolve(cli: Cli, settings: Settings) -> Self {
        let policy = if cli.skip || cli.overwrite {
            BuildPolicy::from_flags(cli.skip, cli.overwrite)
        } else {
            settings.conflict.unwrap_or_default()
        };

        let platform = cli
            .platform
            .map(PlatformPolicy::from)
            .or(settings.platform)
            .unwrap_or_else(PlatformPolicy::host);

        Self {
            source: cli.source,
            destination: cli.destination,
            policy,
            platform,
            no_color: cli.no_color,
        }
    }
}
